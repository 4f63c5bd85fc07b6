// crates/streamcut-core/src/helpers/time.rs
//
// Shared time-formatting utilities used by streamcut-ui.

/// Format a marker or playhead position as `M:SS.t` (tenths of a second).
///
/// Used in the trim strip readouts, where sub-second precision matters but
/// frame numbers would be noise — the service cuts on its own keyframes.
///
/// ```
/// use streamcut_core::helpers::time::format_marker;
/// assert_eq!(format_marker(0.0),   "0:00.0");
/// assert_eq!(format_marker(9.74),  "0:09.7");
/// assert_eq!(format_marker(61.5),  "1:01.5");
/// ```
pub fn format_marker(s: f64) -> String {
    let s = s.max(0.0);
    let m      = (s / 60.0) as u64;
    let sec    = (s % 60.0) as u64;
    let tenths = ((s * 10.0) as u64) % 10;
    format!("{m}:{sec:02}.{tenths}")
}

/// Format a duration in seconds as a compact human-readable string.
///
/// Used on library cards where sub-second precision is unnecessary.
///
/// | Range    | Format    | Example   |
/// |----------|-----------|-----------|
/// | ≥ 3600 s | `H:MM:SS` | `1:04:35` |
/// | ≥ 60 s   | `M:SS`    | `3:07`    |
/// | < 60 s   | `S.Xs`    | `4.2s`    |
///
/// ```
/// use streamcut_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),    "4.2s");
/// assert_eq!(format_duration(187.0),  "3:07");
/// assert_eq!(format_duration(3875.0), "1:04:35");
/// ```
pub fn format_duration(secs: f64) -> String {
    if secs >= 3600.0 {
        format!(
            "{}:{:02}:{:02}",
            secs as u64 / 3600,
            (secs as u64 % 3600) / 60,
            secs as u64 % 60,
        )
    } else if secs >= 60.0 {
        format!("{}:{:02}", secs as u64 / 60, secs as u64 % 60)
    } else {
        format!("{secs:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_clamps_negative_to_zero() {
        assert_eq!(format_marker(-3.0), "0:00.0");
    }

    #[test]
    fn marker_tenths_truncate_not_round() {
        // 9.78 shows as .7 — truncation keeps the readout monotonic while
        // the playhead advances.
        assert_eq!(format_marker(9.78), "0:09.7");
    }

    #[test]
    fn duration_boundaries() {
        assert_eq!(format_duration(59.9),   "59.9s");
        assert_eq!(format_duration(60.0),   "1:00");
        assert_eq!(format_duration(3600.0), "1:00:00");
    }
}
