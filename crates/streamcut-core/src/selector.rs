// crates/streamcut-core/src/selector.rs
//
// The clip range selector. Three independent sources report a time:
//
//   1. the playing media source (its current position),
//   2. the user's mark-in / mark-out buttons,
//   3. the on-screen range widget (drag handles), which reports a whole
//      (start, end) pair at once.
//
// Instead of three sets of synchronized mutable fields, the selection is a
// single value plus one transition function. Callers feed it a RangeEvent
// and get back the side effect to run, as data. The caller must record the
// state change before executing the effect — a rapid double-mark then
// cannot observe a seek racing ahead of the marker write.

use serde::{Deserialize, Serialize};

/// User-chosen sub-range of an asset's timeline, in seconds.
///
/// Both fields are independent: marking an end before a start is allowed,
/// and a start past the end is stored verbatim. The service rejects ranges
/// it cannot cut; the selector does not second-guess the user mid-edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub start_time: Option<f64>,
    pub end_time:   Option<f64>,
}

/// One input to the selector, from whichever time source fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeEvent {
    /// Mark-in pressed at the given playback position.
    MarkStart(f64),
    /// Mark-out pressed at the given playback position.
    MarkEnd(f64),
    /// The range widget reported a new pair. Overwrites both fields
    /// exactly as received — no clamping, no reordering.
    WidgetUpdate { start: f64, end: f64 },
    /// Reset both markers.
    Clear,
}

/// Side effect requested by a transition, executed by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeEffect {
    /// Move the media source to this position (never negative).
    SeekTo(f64),
}

impl RangeSelection {
    /// Apply one event and return the effect to run afterwards, if any.
    ///
    /// Marking seeks the source to the marked point so the user sees the
    /// frame they just chose. Widget updates never seek — the handles are
    /// already where the user is looking.
    pub fn apply(&mut self, event: RangeEvent) -> Option<RangeEffect> {
        match event {
            RangeEvent::MarkStart(pos) => {
                self.start_time = Some(pos);
                Some(RangeEffect::SeekTo(pos.max(0.0)))
            }
            RangeEvent::MarkEnd(pos) => {
                self.end_time = Some(pos);
                Some(RangeEffect::SeekTo(pos.max(0.0)))
            }
            RangeEvent::WidgetUpdate { start, end } => {
                self.start_time = Some(start);
                self.end_time   = Some(end);
                None
            }
            RangeEvent::Clear => {
                self.start_time = None;
                self.end_time   = None;
                None
            }
        }
    }

    /// Both markers set — the selection can be submitted.
    pub fn is_complete(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    /// The (start, end) pair when complete, in the order the user set them.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_start_stores_and_seeks() {
        let mut sel = RangeSelection::default();
        let fx = sel.apply(RangeEvent::MarkStart(5.0));
        assert_eq!(sel.start_time, Some(5.0));
        assert_eq!(sel.end_time, None);
        assert_eq!(fx, Some(RangeEffect::SeekTo(5.0)));
    }

    #[test]
    fn mark_end_stores_and_seeks() {
        let mut sel = RangeSelection::default();
        let fx = sel.apply(RangeEvent::MarkEnd(12.0));
        assert_eq!(sel.end_time, Some(12.0));
        assert_eq!(fx, Some(RangeEffect::SeekTo(12.0)));
    }

    #[test]
    fn inverted_range_is_kept_verbatim() {
        // Start marked after end: both values stay present, in the order
        // the user set them. Nothing reorders or rejects.
        let mut sel = RangeSelection::default();
        sel.apply(RangeEvent::MarkEnd(4.0));
        sel.apply(RangeEvent::MarkStart(9.0));
        assert_eq!(sel.bounds(), Some((9.0, 4.0)));
    }

    #[test]
    fn widget_update_overwrites_both_fields_exactly() {
        let mut sel = RangeSelection::default();
        sel.apply(RangeEvent::MarkStart(1.0));
        sel.apply(RangeEvent::MarkEnd(2.0));

        let fx = sel.apply(RangeEvent::WidgetUpdate { start: 3.2, end: 9.7 });
        assert_eq!(fx, None);
        assert_eq!(sel.start_time, Some(3.2));
        assert_eq!(sel.end_time, Some(9.7));
    }

    #[test]
    fn widget_update_does_not_validate() {
        let mut sel = RangeSelection::default();
        sel.apply(RangeEvent::WidgetUpdate { start: 9.7, end: 3.2 });
        assert_eq!(sel.bounds(), Some((9.7, 3.2)));
    }

    #[test]
    fn negative_mark_seeks_to_zero_but_stores_raw() {
        // Positions come from the media source; a slightly-negative value
        // (seen during source swaps) must not produce a negative seek.
        let mut sel = RangeSelection::default();
        let fx = sel.apply(RangeEvent::MarkStart(-0.04));
        assert_eq!(sel.start_time, Some(-0.04));
        assert_eq!(fx, Some(RangeEffect::SeekTo(0.0)));
    }

    #[test]
    fn clear_resets_both() {
        let mut sel = RangeSelection::default();
        sel.apply(RangeEvent::WidgetUpdate { start: 1.0, end: 2.0 });
        assert_eq!(sel.apply(RangeEvent::Clear), None);
        assert!(!sel.is_complete());
        assert_eq!(sel.bounds(), None);
    }

    #[test]
    fn incomplete_selection_has_no_bounds() {
        let mut sel = RangeSelection::default();
        sel.apply(RangeEvent::MarkStart(2.0));
        assert!(!sel.is_complete());
        assert_eq!(sel.bounds(), None);
    }
}
