// crates/streamcut-core/src/helpers/aspect.rs
//
// Player layout is sized from the asset's poster image, not from the video
// stream: some platform renditions misreport display aspect until several
// segments in, while the poster is correct immediately. The probe delivers
// raw pixel dimensions; these helpers turn them into layout decisions.

/// Layout ratio assumed until a poster probe succeeds.
pub const DEFAULT_RATIO: f32 = 16.0 / 9.0;

/// Width/height ratio from poster dimensions. Falls back to the default
/// when either dimension is zero (a failed or truncated probe).
pub fn ratio_from_poster(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        return DEFAULT_RATIO;
    }
    width as f32 / height as f32
}

/// Human label for the nearest well-known ratio, shown on library cards.
/// Within 2% counts as a match; anything else reads as `W:H` reduced.
pub fn ratio_label(width: u32, height: u32) -> String {
    const KNOWN: &[(f32, &str)] = &[
        (16.0 / 9.0, "16:9"),
        (9.0 / 16.0, "9:16"),
        (1.0,        "1:1"),
        (4.0 / 3.0,  "4:3"),
        (4.0 / 5.0,  "4:5"),
        (21.0 / 9.0, "21:9"),
    ];

    let r = ratio_from_poster(width, height);
    for &(known, label) in KNOWN {
        if (r - known).abs() / known < 0.02 {
            return label.to_string();
        }
    }

    let d = gcd(width.max(1), height.max(1));
    format!("{}:{}", width / d, height / d)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_fall_back_to_default() {
        assert_eq!(ratio_from_poster(0, 720), DEFAULT_RATIO);
        assert_eq!(ratio_from_poster(1280, 0), DEFAULT_RATIO);
    }

    #[test]
    fn common_posters_get_named_labels() {
        assert_eq!(ratio_label(1280, 720), "16:9");
        assert_eq!(ratio_label(1080, 1920), "9:16");
        assert_eq!(ratio_label(640, 640), "1:1");
        assert_eq!(ratio_label(800, 1000), "4:5");
    }

    #[test]
    fn near_misses_within_tolerance_still_match() {
        // 1920x1084 is 16:9 content with two rows of encoder padding.
        assert_eq!(ratio_label(1920, 1084), "16:9");
    }

    #[test]
    fn odd_ratios_reduce() {
        assert_eq!(ratio_label(500, 300), "5:3");
    }
}
