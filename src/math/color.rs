/// Parses a "#rrggbb" hex color into linear-ish [0,1] RGB.
/// Returns None for anything that isn't six hex digits after '#'.
pub fn parse_hex(s: &str) -> Option<[f32; 3]> {
    let digits = s.strip_prefix('#')?;
    // Length is in bytes; non-ASCII text could pass the length check and
    // then split a char on the slice boundaries below
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;

    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Two-point color interpolation, t clamped to [0,1]
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_white() {
        let rgb = parse_hex("#ffffff").unwrap();
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!((rgb[1] - 1.0).abs() < 0.01);
        assert!((rgb[2] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_hex_default_background() {
        let rgb = parse_hex("#f0f0f0").unwrap();
        assert!((rgb[0] - 240.0 / 255.0).abs() < 0.001);
        assert_eq!(rgb[0], rgb[1]);
        assert_eq!(rgb[1], rgb[2]);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("f0f0f0").is_none());
        assert!(parse_hex("#f0f").is_none());
        assert!(parse_hex("#zzzzzz").is_none());
        assert!(parse_hex("").is_none());
    }

    #[test]
    fn test_parse_hex_rejects_non_ascii_mid_edit() {
        // Two euro signs are six bytes, so the length check alone would
        // let them through and the digit slices would split a char
        assert!(parse_hex("#\u{20ac}\u{20ac}").is_none());
        assert!(parse_hex("#ff\u{e9}0\u{9}").is_none());
        assert!(parse_hex("#\u{444}\u{444}\u{444}").is_none());
    }

    #[test]
    fn test_lerp_rgb_endpoints() {
        let a = [0.0, 0.5, 1.0];
        let b = [1.0, 0.0, 0.0];
        assert_eq!(lerp_rgb(a, b, 0.0), a);
        assert_eq!(lerp_rgb(a, b, 1.0), b);
    }

    #[test]
    fn test_lerp_rgb_midpoint() {
        let mid = lerp_rgb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0.5);
        assert!((mid[0] - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_lerp_rgb_clamps_t() {
        let a = [0.2, 0.2, 0.2];
        let b = [0.8, 0.8, 0.8];
        assert_eq!(lerp_rgb(a, b, -1.0), a);
        assert_eq!(lerp_rgb(a, b, 2.0), b);
    }
}
