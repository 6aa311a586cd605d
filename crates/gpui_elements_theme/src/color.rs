use gpui::Rgba;

/// Parses a CSS hex color (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`).
///
/// Theme values that are not hex colors resolve to `None`, and consumers
/// fall back to their defaults.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let hex = value.trim().strip_prefix('#')?;
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(hex, 0)?, nibble(hex, 1)?, nibble(hex, 2)?, 255),
        4 => (
            nibble(hex, 0)?,
            nibble(hex, 1)?,
            nibble(hex, 2)?,
            nibble(hex, 3)?,
        ),
        6 => (byte(hex, 0)?, byte(hex, 1)?, byte(hex, 2)?, 255),
        8 => (byte(hex, 0)?, byte(hex, 1)?, byte(hex, 2)?, byte(hex, 3)?),
        _ => return None,
    };
    Some(Rgba {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: a as f32 / 255.0,
    })
}

fn byte(hex: &str, index: usize) -> Option<u8> {
    u8::from_str_radix(hex.get(index * 2..index * 2 + 2)?, 16).ok()
}

fn nibble(hex: &str, index: usize) -> Option<u8> {
    let digit = u8::from_str_radix(hex.get(index..index + 1)?, 16).ok()?;
    Some(digit << 4 | digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let color = parse_color("#ff8000").unwrap();
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_parse_eight_digit_hex_carries_alpha() {
        let color = parse_color("#00000080").unwrap();
        assert!((color.a - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_short_forms() {
        let color = parse_color("#fff").unwrap();
        assert_eq!((color.r, color.g, color.b, color.a), (1.0, 1.0, 1.0, 1.0));
        let color = parse_color("#f008").unwrap();
        assert_eq!(color.r, 1.0);
        assert!((color.a - 136.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert!(parse_color("  #ffffff ").is_some());
    }

    #[test]
    fn test_parse_rejects_non_hex_values() {
        assert!(parse_color("red").is_none());
        assert!(parse_color("#ggg").is_none());
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("").is_none());
    }
}
