//! Menu Color Palette
//!
//! Fixed set of colors used by menu widgets, with hand-picked "light"
//! siblings for selection feedback. Lightening is a table lookup, not a
//! computed brightness transform: several base colors have no visually
//! pleasant computed tint, so each pair was chosen by eye.

use sdl2::pixels::Color;

pub const WHITE: Color = Color::RGBA(255, 255, 255, 255);
pub const GRAY: Color = Color::RGBA(128, 128, 128, 255);
pub const BLACK: Color = Color::RGBA(0, 0, 0, 255);
pub const YELLOW: Color = Color::RGBA(255, 255, 0, 255);
pub const RED: Color = Color::RGBA(255, 0, 0, 255);
pub const GREEN: Color = Color::RGBA(0, 255, 0, 255);
pub const BLUE: Color = Color::RGBA(0, 0, 255, 255);

// Half-transparent variants, used for overlay-style widgets.
pub const TRANS_WHITE: Color = Color::RGBA(255, 255, 255, 128);
pub const TRANS_GRAY: Color = Color::RGBA(128, 128, 128, 128);
pub const TRANS_BLACK: Color = Color::RGBA(0, 0, 0, 128);
pub const TRANS_YELLOW: Color = Color::RGBA(255, 255, 0, 128);
pub const TRANS_RED: Color = Color::RGBA(255, 0, 0, 128);
pub const TRANS_GREEN: Color = Color::RGBA(0, 255, 0, 128);
pub const TRANS_BLUE: Color = Color::RGBA(0, 0, 255, 128);

// Light siblings stay distinct from every base color so that
// `darken` can invert `lighten` by table lookup alone.
pub const LIGHT_GRAY: Color = Color::RGBA(192, 192, 192, 255);
pub const LIGHT_BLACK: Color = Color::RGBA(64, 64, 64, 255);
pub const LIGHT_YELLOW: Color = Color::RGBA(255, 255, 128, 255);
pub const LIGHT_RED: Color = Color::RGBA(255, 128, 128, 255);
pub const LIGHT_GREEN: Color = Color::RGBA(128, 255, 128, 255);
pub const LIGHT_BLUE: Color = Color::RGBA(128, 128, 255, 255);

pub const LIGHT_TRANS_GRAY: Color = Color::RGBA(192, 192, 192, 204);
pub const LIGHT_TRANS_BLACK: Color = Color::RGBA(64, 64, 64, 204);
pub const LIGHT_TRANS_YELLOW: Color = Color::RGBA(255, 255, 128, 204);
pub const LIGHT_TRANS_RED: Color = Color::RGBA(255, 128, 128, 204);
pub const LIGHT_TRANS_GREEN: Color = Color::RGBA(128, 255, 128, 204);
pub const LIGHT_TRANS_BLUE: Color = Color::RGBA(128, 128, 255, 204);

/// Base color -> light sibling pairs. Order matters nowhere; each base
/// color appears at most once.
const LIGHT_PAIRS: [(Color, Color); 12] = [
    (GRAY, LIGHT_GRAY),
    (BLACK, LIGHT_BLACK),
    (YELLOW, LIGHT_YELLOW),
    (RED, LIGHT_RED),
    (GREEN, LIGHT_GREEN),
    (BLUE, LIGHT_BLUE),
    (TRANS_GRAY, LIGHT_TRANS_GRAY),
    (TRANS_BLACK, LIGHT_TRANS_BLACK),
    (TRANS_YELLOW, LIGHT_TRANS_YELLOW),
    (TRANS_RED, LIGHT_TRANS_RED),
    (TRANS_GREEN, LIGHT_TRANS_GREEN),
    (TRANS_BLUE, LIGHT_TRANS_BLUE),
];

/// Returns the light sibling of a base palette color.
///
/// Colors that are already light, or that are not in the palette at all,
/// are returned unchanged.
pub fn lighten(color: Color) -> Color {
    for (base, light) in LIGHT_PAIRS {
        if color == base {
            return light;
        }
    }
    color
}

/// Returns the base sibling of a light palette color.
///
/// The inverse of [`lighten`]; non-light colors are returned unchanged.
pub fn darken(color: Color) -> Color {
    for (base, light) in LIGHT_PAIRS {
        if color == light {
            return base;
        }
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighten_known_color() {
        assert_eq!(lighten(RED), LIGHT_RED);
        assert_eq!(lighten(TRANS_BLUE), LIGHT_TRANS_BLUE);
    }

    #[test]
    fn test_lighten_unknown_color_unchanged() {
        let custom = Color::RGBA(12, 34, 56, 255);
        assert_eq!(lighten(custom), custom);
    }

    #[test]
    fn test_darken_reverses_lighten() {
        for (base, _) in LIGHT_PAIRS {
            assert_eq!(darken(lighten(base)), base);
        }
    }

    #[test]
    fn test_darken_base_color_is_noop() {
        assert_eq!(darken(RED), RED);
        assert_eq!(darken(GRAY), GRAY);
        assert_eq!(darken(BLACK), BLACK);
    }

    #[test]
    fn test_light_siblings_do_not_alias_base_colors() {
        for (base, light) in LIGHT_PAIRS {
            assert_ne!(base, light);
            // No base color doubles as another pair's light sibling.
            assert_eq!(darken(base), base);
        }
    }
}
