//! Bitmap Text Rendering
//!
//! Procedural text rendering using a 5x7 bitmap font drawn with SDL2
//! rectangles. The font supports fractional scaling (used by the widget
//! pulse animation) and multi-line strings separated by `'\n'`.
//!
//! Measuring is pure math with no SDL dependency, so layout code and tests
//! can size text without a window.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Glyph cell width in font units (5 pixels + 1 spacing).
pub const CHAR_WIDTH: u32 = 6;
/// Glyph height in font units.
pub const CHAR_HEIGHT: u32 = 7;
/// Vertical advance between lines in font units (7 pixels + 2 leading).
pub const LINE_HEIGHT: u32 = 9;

/// Returns the 5x7 bitmap pattern for a character (case-insensitive).
///
/// Unknown characters map to a full block.
fn glyph(c: char) -> &'static [u8] {
    match c.to_ascii_uppercase() {
        'A' => &[0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => &[0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => &[0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => &[0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => &[0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => &[0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => &[0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001],
        'N' => &[0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => &[0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => &[0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => &[0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '<' => &[0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => &[0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '-' => &[0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => &[0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '.' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '!' => &[0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '(' => &[0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => &[0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '\'' => &[0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        ' ' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => &[0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111],
    }
}

/// Measures the bounding box of a (possibly multi-line) string in pixels
/// at the given scale.
///
/// Returns `(width, height)`. An empty string measures as `(0, 0)`.
pub fn measure_text(text: &str, scale: f32) -> (u32, u32) {
    if text.is_empty() {
        return (0, 0);
    }

    let max_chars = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let lines = text.lines().count().max(1);

    // The last glyph cell does not need its trailing spacing column.
    let width_units = (max_chars as u32 * CHAR_WIDTH).saturating_sub(1);
    let height_units = (lines as u32 - 1) * LINE_HEIGHT + CHAR_HEIGHT;

    (
        (width_units as f32 * scale).ceil() as u32,
        (height_units as f32 * scale).ceil() as u32,
    )
}

/// Number of `'\n'`-separated lines in a string (0 for the empty string).
pub fn line_count(text: &str) -> u32 {
    if text.is_empty() { 0 } else { text.lines().count() as u32 }
}

/// Renders a single line of bitmap text.
///
/// `x`, `y` is the top-left corner in canvas coordinates; `scale` is the
/// size of one font pixel. Fractional scales are supported: glyph cells
/// advance by the exact fractional amount, each font pixel is drawn at
/// least 1 canvas pixel large.
///
/// # Example
///
/// ```rust,ignore
/// use sdl2::pixels::Color;
///
/// draw_text_line(
///     &mut canvas,
///     "HELLO WORLD",
///     100,
///     50,
///     Color::RGB(255, 255, 255),
///     2.0, // 2x scale = 10x14 pixel characters
/// )?;
/// ```
pub fn draw_text_line(
    canvas: &mut Canvas<Window>,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
    scale: f32,
) -> Result<(), String> {
    canvas.set_draw_color(color);

    let pixel_size = (scale.ceil() as u32).max(1);

    for (i, c) in text.chars().enumerate() {
        let char_x = x + ((i as u32 * CHAR_WIDTH) as f32 * scale) as i32;

        for (row, &bits) in glyph(c).iter().enumerate() {
            for col in 0..5u32 {
                if (bits >> (4 - col)) & 1 == 1 {
                    canvas.fill_rect(Rect::new(
                        char_x + (col as f32 * scale) as i32,
                        y + (row as f32 * scale) as i32,
                        pixel_size,
                        pixel_size,
                    ))?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_single_line() {
        // 5 chars * 6 units - 1 trailing spacing = 29 units wide, 7 tall
        assert_eq!(measure_text("HELLO", 1.0), (29, 7));
        assert_eq!(measure_text("HELLO", 2.0), (58, 14));
    }

    #[test]
    fn test_measure_empty() {
        assert_eq!(measure_text("", 1.0), (0, 0));
        assert_eq!(line_count(""), 0);
    }

    #[test]
    fn test_measure_multiline_uses_widest_line() {
        let (w, h) = measure_text("HI\nWORLD", 1.0);
        assert_eq!(w, 29); // "WORLD" is the widest line
        assert_eq!(h, LINE_HEIGHT + CHAR_HEIGHT);
        assert_eq!(line_count("HI\nWORLD"), 2);
    }

    #[test]
    fn test_fractional_scale_rounds_up() {
        let (w, h) = measure_text("A", 1.2);
        assert_eq!(w, 6); // 5 units * 1.2 = 6.0
        assert_eq!(h, 9); // 7 units * 1.2 = 8.4 -> 9
    }
}
