//! Menu Widget
//!
//! A widget is a rectangular screen region with a set of independently
//! toggleable visual layers: a filled (optionally rounded) rect, a border,
//! a texture, text, a scrolling viewport for that text, rotation, and an
//! embedded track preview. Widgets hold no live SDL resources; textures
//! and track previews are referenced through opaque handles so the type
//! stays testable without a window.
//!
//! Positions use a bottom-left origin with y growing upward. The draw
//! pass flips to SDL's top-left convention.

use sdl2::pixels::Color;

use crate::menu::colors;
use crate::text;

/// Resting text scale.
pub const MIN_TEXT_SCALE: f32 = 1.0;
/// Text scale immediately after a pulse.
pub const MAX_TEXT_SCALE: f32 = 1.2;
/// Pulse decay, in scale units per second.
const TEXT_SCALE_DECAY: f32 = 1.0;

/// Opaque reference to a texture owned by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureHandle(pub usize);

/// Bitmask selecting which corners of the rect layer are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundedCorners(pub u8);

impl RoundedCorners {
    pub const NONE: RoundedCorners = RoundedCorners(0);
    pub const NORTH_WEST: RoundedCorners = RoundedCorners(1);
    pub const NORTH_EAST: RoundedCorners = RoundedCorners(2);
    pub const SOUTH_WEST: RoundedCorners = RoundedCorners(4);
    pub const SOUTH_EAST: RoundedCorners = RoundedCorners(8);
    pub const ALL: RoundedCorners = RoundedCorners(15);

    pub fn has(self, corner: RoundedCorners) -> bool {
        self.0 & corner.0 != 0
    }
}

/// Text size presets, as multiples of the base 5x7 font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn scale(self) -> f32 {
        match self {
            FontSize::Small => 1.0,
            FontSize::Medium => 2.0,
            FontSize::Large => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Named scroll starting positions, resolved against the measured text
/// on the first update after (re)layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPreset {
    /// Text parked just past the far edge, about to scroll into view.
    Start,
    /// Text at its aligned position.
    Center,
    /// Text parked just past the near edge.
    End,
}

impl ScrollPreset {
    fn resolve(self, span: f32, content: f32) -> f32 {
        match self {
            ScrollPreset::Start => span,
            ScrollPreset::Center => 0.0,
            ScrollPreset::End => -content,
        }
    }
}

/// What happens when scrolling text leaves the widget entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollWrap {
    /// Re-enter from the opposite edge (marquee).
    Opposite,
    /// Snap back to the preset position.
    Restart,
}

/// Per-axis scroll state. `offset` is the text displacement in pixels
/// from its aligned position.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAxis {
    pub offset: f32,
    pub speed: f32,
    pub preset: ScrollPreset,
    pub wrap: ScrollWrap,
    /// Resolve `preset` into `offset` on the next update.
    pub armed: bool,
}

impl Default for ScrollAxis {
    fn default() -> Self {
        ScrollAxis {
            offset: 0.0,
            speed: 0.0,
            preset: ScrollPreset::Center,
            wrap: ScrollWrap::Opposite,
            armed: true,
        }
    }
}

/// One horizontal fill run of a (possibly rounded) rect, relative to the
/// widget's bottom-left corner. `row` counts up from the bottom edge;
/// the run covers columns `x0..x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row: u32,
    pub x0: u32,
    pub x1: u32,
}

/// Builds the horizontal spans of a `width` x `height` rect with the
/// masked corners rounded at `radius` pixels.
///
/// Placement-independent, so the result can be cached per shape and
/// shared between widgets.
pub fn build_rect_spans(
    width: u32,
    height: u32,
    radius: u32,
    corners: RoundedCorners,
) -> Vec<Span> {
    let r = radius.min(width / 2).min(height / 2) as f32;
    let mut spans = Vec::with_capacity(height as usize);

    for row in 0..height {
        let mut left = 0.0f32;
        let mut right = width as f32;

        // Sample the circle at the row center.
        let yc = row as f32 + 0.5;
        let dy = if yc < r {
            Some(r - yc)
        } else if yc > height as f32 - r {
            Some(yc - (height as f32 - r))
        } else {
            None
        };

        if let Some(dy) = dy {
            let inset = r - (r * r - dy * dy).max(0.0).sqrt();
            let bottom = yc < r;
            let (left_corner, right_corner) = if bottom {
                (RoundedCorners::SOUTH_WEST, RoundedCorners::SOUTH_EAST)
            } else {
                (RoundedCorners::NORTH_WEST, RoundedCorners::NORTH_EAST)
            };
            if corners.has(left_corner) {
                left += inset;
            }
            if corners.has(right_corner) {
                right -= inset;
            }
        }

        let x0 = left.round() as u32;
        let x1 = right.round().max(0.0) as u32;
        if x1 > x0 {
            spans.push(Span { row, x0, x1 });
        }
    }

    spans
}

/// A single menu widget: position, size, and visual layer state.
///
/// Everything here is plain data; per-frame behavior lives in
/// [`Widget::update`].
#[derive(Debug, Clone)]
pub struct Widget {
    /// Bottom-left corner, bottom-left screen origin.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,

    // Rect layer
    pub enable_rect: bool,
    pub rect_color: Color,
    pub round_corners: RoundedCorners,
    /// Corner radius as a percentage of the smaller widget dimension.
    pub radius_pct: u32,
    /// Pixel radius, computed at layout time.
    pub radius_px: u32,

    // Border layer
    pub enable_border: bool,
    pub border_color: Color,
    /// Border thickness as a percentage of the smaller widget dimension.
    pub border_pct: u32,

    // Texture layer
    pub enable_texture: bool,
    pub texture: Option<TextureHandle>,

    // Text layer
    pub enable_text: bool,
    pub text: String,
    pub font_size: FontSize,
    pub text_color: Color,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    /// Current pulse scale multiplier applied on top of `font_size`.
    pub text_scale: f32,

    // Scroll layer
    pub enable_scroll: bool,
    pub scroll_x: ScrollAxis,
    pub scroll_y: ScrollAxis,

    // Rotation layer
    pub enable_rotation: bool,
    /// Degrees, clockwise.
    pub angle: f32,
    /// Degrees per second.
    pub rotation_speed: f32,

    // Track preview layer
    pub enable_track: bool,
    pub track_num: Option<usize>,
}

impl Default for Widget {
    fn default() -> Self {
        Widget {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            enable_rect: false,
            rect_color: colors::TRANS_GRAY,
            round_corners: RoundedCorners::ALL,
            radius_pct: 20,
            radius_px: 1,
            enable_border: false,
            border_color: colors::TRANS_WHITE,
            border_pct: 10,
            enable_texture: false,
            texture: None,
            enable_text: false,
            text: String::new(),
            font_size: FontSize::Medium,
            text_color: colors::WHITE,
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Center,
            text_scale: MIN_TEXT_SCALE,
            enable_scroll: false,
            scroll_x: ScrollAxis::default(),
            scroll_y: ScrollAxis::default(),
            enable_rotation: false,
            angle: 0.0,
            rotation_speed: 0.0,
            enable_track: false,
            track_num: None,
        }
    }
}

impl Widget {
    pub fn new() -> Self {
        Widget::default()
    }

    /// Advances all time-driven layers by `dt` seconds: pulse decay,
    /// rotation, and text scrolling.
    pub fn update(&mut self, dt: f32) {
        if self.text_scale > MIN_TEXT_SCALE {
            self.text_scale = (self.text_scale - TEXT_SCALE_DECAY * dt).max(MIN_TEXT_SCALE);
        }

        if self.enable_rotation {
            self.angle = (self.angle + self.rotation_speed * dt).rem_euclid(360.0);
        }

        if self.enable_scroll && self.enable_text {
            let (tw, th) = text::measure_text(&self.text, self.font_size.scale());
            advance_scroll(&mut self.scroll_x, self.width as f32, tw as f32, dt);
            advance_scroll(&mut self.scroll_y, self.height as f32, th as f32, dt);
        }
    }

    /// Kicks the text scale to its maximum; it decays back over the
    /// following frames.
    pub fn pulse(&mut self) {
        self.text_scale = MAX_TEXT_SCALE;
    }

    /// Swaps the rect color for its light palette sibling.
    pub fn lighten(&mut self) {
        self.rect_color = colors::lighten(self.rect_color);
    }

    /// Swaps the rect color back to its base palette sibling.
    pub fn darken(&mut self) {
        self.rect_color = colors::darken(self.rect_color);
    }

    /// Grows the widget to fit its text, if the text layer is enabled.
    /// Never shrinks.
    pub fn resize_to_text(&mut self) {
        if !self.enable_text || self.text.is_empty() {
            return;
        }
        let (tw, th) = text::measure_text(&self.text, self.font_size.scale());
        self.width = self.width.max(tw);
        self.height = self.height.max(th);
    }

    /// Re-resolves both scroll presets on the next update. Called after
    /// layout or when the text changes.
    pub fn arm_scroll(&mut self) {
        self.scroll_x.armed = true;
        self.scroll_y.armed = true;
    }

    /// Whether a point (bottom-left origin) falls inside the widget.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && px < self.x + self.width as i32
            && py >= self.y
            && py < self.y + self.height as i32
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.x + self.width as i32 / 2,
            self.y + self.height as i32 / 2,
        )
    }
}

fn advance_scroll(axis: &mut ScrollAxis, span: f32, content: f32, dt: f32) {
    if axis.armed {
        axis.offset = axis.preset.resolve(span, content);
        axis.armed = false;
    }

    axis.offset += axis.speed * dt;

    if axis.offset > span {
        axis.offset = match axis.wrap {
            ScrollWrap::Opposite => -content,
            ScrollWrap::Restart => axis.preset.resolve(span, content),
        };
    } else if axis.offset < -content {
        axis.offset = match axis.wrap {
            ScrollWrap::Opposite => span,
            ScrollWrap::Restart => axis.preset.resolve(span, content),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_decays_to_rest() {
        let mut w = Widget::new();
        w.pulse();
        assert_eq!(w.text_scale, MAX_TEXT_SCALE);

        w.update(0.1);
        assert!(w.text_scale < MAX_TEXT_SCALE);
        assert!(w.text_scale > MIN_TEXT_SCALE);

        // Scale decays monotonically and clamps at the resting value.
        let mut prev = w.text_scale;
        for _ in 0..10 {
            w.update(0.1);
            assert!(w.text_scale <= prev);
            prev = w.text_scale;
        }
        assert_eq!(w.text_scale, MIN_TEXT_SCALE);
    }

    #[test]
    fn test_rotation_wraps_at_full_turn() {
        let mut w = Widget::new();
        w.enable_rotation = true;
        w.angle = 350.0;
        w.rotation_speed = 100.0;
        w.update(0.2); // 350 + 20 = 370 -> 10
        assert!((w.angle - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_contains_bottom_left_origin() {
        let mut w = Widget::new();
        w.x = 10;
        w.y = 20;
        w.width = 30;
        w.height = 40;
        assert!(w.contains(10, 20));
        assert!(w.contains(39, 59));
        assert!(!w.contains(40, 20));
        assert!(!w.contains(10, 60));
        assert!(!w.contains(9, 20));
    }

    #[test]
    fn test_resize_to_text_only_grows() {
        let mut w = Widget::new();
        w.enable_text = true;
        w.text = "GO".to_string();
        w.font_size = FontSize::Small; // "GO" measures 11x7
        w.width = 100;
        w.height = 3;
        w.resize_to_text();
        assert_eq!(w.width, 100);
        assert_eq!(w.height, 7);
    }

    #[test]
    fn test_scroll_preset_resolves_on_first_update() {
        let mut w = Widget::new();
        w.enable_text = true;
        w.enable_scroll = true;
        w.text = "HELLO".to_string();
        w.font_size = FontSize::Small;
        w.width = 100;
        w.height = 20;
        w.scroll_x.preset = ScrollPreset::Start;
        w.scroll_x.speed = -10.0;
        w.arm_scroll();

        w.update(0.0);
        assert_eq!(w.scroll_x.offset, 100.0); // parked at the far edge
        assert!(!w.scroll_x.armed);

        w.update(1.0);
        assert_eq!(w.scroll_x.offset, 90.0);
    }

    #[test]
    fn test_scroll_wraps_opposite() {
        let mut w = Widget::new();
        w.enable_text = true;
        w.enable_scroll = true;
        w.text = "HELLO".to_string(); // 29 px at small size
        w.font_size = FontSize::Small;
        w.width = 50;
        w.height = 20;
        w.scroll_x.speed = -100.0;
        w.scroll_x.preset = ScrollPreset::Center;
        w.arm_scroll();

        w.update(0.0); // offset 0
        w.update(0.5); // offset -50 < -29 -> wraps to span
        assert_eq!(w.scroll_x.offset, 50.0);
    }

    #[test]
    fn test_square_spans_cover_every_row() {
        let spans = build_rect_spans(8, 5, 0, RoundedCorners::NONE);
        assert_eq!(spans.len(), 5);
        for (i, s) in spans.iter().enumerate() {
            assert_eq!(s.row, i as u32);
            assert_eq!((s.x0, s.x1), (0, 8));
        }
    }

    #[test]
    fn test_rounded_spans_inset_masked_corners_only() {
        let spans = build_rect_spans(20, 10, 4, RoundedCorners::SOUTH_WEST);
        // Bottom row is inset on the left, full on the right.
        let bottom = spans.iter().find(|s| s.row == 0).unwrap();
        assert!(bottom.x0 > 0);
        assert_eq!(bottom.x1, 20);
        // Top rows untouched: only SW is rounded.
        let top = spans.iter().find(|s| s.row == 9).unwrap();
        assert_eq!((top.x0, top.x1), (0, 20));
        // Middle rows are always full width.
        let mid = spans.iter().find(|s| s.row == 5).unwrap();
        assert_eq!((mid.x0, mid.x1), (0, 20));
    }

    #[test]
    fn test_rounded_spans_radius_clamped_to_half_size() {
        // Radius larger than half the height must not panic or produce
        // inverted runs.
        let spans = build_rect_spans(10, 4, 50, RoundedCorners::ALL);
        for s in &spans {
            assert!(s.x1 > s.x0);
        }
    }
}
