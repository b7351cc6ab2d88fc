//! Widget Draw Pass
//!
//! Renders every widget's enabled layers to the SDL2 canvas once per
//! frame: rounded rect fills (precomputed span runs), borders, textures
//! (with rotation), track preview outlines, and clipped scrolling text.
//!
//! The menu engine positions widgets with a bottom-left origin; SDL uses
//! top-left. All flipping happens here so the engine itself stays
//! coordinate-convention free.

use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas, Texture};
use sdl2::video::Window;

use crate::menu::manager::WidgetManager;
use crate::menu::widget::{
    build_rect_spans, HorizontalAlign, TextureHandle, VerticalAlign, Widget,
};
use crate::text;
use crate::track_preview::TrackPreviewRegistry;

/// Owns the SDL textures widgets reference through opaque handles.
pub struct TextureRegistry<'a> {
    textures: Vec<Texture<'a>>,
}

impl<'a> TextureRegistry<'a> {
    pub fn new() -> Self {
        TextureRegistry { textures: Vec::new() }
    }

    pub fn register(&mut self, texture: Texture<'a>) -> TextureHandle {
        self.textures.push(texture);
        TextureHandle(self.textures.len() - 1)
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture<'a>> {
        self.textures.get(handle.0)
    }
}

impl<'a> Default for TextureRegistry<'a> {
    fn default() -> Self {
        TextureRegistry::new()
    }
}

/// Converts a bottom-left-origin y (of a box bottom edge) to the SDL
/// top-left y of the box's top edge.
fn flip_y(viewport_h: u32, y: i32, height: u32) -> i32 {
    viewport_h as i32 - (y + height as i32)
}

/// Border thickness in pixels for a widget's current size.
fn border_thickness(widget: &Widget) -> u32 {
    (widget.border_pct * widget.width.min(widget.height) / 100).max(1)
}

/// Draws all registered widgets in insertion order.
pub fn draw_widgets(
    canvas: &mut Canvas<Window>,
    wm: &WidgetManager,
    textures: &TextureRegistry,
    tracks: &TrackPreviewRegistry,
    viewport_h: u32,
) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);

    for entry in wm.widgets() {
        let w = &entry.widget;
        let top = flip_y(viewport_h, w.y, w.height);
        let bounds = Rect::new(w.x, top, w.width.max(1), w.height.max(1));

        if w.enable_rect {
            draw_rect_layer(canvas, wm, w, top)?;
        }

        if w.enable_border {
            draw_border_layer(canvas, w, bounds)?;
        }

        if w.enable_texture {
            if let Some(texture) = w.texture.and_then(|h| textures.get(h)) {
                let angle = if w.enable_rotation { w.angle as f64 } else { 0.0 };
                canvas.copy_ex(texture, None, bounds, angle, None, false, false)?;
            }
        }

        if w.enable_track {
            if let Some(track) = w.track_num.and_then(|n| tracks.get(n)) {
                canvas.set_draw_color(w.text_color);
                let points: Vec<Point> = track
                    .outline
                    .iter()
                    .map(|&(nx, ny)| {
                        Point::new(
                            w.x + (nx * w.width as f32) as i32,
                            // Outlines are bottom-left normalized too.
                            top + ((1.0 - ny) * w.height as f32) as i32,
                        )
                    })
                    .collect();
                canvas.draw_lines(points.as_slice())?;
            }
        }

        if w.enable_text && !w.text.is_empty() {
            draw_text_layer(canvas, w, bounds)?;
        }
    }

    Ok(())
}

fn draw_rect_layer(
    canvas: &mut Canvas<Window>,
    wm: &WidgetManager,
    w: &Widget,
    top: i32,
) -> Result<(), String> {
    canvas.set_draw_color(w.rect_color);

    // Shapes are cached at layout time; a cache miss (mutated after
    // layout) just recomputes locally.
    let fallback;
    let spans = match wm.rect_spans(w) {
        Some(spans) => spans,
        None => {
            fallback = build_rect_spans(w.width, w.height, w.radius_px, w.round_corners);
            fallback.as_slice()
        }
    };

    for span in spans {
        // Span rows count up from the widget's bottom edge.
        let sdl_y = top + (w.height - 1 - span.row) as i32;
        canvas.fill_rect(Rect::new(w.x + span.x0 as i32, sdl_y, span.x1 - span.x0, 1))?;
    }
    Ok(())
}

fn draw_border_layer(canvas: &mut Canvas<Window>, w: &Widget, bounds: Rect) -> Result<(), String> {
    let t = border_thickness(w);
    canvas.set_draw_color(w.border_color);
    canvas.fill_rect(Rect::new(bounds.x(), bounds.y(), bounds.width(), t))?;
    canvas.fill_rect(Rect::new(
        bounds.x(),
        bounds.y() + bounds.height() as i32 - t as i32,
        bounds.width(),
        t,
    ))?;
    canvas.fill_rect(Rect::new(bounds.x(), bounds.y(), t, bounds.height()))?;
    canvas.fill_rect(Rect::new(
        bounds.x() + bounds.width() as i32 - t as i32,
        bounds.y(),
        t,
        bounds.height(),
    ))?;
    Ok(())
}

fn draw_text_layer(canvas: &mut Canvas<Window>, w: &Widget, bounds: Rect) -> Result<(), String> {
    let scale = w.font_size.scale() * w.text_scale;
    let (tw, th) = text::measure_text(&w.text, scale);

    let mut tx = match w.h_align {
        HorizontalAlign::Left => bounds.x(),
        HorizontalAlign::Center => bounds.x() + (bounds.width() as i32 - tw as i32) / 2,
        HorizontalAlign::Right => bounds.x() + bounds.width() as i32 - tw as i32,
    };
    let mut ty = match w.v_align {
        VerticalAlign::Top => bounds.y(),
        VerticalAlign::Center => bounds.y() + (bounds.height() as i32 - th as i32) / 2,
        VerticalAlign::Bottom => bounds.y() + bounds.height() as i32 - th as i32,
    };

    if w.enable_scroll {
        // Engine scroll offsets: +x right, +y up.
        tx += w.scroll_x.offset as i32;
        ty -= w.scroll_y.offset as i32;
        canvas.set_clip_rect(Some(bounds));
    }

    let line_advance = (text::LINE_HEIGHT as f32 * scale).ceil() as i32;
    for (i, line) in w.text.lines().enumerate() {
        let (lw, _) = text::measure_text(line, scale);
        let lx = match w.h_align {
            HorizontalAlign::Left => tx,
            HorizontalAlign::Center => tx + (tw as i32 - lw as i32) / 2,
            HorizontalAlign::Right => tx + tw as i32 - lw as i32,
        };
        text::draw_text_line(
            canvas,
            line,
            lx,
            ty + i as i32 * line_advance,
            w.text_color,
            scale,
        )?;
    }

    if w.enable_scroll {
        canvas.set_clip_rect(None);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_y() {
        // A 10-tall box at engine y=0 on a 100-tall viewport has its top
        // edge at SDL y=90.
        assert_eq!(flip_y(100, 0, 10), 90);
        assert_eq!(flip_y(100, 90, 10), 0);
    }

    #[test]
    fn test_border_thickness_minimum_one_pixel() {
        let mut w = Widget::new();
        w.width = 5;
        w.height = 5;
        w.border_pct = 1;
        assert_eq!(border_thickness(&w), 1);
        w.width = 200;
        w.height = 100;
        w.border_pct = 10;
        assert_eq!(border_thickness(&w), 10);
    }
}
