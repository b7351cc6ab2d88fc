//! Widget Manager
//!
//! Owns the live screen's widget collection: registration with opaque
//! integer tokens, percentage-based flow layout into lines (with
//! optional vertical columns inside a line), directional and pointer
//! focus navigation, and token-addressed mutators.
//!
//! Error policy: usage errors (duplicate token, unknown token, double
//! line break, layout with no widgets) log a warning and report failure
//! through a `bool` or the `WidgetToken::NONE` sentinel. Nothing here
//! panics; a menu with bad content degrades visually instead of crashing.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut wm = WidgetManager::new();
//! wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_GRAY);
//! wm.set_initial_text_state(true, FontSize::Medium, colors::WHITE);
//! wm.add_widget(WidgetToken(1), 30, 10);
//! wm.set_text(WidgetToken(1), "START");
//! wm.layout(Anchor::Bottom, &config);
//! ```

use std::collections::HashMap;
use std::ops::Range;

use sdl2::pixels::Color;
use tracing::warn;

use crate::config::GameConfig;
use crate::menu::colors;
use crate::menu::widget::{
    build_rect_spans, FontSize, RoundedCorners, ScrollPreset, Span, TextureHandle, Widget,
};

/// Small scroll-speed step, in pixels per second.
const SCROLL_STEP: f32 = 10.0;
/// Page-sized scroll-speed step.
const SCROLL_STEP_FAST: f32 = 50.0;

/// Opaque widget identifier, unique among currently registered widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetToken(pub i32);

impl WidgetToken {
    /// Sentinel for "no widget": decorative widgets, failed lookups,
    /// navigation dead ends.
    pub const NONE: WidgetToken = WidgetToken(-1);

    pub fn is_none(self) -> bool {
        self == WidgetToken::NONE
    }
}

/// Where the laid-out block of widget lines is anchored in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    /// Left edge, vertically centered.
    Left,
    /// Right edge, vertically centered.
    Right,
    /// Top edge, horizontally centered.
    Top,
    /// Bottom edge, horizontally centered.
    Bottom,
    Center,
}

/// Flow marker recorded between widget registrations. `Break` ends the
/// current line, or closes the open column without ending the line;
/// `Column` starts a vertical column at the next widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowMark {
    Break,
    Column,
}

/// One horizontal slot in a laid-out line: a single widget, or a column
/// of widgets stacked top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LayoutCell {
    Widget(usize),
    Column(Range<usize>),
}

/// A registered widget plus its bookkeeping.
#[derive(Debug, Clone)]
pub struct WidgetEntry {
    pub token: WidgetToken,
    /// Whether the widget participates in focus navigation.
    pub active: bool,
    pub min_width_pct: u32,
    pub min_height_pct: u32,
    pub widget: Widget,
}

/// Layer settings applied to the next created widget. Configured through
/// the `set_initial_*_state` methods, reset by `restore_default_states`.
#[derive(Debug, Clone)]
struct WidgetDefaults {
    active: bool,
    rect: bool,
    rect_round_corners: RoundedCorners,
    rect_radius_pct: u32,
    rect_color: Color,
    border: bool,
    border_pct: u32,
    border_color: Color,
    texture: bool,
    text: bool,
    font_size: FontSize,
    text_color: Color,
    scroll: bool,
    scroll_x_preset: ScrollPreset,
    scroll_y_preset: ScrollPreset,
    scroll_x_speed: f32,
    scroll_y_speed: f32,
    rotation: bool,
    rotation_angle: f32,
    rotation_speed: f32,
    track: bool,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        WidgetDefaults {
            active: false,
            rect: false,
            rect_round_corners: RoundedCorners::ALL,
            rect_radius_pct: 20,
            rect_color: colors::TRANS_GRAY,
            border: false,
            border_pct: 10,
            border_color: colors::TRANS_WHITE,
            texture: false,
            text: false,
            font_size: FontSize::Medium,
            text_color: colors::WHITE,
            scroll: false,
            scroll_x_preset: ScrollPreset::Center,
            scroll_y_preset: ScrollPreset::Center,
            scroll_x_speed: 0.0,
            scroll_y_speed: 0.0,
            rotation: false,
            rotation_angle: 0.0,
            rotation_speed: 0.0,
            track: false,
        }
    }
}

/// Registration, layout, navigation, and mutation of the live screen's
/// widgets. One instance exists per application, constructed in `main`
/// and passed by `&mut` wherever it is needed.
pub struct WidgetManager {
    widgets: Vec<WidgetEntry>,
    /// Token -> index into `widgets`. Tokenless widgets are not indexed.
    index: HashMap<WidgetToken, usize>,
    /// Flow marks in registration order, each tagged with the number of
    /// widgets registered before it. One-shot: consumed by the next
    /// `layout` call.
    marks: Vec<(usize, FlowMark)>,
    /// Cells of each line, rebuilt at layout.
    lines: Vec<Vec<LayoutCell>>,
    selected: WidgetToken,
    selection_changed: bool,
    prev_anchor: Option<Anchor>,
    defaults: WidgetDefaults,
    /// Rounded-rect spans keyed by (width, height, radius, corner mask).
    /// Placement-independent, shared between same-shaped widgets and
    /// kept across screen changes.
    rect_cache: HashMap<(u32, u32, u32, RoundedCorners), Vec<Span>>,
}

impl WidgetManager {
    pub fn new() -> Self {
        WidgetManager {
            widgets: Vec::new(),
            index: HashMap::new(),
            marks: Vec::new(),
            lines: Vec::new(),
            selected: WidgetToken::NONE,
            selection_changed: false,
            prev_anchor: None,
            defaults: WidgetDefaults::default(),
            rect_cache: HashMap::new(),
        }
    }

    fn lookup(&self, token: WidgetToken, what: &str) -> Option<usize> {
        match self.index.get(&token) {
            Some(&i) => Some(i),
            None => {
                warn!(token = token.0, "{} on unknown widget token", what);
                None
            }
        }
    }

    // --- Registration -----------------------------------------------

    /// Registers a widget sized as a percentage of the viewport, seeded
    /// from the current defaults. Fails on a duplicate non-NONE token.
    /// `WidgetToken::NONE` creates a decorative widget that never takes
    /// focus.
    pub fn add_widget(&mut self, token: WidgetToken, min_width_pct: u32, min_height_pct: u32) -> bool {
        if !token.is_none() && self.index.contains_key(&token) {
            warn!(token = token.0, "add_widget with duplicate token");
            return false;
        }

        let d = &self.defaults;
        let mut widget = Widget::new();
        widget.enable_rect = d.rect;
        widget.round_corners = d.rect_round_corners;
        widget.radius_pct = d.rect_radius_pct;
        widget.rect_color = d.rect_color;
        widget.enable_border = d.border;
        widget.border_pct = d.border_pct;
        widget.border_color = d.border_color;
        widget.enable_texture = d.texture;
        widget.enable_text = d.text;
        widget.font_size = d.font_size;
        widget.text_color = d.text_color;
        widget.enable_scroll = d.scroll;
        widget.scroll_x.preset = d.scroll_x_preset;
        widget.scroll_y.preset = d.scroll_y_preset;
        widget.scroll_x.speed = d.scroll_x_speed;
        widget.scroll_y.speed = d.scroll_y_speed;
        widget.enable_rotation = d.rotation;
        widget.angle = d.rotation_angle;
        widget.rotation_speed = d.rotation_speed;
        widget.enable_track = d.track;

        let entry = WidgetEntry {
            token,
            active: if token.is_none() { false } else { d.active },
            min_width_pct,
            min_height_pct,
            widget,
        };

        if !token.is_none() {
            self.index.insert(token, self.widgets.len());
        }
        self.widgets.push(entry);
        true
    }

    /// Ends the current layout line after the most recently added widget.
    /// Inside an open column it closes the column instead, without ending
    /// the line. Fails before any widget exists, on an empty column
    /// (dropping the column marker), or when it would create an empty
    /// line.
    pub fn break_line(&mut self) -> bool {
        if self.widgets.is_empty() {
            warn!("break_line before any widget was added");
            return false;
        }
        let pos = self.widgets.len();
        if let Some(start) = self.open_column_start() {
            if start == pos {
                warn!("break_line on an empty column, column marker dropped");
                self.marks.pop();
                return false;
            }
        } else if let Some(&(p, FlowMark::Break)) = self.marks.last() {
            // A break directly after a column-closing break ends the
            // line; after a line break it would create an empty line.
            if p == pos && !self.is_column_break(self.marks.len() - 1) {
                warn!("duplicate break_line at widget {}", pos - 1);
                return false;
            }
        }
        self.marks.push((pos, FlowMark::Break));
        true
    }

    /// Starts a column at the next registered widget: until the closing
    /// `break_line`, widgets stack vertically in a single line slot,
    /// each centered on the column's width. Fails while a column is
    /// already open.
    pub fn insert_column(&mut self) -> bool {
        if self.open_column_start().is_some() {
            warn!("insert_column while a column is already open");
            return false;
        }
        self.marks.push((self.widgets.len(), FlowMark::Column));
        true
    }

    /// Start widget index of the currently open column, if the most
    /// recent unclosed mark is a column.
    fn open_column_start(&self) -> Option<usize> {
        for &(pos, mark) in self.marks.iter().rev() {
            match mark {
                FlowMark::Break => return None,
                FlowMark::Column => return Some(pos),
            }
        }
        None
    }

    /// Whether the break at `mark_idx` closed a column rather than a
    /// line.
    fn is_column_break(&self, mark_idx: usize) -> bool {
        for &(_, mark) in self.marks[..mark_idx].iter().rev() {
            match mark {
                FlowMark::Break => return false,
                FlowMark::Column => return true,
            }
        }
        false
    }

    /// Removes every widget and clears selection. The rect shape cache
    /// survives, it is independent of any particular widget set.
    pub fn reset(&mut self) {
        self.widgets.clear();
        self.index.clear();
        self.marks.clear();
        self.lines.clear();
        self.selected = WidgetToken::NONE;
        self.selection_changed = false;
        self.prev_anchor = None;
        self.defaults = WidgetDefaults::default();
    }

    // --- Typed recipes ----------------------------------------------

    /// Large non-interactive heading text.
    pub fn add_title_widget(&mut self, token: WidgetToken, w_pct: u32, h_pct: u32, text: &str) -> bool {
        if !self.add_widget(token, w_pct, h_pct) {
            return false;
        }
        let entry = self.widgets.last_mut().unwrap();
        entry.active = false;
        entry.widget.enable_text = true;
        entry.widget.font_size = FontSize::Large;
        entry.widget.text = text.to_string();
        true
    }

    /// Plain non-interactive text.
    pub fn add_text_widget(&mut self, token: WidgetToken, w_pct: u32, h_pct: u32, text: &str) -> bool {
        if !self.add_widget(token, w_pct, h_pct) {
            return false;
        }
        let entry = self.widgets.last_mut().unwrap();
        entry.active = false;
        entry.widget.enable_text = true;
        entry.widget.text = text.to_string();
        true
    }

    /// Focusable text on a filled rect.
    pub fn add_text_button_widget(&mut self, token: WidgetToken, w_pct: u32, h_pct: u32, text: &str) -> bool {
        if !self.add_widget(token, w_pct, h_pct) {
            return false;
        }
        let entry = self.widgets.last_mut().unwrap();
        entry.active = !token.is_none();
        entry.widget.enable_rect = true;
        entry.widget.enable_text = true;
        entry.widget.text = text.to_string();
        true
    }

    /// Non-interactive image.
    pub fn add_image_widget(&mut self, token: WidgetToken, w_pct: u32, h_pct: u32, texture: TextureHandle) -> bool {
        if !self.add_widget(token, w_pct, h_pct) {
            return false;
        }
        let entry = self.widgets.last_mut().unwrap();
        entry.active = false;
        entry.widget.enable_texture = true;
        entry.widget.texture = Some(texture);
        true
    }

    /// Focusable image on a bordered rect.
    pub fn add_image_button_widget(&mut self, token: WidgetToken, w_pct: u32, h_pct: u32, texture: TextureHandle) -> bool {
        if !self.add_widget(token, w_pct, h_pct) {
            return false;
        }
        let entry = self.widgets.last_mut().unwrap();
        entry.active = !token.is_none();
        entry.widget.enable_rect = true;
        entry.widget.enable_border = true;
        entry.widget.enable_texture = true;
        entry.widget.texture = Some(texture);
        true
    }

    // --- Defaults ---------------------------------------------------

    pub fn restore_default_states(&mut self) {
        self.defaults = WidgetDefaults::default();
    }

    pub fn set_initial_activation_state(&mut self, active: bool) {
        self.defaults.active = active;
    }

    pub fn set_initial_rect_state(&mut self, show: bool, corners: RoundedCorners, radius_pct: u32, color: Color) {
        self.defaults.rect = show;
        self.defaults.rect_round_corners = corners;
        self.defaults.rect_radius_pct = radius_pct;
        self.defaults.rect_color = color;
    }

    pub fn set_initial_border_state(&mut self, show: bool, border_pct: u32, color: Color) {
        self.defaults.border = show;
        self.defaults.border_pct = border_pct;
        self.defaults.border_color = color;
    }

    pub fn set_initial_texture_state(&mut self, show: bool) {
        self.defaults.texture = show;
    }

    pub fn set_initial_text_state(&mut self, show: bool, size: FontSize, color: Color) {
        self.defaults.text = show;
        self.defaults.font_size = size;
        self.defaults.text_color = color;
    }

    pub fn set_initial_scroll_state(
        &mut self,
        show: bool,
        x_preset: ScrollPreset,
        y_preset: ScrollPreset,
        x_speed: f32,
        y_speed: f32,
    ) {
        self.defaults.scroll = show;
        self.defaults.scroll_x_preset = x_preset;
        self.defaults.scroll_y_preset = y_preset;
        self.defaults.scroll_x_speed = x_speed;
        self.defaults.scroll_y_speed = y_speed;
    }

    pub fn set_initial_rotation_state(&mut self, show: bool, angle: f32, speed: f32) {
        self.defaults.rotation = show;
        self.defaults.rotation_angle = angle;
        self.defaults.rotation_speed = speed;
    }

    pub fn set_initial_track_state(&mut self, show: bool) {
        self.defaults.track = show;
    }

    // --- Layout -----------------------------------------------------

    /// Sizes every widget against the viewport, flows them into lines
    /// of cells, and anchors the block. Consumes the pending break and
    /// column marks.
    ///
    /// Overflowing the viewport is a warning, not a failure: the layout
    /// completes with overflowing geometry.
    pub fn layout(&mut self, anchor: Anchor, config: &GameConfig) -> bool {
        if self.widgets.is_empty() {
            warn!("layout requested with no widgets");
            return false;
        }

        // Lines of cells from the one-shot flow marks. An unclosed
        // trailing column is closed at the last widget.
        self.lines.clear();
        let mut line: Vec<LayoutCell> = Vec::new();
        let mut column: Option<usize> = None;
        let mut next = 0;
        for &(pos, mark) in &self.marks {
            while next < pos {
                if column.is_none() {
                    line.push(LayoutCell::Widget(next));
                }
                next += 1;
            }
            match mark {
                FlowMark::Column => column = Some(next),
                FlowMark::Break => match column.take() {
                    Some(start) => line.push(LayoutCell::Column(start..next)),
                    None => self.lines.push(std::mem::take(&mut line)),
                },
            }
        }
        while next < self.widgets.len() {
            if column.is_none() {
                line.push(LayoutCell::Widget(next));
            }
            next += 1;
        }
        if let Some(start) = column {
            line.push(LayoutCell::Column(start..next));
        }
        if !line.is_empty() {
            self.lines.push(line);
        }
        self.marks.clear();

        self.place(anchor, config);
        self.prev_anchor = Some(anchor);

        // Default focus: keep the current selection if it still refers
        // to an active widget, otherwise pick the first active one.
        let keep = self
            .index
            .get(&self.selected)
            .is_some_and(|&i| self.widgets[i].active);
        if !keep {
            self.selected = self
                .widgets
                .iter()
                .find(|e| e.active)
                .map_or(WidgetToken::NONE, |e| e.token);
        }
        true
    }

    /// Re-runs the previous layout: same anchor, same lines. Re-arms
    /// scroll presets and keeps the selection if its token still exists.
    /// Fails if no positional `layout` ever succeeded.
    pub fn layout_again(&mut self, config: &GameConfig) -> bool {
        let Some(anchor) = self.prev_anchor else {
            warn!("layout_again before any layout");
            return false;
        };
        if self.widgets.is_empty() {
            warn!("layout_again with no widgets");
            return false;
        }
        self.place(anchor, config);
        if !self.index.contains_key(&self.selected) {
            self.selected = self
                .widgets
                .iter()
                .find(|e| e.active)
                .map_or(WidgetToken::NONE, |e| e.token);
        }
        true
    }

    /// Places widgets along `self.lines`. Shared by `layout` and
    /// `layout_again`.
    fn place(&mut self, anchor: Anchor, config: &GameConfig) {
        let (vw, vh) = (config.width, config.height);

        for entry in &mut self.widgets {
            let w = &mut entry.widget;
            w.width = (vw as f32 * entry.min_width_pct as f32 / 100.0).round() as u32;
            w.height = (vh as f32 * entry.min_height_pct as f32 / 100.0).round() as u32;
            w.resize_to_text();
            w.radius_px = (w.radius_pct * w.width.min(w.height) / 100).max(1);
            w.arm_scroll();
        }

        let total_width = self.calc_width();
        let total_height = self.calc_height();

        if total_width > vw || total_height > vh {
            warn!(
                total_width,
                total_height, vw, vh, "laid-out widgets overflow the viewport"
            );
        }

        let block_left = match anchor {
            Anchor::NorthWest | Anchor::SouthWest | Anchor::Left => 0,
            Anchor::Top | Anchor::Bottom | Anchor::Center => (vw as i32 - total_width as i32) / 2,
            Anchor::NorthEast | Anchor::SouthEast | Anchor::Right => vw as i32 - total_width as i32,
        };
        // Top edge of the block, in bottom-left screen coordinates.
        let block_top = match anchor {
            Anchor::NorthWest | Anchor::NorthEast | Anchor::Top => vh as i32,
            Anchor::Left | Anchor::Right | Anchor::Center => (vh as i32 + total_height as i32) / 2,
            Anchor::SouthWest | Anchor::SouthEast | Anchor::Bottom => total_height as i32,
        };

        let mut line_top = block_top;
        for line in &self.lines {
            let lw = line_width(&self.widgets, line);
            let lh = line_height(&self.widgets, line);

            // Lines are centered as a block within total_width; cells
            // sit flush with the line's bottom edge.
            let mut x = block_left + (total_width as i32 - lw as i32) / 2;
            let line_bottom = line_top - lh as i32;
            for cell in line {
                match cell {
                    LayoutCell::Widget(i) => {
                        let w = &mut self.widgets[*i].widget;
                        w.x = x;
                        w.y = line_bottom;
                        x += w.width as i32;
                    }
                    LayoutCell::Column(range) => {
                        let cw = cell_width(&self.widgets, cell);
                        let ch = cell_height(&self.widgets, cell);
                        // Stack top to bottom, each widget centered on
                        // the column's width.
                        let mut top = line_bottom + ch as i32;
                        for i in range.clone() {
                            let w = &mut self.widgets[i].widget;
                            w.x = x + (cw as i32 - w.width as i32) / 2;
                            top -= w.height as i32;
                            w.y = top;
                        }
                        x += cw as i32;
                    }
                }
            }
            line_top = line_bottom;
        }

        // Warm the shape cache for every visible rect.
        for entry in &self.widgets {
            let w = &entry.widget;
            if w.enable_rect {
                let key = (w.width, w.height, w.radius_px, w.round_corners);
                self.rect_cache
                    .entry(key)
                    .or_insert_with(|| build_rect_spans(w.width, w.height, w.radius_px, w.round_corners));
            }
        }
    }

    /// Width of the laid-out block. Valid after `layout`.
    pub fn calc_width(&self) -> u32 {
        self.lines
            .iter()
            .map(|l| line_width(&self.widgets, l))
            .max()
            .unwrap_or(0)
    }

    /// Height of the laid-out block. Valid after `layout`.
    pub fn calc_height(&self) -> u32 {
        self.lines
            .iter()
            .map(|l| line_height(&self.widgets, l))
            .sum()
    }

    /// Cached draw spans for a widget's rect shape, if the shape was seen
    /// at layout time.
    pub fn rect_spans(&self, widget: &Widget) -> Option<&[Span]> {
        self.rect_cache
            .get(&(widget.width, widget.height, widget.radius_px, widget.round_corners))
            .map(Vec::as_slice)
    }

    // --- Frame update -----------------------------------------------

    pub fn update(&mut self, dt: f32) {
        for entry in &mut self.widgets {
            entry.widget.update(dt);
        }
    }

    // --- Navigation -------------------------------------------------

    /// Moves focus to the nearest active widget whose center lies in the
    /// 45-degree cone left of the selected widget. Returns the new token,
    /// or NONE at a dead end (selection unchanged).
    pub fn handle_left(&mut self) -> WidgetToken {
        self.navigate(-1, 0)
    }

    pub fn handle_right(&mut self) -> WidgetToken {
        self.navigate(1, 0)
    }

    pub fn handle_up(&mut self) -> WidgetToken {
        self.navigate(0, 1)
    }

    pub fn handle_down(&mut self) -> WidgetToken {
        self.navigate(0, -1)
    }

    /// Directional search along (dir_x, dir_y), one of the four axis
    /// unit vectors. A candidate qualifies only if its center offset
    /// along the axis is positive and strictly dominates the cross-axis
    /// offset; the nearest qualifying candidate along the axis wins.
    fn navigate(&mut self, dir_x: i32, dir_y: i32) -> WidgetToken {
        let Some(&sel) = self.index.get(&self.selected) else {
            return WidgetToken::NONE;
        };
        let (sx, sy) = self.widgets[sel].widget.center();

        let mut best: Option<(i32, WidgetToken)> = None;
        for (i, entry) in self.widgets.iter().enumerate() {
            if i == sel || !entry.active || entry.token.is_none() {
                continue;
            }
            let (cx, cy) = entry.widget.center();
            let along = (cx - sx) * dir_x + (cy - sy) * dir_y;
            let across = if dir_x != 0 { cy - sy } else { cx - sx };
            if along > 0 && along > across.abs() && best.is_none_or(|(b, _)| along < b) {
                best = Some((along, entry.token));
            }
        }

        match best {
            Some((_, token)) => {
                self.selected = token;
                self.selection_changed = true;
                token
            }
            None => WidgetToken::NONE,
        }
    }

    /// Focus-follows-pointer. Returns NONE while the pointer stays over
    /// the already-selected widget or hits no widget at all; otherwise
    /// selects and returns the first active widget containing the point.
    pub fn handle_pointer(&mut self, x: i32, y: i32) -> WidgetToken {
        if let Some(&sel) = self.index.get(&self.selected) {
            if self.widgets[sel].widget.contains(x, y) {
                return WidgetToken::NONE;
            }
        }
        for entry in &self.widgets {
            if entry.active && !entry.token.is_none() && entry.widget.contains(x, y) {
                self.selected = entry.token;
                self.selection_changed = true;
                return entry.token;
            }
        }
        WidgetToken::NONE
    }

    pub fn selected_widget(&self) -> WidgetToken {
        self.selected
    }

    /// Sets the focused widget directly, e.g. when restoring a screen's
    /// remembered focus. NONE clears the selection. Unknown and inactive
    /// tokens are rejected, so the selection always refers to an active
    /// widget.
    pub fn set_selected_widget(&mut self, token: WidgetToken) {
        if token.is_none() {
            self.selected = WidgetToken::NONE;
            return;
        }
        let Some(i) = self.lookup(token, "set_selected_widget") else {
            return;
        };
        if !self.widgets[i].active {
            warn!(token = token.0, "set_selected_widget on inactive widget");
            return;
        }
        self.selected = token;
        self.selection_changed = true;
    }

    /// Reads and clears the "selection moved this frame" flag.
    pub fn take_selection_changed(&mut self) -> bool {
        std::mem::take(&mut self.selection_changed)
    }

    // --- Token-addressed mutators -----------------------------------

    pub fn activate_widget(&mut self, token: WidgetToken) {
        if let Some(i) = self.lookup(token, "activate_widget") {
            self.widgets[i].active = true;
        }
    }

    pub fn deactivate_widget(&mut self, token: WidgetToken) {
        if let Some(i) = self.lookup(token, "deactivate_widget") {
            self.widgets[i].active = false;
            if self.selected == token {
                self.selected = WidgetToken::NONE;
            }
        }
    }

    pub fn set_rect_visible(&mut self, token: WidgetToken, show: bool) {
        if let Some(i) = self.lookup(token, "set_rect_visible") {
            self.widgets[i].widget.enable_rect = show;
        }
    }

    pub fn set_rect_color(&mut self, token: WidgetToken, color: Color) {
        if let Some(i) = self.lookup(token, "set_rect_color") {
            self.widgets[i].widget.rect_color = color;
        }
    }

    pub fn set_rect_round_corners(&mut self, token: WidgetToken, corners: RoundedCorners) {
        if let Some(i) = self.lookup(token, "set_rect_round_corners") {
            self.widgets[i].widget.round_corners = corners;
        }
    }

    /// Corner radius as a percentage of the widget's smaller dimension.
    /// Valid range 1..=50; out-of-range values are rejected.
    pub fn set_corner_radius(&mut self, token: WidgetToken, radius_pct: u32) {
        if !(1..=50).contains(&radius_pct) {
            warn!(radius_pct, "corner radius out of range, ignored");
            return;
        }
        if let Some(i) = self.lookup(token, "set_corner_radius") {
            self.widgets[i].widget.radius_pct = radius_pct;
        }
    }

    pub fn set_border_visible(&mut self, token: WidgetToken, show: bool) {
        if let Some(i) = self.lookup(token, "set_border_visible") {
            self.widgets[i].widget.enable_border = show;
        }
    }

    pub fn set_border_color(&mut self, token: WidgetToken, color: Color) {
        if let Some(i) = self.lookup(token, "set_border_color") {
            self.widgets[i].widget.border_color = color;
        }
    }

    /// Border thickness as a percentage of the widget's smaller
    /// dimension. Valid range 1..=100.
    pub fn set_border_percentage(&mut self, token: WidgetToken, border_pct: u32) {
        if !(1..=100).contains(&border_pct) {
            warn!(border_pct, "border percentage out of range, ignored");
            return;
        }
        if let Some(i) = self.lookup(token, "set_border_percentage") {
            self.widgets[i].widget.border_pct = border_pct;
        }
    }

    pub fn set_texture_visible(&mut self, token: WidgetToken, show: bool) {
        if let Some(i) = self.lookup(token, "set_texture_visible") {
            self.widgets[i].widget.enable_texture = show;
        }
    }

    pub fn set_texture(&mut self, token: WidgetToken, texture: TextureHandle) {
        if let Some(i) = self.lookup(token, "set_texture") {
            self.widgets[i].widget.texture = Some(texture);
        }
    }

    pub fn set_text_visible(&mut self, token: WidgetToken, show: bool) {
        if let Some(i) = self.lookup(token, "set_text_visible") {
            self.widgets[i].widget.enable_text = show;
        }
    }

    /// Replaces the widget's text and re-arms its scroll presets so the
    /// new text starts from its configured position.
    pub fn set_text(&mut self, token: WidgetToken, text: &str) {
        if let Some(i) = self.lookup(token, "set_text") {
            let w = &mut self.widgets[i].widget;
            w.text = text.to_string();
            w.arm_scroll();
        }
    }

    pub fn set_text_size(&mut self, token: WidgetToken, size: FontSize) {
        if let Some(i) = self.lookup(token, "set_text_size") {
            self.widgets[i].widget.font_size = size;
        }
    }

    pub fn set_text_color(&mut self, token: WidgetToken, color: Color) {
        if let Some(i) = self.lookup(token, "set_text_color") {
            self.widgets[i].widget.text_color = color;
        }
    }

    pub fn resize_widget_to_text(&mut self, token: WidgetToken) {
        if let Some(i) = self.lookup(token, "resize_widget_to_text") {
            self.widgets[i].widget.resize_to_text();
        }
    }

    pub fn set_scroll_visible(&mut self, token: WidgetToken, show: bool) {
        if let Some(i) = self.lookup(token, "set_scroll_visible") {
            self.widgets[i].widget.enable_scroll = show;
        }
    }

    pub fn set_scroll_speed_x(&mut self, token: WidgetToken, speed: f32) {
        if let Some(i) = self.lookup(token, "set_scroll_speed_x") {
            self.widgets[i].widget.scroll_x.speed = speed;
        }
    }

    pub fn set_scroll_speed_y(&mut self, token: WidgetToken, speed: f32) {
        if let Some(i) = self.lookup(token, "set_scroll_speed_y") {
            self.widgets[i].widget.scroll_y.speed = speed;
        }
    }

    /// Sets both axes' scroll presets and re-arms them.
    pub fn set_scroll_position(&mut self, token: WidgetToken, x: ScrollPreset, y: ScrollPreset) {
        if let Some(i) = self.lookup(token, "set_scroll_position") {
            let w = &mut self.widgets[i].widget;
            w.scroll_x.preset = x;
            w.scroll_y.preset = y;
            w.arm_scroll();
        }
    }

    pub fn set_rotation_angle(&mut self, token: WidgetToken, angle: f32) {
        if let Some(i) = self.lookup(token, "set_rotation_angle") {
            self.widgets[i].widget.angle = angle;
        }
    }

    pub fn set_rotation_speed(&mut self, token: WidgetToken, speed: f32) {
        if let Some(i) = self.lookup(token, "set_rotation_speed") {
            self.widgets[i].widget.rotation_speed = speed;
        }
    }

    pub fn set_track_visible(&mut self, token: WidgetToken, show: bool) {
        if let Some(i) = self.lookup(token, "set_track_visible") {
            self.widgets[i].widget.enable_track = show;
        }
    }

    pub fn set_track_num(&mut self, token: WidgetToken, track: usize) {
        if let Some(i) = self.lookup(token, "set_track_num") {
            self.widgets[i].widget.track_num = Some(track);
        }
    }

    pub fn pulse_widget(&mut self, token: WidgetToken) {
        if let Some(i) = self.lookup(token, "pulse_widget") {
            self.widgets[i].widget.pulse();
        }
    }

    pub fn lighten_widget(&mut self, token: WidgetToken) {
        if let Some(i) = self.lookup(token, "lighten_widget") {
            self.widgets[i].widget.lighten();
        }
    }

    pub fn darken_widget(&mut self, token: WidgetToken) {
        if let Some(i) = self.lookup(token, "darken_widget") {
            self.widgets[i].widget.darken();
        }
    }

    // --- Scroll-speed adjustment ------------------------------------

    /// Speeds up vertical scrolling of the selected widget, clamping at
    /// zero so a step never flips the direction past rest.
    pub fn increase_scroll_speed(&mut self, fast: bool) {
        self.adjust_scroll_speed(if fast { SCROLL_STEP_FAST } else { SCROLL_STEP });
    }

    pub fn decrease_scroll_speed(&mut self, fast: bool) {
        self.adjust_scroll_speed(if fast { -SCROLL_STEP_FAST } else { -SCROLL_STEP });
    }

    fn adjust_scroll_speed(&mut self, step: f32) {
        let Some(&i) = self.index.get(&self.selected) else {
            return;
        };
        let w = &mut self.widgets[i].widget;
        if !w.enable_scroll {
            return;
        }
        let old = w.scroll_y.speed;
        let new = old + step;
        w.scroll_y.speed = if old != 0.0 && old.signum() != new.signum() {
            0.0
        } else {
            new
        };
    }

    /// Registered widgets in insertion order, for the draw pass.
    pub fn widgets(&self) -> &[WidgetEntry] {
        &self.widgets
    }
}

impl Default for WidgetManager {
    fn default() -> Self {
        WidgetManager::new()
    }
}

fn cell_width(widgets: &[WidgetEntry], cell: &LayoutCell) -> u32 {
    match cell {
        LayoutCell::Widget(i) => widgets[*i].widget.width,
        LayoutCell::Column(r) => widgets[r.clone()]
            .iter()
            .map(|e| e.widget.width)
            .max()
            .unwrap_or(0),
    }
}

fn cell_height(widgets: &[WidgetEntry], cell: &LayoutCell) -> u32 {
    match cell {
        LayoutCell::Widget(i) => widgets[*i].widget.height,
        LayoutCell::Column(r) => widgets[r.clone()].iter().map(|e| e.widget.height).sum(),
    }
}

fn line_width(widgets: &[WidgetEntry], line: &[LayoutCell]) -> u32 {
    line.iter().map(|c| cell_width(widgets, c)).sum()
}

fn line_height(widgets: &[WidgetEntry], line: &[LayoutCell]) -> u32 {
    line.iter().map(|c| cell_height(widgets, c)).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32) -> GameConfig {
        GameConfig {
            width,
            height,
            last_track: 0,
        }
    }

    fn manager_with_buttons(tokens: &[i32]) -> WidgetManager {
        let mut wm = WidgetManager::new();
        wm.set_initial_activation_state(true);
        for &t in tokens {
            assert!(wm.add_widget(WidgetToken(t), 30, 10));
        }
        wm
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let mut wm = WidgetManager::new();
        assert!(wm.add_widget(WidgetToken(5), 10, 10));
        assert!(!wm.add_widget(WidgetToken(5), 20, 20));
        assert_eq!(wm.widgets().len(), 1);
        // The original widget is untouched.
        assert_eq!(wm.widgets()[0].min_width_pct, 10);
    }

    #[test]
    fn test_tokenless_widgets_are_inactive_and_unlimited() {
        let mut wm = WidgetManager::new();
        wm.set_initial_activation_state(true);
        assert!(wm.add_widget(WidgetToken::NONE, 10, 10));
        assert!(wm.add_widget(WidgetToken::NONE, 10, 10));
        assert_eq!(wm.widgets().len(), 2);
        assert!(!wm.widgets()[0].active);
        assert!(!wm.widgets()[1].active);
    }

    #[test]
    fn test_break_line_rules() {
        let mut wm = WidgetManager::new();
        assert!(!wm.break_line()); // nothing added yet
        wm.add_widget(WidgetToken(1), 10, 10);
        assert!(wm.break_line());
        assert!(!wm.break_line()); // twice in a row
        wm.add_widget(WidgetToken(2), 10, 10);
        assert!(wm.break_line());
    }

    #[test]
    fn test_layout_without_widgets_fails() {
        let mut wm = WidgetManager::new();
        assert!(!wm.layout(Anchor::Center, &config(300, 100)));
    }

    #[test]
    fn test_bottom_centered_row() {
        // Three 30%x10% widgets on 300x100: 90x10 px each, one 270-wide
        // line centered at x=15, flush with the bottom edge.
        let mut wm = manager_with_buttons(&[1, 2, 3]);
        assert!(wm.layout(Anchor::Bottom, &config(300, 100)));

        let ws: Vec<_> = wm.widgets().iter().map(|e| &e.widget).collect();
        for w in &ws {
            assert_eq!((w.width, w.height), (90, 10));
            assert_eq!(w.y, 0);
        }
        assert_eq!(ws[0].x, 15);
        assert_eq!(ws[1].x, 105);
        assert_eq!(ws[2].x, 195);
        assert_eq!(wm.selected_widget(), WidgetToken(1));
    }

    #[test]
    fn test_layout_containment() {
        let mut wm = manager_with_buttons(&[1, 2]);
        wm.break_line();
        wm.add_widget(WidgetToken(3), 30, 10);
        let cfg = config(640, 480);
        assert!(wm.layout(Anchor::Center, &cfg));
        for e in wm.widgets() {
            let w = &e.widget;
            assert!(w.x >= 0 && w.y >= 0);
            assert!(w.x + w.width as i32 <= cfg.width as i32);
            assert!(w.y + w.height as i32 <= cfg.height as i32);
        }
    }

    #[test]
    fn test_two_lines_stack_heights() {
        let mut wm = manager_with_buttons(&[1, 2]);
        assert!(wm.break_line());
        wm.add_widget(WidgetToken(3), 30, 20);
        assert!(wm.layout(Anchor::Center, &config(300, 100)));
        // Line 1 is 10 tall (10% of 100), line 2 is 20 tall.
        assert_eq!(wm.calc_height(), 30);
        assert_eq!(wm.calc_width(), 180);
        // Line 2 sits directly below line 1.
        let top = wm.widgets()[0].widget.y;
        let bottom = wm.widgets()[2].widget.y;
        assert_eq!(top - bottom, 20);
    }

    #[test]
    fn test_line_integrity() {
        // Breaks after widgets 2 and 3: lines [1,2], [3], [4,5].
        let mut wm = manager_with_buttons(&[1, 2]);
        wm.break_line();
        wm.add_widget(WidgetToken(3), 30, 10);
        wm.break_line();
        wm.add_widget(WidgetToken(4), 30, 10);
        wm.add_widget(WidgetToken(5), 30, 10);
        assert!(wm.layout(Anchor::Center, &config(1000, 1000)));

        assert_eq!(wm.lines.len(), 3);
        let mut seen = Vec::new();
        for line in &wm.lines {
            for cell in line {
                match cell {
                    LayoutCell::Widget(i) => seen.push(wm.widgets()[*i].token.0),
                    LayoutCell::Column(r) => {
                        for i in r.clone() {
                            seen.push(wm.widgets()[i].token.0);
                        }
                    }
                }
            }
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_breaks_are_one_shot() {
        let mut wm = manager_with_buttons(&[1, 2]);
        wm.break_line();
        wm.add_widget(WidgetToken(3), 30, 10);
        let cfg = config(300, 100);
        assert!(wm.layout(Anchor::Center, &cfg));
        assert_eq!(wm.lines.len(), 2);
        // A second layout without fresh breaks flows one line.
        assert!(wm.layout(Anchor::Center, &cfg));
        assert_eq!(wm.lines.len(), 1);
    }

    #[test]
    fn test_column_stacks_vertically() {
        // Line [1, column(2, 3), 4] on 300x100, all widgets 90x10: the
        // column occupies one 90-wide slot and stacks 20 tall.
        let mut wm = manager_with_buttons(&[1]);
        assert!(wm.insert_column());
        wm.add_widget(WidgetToken(2), 30, 10);
        wm.add_widget(WidgetToken(3), 30, 10);
        assert!(wm.break_line()); // closes the column, same line
        wm.add_widget(WidgetToken(4), 30, 10);
        assert!(wm.layout(Anchor::Bottom, &config(300, 100)));

        assert_eq!(wm.lines.len(), 1);
        assert_eq!(wm.calc_width(), 270);
        assert_eq!(wm.calc_height(), 20);
        let ws: Vec<_> = wm.widgets().iter().map(|e| &e.widget).collect();
        assert_eq!((ws[0].x, ws[0].y), (15, 0));
        assert_eq!((ws[1].x, ws[1].y), (105, 10));
        assert_eq!((ws[2].x, ws[2].y), (105, 0));
        assert_eq!((ws[3].x, ws[3].y), (195, 0));
    }

    #[test]
    fn test_column_centers_narrow_widgets() {
        // An unclosed trailing column is closed at the last widget; the
        // 30-wide member is centered on the 90-wide column.
        let mut wm = manager_with_buttons(&[1]);
        wm.insert_column();
        wm.add_widget(WidgetToken(2), 30, 10);
        wm.add_widget(WidgetToken(3), 10, 10);
        assert!(wm.layout(Anchor::SouthWest, &config(300, 100)));

        assert_eq!(wm.calc_width(), 180);
        let ws: Vec<_> = wm.widgets().iter().map(|e| &e.widget).collect();
        assert_eq!((ws[1].x, ws[1].y), (90, 10));
        assert_eq!((ws[2].x, ws[2].y), (120, 0));
    }

    #[test]
    fn test_column_marker_rules() {
        let mut wm = manager_with_buttons(&[1]);
        assert!(wm.insert_column());
        assert!(!wm.insert_column()); // column already open
        assert!(!wm.break_line()); // empty column: marker dropped
        wm.add_widget(WidgetToken(2), 30, 10);
        assert!(wm.layout(Anchor::Center, &config(300, 100)));
        // The dropped column leaves a flat single line.
        assert_eq!(wm.lines.len(), 1);
        assert_eq!(
            wm.lines[0],
            vec![LayoutCell::Widget(0), LayoutCell::Widget(1)]
        );
    }

    #[test]
    fn test_column_break_then_line_break() {
        let mut wm = manager_with_buttons(&[1]);
        wm.insert_column();
        wm.add_widget(WidgetToken(2), 30, 10);
        assert!(wm.break_line()); // closes the column
        assert!(wm.break_line()); // ends the line
        assert!(!wm.break_line()); // would create an empty line
        wm.add_widget(WidgetToken(3), 30, 10);
        assert!(wm.layout(Anchor::Center, &config(300, 100)));
        assert_eq!(wm.lines.len(), 2);
        assert_eq!(wm.calc_height(), 20);
    }

    #[test]
    fn test_layout_overflow_still_completes() {
        let mut wm = WidgetManager::new();
        wm.set_initial_activation_state(true);
        wm.add_widget(WidgetToken(1), 80, 10);
        wm.add_widget(WidgetToken(2), 80, 10);
        assert!(wm.layout(Anchor::Bottom, &config(300, 100)));
        // 160% of the viewport: overflows but both widgets got geometry.
        assert_eq!(wm.calc_width(), 480);
    }

    /// Places widgets at explicit centers, bypassing layout.
    fn manager_at_positions(positions: &[(i32, i32, i32)]) -> WidgetManager {
        let mut wm = WidgetManager::new();
        wm.set_initial_activation_state(true);
        for &(t, cx, cy) in positions {
            wm.add_widget(WidgetToken(t), 1, 1);
            let i = wm.widgets.len() - 1;
            let w = &mut wm.widgets[i].widget;
            w.width = 2;
            w.height = 2;
            w.x = cx - 1;
            w.y = cy - 1;
        }
        wm
    }

    #[test]
    fn test_dominance_cone_navigation() {
        // Selected at (50,50); B at (80,52) is right-dominant, C at
        // (52,80) is up-dominant.
        let mut wm = manager_at_positions(&[(1, 50, 50), (2, 80, 52), (3, 52, 80)]);
        wm.set_selected_widget(WidgetToken(1));

        assert_eq!(wm.handle_right(), WidgetToken(2));
        wm.set_selected_widget(WidgetToken(1));
        assert_eq!(wm.handle_up(), WidgetToken(3));
    }

    #[test]
    fn test_navigation_prefers_nearest_along_axis() {
        let mut wm = manager_at_positions(&[(1, 0, 0), (2, 100, 0), (3, 40, 0)]);
        wm.set_selected_widget(WidgetToken(1));
        assert_eq!(wm.handle_right(), WidgetToken(3));
    }

    #[test]
    fn test_navigation_rejects_diagonal_candidates() {
        // Candidate offset (30, 40): |across| >= along, outside the cone.
        let mut wm = manager_at_positions(&[(1, 0, 0), (2, 30, 40)]);
        wm.set_selected_widget(WidgetToken(1));
        assert_eq!(wm.handle_right(), WidgetToken::NONE);
        assert_eq!(wm.selected_widget(), WidgetToken(1));
    }

    #[test]
    fn test_navigation_dead_end_keeps_selection() {
        let mut wm = manager_at_positions(&[(1, 0, 0), (2, 100, 0)]);
        wm.set_selected_widget(WidgetToken(2));
        assert_eq!(wm.handle_right(), WidgetToken::NONE);
        assert_eq!(wm.selected_widget(), WidgetToken(2));
        assert_eq!(wm.handle_left(), WidgetToken(1));
        assert_eq!(wm.selected_widget(), WidgetToken(1));
    }

    #[test]
    fn test_navigation_is_deterministic() {
        let mut wm = manager_at_positions(&[(1, 0, 0), (2, 50, 10), (3, 50, -10)]);
        wm.set_selected_widget(WidgetToken(1));
        let first = wm.handle_right();
        for _ in 0..5 {
            wm.set_selected_widget(WidgetToken(1));
            assert_eq!(wm.handle_right(), first);
        }
    }

    #[test]
    fn test_navigation_skips_inactive_widgets() {
        let mut wm = manager_at_positions(&[(1, 0, 0), (2, 40, 0), (3, 100, 0)]);
        wm.deactivate_widget(WidgetToken(2));
        wm.set_selected_widget(WidgetToken(1));
        assert_eq!(wm.handle_right(), WidgetToken(3));
    }

    #[test]
    fn test_pointer_selects_first_hit() {
        let mut wm = manager_with_buttons(&[1, 2, 3]);
        assert!(wm.layout(Anchor::Bottom, &config(300, 100)));
        // Widget 2 spans x 105..195, y 0..10.
        assert_eq!(wm.handle_pointer(110, 5), WidgetToken(2));
        // Pointer resting on the selected widget is a no-op.
        assert_eq!(wm.handle_pointer(120, 5), WidgetToken::NONE);
        assert_eq!(wm.selected_widget(), WidgetToken(2));
        // Outside every widget.
        assert_eq!(wm.handle_pointer(0, 99), WidgetToken::NONE);
    }

    #[test]
    fn test_unknown_token_mutators_are_noops() {
        let mut wm = manager_with_buttons(&[1]);
        wm.set_text(WidgetToken(99), "GHOST");
        wm.pulse_widget(WidgetToken(99));
        wm.activate_widget(WidgetToken(99));
        wm.set_selected_widget(WidgetToken(99));
        assert_eq!(wm.widgets().len(), 1);
        assert_eq!(wm.selected_widget(), WidgetToken::NONE);
    }

    #[test]
    fn test_select_inactive_widget_rejected() {
        let mut wm = manager_with_buttons(&[1, 2]);
        wm.set_selected_widget(WidgetToken(1));
        assert!(wm.take_selection_changed());

        wm.deactivate_widget(WidgetToken(2));
        wm.set_selected_widget(WidgetToken(2));
        assert_eq!(wm.selected_widget(), WidgetToken(1));
        assert!(!wm.take_selection_changed());
    }

    #[test]
    fn test_radius_and_border_validation() {
        let mut wm = manager_with_buttons(&[1]);
        wm.set_corner_radius(WidgetToken(1), 30);
        assert_eq!(wm.widgets()[0].widget.radius_pct, 30);
        wm.set_corner_radius(WidgetToken(1), 0);
        wm.set_corner_radius(WidgetToken(1), 51);
        assert_eq!(wm.widgets()[0].widget.radius_pct, 30);

        wm.set_border_percentage(WidgetToken(1), 100);
        assert_eq!(wm.widgets()[0].widget.border_pct, 100);
        wm.set_border_percentage(WidgetToken(1), 101);
        assert_eq!(wm.widgets()[0].widget.border_pct, 100);
    }

    #[test]
    fn test_defaults_do_not_apply_retroactively() {
        let mut wm = WidgetManager::new();
        wm.add_widget(WidgetToken(1), 10, 10);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_RED);
        wm.add_widget(WidgetToken(2), 10, 10);
        assert!(!wm.widgets()[0].widget.enable_rect);
        assert!(wm.widgets()[1].widget.enable_rect);
        assert_eq!(wm.widgets()[1].widget.rect_color, colors::TRANS_RED);
    }

    #[test]
    fn test_scroll_speed_clamps_through_zero() {
        let mut wm = manager_with_buttons(&[1]);
        wm.set_scroll_visible(WidgetToken(1), true);
        wm.set_scroll_speed_y(WidgetToken(1), -5.0);
        wm.set_selected_widget(WidgetToken(1));

        wm.increase_scroll_speed(false); // -5 + 10 would overshoot
        assert_eq!(wm.widgets()[0].widget.scroll_y.speed, 0.0);
        wm.increase_scroll_speed(false);
        assert_eq!(wm.widgets()[0].widget.scroll_y.speed, 10.0);
        wm.increase_scroll_speed(true);
        assert_eq!(wm.widgets()[0].widget.scroll_y.speed, 60.0);
        wm.decrease_scroll_speed(true); // 60 - 50
        assert_eq!(wm.widgets()[0].widget.scroll_y.speed, 10.0);
        wm.decrease_scroll_speed(true); // 10 - 50 would overshoot
        assert_eq!(wm.widgets()[0].widget.scroll_y.speed, 0.0);
    }

    #[test]
    fn test_layout_again_requires_prior_layout() {
        let mut wm = manager_with_buttons(&[1]);
        assert!(!wm.layout_again(&config(300, 100)));
        assert!(wm.layout(Anchor::Center, &config(300, 100)));
        assert!(wm.layout_again(&config(300, 100)));
    }

    #[test]
    fn test_layout_again_keeps_lines_and_selection() {
        let mut wm = manager_with_buttons(&[1, 2]);
        wm.break_line();
        wm.add_widget(WidgetToken(3), 30, 10);
        assert!(wm.layout(Anchor::Center, &config(300, 100)));
        wm.set_selected_widget(WidgetToken(2));

        // Re-layout on a bigger viewport: same two lines, same focus.
        assert!(wm.layout_again(&config(600, 200)));
        assert_eq!(wm.lines.len(), 2);
        assert_eq!(wm.selected_widget(), WidgetToken(2));
        assert_eq!(wm.widgets()[0].widget.width, 180);
    }

    #[test]
    fn test_reset_clears_widgets_and_selection() {
        let mut wm = manager_with_buttons(&[1, 2]);
        assert!(wm.layout(Anchor::Center, &config(300, 100)));
        wm.reset();
        assert!(wm.widgets().is_empty());
        assert_eq!(wm.selected_widget(), WidgetToken::NONE);
        // Tokens are reusable after a reset.
        assert!(wm.add_widget(WidgetToken(1), 10, 10));
    }

    #[test]
    fn test_rect_spans_cached_at_layout() {
        let mut wm = WidgetManager::new();
        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_GRAY);
        wm.add_widget(WidgetToken(1), 30, 10);
        assert!(wm.layout(Anchor::Bottom, &config(300, 100)));
        let w = &wm.widgets()[0].widget;
        let spans = wm.rect_spans(w).expect("shape cached at layout");
        assert_eq!(spans.len(), w.height as usize);
    }
}
