//! Credits Screen
//!
//! A vertically scrolling text widget. Plus/minus and page up/down adjust
//! the scroll speed of the focused widget.

use crate::config::GameConfig;
use crate::menu::colors;
use crate::menu::manager::{Anchor, WidgetManager, WidgetToken};
use crate::menu::stack::{Screen, ScreenRequest};
use crate::menu::widget::{FontSize, RoundedCorners, ScrollPreset};

const ROLL: WidgetToken = WidgetToken(1);
const BACK: WidgetToken = WidgetToken(2);

const CREDITS_TEXT: &str = "RUSTKART\n\
    \n\
    A LITTLE RACING GAME\n\
    \n\
    MENUS AND WIDGETS\n\
    TRACK OUTLINES\n\
    BITMAP FONT\n\
    \n\
    THANKS FOR PLAYING!";

pub struct Credits;

impl Credits {
    pub fn create(wm: &mut WidgetManager, config: &GameConfig) -> Self {
        wm.restore_default_states();

        wm.add_title_widget(WidgetToken::NONE, 60, 12, "CREDITS");
        wm.break_line();

        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 10, colors::TRANS_BLACK);
        wm.set_initial_text_state(true, FontSize::Small, colors::WHITE);
        // Text starts below the widget and rolls upward, re-entering from
        // the bottom once it has fully left the top.
        wm.set_initial_scroll_state(true, ScrollPreset::Center, ScrollPreset::End, 0.0, 20.0);
        wm.add_widget(ROLL, 60, 50);
        wm.set_text(ROLL, CREDITS_TEXT);
        wm.break_line();

        wm.restore_default_states();
        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_GRAY);
        wm.set_initial_text_state(true, FontSize::Medium, colors::WHITE);
        wm.add_text_button_widget(BACK, 20, 7, "BACK");

        wm.layout(Anchor::Center, config);
        Credits
    }
}

impl Screen for Credits {
    fn select(&mut self, wm: &mut WidgetManager, _config: &mut GameConfig) -> ScreenRequest {
        match wm.selected_widget() {
            BACK => ScreenRequest::Pop,
            _ => ScreenRequest::None,
        }
    }
}
