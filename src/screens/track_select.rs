//! Track Selection
//!
//! One preview widget per track (outline rendering via the track layer),
//! a name label that follows the focused preview, and a back button.
//! Picking a track stores it in the config and returns to the main menu.

use crate::config::GameConfig;
use crate::menu::colors;
use crate::menu::manager::{Anchor, WidgetManager, WidgetToken};
use crate::menu::stack::{Screen, ScreenRequest};
use crate::menu::widget::{FontSize, RoundedCorners};
use crate::screens::UiAssets;

/// Track previews use tokens 1..=track count.
const FIRST_TRACK: i32 = 1;
const NAME_LABEL: WidgetToken = WidgetToken(90);
const BACK: WidgetToken = WidgetToken(91);

pub struct TrackSelect {
    track_names: Vec<String>,
}

impl TrackSelect {
    pub fn create(wm: &mut WidgetManager, config: &GameConfig, assets: &UiAssets) -> Self {
        wm.restore_default_states();

        wm.add_title_widget(WidgetToken::NONE, 60, 12, "CHOOSE A TRACK");
        wm.break_line();

        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 10, colors::TRANS_BLACK);
        wm.set_initial_track_state(true);
        for i in 0..assets.track_names.len() {
            let token = WidgetToken(FIRST_TRACK + i as i32);
            wm.add_widget(token, 22, 30);
            wm.set_track_num(token, i);
        }
        wm.break_line();

        wm.restore_default_states();
        wm.add_text_widget(NAME_LABEL, 40, 7, "");
        wm.break_line();

        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_GRAY);
        wm.set_initial_text_state(true, FontSize::Medium, colors::WHITE);
        wm.add_text_button_widget(BACK, 20, 7, "BACK");

        wm.layout(Anchor::Center, config);

        // Focus the last picked track when it still exists.
        let last = WidgetToken(FIRST_TRACK + config.last_track as i32);
        if config.last_track < assets.track_names.len() {
            wm.set_selected_widget(last);
        }

        let screen = TrackSelect {
            track_names: assets.track_names.clone(),
        };
        screen.refresh_label(wm);
        screen
    }

    fn track_index(&self, token: WidgetToken) -> Option<usize> {
        let i = token.0 - FIRST_TRACK;
        (i >= 0 && (i as usize) < self.track_names.len()).then_some(i as usize)
    }

    fn refresh_label(&self, wm: &mut WidgetManager) {
        if let Some(i) = self.track_index(wm.selected_widget()) {
            wm.set_text(NAME_LABEL, &self.track_names[i]);
        }
    }
}

impl Screen for TrackSelect {
    fn select(&mut self, wm: &mut WidgetManager, config: &mut GameConfig) -> ScreenRequest {
        let token = wm.selected_widget();
        if let Some(i) = self.track_index(token) {
            config.last_track = i;
            return ScreenRequest::Pop;
        }
        if token == BACK {
            return ScreenRequest::Pop;
        }
        ScreenRequest::None
    }

    fn update(&mut self, _dt: f32, wm: &mut WidgetManager) {
        if wm.take_selection_changed() {
            self.refresh_label(wm);
        }
    }
}
