//! Options Screen
//!
//! Cycles through the supported resolutions. The choice is staged on the
//! screen and only written to the config (and saved) on APPLY.

use tracing::warn;

use crate::config::{GameConfig, RESOLUTIONS};
use crate::menu::colors;
use crate::menu::manager::{Anchor, WidgetManager, WidgetToken};
use crate::menu::stack::{Screen, ScreenRequest};
use crate::menu::widget::{FontSize, RoundedCorners};

const RESOLUTION: WidgetToken = WidgetToken(1);
const APPLY: WidgetToken = WidgetToken(2);
const BACK: WidgetToken = WidgetToken(3);

pub struct Options {
    pending: (u32, u32),
}

impl Options {
    pub fn create(wm: &mut WidgetManager, config: &GameConfig) -> Self {
        wm.restore_default_states();

        wm.add_title_widget(WidgetToken::NONE, 60, 12, "OPTIONS");
        wm.break_line();

        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_GRAY);
        wm.set_initial_text_state(true, FontSize::Medium, colors::WHITE);

        let pending = (config.width, config.height);
        wm.add_text_button_widget(RESOLUTION, 40, 7, &resolution_label(pending));
        wm.break_line();
        wm.add_text_button_widget(APPLY, 20, 7, "APPLY");
        wm.break_line();
        wm.add_text_button_widget(BACK, 20, 7, "BACK");

        wm.layout(Anchor::Center, config);
        Options { pending }
    }
}

fn resolution_label((width, height): (u32, u32)) -> String {
    format!("RESOLUTION: {} X {}", width, height)
}

impl Screen for Options {
    fn select(&mut self, wm: &mut WidgetManager, config: &mut GameConfig) -> ScreenRequest {
        match wm.selected_widget() {
            RESOLUTION => {
                let current = RESOLUTIONS
                    .iter()
                    .position(|&r| r == self.pending)
                    .unwrap_or(0);
                self.pending = RESOLUTIONS[(current + 1) % RESOLUTIONS.len()];
                wm.set_text(RESOLUTION, &resolution_label(self.pending));
                ScreenRequest::None
            }
            APPLY => {
                (config.width, config.height) = self.pending;
                if let Err(err) = config.save() {
                    warn!("failed to save config: {}", err);
                }
                ScreenRequest::Pop
            }
            BACK => ScreenRequest::Pop,
            _ => ScreenRequest::None,
        }
    }
}
