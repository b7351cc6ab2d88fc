//! Main Menu
//!
//! Title, optional spinning logo, and the four top-level buttons.

use crate::config::GameConfig;
use crate::menu::colors;
use crate::menu::manager::{Anchor, WidgetManager, WidgetToken};
use crate::menu::stack::{Screen, ScreenId, ScreenRequest};
use crate::menu::widget::{FontSize, RoundedCorners};
use crate::screens::UiAssets;

const RACE: WidgetToken = WidgetToken(1);
const OPTIONS: WidgetToken = WidgetToken(2);
const CREDITS: WidgetToken = WidgetToken(3);
const QUIT: WidgetToken = WidgetToken(4);

pub struct MainMenu;

impl MainMenu {
    pub fn create(wm: &mut WidgetManager, config: &GameConfig, assets: &UiAssets) -> Self {
        wm.restore_default_states();

        wm.add_title_widget(WidgetToken::NONE, 60, 12, "RUSTKART");
        wm.break_line();

        if let Some(logo) = assets.logo {
            wm.set_initial_rotation_state(true, 0.0, 45.0);
            wm.add_image_widget(WidgetToken::NONE, 12, 16, logo);
            wm.set_initial_rotation_state(false, 0.0, 0.0);
            wm.break_line();
        }

        wm.set_initial_activation_state(true);
        wm.set_initial_rect_state(true, RoundedCorners::ALL, 20, colors::TRANS_GRAY);
        wm.set_initial_text_state(true, FontSize::Medium, colors::WHITE);

        for (token, label) in [
            (RACE, "RACE"),
            (OPTIONS, "OPTIONS"),
            (CREDITS, "CREDITS"),
            (QUIT, "QUIT"),
        ] {
            wm.add_text_button_widget(token, 30, 7, label);
            wm.break_line();
        }

        wm.layout(Anchor::Center, config);
        MainMenu
    }
}

impl Screen for MainMenu {
    fn select(&mut self, wm: &mut WidgetManager, _config: &mut GameConfig) -> ScreenRequest {
        match wm.selected_widget() {
            RACE => ScreenRequest::Push(ScreenId::TrackSelect),
            OPTIONS => ScreenRequest::Push(ScreenId::Options),
            CREDITS => ScreenRequest::Push(ScreenId::Credits),
            QUIT => ScreenRequest::Pop,
            _ => ScreenRequest::None,
        }
    }
}
