//! Concrete Menu Screens
//!
//! Thin glue on top of the menu engine: each screen builds its widgets
//! at construction and maps the focused token to a stack request on
//! select. All layout, navigation, and animation behavior lives in the
//! engine, not here.

pub mod credits;
pub mod main_menu;
pub mod options;
pub mod track_select;

use crate::config::GameConfig;
use crate::menu::manager::WidgetManager;
use crate::menu::stack::{Screen, ScreenFactory, ScreenId};
use crate::menu::widget::TextureHandle;

/// Shared handles and lookups the screens need, gathered once in `main`.
#[derive(Default)]
pub struct UiAssets {
    /// Logo texture, if it loaded.
    pub logo: Option<TextureHandle>,
    /// Display names of the selectable tracks, in registry order.
    pub track_names: Vec<String>,
}

/// Maps screen identifiers to constructed screens.
pub struct RustkartScreenFactory {
    pub assets: UiAssets,
}

impl ScreenFactory for RustkartScreenFactory {
    fn create(
        &self,
        id: ScreenId,
        wm: &mut WidgetManager,
        config: &GameConfig,
    ) -> Box<dyn Screen> {
        match id {
            ScreenId::MainMenu => Box::new(main_menu::MainMenu::create(wm, config, &self.assets)),
            ScreenId::TrackSelect => {
                Box::new(track_select::TrackSelect::create(wm, config, &self.assets))
            }
            ScreenId::Options => Box::new(options::Options::create(wm, config)),
            ScreenId::Credits => Box::new(credits::Credits::create(wm, config)),
        }
    }
}
