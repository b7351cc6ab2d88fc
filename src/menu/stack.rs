//! Screen Stack
//!
//! A stack of logical screens with one-frame deferred transitions.
//! `push`/`pop` only record the desired change; [`ScreenStack::update`]
//! is the single place where the live screen is destroyed and the next
//! one constructed, so a screen's widget set is never rebuilt while the
//! same frame is still interacting with it.
//!
//! Each stack entry remembers the widget token that was focused when the
//! screen was left, and restores it (with lighten + pulse feedback) when
//! the screen becomes live again. Popping the last entry reports
//! [`StackStatus::Empty`], the application's exit condition.

use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::input::MenuAction;
use crate::menu::manager::{WidgetManager, WidgetToken};

/// Identifiers for every concrete screen the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    MainMenu,
    TrackSelect,
    Options,
    Credits,
}

/// A screen's answer to an input event: stay, or change the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRequest {
    None,
    Push(ScreenId),
    Pop,
}

/// What `update` observed about the stack this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    Running,
    /// The stack ran out of entries; the application should exit.
    Empty,
}

/// One live menu screen. Implementations build their widgets when the
/// factory constructs them and afterwards only react to input.
pub trait Screen {
    /// Activates the focused widget.
    fn select(&mut self, wm: &mut WidgetManager, config: &mut GameConfig) -> ScreenRequest;

    /// Non-navigation input the stack does not handle itself.
    fn handle(
        &mut self,
        action: &MenuAction,
        wm: &mut WidgetManager,
        config: &mut GameConfig,
    ) -> ScreenRequest {
        let _ = (action, wm, config);
        ScreenRequest::None
    }

    /// Per-frame screen logic, before the widgets animate.
    fn update(&mut self, dt: f32, wm: &mut WidgetManager) {
        let _ = (dt, wm);
    }
}

/// Builds a screen (widgets included) from its identifier.
pub trait ScreenFactory {
    fn create(
        &self,
        id: ScreenId,
        wm: &mut WidgetManager,
        config: &GameConfig,
    ) -> Box<dyn Screen>;
}

struct StackEntry {
    id: ScreenId,
    remembered: WidgetToken,
}

/// The deferred-transition screen stack.
pub struct ScreenStack {
    stack: Vec<StackEntry>,
    current: Option<Box<dyn Screen>>,
    pending_transition: bool,
    /// Input is dropped between a push/pop and the update that resolves
    /// it, so the outgoing screen cannot double-handle events meant for
    /// the incoming one.
    input_locked: bool,
}

impl ScreenStack {
    pub fn new() -> Self {
        ScreenStack {
            stack: Vec::new(),
            current: None,
            pending_transition: false,
            input_locked: false,
        }
    }

    /// Requests a transition to `id`. The current screen's focus is
    /// remembered on its stack entry; the switch happens on the next
    /// `update`.
    pub fn push(&mut self, id: ScreenId, wm: &WidgetManager) {
        if !self.pending_transition {
            if let Some(top) = self.stack.last_mut() {
                top.remembered = wm.selected_widget();
            }
        }
        debug!(?id, "screen push requested");
        self.stack.push(StackEntry {
            id,
            remembered: WidgetToken::NONE,
        });
        self.input_locked = true;
        self.pending_transition = true;
    }

    /// Requests leaving the current screen. Popping the last entry makes
    /// the next `update` report the exit condition.
    pub fn pop(&mut self) {
        match self.stack.pop() {
            Some(entry) => debug!(id = ?entry.id, "screen pop requested"),
            None => warn!("pop on empty screen stack"),
        }
        self.input_locked = true;
        self.pending_transition = true;
    }

    /// Resolves a pending transition, then advances the live screen and
    /// all widgets. Called exactly once per frame.
    pub fn update(
        &mut self,
        dt: f32,
        wm: &mut WidgetManager,
        factory: &dyn ScreenFactory,
        config: &mut GameConfig,
    ) -> StackStatus {
        if self.pending_transition {
            // The only place screens die and are born.
            self.current = None;
            wm.reset();
            self.pending_transition = false;
            self.input_locked = false;

            let Some(top) = self.stack.last() else {
                return StackStatus::Empty;
            };
            let (id, remembered) = (top.id, top.remembered);
            self.current = Some(factory.create(id, wm, config));

            if !remembered.is_none() {
                wm.set_selected_widget(remembered);
            }
            // Light up whatever focus took: a successfully restored
            // token also pulses, a fresh default focus does not.
            let sel = wm.selected_widget();
            if !sel.is_none() {
                wm.lighten_widget(sel);
                if sel == remembered {
                    wm.pulse_widget(sel);
                }
            }
        }

        if let Some(screen) = self.current.as_mut() {
            screen.update(dt, wm);
        }
        wm.update(dt);
        StackStatus::Running
    }

    /// Routes one input action: navigation and scroll-speed actions are
    /// handled here with focus feedback, everything else goes to the live
    /// screen. Dropped entirely while a transition is pending.
    pub fn handle_action(
        &mut self,
        action: &MenuAction,
        wm: &mut WidgetManager,
        config: &mut GameConfig,
    ) {
        if self.input_locked || self.pending_transition {
            return;
        }
        let Some(screen) = self.current.as_mut() else {
            return;
        };

        let request = match action {
            MenuAction::Left => {
                Self::navigate_with_feedback(wm, WidgetManager::handle_left);
                ScreenRequest::None
            }
            MenuAction::Right => {
                Self::navigate_with_feedback(wm, WidgetManager::handle_right);
                ScreenRequest::None
            }
            MenuAction::Up => {
                Self::navigate_with_feedback(wm, WidgetManager::handle_up);
                ScreenRequest::None
            }
            MenuAction::Down => {
                Self::navigate_with_feedback(wm, WidgetManager::handle_down);
                ScreenRequest::None
            }
            MenuAction::Pointer(x, y) => {
                Self::pointer_with_feedback(wm, *x, *y);
                ScreenRequest::None
            }
            MenuAction::Select => screen.select(wm, config),
            MenuAction::Cancel => ScreenRequest::Pop,
            MenuAction::ScrollFaster(fast) => {
                wm.increase_scroll_speed(*fast);
                ScreenRequest::None
            }
            MenuAction::ScrollSlower(fast) => {
                wm.decrease_scroll_speed(*fast);
                ScreenRequest::None
            }
            other => screen.handle(other, wm, config),
        };

        match request {
            ScreenRequest::None => {}
            ScreenRequest::Push(id) => self.push(id, wm),
            ScreenRequest::Pop => self.pop(),
        }
    }

    fn navigate_with_feedback(
        wm: &mut WidgetManager,
        query: fn(&mut WidgetManager) -> WidgetToken,
    ) {
        let prev = wm.selected_widget();
        let next = query(wm);
        if !next.is_none() {
            if !prev.is_none() && prev != next {
                wm.darken_widget(prev);
            }
            wm.lighten_widget(next);
            wm.pulse_widget(next);
        }
    }

    fn pointer_with_feedback(wm: &mut WidgetManager, x: i32, y: i32) {
        let prev = wm.selected_widget();
        let next = wm.handle_pointer(x, y);
        if !next.is_none() {
            if !prev.is_none() && prev != next {
                wm.darken_widget(prev);
            }
            wm.lighten_widget(next);
            wm.pulse_widget(next);
        }
    }

    pub fn has_live_screen(&self) -> bool {
        self.current.is_some()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for ScreenStack {
    fn default() -> Self {
        ScreenStack::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Marker screen that records how often it was asked to select.
    struct MarkerScreen {
        selects: Rc<RefCell<u32>>,
    }

    impl Screen for MarkerScreen {
        fn select(&mut self, _wm: &mut WidgetManager, _config: &mut GameConfig) -> ScreenRequest {
            *self.selects.borrow_mut() += 1;
            ScreenRequest::None
        }
    }

    /// Builds one focusable widget per screen, token = 7 for MainMenu,
    /// 8 for TrackSelect, and logs every construction.
    struct MarkerFactory {
        created: Rc<RefCell<Vec<ScreenId>>>,
        selects: Rc<RefCell<u32>>,
    }

    impl MarkerFactory {
        fn new() -> Self {
            MarkerFactory {
                created: Rc::new(RefCell::new(Vec::new())),
                selects: Rc::new(RefCell::new(0)),
            }
        }
    }

    impl ScreenFactory for MarkerFactory {
        fn create(
            &self,
            id: ScreenId,
            wm: &mut WidgetManager,
            config: &GameConfig,
        ) -> Box<dyn Screen> {
            self.created.borrow_mut().push(id);
            wm.set_initial_activation_state(true);
            let token = match id {
                ScreenId::MainMenu => WidgetToken(7),
                _ => WidgetToken(8),
            };
            wm.add_widget(token, 30, 10);
            wm.add_widget(WidgetToken(token.0 + 10), 30, 10);
            wm.layout(crate::menu::manager::Anchor::Center, config);
            Box::new(MarkerScreen {
                selects: Rc::clone(&self.selects),
            })
        }
    }

    fn fixture() -> (ScreenStack, WidgetManager, MarkerFactory, GameConfig) {
        (
            ScreenStack::new(),
            WidgetManager::new(),
            MarkerFactory::new(),
            GameConfig::default(),
        )
    }

    #[test]
    fn test_push_defers_construction_to_update() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        assert!(!stack.has_live_screen());
        assert!(factory.created.borrow().is_empty());

        let status = stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(status, StackStatus::Running);
        assert!(stack.has_live_screen());
        assert_eq!(*factory.created.borrow(), vec![ScreenId::MainMenu]);

        // No transition pending, the next update constructs nothing.
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(factory.created.borrow().len(), 1);
    }

    #[test]
    fn test_focus_restored_after_push_pop_round_trip() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        wm.set_selected_widget(WidgetToken(7));

        stack.push(ScreenId::TrackSelect, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(wm.selected_widget(), WidgetToken(8));

        stack.pop();
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(wm.selected_widget(), WidgetToken(7));
        // The restored widget pulses.
        assert!(wm.widgets()[0].widget.text_scale > 1.0);
        assert_eq!(
            *factory.created.borrow(),
            vec![ScreenId::MainMenu, ScreenId::TrackSelect, ScreenId::MainMenu]
        );
    }

    #[test]
    fn test_pop_to_empty_reports_exit() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);

        stack.pop();
        assert_eq!(stack.depth(), 0);
        let status = stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(status, StackStatus::Empty);
        assert!(!stack.has_live_screen());
        assert!(wm.widgets().is_empty());
    }

    #[test]
    fn test_pop_on_empty_stack_is_harmless() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.pop();
        assert_eq!(
            stack.update(0.016, &mut wm, &factory, &mut cfg),
            StackStatus::Empty
        );
    }

    #[test]
    fn test_input_locked_while_transition_pending() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);

        stack.push(ScreenId::TrackSelect, &wm);
        // Select lands between push and update: it must be dropped.
        stack.handle_action(&MenuAction::Select, &mut wm, &mut cfg);
        assert_eq!(*factory.selects.borrow(), 0);

        stack.update(0.016, &mut wm, &factory, &mut cfg);
        stack.handle_action(&MenuAction::Select, &mut wm, &mut cfg);
        assert_eq!(*factory.selects.borrow(), 1);
    }

    #[test]
    fn test_double_push_resolves_against_final_top() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        stack.push(ScreenId::Options, &wm);
        assert_eq!(stack.depth(), 2);

        stack.update(0.016, &mut wm, &factory, &mut cfg);
        // Only the final top was ever constructed.
        assert_eq!(*factory.created.borrow(), vec![ScreenId::Options]);
    }

    #[test]
    fn test_cancel_pops_current_screen() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        stack.push(ScreenId::Credits, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(stack.depth(), 2);

        stack.handle_action(&MenuAction::Cancel, &mut wm, &mut cfg);
        assert_eq!(stack.depth(), 1);
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        assert_eq!(factory.created.borrow().last(), Some(&ScreenId::MainMenu));
    }

    #[test]
    fn test_navigation_feedback_lightens_and_pulses() {
        let (mut stack, mut wm, factory, mut cfg) = fixture();
        stack.push(ScreenId::MainMenu, &wm);
        stack.update(0.016, &mut wm, &factory, &mut cfg);
        // Factory lays out two widgets (7 and 17) side by side.
        assert_eq!(wm.selected_widget(), WidgetToken(7));

        stack.handle_action(&MenuAction::Right, &mut wm, &mut cfg);
        assert_eq!(wm.selected_widget(), WidgetToken(17));
        assert!(wm.widgets()[1].widget.text_scale > 1.0);
    }
}
