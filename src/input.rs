//! Input Translation
//!
//! Turns raw SDL2 events into the small set of [`MenuAction`]s the menu
//! engine understands. Keyboard, mouse, and joystick all funnel into the
//! same actions, so the engine never sees device specifics.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

/// Joystick axis values inside this band are treated as centered.
pub const JOY_DEADZONE: i16 = 12_000;

/// Device-independent menu input. The `bool` on the scroll actions marks
/// a page-sized step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Left,
    Right,
    Up,
    Down,
    /// Activate the focused widget.
    Select,
    /// Leave the current screen.
    Cancel,
    /// Pointer moved, window coordinates (top-left origin).
    Pointer(i32, i32),
    ScrollFaster(bool),
    ScrollSlower(bool),
    Quit,
}

/// Maps one SDL event to a menu action, if it has one.
pub fn translate_event(event: &Event) -> Option<MenuAction> {
    match event {
        Event::Quit { .. } => Some(MenuAction::Quit),
        Event::KeyDown {
            keycode: Some(key),
            repeat: false,
            ..
        } => handle_keyboard(*key),
        Event::MouseMotion { x, y, .. } => Some(MenuAction::Pointer(*x, *y)),
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Left,
            ..
        } => Some(MenuAction::Select),
        Event::JoyAxisMotion {
            axis_idx, value, ..
        } => handle_joystick(*axis_idx, *value),
        Event::JoyButtonDown { button_idx: 0, .. } => Some(MenuAction::Select),
        Event::JoyButtonDown { button_idx: 1, .. } => Some(MenuAction::Cancel),
        _ => None,
    }
}

pub fn handle_keyboard(key: Keycode) -> Option<MenuAction> {
    match key {
        Keycode::Left => Some(MenuAction::Left),
        Keycode::Right => Some(MenuAction::Right),
        Keycode::Up => Some(MenuAction::Up),
        Keycode::Down => Some(MenuAction::Down),
        Keycode::Return | Keycode::Space | Keycode::KpEnter => Some(MenuAction::Select),
        Keycode::Escape => Some(MenuAction::Cancel),
        Keycode::Equals | Keycode::KpPlus => Some(MenuAction::ScrollFaster(false)),
        Keycode::Minus | Keycode::KpMinus => Some(MenuAction::ScrollSlower(false)),
        Keycode::PageUp => Some(MenuAction::ScrollFaster(true)),
        Keycode::PageDown => Some(MenuAction::ScrollSlower(true)),
        _ => None,
    }
}

/// Axis 0 is horizontal, axis 1 vertical (SDL convention: positive is
/// right/down). Motion inside the dead zone is ignored.
pub fn handle_joystick(axis: u8, value: i16) -> Option<MenuAction> {
    // unsigned_abs: i16::MIN is a legal fully-deflected axis value and
    // has no i16 absolute value.
    if value.unsigned_abs() < JOY_DEADZONE as u16 {
        return None;
    }
    match (axis, value > 0) {
        (0, false) => Some(MenuAction::Left),
        (0, true) => Some(MenuAction::Right),
        (1, false) => Some(MenuAction::Up),
        (1, true) => Some(MenuAction::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_mapping() {
        assert_eq!(handle_keyboard(Keycode::Left), Some(MenuAction::Left));
        assert_eq!(handle_keyboard(Keycode::Return), Some(MenuAction::Select));
        assert_eq!(handle_keyboard(Keycode::Space), Some(MenuAction::Select));
        assert_eq!(handle_keyboard(Keycode::Escape), Some(MenuAction::Cancel));
        assert_eq!(handle_keyboard(Keycode::A), None);
    }

    #[test]
    fn test_scroll_keys_carry_step_size() {
        assert_eq!(
            handle_keyboard(Keycode::Equals),
            Some(MenuAction::ScrollFaster(false))
        );
        assert_eq!(
            handle_keyboard(Keycode::PageDown),
            Some(MenuAction::ScrollSlower(true))
        );
    }

    #[test]
    fn test_joystick_deadzone() {
        assert_eq!(handle_joystick(0, 500), None);
        assert_eq!(handle_joystick(0, -11_999), None);
        assert_eq!(handle_joystick(0, 20_000), Some(MenuAction::Right));
        assert_eq!(handle_joystick(0, -20_000), Some(MenuAction::Left));
        assert_eq!(handle_joystick(1, 20_000), Some(MenuAction::Down));
        assert_eq!(handle_joystick(1, -20_000), Some(MenuAction::Up));
        assert_eq!(handle_joystick(2, 20_000), None);
    }

    #[test]
    fn test_joystick_full_deflection() {
        assert_eq!(handle_joystick(0, i16::MIN), Some(MenuAction::Left));
        assert_eq!(handle_joystick(0, i16::MAX), Some(MenuAction::Right));
        assert_eq!(handle_joystick(1, i16::MIN), Some(MenuAction::Up));
        assert_eq!(handle_joystick(1, i16::MAX), Some(MenuAction::Down));
    }
}
