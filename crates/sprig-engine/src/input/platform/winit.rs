use ::winit::dpi::PhysicalPosition;
use ::winit::event::{ElementState, Ime, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use ::winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use ::winit::window::Window;

use crate::coords::Vec2;
use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta,
};

/// Translates a winit window event.
///
/// Returns `None` for events the input layer does not model (resize, redraw,
/// theme changes and so on).
pub fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CloseRequested => InputEvent::CloseRequested,
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(map_modifiers(m.state())),

        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            modifiers: state.modifiers,
            repeat: event.repeat,
        },

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(window, *position);
            InputEvent::PointerMoved { x, y }
        }
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::MouseInput { state: st, button, .. } => {
            // winit does not report the position with button events.
            let Vec2 { x, y } = state.pointer_pos;
            InputEvent::PointerButton {
                button: map_button(*button),
                state: match st {
                    ElementState::Pressed => MouseButtonState::Pressed,
                    ElementState::Released => MouseButtonState::Released,
                },
                x,
                y,
            }
        }

        WindowEvent::MouseWheel { delta, .. } => InputEvent::MouseWheel(match delta {
            MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: *x, y: *y },
            MouseScrollDelta::PixelDelta(p) => {
                let (x, y) = logical(window, *p);
                MouseWheelDelta::Pixel { x, y }
            }
        }),

        WindowEvent::Ime(Ime::Commit(text)) if !text.is_empty() => InputEvent::Text(text.clone()),

        _ => return None,
    };
    Some(ev)
}

fn logical(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let p = pos.to_logical::<f64>(window.scale_factor());
    (p.x as f32, p.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_button(b: WinitButton) -> MouseButton {
    match b {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Back,
        WinitButton::Forward => MouseButton::Forward,
        WinitButton::Other(v) => MouseButton::Other(v),
    }
}

macro_rules! key_table {
    ($code:expr; $($kc:ident => $key:ident),* $(,)?) => {
        match $code {
            $(KeyCode::$kc => Key::$key,)*
            other => Key::Unknown(other as u32),
        }
    };
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    key_table! { code;
        Escape => Escape, Enter => Enter, NumpadEnter => Enter, Tab => Tab,
        Backspace => Backspace, Space => Space, Delete => Delete,

        ArrowUp => ArrowUp, ArrowDown => ArrowDown,
        ArrowLeft => ArrowLeft, ArrowRight => ArrowRight,

        ShiftLeft => Shift, ShiftRight => Shift,
        ControlLeft => Control, ControlRight => Control,
        AltLeft => Alt, AltRight => Alt,
        SuperLeft => Meta, SuperRight => Meta,

        KeyA => A, KeyB => B, KeyC => C, KeyD => D, KeyE => E, KeyF => F,
        KeyG => G, KeyH => H, KeyI => I, KeyJ => J, KeyK => K, KeyL => L,
        KeyM => M, KeyN => N, KeyO => O, KeyP => P, KeyQ => Q, KeyR => R,
        KeyS => S, KeyT => T, KeyU => U, KeyV => V, KeyW => W, KeyX => X,
        KeyY => Y, KeyZ => Z,

        Digit0 => Digit0, Digit1 => Digit1, Digit2 => Digit2, Digit3 => Digit3,
        Digit4 => Digit4, Digit5 => Digit5, Digit6 => Digit6, Digit7 => Digit7,
        Digit8 => Digit8, Digit9 => Digit9,

        F1 => F1, F2 => F2, F3 => F3, F4 => F4, F5 => F5, F6 => F6,
        F7 => F7, F8 => F8, F9 => F9, F10 => F10, F11 => F11, F12 => F12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_arrows_map_to_named_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), Key::W);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
    }

    #[test]
    fn unmapped_codes_are_stable() {
        let a = map_key(PhysicalKey::Code(KeyCode::NumLock));
        let b = map_key(PhysicalKey::Code(KeyCode::NumLock));
        assert!(matches!(a, Key::Unknown(_)));
        assert_eq!(a, b);
    }
}
