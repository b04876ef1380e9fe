use sprig_engine::coords::Vec2;
use sprig_engine::input::{InputEvent, InputState, Key, KeyState, MouseButton};

/// The input a scene answers queries from.
///
/// Held keys, buttons and the pointer live in the engine's [`InputState`].
/// On top of that it tracks a single "last pressed" key: any key release
/// clears it, even the release of a different key.
#[derive(Debug, Default)]
pub struct InputSnapshot {
    last_key: Option<Key>,
    held: InputState,
}

impl InputSnapshot {
    /// Folds one event in. Returns `true` for a close request.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        self.held.apply(event);
        match event {
            InputEvent::Key { key, state, .. } => {
                self.last_key = match state {
                    KeyState::Pressed => Some(*key),
                    KeyState::Released => None,
                };
            }
            InputEvent::Focused(false) => self.last_key = None,
            InputEvent::CloseRequested => return true,
            _ => {}
        }
        false
    }

    pub fn last_key(&self) -> Option<Key> {
        self.last_key
    }

    /// `true` if `key` was the latest key pressed and no key has been
    /// released since.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.last_key == Some(key)
    }

    /// `true` while `key` is physically down.
    pub fn key_held(&self, key: Key) -> bool {
        self.held.key_down(key)
    }

    pub fn mouse_pos(&self) -> Vec2 {
        self.held.pointer_pos
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.held.button_down(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_engine::input::MouseButtonState;

    fn press(key: Key) -> InputEvent {
        InputEvent::key(key, KeyState::Pressed)
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::key(key, KeyState::Released)
    }

    #[test]
    fn only_the_latest_key_counts_as_pressed() {
        let mut input = InputSnapshot::default();
        input.apply(&press(Key::A));
        input.apply(&press(Key::D));

        assert!(input.key_pressed(Key::D));
        assert!(!input.key_pressed(Key::A));
        assert!(input.key_held(Key::A));
    }

    #[test]
    fn any_release_clears_the_last_key() {
        let mut input = InputSnapshot::default();
        input.apply(&press(Key::A));
        input.apply(&press(Key::D));
        input.apply(&release(Key::A));

        assert_eq!(input.last_key(), None);
        assert!(input.key_held(Key::D));
    }

    #[test]
    fn pointer_events_track_position_and_buttons() {
        let mut input = InputSnapshot::default();
        input.apply(&InputEvent::PointerMoved { x: 4.0, y: 2.0 });
        assert_eq!(input.mouse_pos(), Vec2::new(4.0, 2.0));

        input.apply(&InputEvent::PointerButton {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 6.0,
            y: 1.0,
        });
        assert!(input.mouse_pressed(MouseButton::Right));
        assert!(!input.mouse_pressed(MouseButton::Left));
        assert_eq!(input.mouse_pos(), Vec2::new(6.0, 1.0));
    }

    #[test]
    fn close_request_is_reported() {
        let mut input = InputSnapshot::default();
        assert!(input.apply(&InputEvent::CloseRequested));
        assert!(!input.apply(&InputEvent::Focused(true)));
    }

    #[test]
    fn focus_loss_forgets_keys_and_buttons() {
        let mut input = InputSnapshot::default();
        input.apply(&press(Key::Space));
        input.apply(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 3.0,
            y: 3.0,
        });
        input.apply(&InputEvent::Focused(false));

        assert_eq!(input.last_key(), None);
        assert!(!input.key_held(Key::Space));
        assert!(!input.mouse_pressed(MouseButton::Left));
        assert_eq!(input.mouse_pos(), Vec2::new(3.0, 3.0));
    }
}
