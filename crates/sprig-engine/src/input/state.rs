use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// What is held down right now, plus the last known pointer position.
///
/// The platform layer keeps one to fill in modifiers and the pointer
/// position on events that lack them; a game keeps its own to answer
/// "is this key down" queries.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub modifiers: Modifiers,
    /// Logical pixels. Keeps its value after the pointer leaves the window.
    pub pointer_pos: Vec2,

    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => self.keys_down.insert(*key),
                    KeyState::Released => self.keys_down.remove(key),
                };
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Vec2::new(*x, *y),

            InputEvent::PointerButton { button, state, x, y } => {
                self.pointer_pos = Vec2::new(*x, *y);
                match state {
                    MouseButtonState::Pressed => self.buttons_down.insert(*button),
                    MouseButtonState::Released => self.buttons_down.remove(button),
                };
            }

            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            // Releases are not delivered to an unfocused window.
            InputEvent::Focused(false) => {
                self.keys_down.clear();
                self.buttons_down.clear();
            }

            InputEvent::Focused(true)
            | InputEvent::PointerLeft
            | InputEvent::MouseWheel(_)
            | InputEvent::Text(_)
            | InputEvent::CloseRequested => {}
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
            x,
            y,
        }
    }

    #[test]
    fn keys_are_held_until_released() {
        let mut state = InputState::default();
        state.apply(&InputEvent::key(Key::A, KeyState::Pressed));
        state.apply(&InputEvent::key(Key::A, KeyState::Pressed));
        assert!(state.key_down(Key::A));

        state.apply(&InputEvent::key(Key::A, KeyState::Released));
        assert!(!state.key_down(Key::A));
    }

    #[test]
    fn buttons_move_the_pointer() {
        let mut state = InputState::default();
        state.apply(&click(MouseButtonState::Pressed, 3.0, 4.0));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, Vec2::new(3.0, 4.0));

        state.apply(&InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        state.apply(&InputEvent::key(Key::Space, KeyState::Pressed));
        state.apply(&click(MouseButtonState::Pressed, 0.0, 0.0));
        state.apply(&InputEvent::Focused(false));

        assert!(!state.key_down(Key::Space));
        assert!(!state.button_down(MouseButton::Left));
    }
}
