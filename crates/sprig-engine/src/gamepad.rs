//! Joystick access over `gilrs`.
//!
//! The backend is opened lazily on the first [`Gamepads::first`] call, so a
//! game that never asks for a joystick never touches the OS gamepad APIs.

use std::fmt;

use gilrs::{Axis, Button, EventType, Gilrs};

use crate::coords::Vec2;

/// Stick values below this radius read as centered.
pub const DEFAULT_DEADZONE: f32 = 0.15;

/// Axes by position on a standard (Xbox-layout) controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum JoystickAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

/// Buttons by position on a standard (Xbox-layout) controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum JoystickButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    Guide,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl JoystickAxis {
    fn to_gilrs(self) -> Axis {
        match self {
            JoystickAxis::LeftStickX => Axis::LeftStickX,
            JoystickAxis::LeftStickY => Axis::LeftStickY,
            JoystickAxis::RightStickX => Axis::RightStickX,
            JoystickAxis::RightStickY => Axis::RightStickY,
            JoystickAxis::LeftTrigger => Axis::LeftZ,
            JoystickAxis::RightTrigger => Axis::RightZ,
        }
    }
}

impl JoystickButton {
    fn to_gilrs(self) -> Button {
        match self {
            JoystickButton::South => Button::South,
            JoystickButton::East => Button::East,
            JoystickButton::West => Button::West,
            JoystickButton::North => Button::North,
            JoystickButton::LeftBumper => Button::LeftTrigger,
            JoystickButton::RightBumper => Button::RightTrigger,
            JoystickButton::LeftTrigger => Button::LeftTrigger2,
            JoystickButton::RightTrigger => Button::RightTrigger2,
            JoystickButton::Select => Button::Select,
            JoystickButton::Start => Button::Start,
            JoystickButton::Guide => Button::Mode,
            JoystickButton::LeftStick => Button::LeftThumb,
            JoystickButton::RightStick => Button::RightThumb,
            JoystickButton::DPadUp => Button::DPadUp,
            JoystickButton::DPadDown => Button::DPadDown,
            JoystickButton::DPadLeft => Button::DPadLeft,
            JoystickButton::DPadRight => Button::DPadRight,
        }
    }
}

enum Backend {
    Unopened,
    Open(Gilrs),
    Unavailable,
}

/// Connected gamepads.
pub struct Gamepads {
    backend: Backend,
}

impl Gamepads {
    /// A lazily opened backend.
    pub fn new() -> Self {
        Self {
            backend: Backend::Unopened,
        }
    }

    /// A backend that never opens; [`first`](Self::first) is always `None`.
    pub fn disabled() -> Self {
        Self {
            backend: Backend::Unavailable,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.backend, Backend::Open(_))
    }

    fn open(&mut self) -> Option<&mut Gilrs> {
        if let Backend::Unopened = self.backend {
            self.backend = match Gilrs::new() {
                Ok(gilrs) => Backend::Open(gilrs),
                Err(gilrs::Error::NotImplemented(gilrs)) => {
                    log::warn!("gamepads are not supported on this platform");
                    Backend::Open(gilrs)
                }
                Err(err) => {
                    log::warn!("unable to initialize gamepads: {err}");
                    Backend::Unavailable
                }
            };
        }
        match &mut self.backend {
            Backend::Open(gilrs) => Some(gilrs),
            _ => None,
        }
    }

    /// Drains pending gamepad events so button and axis state is current.
    ///
    /// Does nothing until the backend has been opened.
    pub fn poll(&mut self) {
        let Backend::Open(gilrs) = &mut self.backend else { return };
        while let Some(ev) = gilrs.next_event() {
            match ev.event {
                EventType::Connected => {
                    log::info!("gamepad connected: {}", gilrs.gamepad(ev.id).name());
                }
                EventType::Disconnected => log::info!("gamepad {:?} disconnected", ev.id),
                _ => {}
            }
        }
    }

    /// The first connected joystick, opening the backend if needed.
    pub fn first(&mut self) -> Option<Joystick<'_>> {
        let gilrs = self.open()?;
        gilrs
            .gamepads()
            .find(|(_, gp)| gp.is_connected())
            .map(|(_, gamepad)| Joystick {
                gamepad,
                deadzone: DEFAULT_DEADZONE,
            })
    }
}

impl fmt::Debug for Gamepads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.backend {
            Backend::Unopened => "unopened",
            Backend::Open(_) => "open",
            Backend::Unavailable => "unavailable",
        };
        f.debug_struct("Gamepads").field("backend", &state).finish()
    }
}

impl Default for Gamepads {
    fn default() -> Self {
        Self::new()
    }
}

/// A borrowed view of one connected gamepad.
pub struct Joystick<'a> {
    gamepad: gilrs::Gamepad<'a>,
    deadzone: f32,
}

impl<'a> Joystick<'a> {
    pub fn name(&self) -> &str {
        self.gamepad.name()
    }

    pub fn id(&self) -> usize {
        self.gamepad.id().into()
    }

    pub fn with_deadzone(mut self, deadzone: f32) -> Self {
        self.deadzone = deadzone.clamp(0.0, 0.99);
        self
    }

    /// Raw axis value in `[-1, 1]` (triggers `[0, 1]`). Stick Y is up-positive.
    pub fn axis(&self, axis: JoystickAxis) -> f32 {
        let v = self.gamepad.value(axis.to_gilrs());
        match axis {
            JoystickAxis::LeftTrigger | JoystickAxis::RightTrigger => v.max(0.0),
            _ => v,
        }
    }

    pub fn button_down(&self, button: JoystickButton) -> bool {
        self.gamepad.is_pressed(button.to_gilrs())
    }

    /// Left stick in screen orientation (y down), deadzone applied.
    pub fn left_stick(&self) -> Vec2 {
        apply_deadzone(
            self.axis(JoystickAxis::LeftStickX),
            -self.axis(JoystickAxis::LeftStickY),
            self.deadzone,
        )
    }

    /// Right stick in screen orientation (y down), deadzone applied.
    pub fn right_stick(&self) -> Vec2 {
        apply_deadzone(
            self.axis(JoystickAxis::RightStickX),
            -self.axis(JoystickAxis::RightStickY),
            self.deadzone,
        )
    }
}

/// Radial deadzone, rescaled so output still reaches 1.0 at full tilt.
fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone || len == 0.0 {
        return Vec2::zero();
    }
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_deflection_reads_centered() {
        assert_eq!(apply_deadzone(0.1, 0.05, DEFAULT_DEADZONE), Vec2::zero());
    }

    #[test]
    fn full_deflection_stays_full() {
        let v = apply_deadzone(1.0, 0.0, DEFAULT_DEADZONE);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn disabled_backend_has_no_joystick() {
        let mut pads = Gamepads::disabled();
        pads.poll();
        assert!(pads.first().is_none());
        assert!(!pads.is_open());
    }
}
