//! Gamepad hardware source backed by gilrs
//!
//! gilrs keeps per-gamepad state that only advances while its event queue is
//! drained, so [`RawInputSource::refresh`] must run once per tick before the
//! registry polls. The control loop does this automatically.

use crate::controller::channels::{Axis, Button};
use crate::controller::source::RawInputSource;
use crate::error::InputError;
use gilrs::{Event, EventType, GamepadId, Gilrs};
use std::cell::{Cell, RefCell};
use tracing::{debug, error, info, warn};

/// Reads the first connected gamepad through gilrs
pub struct GilrsSource {
    gilrs: RefCell<Gilrs>,
    active_gamepad: Cell<Option<GamepadId>>,
}

impl GilrsSource {
    pub fn new() -> Result<Self, InputError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(InputError::BackendError(e.to_string()));
            }
        };

        let source = Self {
            gilrs: RefCell::new(gilrs),
            active_gamepad: Cell::new(None),
        };
        source.select_gamepad();
        Ok(source)
    }

    /// Currently selected gamepad, if any is connected
    pub fn active_gamepad(&self) -> Option<GamepadId> {
        self.active_gamepad.get()
    }

    fn select_gamepad(&self) {
        let gilrs = self.gilrs.borrow();
        let mut gamepads = gilrs.gamepads().filter(|(_, pad)| pad.is_connected());

        match gamepads.next() {
            Some((id, gamepad)) => {
                info!("Selected gamepad: {} ({})", gamepad.name(), id);
                self.active_gamepad.set(Some(id));
            }
            None => {
                warn!("No gamepad connected, all channels read as released");
                self.active_gamepad.set(None);
            }
        }
    }
}

impl RawInputSource for GilrsSource {
    fn read_boolean(&self, button: Button) -> bool {
        let Some(id) = self.active_gamepad.get() else {
            return false;
        };
        self.gilrs.borrow().gamepad(id).is_pressed(map_button(button))
    }

    fn read_continuous(&self, axis: Axis) -> f32 {
        let Some(id) = self.active_gamepad.get() else {
            return 0.0;
        };
        let gilrs = self.gilrs.borrow();
        let gamepad = gilrs.gamepad(id);

        match axis {
            // Triggers show up as an analog button on most mappings and as a
            // Z axis on the rest.
            Axis::LeftTrigger | Axis::RightTrigger => {
                let (button, z_axis) = if axis == Axis::LeftTrigger {
                    (gilrs::Button::LeftTrigger2, gilrs::Axis::LeftZ)
                } else {
                    (gilrs::Button::RightTrigger2, gilrs::Axis::RightZ)
                };
                let from_button = gamepad.button_data(button).map_or(0.0, |data| data.value());
                from_button.max(gamepad.value(z_axis)).clamp(0.0, 1.0)
            }
            Axis::LeftStickX => gamepad.value(gilrs::Axis::LeftStickX),
            Axis::RightStickX => gamepad.value(gilrs::Axis::RightStickX),
            Axis::LeftStickY => stick_value(axis, gamepad.value(gilrs::Axis::LeftStickY)),
            Axis::RightStickY => stick_value(axis, gamepad.value(gilrs::Axis::RightStickY)),
        }
    }

    fn refresh(&self) {
        let mut reselect = false;
        {
            let mut gilrs = self.gilrs.borrow_mut();
            while let Some(Event { id, event, .. }) = gilrs.next_event() {
                match event {
                    EventType::Connected => {
                        info!("Controller connected: {:?}", id);
                        reselect |= self.active_gamepad.get().is_none();
                    }
                    EventType::Disconnected => {
                        warn!("Controller disconnected: {:?}", id);
                        reselect |= self.active_gamepad.get() == Some(id);
                    }
                    _ => debug!("Drained gilrs event: {:?}", event),
                }
            }
        }
        if reselect {
            self.select_gamepad();
        }
    }
}

// gilrs reports stick Y as up-positive on every platform; sources report
// forward as negative.
fn stick_value(axis: Axis, value: f32) -> f32 {
    if axis.is_vertical() {
        -value
    } else {
        value
    }
}

// Map our button set onto gilrs' positional layout
fn map_button(button: Button) -> gilrs::Button {
    match button {
        Button::A => gilrs::Button::South,
        Button::B => gilrs::Button::East,
        Button::X => gilrs::Button::West,
        Button::Y => gilrs::Button::North,
        Button::LeftBumper => gilrs::Button::LeftTrigger,
        Button::RightBumper => gilrs::Button::RightTrigger,
        Button::Back => gilrs::Button::Select,
        Button::Start => gilrs::Button::Start,
        Button::DpadUp => gilrs::Button::DPadUp,
        Button::DpadDown => gilrs::Button::DPadDown,
        Button::DpadLeft => gilrs::Button::DPadLeft,
        Button::DpadRight => gilrs::Button::DPadRight,
        Button::LeftStickButton => gilrs::Button::LeftThumb,
        Button::RightStickButton => gilrs::Button::RightThumb,
    }
}
