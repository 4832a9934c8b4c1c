//! edgepad - edge-triggered gamepad input for fixed-rate control loops
//!
//! Poll an [`InputDevice`] once per loop iteration and ask it what *just*
//! happened: which buttons were pressed or released since the last poll,
//! which axes crossed their threshold. Compose channels into
//! [`CompositeTrigger`]s for a command scheduler, or latch an axis into a
//! [`ToggleDetector`].
//!
//! ```rust
//! use edgepad::controller::{Button, InputDevice, VirtualSource};
//! use std::rc::Rc;
//!
//! let source = Rc::new(VirtualSource::new());
//! let mut device = InputDevice::with_defaults(Rc::clone(&source));
//!
//! source.set_button(Button::A, true);
//! device.poll_all();
//! assert!(device.was_just_pressed(Button::A));
//!
//! device.poll_all();
//! assert!(!device.was_just_pressed(Button::A));
//! assert!(device.is_down(Button::A));
//! ```

pub mod control_loop;
pub mod controller;
pub mod drive;
pub mod error;
pub mod settings;

pub use control_loop::{ControlLoop, LoopStats};
pub use controller::{
    Axis, AxisEdgeDetector, Button, Channel, CompositeTrigger, EdgeDetector, EdgeQuery,
    InputDevice, RawInputSource, ToggleDetector, Trigger,
};
pub use error::InputError;
pub use settings::InputSettings;
