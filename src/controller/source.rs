//! Raw input sources
//!
//! A source is the unbuffered view of a device: every read returns the latest
//! physical sample. Sources are read through `&self` so one instance can be
//! shared (via `Rc`) between the registry, its triggers and other consumers.

use crate::controller::channels::{Axis, Button};
use std::cell::Cell;
use tracing::debug;

/// Supplies the instantaneous value of every channel of one device
pub trait RawInputSource {
    /// Current state of a discrete button
    fn read_boolean(&self, button: Button) -> bool;

    /// Current value of a continuous axis
    ///
    /// Trigger axes report in `[0.0, 1.0]`, stick axes in `[-1.0, 1.0]`.
    /// Vertical stick axes report pushing forward as negative.
    fn read_continuous(&self, axis: Axis) -> f32;

    /// Fetch pending backend updates before a poll. Sources that always read
    /// live hardware state can ignore this.
    fn refresh(&self) {}
}

/// In-memory source whose values are set by hand
///
/// Used for tests and simulation. Values stay put until changed, so it
/// behaves like a held controller.
#[derive(Debug, Default)]
pub struct VirtualSource {
    buttons: [Cell<bool>; Button::COUNT],
    axes: [Cell<f32>; Axis::COUNT],
}

impl VirtualSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&self, button: Button, pressed: bool) {
        debug!("Virtual button {} -> {}", button, pressed);
        self.buttons[button.index()].set(pressed);
    }

    pub fn set_axis(&self, axis: Axis, value: f32) {
        debug!("Virtual axis {} -> {:.4}", axis, value);
        self.axes[axis.index()].set(value);
    }
}

impl RawInputSource for VirtualSource {
    fn read_boolean(&self, button: Button) -> bool {
        self.buttons[button.index()].get()
    }

    fn read_continuous(&self, axis: Axis) -> f32 {
        self.axes[axis.index()].get()
    }
}
