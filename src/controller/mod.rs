//! Controller subsystem for edge-triggered gamepad input
//!
//! Layers, leaf first:
//!
//! 1. [`source`] - Raw, unbuffered channel readings ([`gilrs_source`] for hardware)
//! 2. [`edge`] - Edge detectors with previous/current state per channel
//! 3. [`toggle`] - Latching toggle over an axis detector
//! 4. [`device`] - Registry owning one detector per channel
//! 5. [`trigger`] - Composite AND-triggers for the command layer
//!
//! # Architecture
//!
//! ```text
//! RawInputSource ──► InputDevice ──poll_all()──► EdgeDetector × 20
//!        │                │
//!        └──(immediate)───┴──► CompositeTrigger ──► command layer
//! ```
//!
//! Everything here is single threaded and driven by one explicit poll per
//! control-loop tick.

pub mod channels;
pub mod device;
pub mod edge;
pub mod gilrs_source;
pub mod source;
pub mod toggle;
pub mod trigger;

pub use channels::{Axis, AxisKind, Button, Channel};
pub use device::{AxisReader, ButtonReader, EdgeEvent, EdgeKind, InputDevice};
pub use edge::{AxisEdgeDetector, EdgeDetector, EdgeQuery, Sampler, Threshold};
pub use gilrs_source::GilrsSource;
pub use source::{RawInputSource, VirtualSource};
pub use toggle::ToggleDetector;
pub use trigger::{CompositeTrigger, Trigger};
