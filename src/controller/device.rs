//! Input device registry
//!
//! [`InputDevice`] owns one edge detector per channel of a gamepad and polls
//! them in lockstep. It also exposes the raw source directly for code that
//! wants instantaneous values, and builds composite triggers over its
//! channels.

use crate::controller::channels::{Axis, Button, Channel};
use crate::controller::edge::{AxisEdgeDetector, EdgeDetector, EdgeQuery, Sampler, Threshold};
use crate::controller::source::RawInputSource;
use crate::controller::toggle::ToggleDetector;
use crate::controller::trigger::CompositeTrigger;
use crate::error::InputError;
use crate::settings::InputSettings;
use std::rc::Rc;
use tracing::{debug, info};

/// Samples one button of a shared source
#[derive(Debug)]
pub struct ButtonChannel<S> {
    source: Rc<S>,
    button: Button,
}

impl<S: RawInputSource> Sampler for ButtonChannel<S> {
    type Value = bool;

    fn sample(&mut self) -> bool {
        self.source.read_boolean(self.button)
    }
}

/// Samples one axis of a shared source
#[derive(Debug)]
pub struct AxisChannel<S> {
    source: Rc<S>,
    axis: Axis,
}

impl<S: RawInputSource> Sampler for AxisChannel<S> {
    type Value = f32;

    fn sample(&mut self) -> f32 {
        self.source.read_continuous(self.axis)
    }
}

pub type ButtonReader<S> = EdgeDetector<ButtonChannel<S>>;
pub type AxisReader<S> = AxisEdgeDetector<AxisChannel<S>>;

/// Direction of an observed edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Pressed,
    Released,
}

/// One edge seen by the latest poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    pub channel: Channel,
    pub kind: EdgeKind,
}

/// Registry of per-channel edge detectors for one device
///
/// # Poll order
///
/// Call [`InputDevice::poll_all`] exactly once per control-loop tick. It
/// samples every axis, then every button, each in declaration order. Channels
/// are independent, so the order only matters for reproducible logs.
///
/// # Vertical axes
///
/// Sources report pushing a stick forward as a negative value (see
/// [`RawInputSource::read_continuous`]). [`InputDevice::set_negate_y`] flips
/// the sign of every vertical axis read through [`InputDevice::oriented_axis`]
/// for this instance only; edge detection is magnitude based and unaffected.
pub struct InputDevice<S> {
    source: Rc<S>,
    buttons: [ButtonReader<S>; Button::COUNT],
    axes: [AxisReader<S>; Axis::COUNT],
    y_sign: f32,
}

impl<S: RawInputSource> InputDevice<S> {
    /// Builds a registry with the default threshold on every axis
    pub fn with_defaults(source: Rc<S>) -> Self {
        Self::build(source, [Threshold::DEFAULT; Axis::COUNT], false)
    }

    /// Builds a registry from settings, validating every threshold
    pub fn new(source: Rc<S>, settings: &InputSettings) -> Result<Self, InputError> {
        let thresholds = settings.thresholds()?;
        let device = Self::build(source, thresholds, settings.negate_y);
        info!(
            "Input device ready: {} buttons, {} axes, default threshold {}",
            Button::COUNT,
            Axis::COUNT,
            settings.axis_threshold
        );
        Ok(device)
    }

    fn build(source: Rc<S>, thresholds: [Threshold; Axis::COUNT], negate_y: bool) -> Self {
        // Constructing a detector takes its seed sample.
        source.refresh();
        let buttons = Button::ALL.map(|button| {
            EdgeDetector::new(ButtonChannel {
                source: Rc::clone(&source),
                button,
            })
        });
        let axes = Axis::ALL.map(|axis| {
            AxisEdgeDetector::with_threshold(
                AxisChannel {
                    source: Rc::clone(&source),
                    axis,
                },
                thresholds[axis.index()],
            )
        });
        debug!("Seeded {} channel detectors", Button::COUNT + Axis::COUNT);

        Self {
            source,
            buttons,
            axes,
            y_sign: if negate_y { -1.0 } else { 1.0 },
        }
    }

    /// Shared handle to the raw source
    pub fn source(&self) -> &Rc<S> {
        &self.source
    }

    // Immediate readings

    pub fn button(&self, button: Button) -> bool {
        self.source.read_boolean(button)
    }

    /// Raw axis value. Vertical axes are returned as reported; use
    /// [`InputDevice::left_y`]/[`InputDevice::right_y`] for the configured sign.
    pub fn axis(&self, axis: Axis) -> f32 {
        self.source.read_continuous(axis)
    }

    pub fn left_trigger(&self) -> f32 {
        self.axis(Axis::LeftTrigger)
    }

    pub fn right_trigger(&self) -> f32 {
        self.axis(Axis::RightTrigger)
    }

    pub fn left_x(&self) -> f32 {
        self.axis(Axis::LeftStickX)
    }

    pub fn right_x(&self) -> f32 {
        self.axis(Axis::RightStickX)
    }

    pub fn left_y(&self) -> f32 {
        self.oriented_axis(Axis::LeftStickY)
    }

    pub fn right_y(&self) -> f32 {
        self.oriented_axis(Axis::RightStickY)
    }

    /// Axis value with this instance's vertical sign convention applied
    pub fn oriented_axis(&self, axis: Axis) -> f32 {
        let value = self.axis(axis);
        if axis.is_vertical() {
            value * self.y_sign
        } else {
            value
        }
    }

    // Sign convention

    pub fn set_negate_y(&mut self, negate: bool) {
        debug!("Vertical axis negation set to {}", negate);
        self.y_sign = if negate { -1.0 } else { 1.0 };
    }

    /// Same registry with the given vertical sign convention
    pub fn with_negate_y(mut self, negate: bool) -> Self {
        self.set_negate_y(negate);
        self
    }

    pub fn is_negating_y(&self) -> bool {
        self.y_sign < 0.0
    }

    // Polling

    pub fn poll_buttons(&mut self) {
        for reader in &mut self.buttons {
            reader.sample();
        }
    }

    pub fn poll_axes(&mut self) {
        for reader in &mut self.axes {
            reader.sample();
        }
    }

    /// Axes first, then buttons
    pub fn poll_all(&mut self) {
        self.poll_axes();
        self.poll_buttons();
    }

    // Buffered queries

    pub fn button_reader(&self, button: Button) -> &ButtonReader<S> {
        &self.buttons[button.index()]
    }

    pub fn axis_reader(&self, axis: Axis) -> &AxisReader<S> {
        &self.axes[axis.index()]
    }

    fn reader(&self, channel: impl Into<Channel>) -> &dyn EdgeQuery {
        match channel.into() {
            Channel::Button(button) => self.button_reader(button),
            Channel::Axis(axis) => self.axis_reader(axis),
        }
    }

    pub fn is_down(&self, channel: impl Into<Channel>) -> bool {
        self.reader(channel).is_down()
    }

    pub fn was_just_pressed(&self, channel: impl Into<Channel>) -> bool {
        self.reader(channel).was_just_pressed()
    }

    pub fn was_just_released(&self, channel: impl Into<Channel>) -> bool {
        self.reader(channel).was_just_released()
    }

    pub fn state_just_changed(&self, channel: impl Into<Channel>) -> bool {
        self.reader(channel).state_just_changed()
    }

    /// Every edge observed by the latest poll, axes first
    pub fn edges(&self) -> Vec<EdgeEvent> {
        let axes = Axis::ALL.into_iter().map(Channel::Axis);
        let buttons = Button::ALL.into_iter().map(Channel::Button);

        axes.chain(buttons)
            .filter_map(|channel| {
                let reader = self.reader(channel);
                let kind = if reader.was_just_pressed() {
                    EdgeKind::Pressed
                } else if reader.was_just_released() {
                    EdgeKind::Released
                } else {
                    return None;
                };
                Some(EdgeEvent { channel, kind })
            })
            .collect()
    }

    // Factories

    /// AND over the immediate state of `buttons`
    pub fn button_trigger(&self, buttons: Vec<Button>) -> CompositeTrigger<S> {
        CompositeTrigger::buttons(Rc::clone(&self.source), buttons)
    }

    /// AND over `reading >= threshold` for every axis
    pub fn axis_trigger(
        &self,
        threshold: f32,
        axes: Vec<Axis>,
    ) -> Result<CompositeTrigger<S>, InputError> {
        CompositeTrigger::axes(Rc::clone(&self.source), threshold, axes)
    }

    /// Toggle on `axis` reading the same source as this registry
    ///
    /// The toggle owns its own detector; sample it once per tick alongside
    /// [`InputDevice::poll_all`].
    pub fn toggle(
        &self,
        axis: Axis,
        threshold: f32,
    ) -> Result<ToggleDetector<AxisChannel<S>>, InputError> {
        let threshold = Threshold::for_channel(threshold, axis.kind(), axis.name())?;
        Ok(ToggleDetector::with_threshold(
            AxisChannel {
                source: Rc::clone(&self.source),
                axis,
            },
            threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::source::VirtualSource;

    fn device() -> (Rc<VirtualSource>, InputDevice<VirtualSource>) {
        let source = Rc::new(VirtualSource::new());
        let device = InputDevice::with_defaults(Rc::clone(&source));
        (source, device)
    }

    #[test]
    fn test_buffered_button_edges() {
        let (source, mut device) = device();

        source.set_button(Button::A, true);
        assert!(device.button(Button::A));
        assert!(!device.is_down(Button::A));

        device.poll_buttons();
        assert!(device.was_just_pressed(Button::A));
        assert!(device.state_just_changed(Button::A));
        assert!(!device.was_just_pressed(Button::B));

        device.poll_buttons();
        assert!(device.is_down(Button::A));
        assert!(!device.was_just_pressed(Button::A));
    }

    #[test]
    fn test_poll_buttons_leaves_axes_alone() {
        let (source, mut device) = device();
        source.set_axis(Axis::LeftTrigger, 0.8);

        device.poll_buttons();
        assert!(!device.is_down(Axis::LeftTrigger));

        device.poll_axes();
        assert!(device.was_just_pressed(Axis::LeftTrigger));
    }

    #[test]
    fn test_default_threshold_applies_to_axes() {
        let (source, mut device) = device();
        assert_eq!(
            device.axis_reader(Axis::RightStickX).threshold(),
            Threshold::DEFAULT
        );

        source.set_axis(Axis::RightStickX, -0.04);
        device.poll_all();
        assert!(!device.is_down(Axis::RightStickX));

        source.set_axis(Axis::RightStickX, -0.06);
        device.poll_all();
        assert!(device.was_just_pressed(Axis::RightStickX));
    }

    #[test]
    fn test_seeded_state_before_first_poll() {
        let source = Rc::new(VirtualSource::new());
        source.set_button(Button::Start, true);
        let device = InputDevice::with_defaults(Rc::clone(&source));

        assert!(device.is_down(Button::Start));
        assert!(!device.was_just_pressed(Button::Start));
    }

    #[test]
    fn test_negate_y_only_affects_vertical_accessors() {
        let (source, device) = device();
        source.set_axis(Axis::LeftStickY, -0.75);
        source.set_axis(Axis::LeftStickX, -0.5);
        assert_eq!(device.left_y(), -0.75);

        let device = device.with_negate_y(true);
        assert!(device.is_negating_y());
        assert_eq!(device.left_y(), 0.75);
        assert_eq!(device.left_x(), -0.5);
        assert_eq!(device.axis(Axis::LeftStickY), -0.75);
    }

    #[test]
    fn test_oriented_axis_flips_only_vertical_sticks() {
        let (source, device) = device();
        let device = device.with_negate_y(true);
        for axis in Axis::ALL {
            source.set_axis(axis, 0.25);
        }

        for axis in Axis::ALL {
            let expected = if axis.is_vertical() { -0.25 } else { 0.25 };
            assert_eq!(device.oriented_axis(axis), expected, "{}", axis);
        }
    }

    #[test]
    fn test_vertical_accessors_are_independent() {
        let (source, mut device) = device();
        source.set_axis(Axis::LeftStickY, 0.3);
        source.set_axis(Axis::RightStickY, -0.9);
        assert_eq!(device.left_y(), 0.3);
        assert_eq!(device.right_y(), -0.9);

        device.set_negate_y(true);
        assert_eq!(device.left_y(), -0.3);
        assert_eq!(device.right_y(), 0.9);
    }

    #[test]
    fn test_edges_report() {
        let (source, mut device) = device();
        source.set_button(Button::X, true);
        source.set_axis(Axis::RightTrigger, 1.0);
        device.poll_all();

        assert_eq!(
            device.edges(),
            vec![
                EdgeEvent {
                    channel: Channel::Axis(Axis::RightTrigger),
                    kind: EdgeKind::Pressed,
                },
                EdgeEvent {
                    channel: Channel::Button(Button::X),
                    kind: EdgeKind::Pressed,
                },
            ]
        );

        source.set_button(Button::X, false);
        device.poll_all();
        assert_eq!(
            device.edges(),
            vec![EdgeEvent {
                channel: Channel::Button(Button::X),
                kind: EdgeKind::Released,
            }]
        );
    }

    #[test]
    fn test_toggle_factory_validates_threshold() {
        let (_source, device) = device();
        assert!(device.toggle(Axis::LeftTrigger, 0.5).is_ok());
        assert!(matches!(
            device.toggle(Axis::LeftTrigger, -1.0),
            Err(InputError::InvalidThreshold { .. })
        ));
    }
}
