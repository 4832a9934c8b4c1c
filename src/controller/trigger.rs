//! Composite triggers for the command layer
//!
//! A [`CompositeTrigger`] is an AND over the *immediate* readings of its
//! channels. It never looks at the registry's buffered detector state, so it
//! has no edge semantics of its own and is safe to query any number of times
//! per tick.

use crate::controller::channels::{Axis, AxisKind, Button};
use crate::controller::edge::{Sampler, Threshold};
use crate::controller::source::RawInputSource;
use crate::controller::toggle::ToggleDetector;
use crate::error::InputError;
use std::rc::Rc;

/// Boolean predicate polled by the command scheduler once per tick
pub trait Trigger {
    /// Current value of the predicate
    ///
    /// Takes `&mut self` because latching triggers such as
    /// [`ToggleDetector`] update themselves when read. Composite triggers do
    /// not.
    fn get(&mut self) -> bool;
}

// Channels a composite trigger combines
#[derive(Debug, Clone, PartialEq)]
enum Selectors {
    Buttons(Vec<Button>),
    Axes { axes: Vec<Axis>, threshold: Threshold },
}

/// AND-combination of channel readings
#[derive(Debug)]
pub struct CompositeTrigger<S> {
    source: Rc<S>,
    selectors: Selectors,
}

impl<S: RawInputSource> CompositeTrigger<S> {
    /// True while every button in `buttons` is held
    pub fn buttons(source: Rc<S>, buttons: Vec<Button>) -> Self {
        Self {
            source,
            selectors: Selectors::Buttons(buttons),
        }
    }

    /// True while every axis in `axes` reads at least `threshold`
    ///
    /// The comparison uses the signed reading: a stick pushed to -1.0 does not
    /// satisfy a 0.5 threshold.
    pub fn axes(source: Rc<S>, threshold: f32, axes: Vec<Axis>) -> Result<Self, InputError> {
        // Both axis domains top out at 1.0, so one check covers every selector.
        let channel = axes.first().map_or("axis trigger", |axis| axis.name());
        let threshold = Threshold::for_channel(threshold, AxisKind::Trigger, channel)?;
        Ok(Self {
            source,
            selectors: Selectors::Axes { axes, threshold },
        })
    }

    /// Re-reads every selector. An empty selector list yields `true`.
    pub fn get(&self) -> bool {
        match &self.selectors {
            Selectors::Buttons(buttons) => buttons
                .iter()
                .all(|button| self.source.read_boolean(*button)),
            Selectors::Axes { axes, threshold } => axes
                .iter()
                .all(|axis| self.source.read_continuous(*axis) >= threshold.value()),
        }
    }
}

impl<S: RawInputSource> Trigger for CompositeTrigger<S> {
    fn get(&mut self) -> bool {
        CompositeTrigger::get(self)
    }
}

impl<P> Trigger for ToggleDetector<P>
where
    P: Sampler<Value = f32>,
{
    fn get(&mut self) -> bool {
        self.get_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::source::VirtualSource;

    #[test]
    fn test_button_and_semantics() {
        let source = Rc::new(VirtualSource::new());
        let trigger =
            CompositeTrigger::buttons(Rc::clone(&source), vec![Button::LeftBumper, Button::A]);

        source.set_button(Button::LeftBumper, true);
        assert!(!trigger.get());

        source.set_button(Button::A, true);
        assert!(trigger.get());
        assert!(trigger.get());
    }

    #[test]
    fn test_axis_and_semantics() {
        let source = Rc::new(VirtualSource::new());
        let trigger = CompositeTrigger::axes(
            Rc::clone(&source),
            0.5,
            vec![Axis::LeftTrigger, Axis::RightTrigger],
        )
        .unwrap();

        source.set_axis(Axis::LeftTrigger, 0.5);
        source.set_axis(Axis::RightTrigger, 0.2);
        assert!(!trigger.get());

        source.set_axis(Axis::RightTrigger, 0.9);
        assert!(trigger.get());
    }

    #[test]
    fn test_axis_trigger_uses_signed_reading() {
        let source = Rc::new(VirtualSource::new());
        let trigger = CompositeTrigger::axes(Rc::clone(&source), 0.5, vec![Axis::LeftStickX]).unwrap();

        source.set_axis(Axis::LeftStickX, -1.0);
        assert!(!trigger.get());
        source.set_axis(Axis::LeftStickX, 1.0);
        assert!(trigger.get());
    }

    #[test]
    fn test_empty_selector_list_is_vacuously_true() {
        let source = Rc::new(VirtualSource::new());
        assert!(CompositeTrigger::buttons(Rc::clone(&source), Vec::new()).get());
        assert!(CompositeTrigger::axes(Rc::clone(&source), 0.5, Vec::new())
            .unwrap()
            .get());
    }

    #[test]
    fn test_invalid_axis_threshold() {
        let source = Rc::new(VirtualSource::new());
        let err = CompositeTrigger::axes(source, 1.2, vec![Axis::RightTrigger]).unwrap_err();
        assert!(
            matches!(err, InputError::InvalidThreshold { ref channel, .. } if channel == "RightTrigger")
        );
    }

    #[test]
    fn test_toggle_as_trigger() {
        let source = Rc::new(VirtualSource::new());
        let reader = Rc::clone(&source);
        let mut toggle =
            ToggleDetector::new(move || reader.read_continuous(Axis::RightTrigger), 0.5).unwrap();

        source.set_axis(Axis::RightTrigger, 1.0);
        toggle.sample();
        assert!(!Trigger::get(&mut toggle));
        source.set_axis(Axis::RightTrigger, 0.0);
        toggle.sample();
        assert!(Trigger::get(&mut toggle));
    }
}
