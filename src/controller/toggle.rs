//! Toggle latch on top of an axis edge detector

use crate::controller::edge::{AxisEdgeDetector, EdgeQuery, Sampler, Threshold};
use crate::error::InputError;
use tracing::debug;

/// Persistent on/off flag that flips on every release edge of its axis
///
/// Owns its [`AxisEdgeDetector`]; [`ToggleDetector::sample`] must be driven
/// on the same cadence as the registry polls.
#[derive(Debug)]
pub struct ToggleDetector<P> {
    axis: AxisEdgeDetector<P>,
    stored_toggle: bool,
    // Generation of the release edge already folded into `stored_toggle`
    consumed: Option<u64>,
}

impl<P> ToggleDetector<P>
where
    P: Sampler<Value = f32>,
{
    pub fn new(sampler: P, threshold: f32) -> Result<Self, InputError> {
        Ok(Self::from_detector(AxisEdgeDetector::new(sampler, threshold)?))
    }

    pub fn with_threshold(sampler: P, threshold: Threshold) -> Self {
        Self::from_detector(AxisEdgeDetector::with_threshold(sampler, threshold))
    }

    pub fn from_detector(axis: AxisEdgeDetector<P>) -> Self {
        Self {
            axis,
            stored_toggle: false,
            consumed: None,
        }
    }

    pub fn sample(&mut self) {
        self.axis.sample();
    }

    /// Returns the toggle, flipping it first if the last sample was a
    /// release edge.
    ///
    /// **Not a pure getter.** The first call after a releasing sample mutates
    /// the stored flag. Further calls before the next sample return the same
    /// value.
    pub fn get_state(&mut self) -> bool {
        let generation = self.axis.generation();
        if self.axis.was_just_released() && self.consumed != Some(generation) {
            self.stored_toggle = !self.stored_toggle;
            self.consumed = Some(generation);
            debug!("Toggle flipped to {}", self.stored_toggle);
        }
        self.stored_toggle
    }

    /// The owned axis detector, for plain edge queries
    pub fn detector(&self) -> &AxisEdgeDetector<P> {
        &self.axis
    }
}
