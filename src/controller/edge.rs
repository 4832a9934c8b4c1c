//! Edge detection over polled channels
//!
//! A detector keeps the boolean state of one channel as seen by the last two
//! explicit samples. Nothing changes between samples even if the raw signal
//! does, so every query inside one control-loop tick sees the same picture.
//!
//! ```text
//!            sample: rule(raw) = true
//!   RELEASED ─────────────────────────► PRESSED
//!            ◄─────────────────────────
//!            sample: rule(raw) = false
//! ```

use crate::controller::channels::AxisKind;
use crate::error::InputError;

/// Produces one raw reading per call
///
/// Implemented for any `FnMut() -> T` closure and for the registry's
/// channel readers.
pub trait Sampler {
    type Value;

    fn sample(&mut self) -> Self::Value;
}

impl<T, F> Sampler for F
where
    F: FnMut() -> T,
{
    type Value = T;

    fn sample(&mut self) -> T {
        self()
    }
}

/// Queries shared by every detector
///
/// All of them are pure reads of the buffered previous/current pair.
pub trait EdgeQuery {
    /// State before the latest sample
    fn previous_state(&self) -> bool;

    /// State after the latest sample
    fn current_state(&self) -> bool;

    fn is_down(&self) -> bool {
        self.current_state()
    }

    fn was_just_pressed(&self) -> bool {
        !self.previous_state() && self.current_state()
    }

    fn was_just_released(&self) -> bool {
        self.previous_state() && !self.current_state()
    }

    fn state_just_changed(&self) -> bool {
        self.previous_state() != self.current_state()
    }
}

/// Validated magnitude threshold for an axis
///
/// A reading counts as down when `|reading| > threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold(f32);

impl Threshold {
    /// Default threshold used for every axis of a registry
    pub const DEFAULT: Threshold = Threshold(0.05);

    /// Validates `value` against the domain of `kind`
    pub fn new(value: f32, kind: AxisKind) -> Result<Self, InputError> {
        Self::for_channel(value, kind, &format!("{:?} axis", kind))
    }

    pub(crate) fn for_channel(
        value: f32,
        kind: AxisKind,
        channel: &str,
    ) -> Result<Self, InputError> {
        let max = kind.max_magnitude();
        if !value.is_finite() || !(0.0..=max).contains(&value) {
            return Err(InputError::InvalidThreshold {
                channel: channel.to_string(),
                value,
                max,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn exceeded_by(self, reading: f32) -> bool {
        reading.abs() > self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Edge detector over a boolean sampler
#[derive(Debug)]
pub struct EdgeDetector<P> {
    previous: bool,
    current: bool,
    generation: u64,
    sampler: P,
}

impl<P> EdgeDetector<P>
where
    P: Sampler<Value = bool>,
{
    /// Seeds the detector with one sample. The seed sets both halves of the
    /// pair, so no edge is reported before the first `sample()`.
    pub fn new(mut sampler: P) -> Self {
        let seed = sampler.sample();
        Self {
            previous: seed,
            current: seed,
            generation: 0,
            sampler,
        }
    }

    /// Shifts current into previous and takes a fresh sample
    ///
    /// Call at most once per tick: a second call inside the same tick hides
    /// the edge the first one observed.
    pub fn sample(&mut self) {
        self.previous = self.current;
        self.current = self.sampler.sample();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of samples taken since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<P> EdgeQuery for EdgeDetector<P> {
    fn previous_state(&self) -> bool {
        self.previous
    }

    fn current_state(&self) -> bool {
        self.current
    }
}

/// Turns a continuous sampler into a boolean one
#[derive(Debug)]
pub struct Thresholded<P> {
    inner: P,
    threshold: Threshold,
}

impl<P> Sampler for Thresholded<P>
where
    P: Sampler<Value = f32>,
{
    type Value = bool;

    fn sample(&mut self) -> bool {
        self.threshold.exceeded_by(self.inner.sample())
    }
}

/// Edge detector over a continuous sampler and a fixed threshold
#[derive(Debug)]
pub struct AxisEdgeDetector<P> {
    edges: EdgeDetector<Thresholded<P>>,
}

impl<P> AxisEdgeDetector<P>
where
    P: Sampler<Value = f32>,
{
    /// Builds a detector for a stick-style axis (`[-1.0, 1.0]`)
    pub fn new(sampler: P, threshold: f32) -> Result<Self, InputError> {
        Ok(Self::with_threshold(
            sampler,
            Threshold::new(threshold, AxisKind::Stick)?,
        ))
    }

    pub fn with_threshold(sampler: P, threshold: Threshold) -> Self {
        Self {
            edges: EdgeDetector::new(Thresholded {
                inner: sampler,
                threshold,
            }),
        }
    }

    pub fn sample(&mut self) {
        self.edges.sample();
    }

    pub fn threshold(&self) -> Threshold {
        self.edges.sampler.threshold
    }

    pub fn generation(&self) -> u64 {
        self.edges.generation()
    }
}

impl<P> EdgeQuery for AxisEdgeDetector<P> {
    fn previous_state(&self) -> bool {
        self.edges.previous_state()
    }

    fn current_state(&self) -> bool {
        self.edges.current_state()
    }
}
