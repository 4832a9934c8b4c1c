//! Fixed-rate control loop driving an [`InputDevice`]
//!
//! The loop is a small typestate machine:
//!
//! ```text
//! ControlLoop<Initializing> ──initialize()──► ControlLoop<Running> ──run()──► stopped
//! ```
//!
//! Each tick refreshes the raw source, polls every channel once (axes, then
//! buttons) and hands the device to the caller's tick handler. Polling and
//! handling happen on the same task, so handlers never observe a half-polled
//! device.

use crate::controller::device::{EdgeKind, InputDevice};
use crate::controller::source::RawInputSource;
use crate::error::InputError;
use crate::settings::InputSettings;
use chrono::{DateTime, Local};
use std::marker::PhantomData;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Counters reported by the loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub presses: u64,
    pub releases: u64,
}

/// Loop state markers
pub trait LoopState {}

/// Settings not yet validated
#[derive(Debug, Clone)]
pub struct Initializing;

/// Validated and ready to tick
#[derive(Debug, Clone)]
pub struct Running;

impl LoopState for Initializing {}
impl LoopState for Running {}

#[derive(Debug)]
pub struct ControlLoop<S: LoopState> {
    // Loop settings
    settings: InputSettings,

    // Stops `run` when cancelled
    shutdown: CancellationToken,

    // Totals since start
    stats: LoopStats,

    // Counters since the last stats log
    window: LoopStats,
    window_start: DateTime<Local>,

    marker: PhantomData<S>,
}

// Available in all states
impl<S: LoopState> ControlLoop<S> {
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }
}

impl ControlLoop<Initializing> {
    pub fn create(settings: InputSettings, shutdown: CancellationToken) -> Self {
        debug!("Creating control loop with settings: {:?}", settings);
        Self {
            settings,
            shutdown,
            stats: LoopStats::default(),
            window: LoopStats::default(),
            window_start: Local::now(),
            marker: PhantomData,
        }
    }

    /// Validates the settings and arms the loop
    pub fn initialize(self) -> Result<ControlLoop<Running>, InputError> {
        self.settings.validate()?;
        info!(
            "Control loop initialized with {}ms period",
            self.settings.poll_interval_ms
        );
        Ok(ControlLoop {
            settings: self.settings,
            shutdown: self.shutdown,
            stats: self.stats,
            window: self.window,
            window_start: self.window_start,
            marker: PhantomData,
        })
    }
}

impl ControlLoop<Running> {
    /// Polls `device` once and passes it to `on_tick`
    pub fn tick<Src, F>(&mut self, device: &mut InputDevice<Src>, on_tick: &mut F)
    where
        Src: RawInputSource,
        F: FnMut(&InputDevice<Src>),
    {
        device.source().refresh();
        device.poll_all();

        for edge in device.edges() {
            match edge.kind {
                EdgeKind::Pressed => {
                    self.stats.presses += 1;
                    self.window.presses += 1;
                }
                EdgeKind::Released => {
                    self.stats.releases += 1;
                    self.window.releases += 1;
                }
            }
            debug!(
                "{} {:?} at {}",
                edge.channel,
                edge.kind,
                Local::now().format("%H:%M:%S.%3f")
            );
        }
        self.stats.ticks += 1;
        self.window.ticks += 1;

        on_tick(device);
    }

    /// Ticks at the configured period until the shutdown token is cancelled
    pub async fn run<Src, F>(mut self, device: &mut InputDevice<Src>, mut on_tick: F) -> LoopStats
    where
        Src: RawInputSource,
        F: FnMut(&InputDevice<Src>),
    {
        let period = Duration::from_millis(self.settings.poll_interval_ms);
        let mut timer = interval(period);
        // A late tick must not be followed by a burst of catch-up polls, each
        // of which would hide the edges of the one before.
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let stats_interval = chrono::Duration::seconds(30);

        info!("Entering control loop ({}ms period)", period.as_millis());
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = timer.tick() => {}
            }

            self.tick(device, &mut on_tick);

            let now = Local::now();
            if now - self.window_start > stats_interval {
                let elapsed_seconds = (now - self.window_start).num_seconds().max(1);
                info!(
                    "Control loop stats: {} ticks, {} presses, {} releases in {} seconds ({:.1} ticks/sec)",
                    self.window.ticks,
                    self.window.presses,
                    self.window.releases,
                    elapsed_seconds,
                    self.window.ticks as f64 / elapsed_seconds as f64
                );
                self.window = LoopStats::default();
                self.window_start = now;
            }
        }

        info!("Control loop stopping after {} ticks", self.stats.ticks);
        self.stats.clone()
    }
}
