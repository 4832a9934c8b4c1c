//! # Input Settings
//!
//! TOML-backed settings for the input registry and the control loop.
//!
//! ```toml
//! axis_threshold = 0.05
//! negate_y = true
//! poll_interval_ms = 20
//!
//! [axis_thresholds]
//! left_trigger = 0.2
//! right_trigger = 0.2
//! ```
//!
//! Override keys are channel names and are resolved when the registry is
//! built; an unknown name is reported as [`InputError::ChannelNotFound`]
//! rather than ignored, and two spellings of the same axis are rejected.

use crate::controller::channels::Axis;
use crate::controller::edge::Threshold;
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const APP_DIR: &str = "edgepad";
const SETTINGS_FILE: &str = "input.toml";

/// Settings for one input device and the loop that polls it
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InputSettings {
    /// Threshold applied to every axis without an override
    pub axis_threshold: f32,

    /// Report pushing a stick forward as positive on `left_y`/`right_y`
    pub negate_y: bool,

    /// Control-loop period in milliseconds
    pub poll_interval_ms: u64,

    /// Per-axis threshold overrides keyed by axis name. Kept last so it
    /// serializes as a trailing TOML table.
    pub axis_thresholds: BTreeMap<String, f32>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            axis_threshold: Threshold::DEFAULT.value(),
            negate_y: false,
            poll_interval_ms: 20,
            axis_thresholds: BTreeMap::new(),
        }
    }
}

impl InputSettings {
    /// Resolves the effective threshold of every axis, indexed by
    /// [`Axis::index`].
    pub fn thresholds(&self) -> Result<[Threshold; Axis::COUNT], InputError> {
        let mut values = [self.axis_threshold; Axis::COUNT];
        let mut overridden = [false; Axis::COUNT];
        for (name, value) in &self.axis_thresholds {
            let axis: Axis = name.parse()?;
            if overridden[axis.index()] {
                return Err(InputError::ConfigError(format!(
                    "duplicate threshold override for {}",
                    axis
                )));
            }
            debug!("Threshold override for {}: {}", axis, value);
            overridden[axis.index()] = true;
            values[axis.index()] = *value;
        }

        let mut thresholds = [Threshold::DEFAULT; Axis::COUNT];
        for axis in Axis::ALL {
            thresholds[axis.index()] =
                Threshold::for_channel(values[axis.index()], axis.kind(), axis.name())?;
        }
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.poll_interval_ms == 0 {
            return Err(InputError::ConfigError(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        self.thresholds().map(|_| ())
    }

    /// `<config dir>/edgepad/input.toml`
    pub fn default_path() -> Result<PathBuf, InputError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .ok_or_else(|| InputError::ConfigError("No config directory available".to_string()))
    }

    pub fn from_toml(content: &str) -> Result<Self, InputError> {
        let settings: Self =
            toml::from_str(content).map_err(|e| InputError::ConfigError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        debug!("Loading input settings from {:?}", path);
        let content = fs::read_to_string(path)
            .map_err(|e| InputError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), InputError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| InputError::ConfigError(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| InputError::ConfigError(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(path, content)
            .map_err(|e| InputError::ConfigError(format!("{}: {}", path.display(), e)))?;
        info!("Saved input settings to {:?}", path);
        Ok(())
    }

    /// Loads `path`, writing the defaults there first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, InputError> {
        if !path.exists() {
            warn!("No input settings at {:?}, writing defaults", path);
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }
        Self::load(path)
    }
}
