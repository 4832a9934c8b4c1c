//! Error definitions for the input subsystem
//!
//! Every failure here is caller misuse (bad configuration, unknown channel
//! name) or a backend that refused to start. Nothing is transient, so nothing
//! is retried.

use thiserror::Error;

/// Errors raised while building or configuring input components
#[derive(Debug, Error)]
pub enum InputError {
    /// A channel name did not match any member of the closed channel set
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// A threshold outside the channel's normalized domain
    #[error("Invalid threshold {value} for {channel}: expected a finite value in [0.0, {max}]")]
    InvalidThreshold {
        channel: String,
        value: f32,
        max: f32,
    },

    /// Settings file could not be read, parsed or written
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The hardware backend failed to initialize
    #[error("Backend error: {0}")]
    BackendError(String),
}
