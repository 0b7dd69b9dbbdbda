//! Error types for the reactive engine.

use thiserror::Error;

/// Errors surfaced by the reactive engine.
#[derive(Debug, Error)]
pub enum ReactiveError {
    /// One or more subscribers panicked while a write was being propagated.
    ///
    /// `failed` counts every computation whose own body panicked anywhere
    /// downstream; `notified` counts the direct subscribers that were re-run.
    /// `message` is taken from the first panic payload of the wave.
    #[error("{failed} subscriber(s) panicked while propagating to {notified} direct subscriber(s): {message}")]
    SubscriberPanicked {
        failed: usize,
        notified: usize,
        message: String,
    },

    /// One computation was re-entered by its own writes past the configured limit.
    #[error("propagation re-entered a computation past the depth limit of {limit}; the dependency graph contains a cycle")]
    DepthExceeded { limit: usize },

    /// A configuration document could not be parsed.
    #[error("failed to parse runtime configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ReactiveError>;

/// Extract a human readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(error) = payload.downcast_ref::<ReactiveError>() {
        error.to_string()
    } else {
        "non-string panic payload".to_string()
    }
}
