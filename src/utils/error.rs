//! The `error` module defines the error types raised by `ticksub`.
//!
//! The registry validates exactly one thing: that a subscription is backed by
//! a callable callback. Publishing to an unknown topic or unsubscribing an
//! unknown identifier are ordinary outcomes reported through return values,
//! not errors.

use thiserror::Error;

/// Errors produced by the topic registry.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A subscription was requested without a callable callback.
    #[error("invalid argument: subscription to topic '{topic}' has no callable callback")]
    InvalidArgument {
        /// The topic the caller tried to subscribe to.
        topic: String,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::InvalidArgument { .. } => "registry_invalid_argument",
        }
    }
}

/// Result alias used across the registry API.
pub type Result<T> = std::result::Result<T, RegistryError>;
