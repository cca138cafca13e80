//! Error types for Fletcher.
//!
//! This module provides [`FletcherError`], the standard error type used
//! throughout the bootstrap pipeline. Each variant corresponds to one class
//! of startup failure, and [`FletcherError::status_code`] maps a variant to
//! the numeric class reported at the HTTP boundary: `400` for caller
//! misconfiguration, `500` for internal or registry failures.
//!
//! Propagation policy: every stage surfaces the first error it encounters
//! upward unchanged, without retry. A builder's own failure travels inside
//! [`FletcherError::Builder`] and is never re-wrapped by later stages.

use std::path::PathBuf;

use thiserror::Error;

use crate::handleable::Capability;

/// Boxed error type for opaque failures crossing the builder seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias using [`FletcherError`].
pub type FletcherResult<T> = Result<T, FletcherError>;

/// Standard error type for the Fletcher bootstrap pipeline.
///
/// # Example
///
/// ```
/// use fletcher_core::FletcherError;
///
/// let err = FletcherError::configuration("main handler name not specified");
/// assert_eq!(err.status_code(), 400);
/// ```
#[derive(Error, Debug)]
pub enum FletcherError {
    /// Missing or contradictory configuration (e.g. no main handler name).
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description of the misconfiguration.
        message: String,
    },

    /// A named builder is absent from the handleable builder registry.
    #[error("no handleable builder registered under `{name}`")]
    BuilderNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The resolved handleable does not expose the required capability view.
    #[error("handler `{name}` is not of type {expected} handler (component exposes {actual})")]
    CapabilityMismatch {
        /// Name of the resolved component.
        name: String,
        /// The capability the resolution path required.
        expected: Capability,
        /// The capabilities the handleable actually exposes.
        actual: &'static str,
    },

    /// A component's builder failed during installation.
    ///
    /// Installation aborts on the first failure; nothing external has been
    /// committed, so no rollback happens.
    #[error("component `{name}` (position {index}) failed to install")]
    Install {
        /// Name of the failing component descriptor.
        name: String,
        /// Position of the descriptor in the installation order.
        index: usize,
        /// The builder's error, unchanged.
        #[source]
        source: Box<FletcherError>,
    },

    /// Handler construction failed. Carries the builder's own error verbatim.
    #[error("{0}")]
    Builder(BoxError),

    /// The listening port could not be acquired. Fatal; never retried.
    #[error("failed to bind server to {addr}")]
    Bind {
        /// The address that could not be bound.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An external configuration source could not be loaded.
    #[error("failed to load configuration from {path}")]
    ConfigLoad {
        /// Path to the configuration source.
        path: PathBuf,
        /// Underlying loader error.
        source: BoxError,
    },

    /// A request or response body stream failed mid-flight.
    #[error("body stream failed: {message}")]
    Stream {
        /// Description of the stream failure.
        message: String,
    },
}

impl FletcherError {
    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wraps an opaque builder failure.
    ///
    /// The wrapped value is what resolution reports; no later stage masks it.
    pub fn builder(source: impl Into<BoxError>) -> Self {
        Self::Builder(source.into())
    }

    /// Creates a stream error from a message.
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Returns the numeric error class reported at the HTTP boundary.
    ///
    /// Caller misconfiguration is `400`; registry and internal failures are
    /// `500`. Wrapping variants delegate to the wrapped error's class.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration { .. } | Self::CapabilityMismatch { .. } | Self::ConfigLoad { .. } => 400,
            Self::BuilderNotFound { .. } | Self::Bind { .. } | Self::Stream { .. } => 500,
            Self::Install { source, .. } => source.status_code(),
            Self::Builder(source) => source
                .downcast_ref::<Self>()
                .map_or(500, Self::status_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_is_caller_class() {
        let err = FletcherError::configuration("no main handler");
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("no main handler"));
    }

    #[test]
    fn test_registry_errors_are_internal_class() {
        let err = FletcherError::BuilderNotFound {
            name: "greeter".to_string(),
        };
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_capability_mismatch_names_both_sides() {
        let err = FletcherError::CapabilityMismatch {
            name: "greeter".to_string(),
            expected: Capability::Http,
            actual: "stream",
        };
        assert_eq!(err.status_code(), 400);
        let message = err.to_string();
        assert!(message.contains("http"));
        assert!(message.contains("stream"));
    }

    #[test]
    fn test_builder_error_preserves_display() {
        let err = FletcherError::builder("database unavailable");
        assert_eq!(err.to_string(), "database unavailable");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_builder_error_keeps_wrapped_class() {
        let inner = FletcherError::configuration("bad greeting");
        let err = FletcherError::builder(inner);
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_install_error_delegates_class_to_source() {
        let err = FletcherError::Install {
            name: "greeter".to_string(),
            index: 2,
            source: Box::new(FletcherError::configuration("missing greet key")),
        };
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("greeter"));
        assert!(err.to_string().contains("position 2"));
    }
}
