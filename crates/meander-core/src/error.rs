//! Error types for Meander.
//!
//! [`MeanderError`] covers the engine's own failure modes. Contract
//! mismatches are deliberately *not* errors - the validator reports them as
//! data (see [`crate::Diagnostic`]) so the caller decides whether to abort,
//! warn, or proceed. The [`MeanderError::Middleware`] variant is the channel
//! by which step bodies surface their own execution faults; the engine only
//! propagates it, never creates or catches it.

use thiserror::Error;

/// Result type alias using [`MeanderError`].
pub type MeanderResult<T> = Result<T, MeanderError>;

/// Standard error type for Meander.
///
/// # Example
///
/// ```
/// use meander_core::{MeanderError, MeanderResult};
///
/// fn load_step(name: &str) -> MeanderResult<()> {
///     if name.is_empty() {
///         return Err(MeanderError::middleware("step name must not be empty"));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum MeanderError {
    /// One or more requested step names are not present in the registry.
    ///
    /// Registry resolution is atomic: every missing name is collected, in
    /// request order, before any provider runs.
    #[error("Missing middlewares in registry: {}", .missing.join(", "))]
    MissingMiddlewares {
        /// The missing names, in request order.
        missing: Vec<String>,
    },

    /// A stack was constructed with zero steps.
    #[error("middleware stack must contain at least one step")]
    EmptyStack,

    /// A failure raised by a middleware body during execution.
    ///
    /// The composers never catch this; it propagates through the fold to
    /// whichever caller is positioned to handle it - an enclosing step, or
    /// the top-level invoker of the pipeline.
    #[error("{message}")]
    Middleware {
        /// Human-readable failure message.
        message: String,
        /// The underlying cause (not produced by the engine).
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl MeanderError {
    /// Creates a missing-middlewares error from the names, in request order.
    #[must_use]
    pub fn missing_middlewares<I, N>(missing: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::MissingMiddlewares {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a middleware execution fault with a message.
    #[must_use]
    pub fn middleware(message: impl Into<String>) -> Self {
        Self::Middleware {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a middleware execution fault with a source error.
    pub fn middleware_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Middleware {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
