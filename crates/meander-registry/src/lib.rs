//! # Meander Registry
//!
//! Name-indexed source of middleware steps, resolved lazily and
//! asynchronously.
//!
//! A [`Registry`] maps step names to provider functions. Resolving an
//! ordered list of names is all-or-nothing: every requested name is checked
//! for presence *before any provider runs*, and a single descriptive error
//! enumerates everything missing. Present providers are then invoked and
//! awaited concurrently - provider work may overlap freely; only the
//! resulting stack's order is pinned to request order.
//!
//! The registry is caller-owned and immutable from the engine's point of
//! view; resolution only reads it.
//!
//! # Example
//!
//! ```
//! use meander_registry::Registry;
//! use meander_core::Middleware;
//!
//! let mut registry: Registry<()> = Registry::new();
//! registry.register_fn("echo", || async {
//!     Ok(Middleware::builder(()).name("echo").build())
//! });
//!
//! assert!(registry.contains("echo"));
//! assert!(!registry.contains("cache"));
//! ```

#![doc(html_root_url = "https://docs.rs/meander-registry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use futures_util::future::try_join_all;
use meander_core::{BoxFuture, MeanderError, MeanderResult, Middleware, Schema, Stack};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// An asynchronous source of one middleware step.
///
/// Providers run on every resolution; caching an expensive step is the
/// provider's own concern.
pub type Provider<H, S = Schema> =
    Arc<dyn Fn() -> BoxFuture<'static, MeanderResult<Middleware<H, S>>> + Send + Sync>;

/// A mapping from step name to provider.
pub struct Registry<H, S = Schema> {
    providers: HashMap<String, Provider<H, S>>,
}

impl<H, S> Registry<H, S> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registers a provider under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, provider: Provider<H, S>) {
        self.providers.insert(name.into(), provider);
    }

    /// Registers an async closure as a provider under `name`.
    pub fn register_fn<F, Fut>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = MeanderResult<Middleware<H, S>>> + Send + 'static,
    {
        self.register(name, Arc::new(move || Box::pin(f())));
    }

    /// Returns `true` when a provider is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` when no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolves an ordered list of names into a stack.
    ///
    /// All requested names are checked first; if any are missing, the whole
    /// resolution fails without invoking a single provider. Otherwise every
    /// provider is invoked and awaited concurrently, and the resulting
    /// stack preserves request order.
    ///
    /// # Errors
    ///
    /// - [`MeanderError::MissingMiddlewares`] listing every absent name in
    ///   request order
    /// - [`MeanderError::EmptyStack`] when `names` is empty
    /// - whatever error a provider surfaces
    pub async fn resolve(&self, names: &[&str]) -> MeanderResult<Stack<H, S>> {
        let missing: Vec<&str> = names
            .iter()
            .filter(|name| !self.providers.contains_key(**name))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(MeanderError::missing_middlewares(missing));
        }

        tracing::debug!(requested = names.len(), "resolving middleware stack");
        let pending: Vec<_> = names.iter().map(|name| (self.providers[*name])()).collect();
        let steps = try_join_all(pending).await?;
        Stack::new(steps)
    }
}

impl<H, S> Default for Registry<H, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, S> fmt::Debug for Registry<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
