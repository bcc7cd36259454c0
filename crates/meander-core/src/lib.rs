//! # Meander Core
//!
//! Core types for the Meander middleware composition engine.
//!
//! This crate defines the data model shared by every other Meander crate:
//!
//! - [`Middleware`] - one step in a pipeline: a callable plus its declared
//!   input/output contracts and an optional display name
//! - [`Stack`] - a non-empty, ordered sequence of steps
//! - [`Schema`] - the default structural descriptor attached to contracts,
//!   and [`Introspect`], the narrow capability trait through which the
//!   engine reads *any* descriptor type
//! - [`Diagnostic`] - one record per contract incompatibility found by the
//!   stack validator
//! - [`MeanderError`] - the workspace error type
//!
//! Contracts are advisory metadata. The engine never synthesizes, infers,
//! or enforces them at call time; they exist so that
//! `meander-compat` can check adjacent steps for structural compatibility
//! as an explicit, opt-in operation.

#![doc(html_root_url = "https://docs.rs/meander-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod diagnostic;
pub mod error;
pub mod middleware;
pub mod schema;

// Re-export main types at crate root
pub use diagnostic::{Diagnostic, Mismatch};
pub use error::{MeanderError, MeanderResult};
pub use middleware::{Middleware, MiddlewareBuilder, Stack};
pub use schema::{ConformanceError, Introspect, Schema};

use std::future::Future;
use std::pin::Pin;

/// A boxed future that returns a value of type `T`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
