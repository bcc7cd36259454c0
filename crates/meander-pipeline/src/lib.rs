//! # Meander Pipeline
//!
//! Stack composition for Meander: folding an ordered middleware stack into
//! a single callable entry point.
//!
//! ```text
//! input → step 0 → step 1 → … → step n-1 (terminal)
//!            ↓        ↓               ↓
//! output ← step 0 ← step 1 ← … ←──────┘
//! ```
//!
//! Two flavors share the same fold:
//!
//! - [`Pipeline`] - the future-return flavor: each step receives
//!   `(input, next)` and produces its output by returning (or erroring)
//! - [`EventPipeline`] - the callback-resolution flavor: each step receives
//!   `(input, next, resolve)` and signals completion through `resolve`,
//!   possibly before, after, or several times around its `next` call -
//!   which is what makes early/partial resolution and progress signaling
//!   possible
//!
//! Composition ignores contracts entirely; validating a stack (see
//! `meander-compat`) is a separate, opt-in operation over the same
//! structure. Each invocation of a composed pipeline builds a fresh call
//! chain with no shared mutable state, so repeat and concurrent
//! invocations are independent.

#![doc(html_root_url = "https://docs.rs/meander-pipeline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod event;
pub mod pipeline;

pub use event::{event_handler, EventHandler, EventNext, EventPipeline, EventStack, EventStep, Resolver};
pub use pipeline::{handler, Handler, Next, Pipeline, PipelineStack, PipelineStep};
