//! # Meander
//!
//! **Typed middleware composition and contract validation for the Themis
//! Platform**
//!
//! Meander turns an ordered stack of transformation steps into a single
//! callable pipeline, and checks adjacent steps' declared input/output
//! contracts for structural compatibility:
//!
//! - 🔗 **Composition** – fold a stack into one entry point, in a
//!   future-return or callback-resolution flavor
//! - 📐 **Contract Validation** – opt-in, advisory structural checking
//!   with a swappable equivalence algorithm
//! - 📦 **Registry** – resolve ordered name lists into stacks through
//!   async providers, atomically
//!
//! ## Quick Start
//!
//! ```rust
//! use meander::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> MeanderResult<()> {
//! let double = Middleware::builder(handler(|input, _next| async move {
//!     Ok(json!({ "result": input["value"].as_f64().unwrap_or(0.0) * 2.0 }))
//! }))
//! .name("double")
//! .own_input(Schema::object([("value", Schema::number())]))
//! .own_output(Schema::object([("result", Schema::number())]))
//! .build();
//!
//! let stack = Stack::from(double);
//! assert!(validate(&stack).is_empty());
//!
//! let output = Pipeline::compose(&stack).run(json!({ "value": 5 })).await?;
//! assert_eq!(output, json!({ "result": 10.0 }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! names ──registry──▶ Stack ──compose──▶ Pipeline ──run──▶ output
//!                       │
//!                       └──validate──▶ Vec<Diagnostic>   (advisory)
//! ```
//!
//! Composition never consults contracts, and validation never executes
//! steps; both are independent reads of the same stack.

#![doc(html_root_url = "https://docs.rs/meander/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use meander_core as core;

// Re-export compatibility checking
pub use meander_compat as compat;

// Re-export pipeline composition
pub use meander_pipeline as pipeline;

// Re-export the registry
pub use meander_registry as registry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use meander::prelude::*;
/// ```
pub mod prelude {
    pub use meander_core::{
        Diagnostic, MeanderError, MeanderResult, Middleware, Mismatch, Schema, Stack,
    };

    // Re-export the compatibility operations
    pub use meander_compat::{equivalent, validate, validate_with};

    // Re-export both pipeline flavors
    pub use meander_pipeline::{
        event_handler, handler, EventNext, EventPipeline, EventStack, EventStep, Next, Pipeline,
        PipelineStack, PipelineStep, Resolver,
    };

    // Re-export the registry
    pub use meander_registry::{Provider, Registry};
}
