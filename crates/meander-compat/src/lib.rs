//! # Meander Compat
//!
//! Structural contract compatibility checking for Meander middleware
//! stacks.
//!
//! Two independent operations live here:
//!
//! - [`equivalent`] - the type-equivalence checker: an asymmetric
//!   "is-b-an-acceptable-substitute-for-a" comparison between two optional
//!   descriptors, recursing through nested object shapes with a superset
//!   rule on field names
//! - [`validate`] - the stack validator: walks every adjacent pair of a
//!   stack and reports contract incompatibilities as a list of
//!   [`Diagnostic`](meander_core::Diagnostic) records
//!
//! Validation is advisory and opt-in. Nothing here is invoked by the
//! composers in `meander-pipeline`; an invalid stack can still be composed
//! and executed. The validator accepts a checker override
//! ([`validate_with`]) so a different compatibility algorithm can be
//! substituted without forking the walk.

#![doc(html_root_url = "https://docs.rs/meander-compat/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod equivalence;
pub mod validator;

pub use equivalence::equivalent;
pub use validator::{validate, validate_with};
