//! The stack validator.
//!
//! Walks every adjacent pair of a [`Stack`] and checks the two contract
//! seams between them:
//!
//! - **argument seam** - what `self` declares it passes forward
//!   (`next_input`) against what `next` declares it accepts (`own_input`);
//!   skipped entirely when `self` declares no next-input, since a terminal
//!   step has nothing to pass
//! - **output seam** - what `next` declares it produces (`own_output`)
//!   against what `self` declares it expects back (`next_output`); always
//!   checked
//!
//! Mismatches are reported as data, never raised: the caller inspects the
//! returned list and decides whether to abort, warn, or compose anyway.

use meander_core::{Diagnostic, Introspect, Mismatch, Stack};

use crate::equivalence::equivalent;

/// Validates a stack with the default equivalence checker.
///
/// Returns one [`Diagnostic`] per failed check, in scan order (pair index
/// ascending, argument before output within a pair). An empty list means
/// every adjacent seam checked out.
///
/// # Example
///
/// ```
/// use meander_compat::validate;
/// use meander_core::{Middleware, Schema, Stack};
///
/// let shape = Schema::object([("value", Schema::number())]);
/// let stack: Stack<(), _> = Stack::new(vec![
///     Middleware::builder(())
///         .name("outer")
///         .next_input(shape.clone())
///         .next_output(shape.clone())
///         .build(),
///     Middleware::builder(())
///         .name("inner")
///         .own_input(shape.clone())
///         .own_output(shape)
///         .build(),
/// ])
/// .unwrap();
///
/// assert!(validate(&stack).is_empty());
/// ```
#[must_use]
pub fn validate<H, S: Introspect>(stack: &Stack<H, S>) -> Vec<Diagnostic> {
    validate_with(stack, equivalent)
}

/// Validates a stack with a caller-supplied compatibility checker.
///
/// The checker receives `(expected, offered)` in that order and decides
/// whether `offered` is an acceptable substitute where `expected` is
/// declared. [`validate`] is this function with
/// [`equivalent`](crate::equivalent) plugged in.
pub fn validate_with<H, S, F>(stack: &Stack<H, S>, checker: F) -> Vec<Diagnostic>
where
    F: Fn(Option<&S>, Option<&S>) -> bool,
{
    let mut diagnostics = Vec::new();

    for (index, pair) in stack.steps().windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);

        if current.next_input().is_some() && !checker(next.own_input(), current.next_input()) {
            diagnostics.push(Diagnostic::new(
                index,
                current.display_name(),
                next.display_name(),
                Mismatch::Argument,
            ));
        }

        if !checker(current.next_output(), next.own_output()) {
            diagnostics.push(Diagnostic::new(
                index,
                current.display_name(),
                next.display_name(),
                Mismatch::Output,
            ));
        }
    }

    if !diagnostics.is_empty() {
        tracing::warn!(
            mismatches = diagnostics.len(),
            "middleware stack failed contract validation"
        );
    }

    diagnostics
}
