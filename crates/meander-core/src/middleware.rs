//! Middleware steps and stacks.
//!
//! A middleware is a single record combining behavior and metadata: an
//! explicit callable field plus four optional contract descriptors and an
//! optional display name. The callable type is a generic parameter so that
//! both pipeline flavors (future-return and callback-resolution, defined in
//! `meander-pipeline`) share one step type, one stack type, and one
//! validator.
//!
//! A step with no next-contracts is *terminal*: it does not delegate to a
//! following step. By convention the terminal step sits at the end of a
//! stack, though nothing enforces that.

use crate::error::{MeanderError, MeanderResult};
use crate::schema::Schema;
use std::fmt;

/// Fallback display name for steps constructed without one.
const ANONYMOUS: &str = "<anonymous>";

/// One step in a pipeline.
///
/// `H` is the callable; `S` is the contract descriptor type. Contracts are
/// advisory metadata supplied by whoever authors the step - the engine
/// never synthesizes or infers them, and composition ignores them entirely.
///
/// # Example
///
/// ```
/// use meander_core::{Middleware, Schema};
///
/// let step = Middleware::builder(())
///     .name("double")
///     .own_input(Schema::object([("value", Schema::number())]))
///     .own_output(Schema::object([("result", Schema::number())]))
///     .build();
///
/// assert_eq!(step.name(), Some("double"));
/// assert!(step.is_terminal());
/// ```
#[derive(Clone)]
pub struct Middleware<H, S = Schema> {
    handler: H,
    name: Option<String>,
    own_input: Option<S>,
    next_input: Option<S>,
    next_output: Option<S>,
    own_output: Option<S>,
}

impl<H, S> Middleware<H, S> {
    /// Creates a step from a callable, with no name and no contracts.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            name: None,
            own_input: None,
            next_input: None,
            next_output: None,
            own_output: None,
        }
    }

    /// Creates a builder for a step wrapping the given callable.
    #[must_use]
    pub fn builder(handler: H) -> MiddlewareBuilder<H, S> {
        MiddlewareBuilder {
            inner: Self::new(handler),
        }
    }

    /// Returns the callable.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns the display name, if one was set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name used in diagnostics, falling back to a placeholder
    /// for unnamed steps.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }

    /// The shape this step expects as input.
    #[must_use]
    pub fn own_input(&self) -> Option<&S> {
        self.own_input.as_ref()
    }

    /// The shape this step passes to the step that follows it.
    ///
    /// Absent when the step is terminal.
    #[must_use]
    pub fn next_input(&self) -> Option<&S> {
        self.next_input.as_ref()
    }

    /// The shape this step expects back from the step that follows it.
    ///
    /// Absent when the step is terminal.
    #[must_use]
    pub fn next_output(&self) -> Option<&S> {
        self.next_output.as_ref()
    }

    /// The shape this step produces as its own result.
    #[must_use]
    pub fn own_output(&self) -> Option<&S> {
        self.own_output.as_ref()
    }

    /// Returns `true` when this step declares no next-contracts.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next_input.is_none() && self.next_output.is_none()
    }
}

impl<H, S: fmt::Debug> fmt::Debug for Middleware<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("name", &self.name)
            .field("own_input", &self.own_input)
            .field("next_input", &self.next_input)
            .field("next_output", &self.next_output)
            .field("own_output", &self.own_output)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Middleware`].
#[derive(Clone)]
pub struct MiddlewareBuilder<H, S = Schema> {
    inner: Middleware<H, S>,
}

impl<H, S> MiddlewareBuilder<H, S> {
    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    /// Sets the shape this step expects as input.
    #[must_use]
    pub fn own_input(mut self, schema: S) -> Self {
        self.inner.own_input = Some(schema);
        self
    }

    /// Sets the shape this step passes to the step that follows it.
    #[must_use]
    pub fn next_input(mut self, schema: S) -> Self {
        self.inner.next_input = Some(schema);
        self
    }

    /// Sets the shape this step expects back from the step that follows it.
    #[must_use]
    pub fn next_output(mut self, schema: S) -> Self {
        self.inner.next_output = Some(schema);
        self
    }

    /// Sets the shape this step produces as its own result.
    #[must_use]
    pub fn own_output(mut self, schema: S) -> Self {
        self.inner.own_output = Some(schema);
        self
    }

    /// Builds the step.
    #[must_use]
    pub fn build(self) -> Middleware<H, S> {
        self.inner
    }
}

/// A non-empty, ordered sequence of middleware steps.
///
/// Order is significant: index 0 is outermost and first-called; the last
/// index is innermost and, by convention, terminal. Composition and
/// validation are independent operations over this one structure.
#[derive(Clone)]
pub struct Stack<H, S = Schema> {
    steps: Vec<Middleware<H, S>>,
}

impl<H, S> Stack<H, S> {
    /// Creates a stack from an ordered list of steps.
    ///
    /// # Errors
    ///
    /// Returns [`MeanderError::EmptyStack`] when `steps` is empty.
    pub fn new(steps: Vec<Middleware<H, S>>) -> MeanderResult<Self> {
        if steps.is_empty() {
            return Err(MeanderError::EmptyStack);
        }
        Ok(Self { steps })
    }

    /// Returns the steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Middleware<H, S>] {
        &self.steps
    }

    /// Returns the number of steps (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for interface completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Middleware<H, S>> {
        self.steps.iter()
    }
}

impl<H, S> From<Middleware<H, S>> for Stack<H, S> {
    /// Wraps a single step into a one-element stack.
    fn from(step: Middleware<H, S>) -> Self {
        Self { steps: vec![step] }
    }
}

impl<H, S> fmt::Debug for Stack<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(Middleware::display_name))
            .finish()
    }
}
