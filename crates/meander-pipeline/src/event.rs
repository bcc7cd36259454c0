//! The callback-resolution pipeline flavor.
//!
//! Each step receives `(input, next, resolve)`. Delegation and completion
//! are decoupled: `resolve` signals *this step's* contribution and may fire
//! before, after, or several times around the `next` call. A step can
//! resolve immediately with a "processing started" value and resolve again
//! from within its next-completion callback - every resolution reaches the
//! listener in call order, and the last one observed wins by convention.
//! This is the flavor to reach for when a pipeline needs progress
//! signaling or partial results.
//!
//! There is no separate failure callback: step bodies return
//! [`MeanderResult`], and an error propagates out of
//! [`EventPipeline::run`] exactly as in the future flavor.

use meander_core::{BoxFuture, MeanderResult, Middleware, Schema, Stack};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Callback through which a step announces a resolved value.
pub type Resolver = Arc<dyn Fn(Value) + Send + Sync>;

/// The callable carried by a callback-flavor step.
pub type EventHandler = Arc<
    dyn Fn(Value, EventNext, Resolver) -> BoxFuture<'static, MeanderResult<()>> + Send + Sync,
>;

/// A middleware step for the callback-flavor pipeline.
pub type EventStep<S = Schema> = Middleware<EventHandler, S>;

/// A stack of callback-flavor steps.
pub type EventStack<S = Schema> = Stack<EventHandler, S>;

/// Wraps an async closure into an [`EventHandler`].
///
/// # Example
///
/// ```
/// use meander_pipeline::event_handler;
/// use serde_json::json;
///
/// let announce = event_handler(|input, _next, resolve| async move {
///     resolve(json!({ "received": input }));
///     Ok(())
/// });
/// ```
pub fn event_handler<F, Fut>(f: F) -> EventHandler
where
    F: Fn(Value, EventNext, Resolver) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MeanderResult<()>> + Send + 'static,
{
    Arc::new(move |input, next, resolve| Box::pin(f(input, next, resolve)))
}

/// Continuation for the remainder of a callback-flavor chain.
///
/// Delegating hands the supplied callback to the next step as its own
/// `resolve`, so whatever that step announces flows back to this one.
#[derive(Clone)]
pub struct EventNext {
    inner: Arc<dyn Fn(Value, Resolver) -> BoxFuture<'static, MeanderResult<()>> + Send + Sync>,
}

impl EventNext {
    /// The continuation past the last step: a stub that resolves the
    /// caller's callback with `Value::Null`.
    fn terminal() -> Self {
        Self {
            inner: Arc::new(|_input, on_resolved: Resolver| {
                Box::pin(async move {
                    on_resolved(Value::Null);
                    Ok(())
                })
            }),
        }
    }

    fn wrap(handler: EventHandler, next: EventNext) -> Self {
        Self {
            inner: Arc::new(move |input, on_resolved| handler(input, next.clone(), on_resolved)),
        }
    }

    /// Invokes the next step with `input`, wiring `on_resolved` in as that
    /// step's `resolve`.
    pub fn run(&self, input: Value, on_resolved: Resolver) -> BoxFuture<'static, MeanderResult<()>> {
        (self.inner)(input, on_resolved)
    }
}

/// An executable callback-flavor pipeline.
#[derive(Clone)]
pub struct EventPipeline {
    entry: EventNext,
}

impl EventPipeline {
    /// Folds a stack into one executable pipeline.
    ///
    /// Same right-to-left fold as the future flavor; only the per-step
    /// calling convention differs.
    #[must_use]
    pub fn compose<S>(stack: &Stack<EventHandler, S>) -> Self {
        let mut next = EventNext::terminal();
        for step in stack.steps().iter().rev() {
            next = EventNext::wrap(step.handler().clone(), next);
        }
        Self { entry: next }
    }

    /// Invokes the pipeline, wiring `listener` in as the outermost step's
    /// `resolve`.
    ///
    /// Resolved values are observed only through `listener`; completion of
    /// the returned future means the step bodies have finished, which is
    /// deliberately independent of how often (or whether) the chain
    /// resolved.
    ///
    /// # Errors
    ///
    /// Whatever error a step body surfaces and no enclosing step handles.
    pub async fn run<L>(&self, input: Value, listener: L) -> MeanderResult<()>
    where
        L: Fn(Value) + Send + Sync + 'static,
    {
        self.entry.run(input, Arc::new(listener)).await
    }
}
