//! The future-return pipeline flavor.
//!
//! Each step receives its input and a [`Next`] continuation for the rest of
//! the chain, and produces its output by returning. A step decides whether,
//! when, and with what argument to invoke `next`: it may transform the
//! argument before forwarding, transform the result before returning, skip
//! `next` entirely (short-circuit), or call it more than once - callers
//! should treat the chain as a single-call contract even though nothing
//! enforces it.
//!
//! Errors are the step's own concern. An error returned by a step
//! propagates through the fold to the nearest enclosing step that chooses
//! to handle it, or out of [`Pipeline::run`]; the engine adds no catch-all.

use meander_core::{BoxFuture, MeanderResult, Middleware, Schema, Stack};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// The callable carried by a future-flavor step.
pub type Handler =
    Arc<dyn Fn(Value, Next) -> BoxFuture<'static, MeanderResult<Value>> + Send + Sync>;

/// A middleware step for the future-flavor pipeline.
pub type PipelineStep<S = Schema> = Middleware<Handler, S>;

/// A stack of future-flavor steps.
pub type PipelineStack<S = Schema> = Stack<Handler, S>;

/// Wraps an async closure into a [`Handler`].
///
/// # Example
///
/// ```
/// use meander_pipeline::handler;
/// use serde_json::json;
///
/// let double = handler(|input, _next| async move {
///     Ok(json!({ "result": input["value"].as_f64().unwrap_or(0.0) * 2.0 }))
/// });
/// ```
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Value, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MeanderResult<Value>> + Send + 'static,
{
    Arc::new(move |input, next| Box::pin(f(input, next)))
}

/// Continuation for the remainder of the chain.
///
/// Cloneable and callable any number of times; each call runs the
/// downstream chain afresh with the supplied input.
#[derive(Clone)]
pub struct Next {
    inner: Arc<dyn Fn(Value) -> BoxFuture<'static, MeanderResult<Value>> + Send + Sync>,
}

impl Next {
    /// The continuation past the last step.
    ///
    /// A well-formed terminal step never delegates, but if one does, the
    /// chain resolves to `Value::Null` rather than erroring. Defensive
    /// default, not a contract.
    fn terminal() -> Self {
        Self {
            inner: Arc::new(|_input| Box::pin(async { Ok(Value::Null) })),
        }
    }

    /// Wraps `handler` so that invoking the result runs it with `next` as
    /// its continuation.
    fn wrap(handler: Handler, next: Next) -> Self {
        Self {
            inner: Arc::new(move |input| handler(input, next.clone())),
        }
    }

    /// Invokes the next step in the chain with `input`.
    pub fn run(&self, input: Value) -> BoxFuture<'static, MeanderResult<Value>> {
        (self.inner)(input)
    }
}

/// An executable future-flavor pipeline.
///
/// Produced by [`Pipeline::compose`]; owns nothing beyond what it closes
/// over from the stack, so it is safe to invoke repeatedly and
/// concurrently.
#[derive(Clone)]
pub struct Pipeline {
    entry: Next,
}

impl Pipeline {
    /// Folds a stack into one executable pipeline.
    ///
    /// The fold runs right to left: the terminal continuation is wrapped by
    /// the last step, the result by the one before it, and so on through
    /// index 0, whose wrapping becomes the pipeline entry point.
    #[must_use]
    pub fn compose<S>(stack: &Stack<Handler, S>) -> Self {
        let mut next = Next::terminal();
        for step in stack.steps().iter().rev() {
            next = Next::wrap(step.handler().clone(), next);
        }
        Self { entry: next }
    }

    /// Invokes the pipeline with the initial input.
    ///
    /// # Errors
    ///
    /// Whatever error a step body surfaces and no enclosing step handles.
    pub async fn run(&self, input: Value) -> MeanderResult<Value> {
        self.entry.run(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meander_core::MeanderError;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// A step that logs around its `next` call.
    fn logging_step(log: Arc<Mutex<Vec<String>>>, id: usize) -> PipelineStep {
        Middleware::builder(handler(move |input, next| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(format!("{id}-start"));
                let result = next.run(input).await?;
                log.lock().unwrap().push(format!("{id}-end"));
                Ok(result)
            }
        }))
        .name(format!("step-{id}"))
        .build()
    }

    #[tokio::test]
    async fn test_call_and_return_nesting_order() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let terminal_log = log.clone();
        let terminal = Middleware::builder(handler(move |input, _next| {
            let log = terminal_log.clone();
            async move {
                log.lock().unwrap().push("3-start-and-terminal".to_string());
                Ok(input)
            }
        }))
        .name("step-3")
        .build();

        let stack = Stack::new(vec![
            logging_step(log.clone(), 1),
            logging_step(log.clone(), 2),
            terminal,
        ])
        .unwrap();

        Pipeline::compose(&stack).run(json!({})).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["1-start", "2-start", "3-start-and-terminal", "2-end", "1-end"]
        );
    }

    #[tokio::test]
    async fn test_terminal_first_step_short_circuits() {
        let triple_called = Arc::new(AtomicBool::new(false));

        let double = Middleware::builder(handler(|input, _next| async move {
            let value = input["value"]
                .as_f64()
                .ok_or_else(|| MeanderError::middleware("expected numeric 'value'"))?;
            Ok(json!({ "result": value * 2.0 }))
        }))
        .name("double")
        .own_input(Schema::object([("value", Schema::number())]))
        .own_output(Schema::object([("result", Schema::number())]))
        .build();

        let called = triple_called.clone();
        let triple = Middleware::builder(handler(move |input, _next| {
            let called = called.clone();
            async move {
                called.store(true, Ordering::SeqCst);
                Ok(json!({ "result": input["value"].as_f64().unwrap_or(0.0) * 3.0 }))
            }
        }))
        .name("triple")
        .build();

        let stack = Stack::new(vec![double, triple]).unwrap();
        let output = Pipeline::compose(&stack)
            .run(json!({ "value": 5 }))
            .await
            .unwrap();

        // `double` is terminal and never delegates, so `triple` is composed
        // but never invoked.
        assert_eq!(output, json!({ "result": 10.0 }));
        assert!(!triple_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_step_transforms_argument_and_result() {
        let outer: PipelineStep = Middleware::builder(handler(|input, next| async move {
            let forwarded = json!({ "value": input["value"].as_i64().unwrap_or(0) + 1 });
            let result = next.run(forwarded).await?;
            Ok(json!({ "wrapped": result }))
        }))
        .name("outer")
        .build();

        let inner = Middleware::builder(handler(|input, _next| async move {
            Ok(json!(input["value"].as_i64().unwrap_or(0) * 10))
        }))
        .name("inner")
        .build();

        let stack = Stack::new(vec![outer, inner]).unwrap();
        let output = Pipeline::compose(&stack)
            .run(json!({ "value": 4 }))
            .await
            .unwrap();

        assert_eq!(output, json!({ "wrapped": 50 }));
    }

    #[tokio::test]
    async fn test_next_may_run_multiple_times() {
        let counter = Arc::new(AtomicUsize::new(0));

        let outer: PipelineStep = Middleware::builder(handler(|_input, next| async move {
            let _first = next.run(Value::Null).await?;
            next.run(Value::Null).await
        }))
        .name("outer")
        .build();

        let count = counter.clone();
        let inner = Middleware::builder(handler(move |_input, _next| {
            let count = count.clone();
            async move { Ok(json!(count.fetch_add(1, Ordering::SeqCst) + 1)) }
        }))
        .name("inner")
        .build();

        let stack = Stack::new(vec![outer, inner]).unwrap();
        let output = Pipeline::compose(&stack).run(Value::Null).await.unwrap();

        // Last call's result is what surfaces; nothing stops the repeat.
        assert_eq!(output, json!(2));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_terminal_continuation_resolves_null() {
        let step = Middleware::builder(handler(|_input, next| async move {
            next.run(json!("ignored")).await
        }))
        .name("leaky-terminal")
        .build();

        let stack: PipelineStack = step.into();
        let output = Pipeline::compose(&stack).run(json!({})).await.unwrap();
        assert_eq!(output, Value::Null);
    }

    #[tokio::test]
    async fn test_errors_propagate_to_caller() {
        let outer: PipelineStep = Middleware::builder(handler(|input, next| async move {
            next.run(input).await
        }))
        .name("outer")
        .build();

        let failing = Middleware::builder(handler(|_input, _next| async move {
            Err(MeanderError::middleware("backend unavailable"))
        }))
        .name("failing")
        .build();

        let stack = Stack::new(vec![outer, failing]).unwrap();
        let error = Pipeline::compose(&stack)
            .run(json!({}))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "backend unavailable");
    }

    #[tokio::test]
    async fn test_enclosing_step_may_recover() {
        let recovering: PipelineStep = Middleware::builder(handler(|input, next| async move {
            match next.run(input).await {
                Ok(result) => Ok(result),
                Err(_) => Ok(json!({ "fallback": true })),
            }
        }))
        .name("recovering")
        .build();

        let failing = Middleware::builder(handler(|_input, _next| async move {
            Err(MeanderError::middleware("backend unavailable"))
        }))
        .name("failing")
        .build();

        let stack = Stack::new(vec![recovering, failing]).unwrap();
        let output = Pipeline::compose(&stack).run(json!({})).await.unwrap();
        assert_eq!(output, json!({ "fallback": true }));
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_independent() {
        let echo: PipelineStep = Middleware::builder(handler(|input, _next| async move {
            tokio::task::yield_now().await;
            Ok(input)
        }))
        .name("echo")
        .build();

        let pipeline = Pipeline::compose(&Stack::from(echo));
        let (a, b) = tokio::join!(pipeline.run(json!(1)), pipeline.run(json!(2)));

        assert_eq!(a.unwrap(), json!(1));
        assert_eq!(b.unwrap(), json!(2));
    }
}
