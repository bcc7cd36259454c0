//! End-to-end engine integration tests.
//!
//! These tests drive the full flow a host application would use:
//!
//! 1. Registry - resolve an ordered name list into a stack
//! 2. Validator - inspect adjacent-pair contract diagnostics
//! 3. Composer - fold the stack into one callable pipeline
//! 4. Execution - invoke the pipeline and observe outputs/resolutions

use meander::prelude::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn value_shape() -> Schema {
    Schema::object([("value", Schema::number())])
}

fn result_shape() -> Schema {
    Schema::object([("result", Schema::number())])
}

/// A pass-through step that forwards its input and returns the downstream
/// result untouched.
fn audit_step() -> PipelineStep {
    Middleware::builder(handler(|input, next| async move { next.run(input).await }))
        .name("audit")
        .own_input(value_shape())
        .next_input(value_shape())
        .next_output(result_shape())
        .own_output(result_shape())
        .build()
}

/// A terminal step doubling `value` into `result`.
fn double_step() -> PipelineStep {
    Middleware::builder(handler(|input, _next| async move {
        let value = input["value"]
            .as_f64()
            .ok_or_else(|| MeanderError::middleware("expected numeric 'value'"))?;
        Ok(json!({ "result": value * 2.0 }))
    }))
    .name("double")
    .own_input(value_shape())
    .own_output(result_shape())
    .build()
}

#[tokio::test]
async fn test_resolve_validate_compose_run() {
    let mut registry: Registry<_> = Registry::new();
    registry.register_fn("audit", || async { Ok(audit_step()) });
    registry.register_fn("double", || async { Ok(double_step()) });

    let stack = registry.resolve(&["audit", "double"]).await.unwrap();
    assert!(validate(&stack).is_empty());

    let pipeline = Pipeline::compose(&stack);
    let output = pipeline.run(json!({ "value": 21 })).await.unwrap();
    assert_eq!(output, json!({ "result": 42.0 }));
}

#[tokio::test]
async fn test_missing_registry_names_surface_before_any_provider() {
    let mut registry: Registry<_> = Registry::new();
    registry.register_fn("audit", || async { Ok(audit_step()) });

    let error = registry
        .resolve(&["audit", "cache", "double"])
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Missing middlewares in registry: cache, double"
    );
}

#[tokio::test]
async fn test_invalid_stack_still_composes_and_runs() {
    // `double` declares an input shape `audit` never passes; validation
    // reports it, but composition and execution are unaffected since the
    // handlers only care about `value` at runtime.
    let mismatched = Middleware::builder(handler(|input, _next| async move {
        let value = input["value"].as_f64().unwrap_or(0.0);
        Ok(json!({ "result": value * 2.0 }))
    }))
    .name("double")
    .own_input(Schema::object([("amount", Schema::number())]))
    .own_output(result_shape())
    .build();

    let stack = Stack::new(vec![audit_step(), mismatched]).unwrap();

    let diagnostics = validate(&stack);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].mismatch, Mismatch::Argument);
    assert_eq!(
        diagnostics[0].to_string(),
        "Types don't match between self:audit.declared-next-input \
         and next:double.declared-own-input argument type"
    );

    // Validation is advisory; the caller may proceed regardless.
    let output = Pipeline::compose(&stack)
        .run(json!({ "value": 3 }))
        .await
        .unwrap();
    assert_eq!(output, json!({ "result": 6.0 }));
}

#[tokio::test]
async fn test_event_flavor_progress_reporting() {
    let notify = Middleware::builder(event_handler(|input, next, resolve| async move {
        resolve(json!({ "state": "accepted" }));
        let on_done = resolve.clone();
        next.run(
            input,
            Arc::new(move |computed| {
                on_done(json!({ "state": "finished", "output": computed }));
            }),
        )
        .await
    }))
    .name("notify")
    .next_input(value_shape())
    .next_output(result_shape())
    .build();

    let compute = Middleware::builder(event_handler(|input, _next, resolve| async move {
        let value = input["value"].as_f64().unwrap_or(0.0);
        resolve(json!({ "result": value * 3.0 }));
        Ok(())
    }))
    .name("compute")
    .own_input(value_shape())
    .own_output(result_shape())
    .build();

    let stack = Stack::new(vec![notify, compute]).unwrap();
    assert!(validate(&stack).is_empty());

    let events: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();

    EventPipeline::compose(&stack)
        .run(json!({ "value": 2 }), move |event| {
            sink.lock().unwrap().push(event);
        })
        .await
        .unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            json!({ "state": "accepted" }),
            json!({ "state": "finished", "output": { "result": 6.0 } }),
        ]
    );
}

#[tokio::test]
async fn test_custom_checker_retargets_validation() {
    // A host can swap the equivalence algorithm without forking the walk;
    // here, one that only compares top-level kind tags.
    let stack = Stack::new(vec![audit_step(), double_step()]).unwrap();

    fn by_kind(a: Option<&Schema>, b: Option<&Schema>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }

    assert!(validate_with(&stack, by_kind).is_empty());
    assert_eq!(validate_with(&stack, |_, _| false).len(), 2);
}
