use std::sync::Arc;

use act_adapters::direct::{self, DirectState};
use act_adapters::DIRECT;
use act_core::errors::codes;
use act_core::{define_action, Handler, Runtime};
use serde_json::json;

define_action! {
    Multiply {
        name: "multiply",
        inputs: ["a: numeric", "b: numeric"],
        cacheable: true,
        perform(_ctx, values) {
            Ok(json!(values.number("a")? * values.number("b")?))
        }
    }
}

fn runtime() -> Arc<Runtime> {
    let rt = Arc::new(Runtime::default());
    rt.register_action(Arc::new(Multiply::new()), None, None).expect("action");
    direct::register(&rt, None).expect("direct");
    rt
}

#[tokio::test]
async fn call_renders_and_finalizes() {
    let rt = runtime();
    let outcome = direct::call(&rt, "multiply", json!({"a": 2, "b": 5}), None).await.expect("call");
    assert_eq!(outcome.result.expect("ok"), json!(10.0));
    let rendered = outcome.rendered.expect("rendered");
    assert_eq!(rendered.status, 200);
    assert_eq!(rendered.body, Some(json!({"data": 10.0})));
}

#[tokio::test]
async fn emitted_responses_are_collected_in_state() {
    let rt = runtime();
    let mut handler = Handler::new(rt.clone(), DIRECT).with_state(DirectState::new(json!({"a": 3})).expect("state"));
    let result = handler.execute("multiply", None).await;
    let err = result.clone().unwrap_err();
    assert_eq!(err.code(), codes::REQUIRED);
    handler.output(result, None, true).await.expect("rendered");

    let state = handler.state::<DirectState>().expect("state");
    let rendered = state.rendered();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].status, 400);
}

#[tokio::test]
async fn repeated_calls_hit_the_cache() {
    let rt = runtime();
    for _ in 0..3 {
        direct::call(&rt, "multiply", json!({"a": 4, "b": 4}), None).await.expect("call");
    }
    let stats = rt.cache().stats().await;
    assert_eq!((stats.hits, stats.misses), (2, 1));
}

#[test]
fn non_object_inputs_are_rejected() {
    assert!(DirectState::new(json!([1, 2])).is_err());
    assert!(DirectState::new(json!(null)).expect("null ok").inputs.is_empty());
}
