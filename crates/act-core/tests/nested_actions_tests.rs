use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use act_core::{async_trait, define_action, ActionContext, ActionDeclaration, ActionError, ActionLogic, ErrorKind,
               InputValues, Runtime, Session};
use serde_json::{json, Value};

define_action! {
    Reserve {
        name: "reserve",
        inputs: ["sku: text"],
        perform(_ctx, values) {
            match values.text("sku")? {
                "missing" => Err(ActionError::not_found("sku missing")),
                sku => Ok(json!({ "reserved": sku })),
            }
        }
    }
}

/// Llama a `reserve` anidada con el sku recibido.
struct Checkout;

#[async_trait]
impl ActionLogic for Checkout {
    fn name(&self) -> &str {
        "checkout"
    }

    fn declare(&self, decl: &mut ActionDeclaration<'_>) -> Result<(), ActionError> {
        decl.input("sku?: text")?;
        Ok(())
    }

    async fn perform(&self, ctx: &ActionContext<'_>, values: &InputValues<'_>) -> Result<Value, ActionError> {
        ctx.run_nested("reserve", json!({ "sku": values.get("sku").to_json() })).await
    }
}

/// Encola trabajo diferido en la cola compartida de la sesión.
struct Audit {
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl ActionLogic for Audit {
    fn name(&self) -> &str {
        "audit"
    }

    async fn perform(&self, ctx: &ActionContext<'_>, _values: &InputValues<'_>) -> Result<Value, ActionError> {
        let runs = self.runs.clone();
        ctx.wrapup()
           .add_wrapped(move || async move {
               runs.fetch_add(1, Ordering::SeqCst);
               Ok::<(), ActionError>(())
           })
           .await?;
        Ok(Value::Null)
    }
}

fn runtime() -> Arc<Runtime> {
    let rt = Arc::new(Runtime::default());
    rt.register_action(Arc::new(Reserve::new()), None, None).expect("reserve");
    rt.register_action(Arc::new(Checkout), None, None).expect("checkout");
    rt
}

#[tokio::test]
async fn nested_success_passes_through() {
    let rt = runtime();
    let mut action = rt.create_action("checkout").expect("create");
    action.set_input("sku", "abc").expect("sku");
    assert_eq!(action.execute().await.expect("run"), json!({"reserved": "abc"}));
}

#[tokio::test]
async fn nested_validation_failure_becomes_internal() {
    let rt = runtime();
    let mut action = rt.create_action("checkout").expect("create");
    let err = action.execute().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.input(), None);
}

#[tokio::test]
async fn nested_not_found_stays_visible() {
    let rt = runtime();
    let mut action = rt.create_action("checkout").expect("create");
    action.set_input("sku", "missing").expect("sku");
    let err = action.execute().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn wrapup_from_actions_runs_at_request_finalize() {
    let rt = runtime();
    let runs = Arc::new(AtomicUsize::new(0));
    rt.register_action(Arc::new(Audit { runs: runs.clone() }), None, None).expect("audit");

    let request = Session::new();
    let mut action = rt.create_action("audit").expect("create");
    action.set_session(&request);
    action.execute().await.expect("run");
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    request.finalize().await.expect("finalize");
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(request.finalize().await.is_err());
}

#[tokio::test]
async fn queued_actions_are_deduplicated_by_fingerprint() {
    let rt = runtime();
    let session = Session::new();

    let make = |sku: &str| {
        let mut action = rt.create_action("reserve").expect("create");
        action.set_input("sku", sku).expect("sku");
        action
    };
    assert!(session.wrapup().add_action(make("a"), true).await.expect("first"));
    assert!(!session.wrapup().add_action(make("a"), true).await.expect("duplicate"));
    assert!(session.wrapup().add_action(make("b"), true).await.expect("other"));
    assert!(session.wrapup().add_action(make("a"), false).await.expect("forced"));
    assert_eq!(session.wrapup().len().await, 3);

    session.finalize().await.expect("finalize");
}
