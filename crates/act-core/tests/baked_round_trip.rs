use std::sync::Arc;

use act_core::{define_action, ActionError, InputValue, Runtime};
use serde_json::json;

define_action! {
    Tag {
        name: "tag",
        inputs: ["tags: text[]", "weight?: numeric", "_secret?: text", "at?: timestamp"],
        perform(_ctx, values) {
            Ok(values.to_json())
        }
    }
}

define_action! {
    Upload {
        name: "upload",
        inputs: ["blob: buf"],
        perform(_ctx, _values) {
            Ok(json!(true))
        }
    }
}

fn runtime() -> Arc<Runtime> {
    let rt = Arc::new(Runtime::default());
    rt.register_action(Arc::new(Tag::new()), None, None).expect("tag");
    rt.register_action(Arc::new(Upload::new()), None, None).expect("upload");
    rt
}

#[tokio::test]
async fn baked_action_round_trips_with_the_same_id() {
    let rt = runtime();
    let mut action = rt.create_action("tag").expect("create");
    action.input_mut("tags")
          .expect("tags")
          .load_serialized(Some(r#"["a", null, ""]"#))
          .expect("load");
    action.set_input("weight", 2.5).expect("weight");
    action.set_input("secret", "s3cr3t").expect("secret");
    action.input_mut("at")
          .expect("at")
          .load_serialized(Some("2024-01-02T03:04:05Z"))
          .expect("at");
    action.session_mut().set_autofill("tenant", json!("acme"));

    let wire = action.bake_to_json(false).expect("bake");
    assert_eq!(wire,
               json!({
                   "actionName": "tag",
                   "inputs": {"tags": "[\"a\",null,\"\"]", "weight": "2.5", "at": "2024-01-02T03:04:05Z"},
                   "autofill": {"tenant": "acme"}
               }));

    let restored = rt.create_action_from_json(&wire).expect("restore");
    assert_eq!(restored.id().await.expect("id"), action.id().await.expect("id"));
    assert_eq!(restored.input("tags").expect("tags").value(),
               &InputValue::List(vec![InputValue::from("a"), InputValue::Null, InputValue::from("")]));
    assert_eq!(restored.input("secret").expect("secret").value(), &InputValue::Null);
    assert_eq!(restored.session().autofill("tenant"), Some(&json!("acme")));

    let with_hidden = action.bake(true, false).expect("bake hidden");
    assert_eq!(with_hidden.inputs.get("secret"), Some(&Some("s3cr3t".to_string())));
    assert!(with_hidden.autofill.is_none());
}

#[tokio::test]
async fn non_serializable_inputs_cannot_be_baked_but_still_fingerprint() {
    let rt = runtime();
    let mut a = rt.create_action("upload").expect("create");
    a.set_input("blob", vec![1u8, 2, 3]).expect("blob");
    let mut b = rt.create_action("upload").expect("create");
    b.set_input("blob", vec![1u8, 2, 3]).expect("blob");
    let mut c = rt.create_action("upload").expect("create");
    c.set_input("blob", vec![9u8]).expect("blob");

    assert_eq!(a.bake(false, true).unwrap_err(), ActionError::SerializationNotSupported);
    assert_eq!(a.id().await.expect("id"), b.id().await.expect("id"));
    assert_ne!(a.id().await.expect("id"), c.id().await.expect("id"));
}

#[tokio::test]
async fn id_is_deterministic_across_runtimes() {
    let build = |rt: &Arc<Runtime>| {
        let mut action = rt.create_action("tag").expect("create");
        action.set_input("tags", vec![InputValue::from("x")]).expect("tags");
        action.set_input("weight", 1.0).expect("weight");
        action
    };
    let first = build(&runtime()).id().await.expect("id");
    let second = build(&runtime()).id().await.expect("id");
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
}

#[test]
fn malformed_baked_payloads() {
    let rt = runtime();
    assert!(matches!(rt.create_action_from_json(&json!({"actionName": "tag", "inputs": {"nope": "1"}})),
                     Err(ActionError::Contract(_))));
    assert!(matches!(rt.create_action_from_json(&json!({"actionName": "ghost"})),
                     Err(ActionError::NotRegistered { .. })));
    assert!(matches!(rt.create_action_from_json(&json!("tag")), Err(ActionError::Syntax(_))));
}
