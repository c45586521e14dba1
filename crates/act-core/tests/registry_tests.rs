use std::sync::Arc;

use act_core::input::types::TextType;
use act_core::{define_action, ActionError, Runtime};
use serde_json::json;

define_action! {
    Root { name: "greet", inputs: [], perform(_ctx, _values) { Ok(json!("root")) } }
}

define_action! {
    Admin { name: "greet", inputs: [], perform(_ctx, _values) { Ok(json!("admin")) } }
}

define_action! {
    AdminUsers { name: "greet", inputs: [], perform(_ctx, _values) { Ok(json!("admin.users")) } }
}

#[tokio::test]
async fn action_resolution_prefers_most_specific_mask() {
    let rt = Arc::new(Runtime::default());
    rt.register_action(Arc::new(AdminUsers::new()), None, Some("admin.users.*")).expect("admin.users");
    rt.register_action(Arc::new(Root::new()), None, None).expect("root");
    rt.register_action(Arc::new(Admin::new()), None, Some("admin.*")).expect("admin");

    for (scope, expected) in [("admin.users.list", "admin.users"), ("admin.roles", "admin"), ("public.home", "root"), ("", "root")] {
        let mut action = rt.create_action_scoped("greet", scope).expect("create");
        assert_eq!(action.execute().await.expect("run"), json!(expected), "scope {scope}");
    }
    assert_eq!(rt.actions().len(), 3);
}

#[test]
fn re_registering_a_type_keeps_one_entry() {
    let rt = Runtime::new(Default::default());
    rt.register_input_type(Arc::new(TextType), Some("label")).expect("first");
    rt.register_input_type(Arc::new(TextType), Some("label")).expect("second");
    assert_eq!(rt.input_types().len(), 1);
    assert!(rt.create_input("title: label", None, None).is_ok());
}

#[test]
fn illegal_and_unknown_names() {
    let rt = Runtime::default();
    let err = rt.register_input_type(Arc::new(TextType), Some("bad name")).unwrap_err();
    assert_eq!(err.to_string(), "Illegal input type name: bad name");

    assert!(matches!(rt.create_input("x: nope", None, None), Err(ActionError::NotRegistered { .. })));
    assert!(matches!(rt.create_input("x nope", None, None), Err(ActionError::Syntax(_))));
}

#[test]
fn create_input_applies_options_and_locks() {
    let rt = Runtime::default();
    let input = rt.create_input("_tags?: text[]", Some(&json!({"max": 5, "description": "labels"})), None)
                  .expect("input");
    assert!(input.is_vector() && input.is_hidden() && !input.is_required());
    assert_eq!(input.description(), Some("labels"));
    assert!(input.is_property_locked("vector").expect("vector"));
    assert!(input.is_property_locked("immutable").expect("immutable"));
    assert!(!input.is_property_locked("max").expect("max"));

    assert!(matches!(rt.create_input("a: text", Some(&json!({"color": 1})), None),
                     Err(ActionError::UnknownProperty { .. })));
}
