//! Sistema de tipos de input: declaración por gramática compacta,
//! propiedades por tipo, validación asíncrona y forma string.

mod grammar;
mod instance;
mod property;
pub mod types;
mod validation;
mod value;

pub use grammar::InputSpec;
pub use instance::Input;
pub use property::PropertyTable;
pub use types::InputType;
pub use validation::{fail, ValidationStep};
pub use value::InputValue;

#[cfg(test)]
mod tests {
    use super::types::testing::input_of;
    use super::types::{NumericType, TextType};
    use super::*;
    use crate::errors::{codes, ActionError};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn required_empty_and_shape_checks_come_first() {
        let mut required = input_of(NumericType, "a: numeric", json!({}));
        assert_eq!(required.validate().await.unwrap_err().code(), codes::REQUIRED);
        required.set_value(InputValue::List(vec![])).expect("scalar accepts list at set time");
        assert_eq!(required.validate().await.unwrap_err().code(), codes::REQUIRED);
        required.set_value(InputValue::List(vec![1.0.into()])).expect("set");
        assert_eq!(required.validate().await.unwrap_err().code(), codes::SCALAR_EXPECTED);

        let optional = input_of(NumericType, "a?: numeric", json!({"min": 5}));
        optional.validate().await.expect("empty optional passes");
    }

    #[test]
    fn vector_inputs_reject_scalar_values() {
        let mut v = input_of(TextType, "tags: text[]", json!({}));
        assert!(matches!(v.set_value("solo"), Err(ActionError::Contract(_))));
        v.set_value(InputValue::Null).expect("null is fine");
    }

    #[tokio::test]
    async fn vector_elements_validate_individually_and_skip_nulls() {
        let mut v = input_of(NumericType, "ns: numeric[]", json!({"max": 3}));
        v.set_value(vec![InputValue::Number(1.0), InputValue::Null, InputValue::Number(3.0)]).expect("set");
        v.validate().await.expect("valid");
        v.set_value(vec![InputValue::Number(1.0), InputValue::Number(4.0)]).expect("set");
        assert_eq!(v.validate().await.unwrap_err().code(), codes::ABOVE_MAX);
    }

    #[tokio::test]
    async fn extra_validation_runs_last() {
        let even: Arc<dyn ValidationStep> = Arc::new(|input: &Input| match input.value().as_f64() {
            Some(n) if n % 2.0 == 0.0 => Ok(()),
            _ => Err(fail(input, codes::CUSTOM, "must be even")),
        });
        let spec = InputSpec::parse("n: numeric").expect("spec");
        let mut input = Input::new(spec, Arc::new(NumericType), Some(&json!({"max": 10})), Some(even)).expect("input");

        input.set_value(12.0).expect("set");
        assert_eq!(input.validate().await.unwrap_err().code(), codes::ABOVE_MAX);
        input.set_value(3.0).expect("set");
        let err = input.validate().await.unwrap_err();
        assert_eq!(err.code(), codes::CUSTOM);
        assert_eq!(err.input(), Some("n"));
        input.set_value(4.0).expect("set");
        input.validate().await.expect("valid");
    }

    #[test]
    fn text_vector_string_form() {
        let mut tags = input_of(TextType, "tags: text[]", json!({}));
        tags.load_serialized(Some(r#"["a", null, ""]"#)).expect("load");
        assert_eq!(tags.value(),
                   &InputValue::List(vec![InputValue::Text("a".into()), InputValue::Null, InputValue::Text(String::new())]));
        let wire = tags.serialize_value().expect("serialize").expect("non-null");
        assert_eq!(wire, r#"["a",null,""]"#);
        assert_eq!(tags.parse_value(&wire).expect("reparse"), *tags.value());
    }

    #[test]
    fn property_discipline() {
        let mut input = input_of(TextType, "s: text", json!({"max": 3}));
        assert!(input.is_property_locked("vector").expect("base property"));
        assert!(matches!(input.assign_property("vector", true), Err(ActionError::PropertyLocked(_))));
        assert!(matches!(input.assign_property("color", "red"), Err(ActionError::UnknownProperty { .. })));

        input.lock_property("max").expect("lock");
        assert!(matches!(input.assign_property("max", 5), Err(ActionError::PropertyLocked(_))));

        input.set_read_only(true);
        assert!(matches!(input.assign_property("min", 1), Err(ActionError::ReadOnly(_))));
        assert!(matches!(input.lock_property("min"), Err(ActionError::ReadOnly(_))));
        assert!(matches!(input.set_value("x"), Err(ActionError::ReadOnly(_))));
        // lecturas siguen permitidas en modo sólo lectura
        assert_eq!(input.property("max").expect("read"), &json!(3));
        assert!(!input.is_property_locked("min").expect("read"));
        assert!(matches!(input.property("color"), Err(ActionError::UnknownProperty { .. })));
    }

    #[test]
    fn setup_from_combinations() {
        let mut list = input_of(TextType, "src: text[]", json!({}));
        list.set_value(vec![InputValue::from("x"), InputValue::from("y")]).expect("set");
        list.cache_set("k", json!(1));

        let mut scalar = input_of(TextType, "dst: text", json!({}));
        scalar.setup_from(&list, Some(1), true).expect("vector → scalar");
        assert_eq!(scalar.value(), &InputValue::from("y"));
        assert_eq!(scalar.cache_get("k"), Some(json!(1)));

        assert!(matches!(scalar.setup_from(&list, None, true), Err(ActionError::Contract(_))));
        assert!(matches!(scalar.setup_from(&list, Some(9), true), Err(ActionError::Contract(_))));

        let mut other_list = input_of(TextType, "dst: text[]", json!({}));
        other_list.setup_from(&list, None, true).expect("vector → vector");
        assert!(matches!(other_list.setup_from(&scalar, None, true), Err(ActionError::Contract(_))));

        let mut mutable = input_of(TextType, "dst: text", json!({"immutable": false}));
        mutable.setup_from(&list, Some(0), true).expect("transfer");
        assert_eq!(mutable.cache_get("k"), None);
    }

    #[test]
    fn immutable_values_cannot_be_edited_in_place() {
        let mut frozen = input_of(TextType, "s: text", json!({}));
        assert!(matches!(frozen.value_mut(), Err(ActionError::Contract(_))));

        let mut editable = input_of(TextType, "s: text", json!({"immutable": false}));
        editable.set_value("a").expect("set");
        *editable.value_mut().expect("mutable") = InputValue::from("b");
        assert_eq!(editable.value(), &InputValue::from("b"));
    }
}
