//! Tipos no serializables: `buf` (bytes) y `any` (objeto JSON arbitrario).
//!
//! Ninguno tiene forma string, pero ambos aportan un valor estable al
//! fingerprint (hash del contenido) para que la acción siga teniendo `id()`.

use async_trait::async_trait;
use serde_json::Value;

use super::{wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::hashing::{hash_bytes, hash_value};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

#[derive(Debug, Clone, Copy, Default)]
pub struct BufType;

#[async_trait]
impl InputType for BufType {
    fn type_name(&self) -> &str {
        "buf"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("maxSize", Value::Null);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let InputValue::Bytes(bytes) = value else {
            return Err(wrong_type(input, "bytes", value));
        };
        if let Some(max) = input.properties().number("maxSize") {
            if bytes.len() as f64 > max {
                return Err(fail(input, codes::TOO_LARGE, format!("{} bytes exceed maxSize {max}", bytes.len())));
            }
        }
        Ok(())
    }

    fn is_serializable(&self) -> bool {
        false
    }

    fn fingerprint_scalar(&self, input: &Input, value: &InputValue) -> Result<Value, ActionError> {
        match value {
            InputValue::Bytes(bytes) => Ok(Value::String(hash_bytes(bytes))),
            other => Err(wrong_type(input, "bytes", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnyType;

#[async_trait]
impl InputType for AnyType {
    fn type_name(&self) -> &str {
        "any"
    }

    async fn validate_scalar(&self, _input: &Input, _value: &InputValue) -> Result<(), ActionError> {
        Ok(())
    }

    fn is_serializable(&self) -> bool {
        false
    }

    fn fingerprint_scalar(&self, _input: &Input, value: &InputValue) -> Result<Value, ActionError> {
        Ok(Value::String(hash_value(&value.to_json())))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::input_of;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn buf_size_limit() {
        let mut input = input_of(BufType, "blob: buf", json!({"maxSize": 3}));
        input.set_value(vec![1u8, 2, 3, 4]).expect("set");
        assert_eq!(input.validate().await.unwrap_err().code(), codes::TOO_LARGE);
    }

    #[test]
    fn opaque_types_refuse_string_forms_even_when_empty() {
        let blob = input_of(BufType, "blob?: buf", json!({}));
        assert_eq!(blob.serialize_value().unwrap_err(), ActionError::SerializationNotSupported);
        assert_eq!(blob.parse_value("abc").unwrap_err(), ActionError::SerializationNotSupported);

        let any = input_of(AnyType, "payload?: any", json!({}));
        assert_eq!(any.serialize_value().unwrap_err().to_string(), "serialization not supported");
    }

    #[test]
    fn any_fingerprint_ignores_key_order() {
        let mut a = input_of(AnyType, "payload: any", json!({}));
        let mut b = input_of(AnyType, "payload: any", json!({}));
        a.set_value(InputValue::Json(json!({"x": 1, "y": 2}))).expect("set");
        b.set_value(InputValue::Json(json!({"y": 2, "x": 1}))).expect("set");
        assert_eq!(a.fingerprint_value().expect("fp"), b.fingerprint_value().expect("fp"));
    }
}
