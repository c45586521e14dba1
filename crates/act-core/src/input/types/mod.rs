//! Tipos de input.
//!
//! Un `InputType` declara sus propiedades, valida un valor escalar y sabe
//! convertirlo a/desde string. Los vectores los resuelve `Input` aplicando
//! el tipo elemento a elemento.

mod boolean;
mod file_path;
mod hex;
mod network;
mod numeric;
mod opaque;
mod text;
mod timestamp;

pub use boolean::BoolType;
pub use file_path::FilePathType;
pub use hex::HexType;
pub use network::{EmailType, IpType, UrlType};
pub use numeric::NumericType;
pub use opaque::{AnyType, BufType};
pub use text::TextType;
pub use timestamp::TimestampType;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::validation::fail;
use super::{Input, InputValue, PropertyTable};
use crate::errors::{codes, ActionError};

#[async_trait]
pub trait InputType: Send + Sync {
    /// Nombre con el que se registra por defecto.
    fn type_name(&self) -> &str;

    /// Registra las propiedades propias del tipo (las base ya existen).
    fn register_properties(&self, _props: &mut PropertyTable) {}

    /// Valida un único valor no nulo.
    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError>;

    fn is_serializable(&self) -> bool {
        true
    }

    fn parse_scalar(&self, _input: &Input, _raw: &str) -> Result<InputValue, ActionError> {
        Err(ActionError::SerializationNotSupported)
    }

    fn serialize_scalar(&self, _input: &Input, _value: &InputValue) -> Result<String, ActionError> {
        Err(ActionError::SerializationNotSupported)
    }

    /// Representación estable de un valor para el fingerprint de la acción.
    fn fingerprint_scalar(&self, input: &Input, value: &InputValue) -> Result<Value, ActionError> {
        self.serialize_scalar(input, value).map(Value::String)
    }
}

/// Tipos incluidos de fábrica, en orden de registro.
pub fn builtins() -> Vec<Arc<dyn InputType>> {
    vec![Arc::new(TextType),
         Arc::new(NumericType),
         Arc::new(BoolType),
         Arc::new(TimestampType),
         Arc::new(EmailType),
         Arc::new(UrlType),
         Arc::new(IpType),
         Arc::new(HexType),
         Arc::new(FilePathType),
         Arc::new(BufType),
         Arc::new(AnyType)]
}

/// Aplica la regla `primitive`: un primitivo envuelto se rechaza si la
/// propiedad está activa y si no se desenvuelve.
pub(crate) fn unwrap_checked(input: &Input, value: &InputValue) -> Result<InputValue, ActionError> {
    if value.is_wrapped_primitive() {
        if input.properties().flag("primitive") {
            return Err(fail(input, codes::PRIMITIVE_EXPECTED, "wrapped primitive values are not accepted"));
        }
        return Ok(value.unwrap_primitive());
    }
    Ok(value.clone())
}

pub(crate) fn wrong_type(input: &Input, expected: &str, value: &InputValue) -> ActionError {
    fail(input, codes::WRONG_TYPE, format!("expected {expected}, got {}", value.label()))
}

/// Comprueba `min`/`max` (inclusive) de una magnitud.
pub(crate) fn check_bounds(input: &Input,
                           magnitude: f64,
                           below: &str,
                           above: &str,
                           what: &str)
                           -> Result<(), ActionError> {
    let props = input.properties();
    if let Some(min) = props.number("min") {
        if magnitude < min {
            return Err(fail(input, below, format!("{what} {magnitude} is below minimum {min}")));
        }
    }
    if let Some(max) = props.number("max") {
        if magnitude > max {
            return Err(fail(input, above, format!("{what} {magnitude} is above maximum {max}")));
        }
    }
    Ok(())
}

/// Valor textual de un escalar (desenvuelve primitivos según `primitive`).
pub(crate) fn text_of(input: &Input, value: &InputValue) -> Result<String, ActionError> {
    match unwrap_checked(input, value)? {
        InputValue::Text(s) => Ok(s),
        other => Err(wrong_type(input, "text", &other)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use serde_json::Value;

    use super::InputType;
    use crate::input::{Input, InputSpec};

    pub fn input_of<T: InputType + 'static>(ty: T, spec: &str, options: Value) -> Input {
        let spec = InputSpec::parse(spec).expect("spec");
        Input::new(spec, Arc::new(ty), Some(&options), None).expect("input")
    }
}
