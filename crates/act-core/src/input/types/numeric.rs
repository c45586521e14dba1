use async_trait::async_trait;
use serde_json::Value;

use super::{check_bounds, unwrap_checked, wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

/// Números (f64). Propiedades: `min`, `max`, `integer`, `primitive`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericType;

#[async_trait]
impl InputType for NumericType {
    fn type_name(&self) -> &str {
        "numeric"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("min", Value::Null);
        props.register("max", Value::Null);
        props.register("integer", false);
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let value = unwrap_checked(input, value)?;
        let InputValue::Number(n) = value else {
            return Err(wrong_type(input, "number", &value));
        };
        if !n.is_finite() {
            return Err(fail(input, codes::INVALID_FORMAT, "number must be finite"));
        }
        if input.properties().flag("integer") && n.fract() != 0.0 {
            return Err(fail(input, codes::NOT_INTEGER, format!("{n} is not an integer")));
        }
        check_bounds(input, n, codes::BELOW_MIN, codes::ABOVE_MAX, "value")
    }

    fn parse_scalar(&self, input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        raw.trim()
           .parse::<f64>()
           .map(InputValue::Number)
           .map_err(|_| fail(input, codes::INVALID_FORMAT, format!("'{raw}' is not a number")))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        value.as_f64().map(|n| n.to_string()).ok_or_else(|| wrong_type(input, "number", value))
    }
}
