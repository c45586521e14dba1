use async_trait::async_trait;

use super::{unwrap_checked, wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolType;

#[async_trait]
impl InputType for BoolType {
    fn type_name(&self) -> &str {
        "bool"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        match unwrap_checked(input, value)? {
            InputValue::Bool(_) => Ok(()),
            other => Err(wrong_type(input, "bool", &other)),
        }
    }

    fn parse_scalar(&self, input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        match raw.trim() {
            "true" | "1" => Ok(InputValue::Bool(true)),
            "false" | "0" => Ok(InputValue::Bool(false)),
            other => Err(fail(input, codes::INVALID_FORMAT, format!("'{other}' is not a boolean"))),
        }
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        value.as_bool().map(|b| b.to_string()).ok_or_else(|| wrong_type(input, "bool", value))
    }
}
