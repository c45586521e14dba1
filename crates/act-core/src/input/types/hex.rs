use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{text_of, wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]+$").expect("static hex regex"));

/// Cadena hexadecimal (sin prefijo `0x`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HexType;

#[async_trait]
impl InputType for HexType {
    fn type_name(&self) -> &str {
        "hex"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let text = text_of(input, value)?;
        if HEX_RE.is_match(&text) {
            Ok(())
        } else {
            Err(fail(input, codes::INVALID_HEX, format!("'{text}' is not hexadecimal")))
        }
    }

    fn parse_scalar(&self, _input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        Ok(InputValue::Text(raw.trim().to_string()))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        value.as_str().map(str::to_string).ok_or_else(|| wrong_type(input, "text", value))
    }
}
