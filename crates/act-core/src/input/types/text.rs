use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{check_bounds, unwrap_checked, wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

/// Patrones `regex` ya compilados, compartidos entre Inputs. El conjunto lo
/// acotan las declaraciones de las acciones registradas.
static PATTERNS: Lazy<DashMap<String, Regex>> = Lazy::new(DashMap::new);

fn compiled(input: &Input, pattern: &str) -> Result<Regex, ActionError> {
    if let Some(re) = PATTERNS.get(pattern) {
        return Ok(re.value().clone());
    }
    debug!("text:compile-regex input={} pattern={pattern}", input.name());
    let re = Regex::new(pattern).map_err(|e| ActionError::Contract(format!("invalid regex for input '{}': {e}", input.name())))?;
    PATTERNS.insert(pattern.to_string(), re.clone());
    Ok(re)
}

/// Texto libre. Propiedades: `min`/`max` (longitud en caracteres), `regex`,
/// `options` (lista de valores permitidos) y `primitive`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

#[async_trait]
impl InputType for TextType {
    fn type_name(&self) -> &str {
        "text"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("min", Value::Null);
        props.register("max", Value::Null);
        props.register("regex", Value::Null);
        props.register("options", Value::Null);
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let value = unwrap_checked(input, value)?;
        let InputValue::Text(text) = &value else {
            return Err(wrong_type(input, "text", &value));
        };

        let length = text.chars().count() as f64;
        check_bounds(input, length, codes::TOO_SHORT, codes::TOO_LONG, "length")?;

        if let Some(pattern) = input.properties().text("regex") {
            let re = compiled(input, pattern)?;
            if !re.is_match(text) {
                return Err(fail(input, codes::PATTERN_MISMATCH, format!("value does not match /{pattern}/")));
            }
        }

        if let Some(Value::Array(options)) = input.properties().raw("options") {
            if !options.iter().any(|o| o.as_str() == Some(text.as_str())) {
                return Err(fail(input, codes::OPTION_NOT_ALLOWED, format!("'{text}' is not an allowed option")));
            }
        }
        Ok(())
    }

    fn parse_scalar(&self, _input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        Ok(InputValue::Text(raw.to_string()))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        value.as_str().map(str::to_string).ok_or_else(|| wrong_type(input, "text", value))
    }
}
