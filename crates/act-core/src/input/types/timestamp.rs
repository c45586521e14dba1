use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use super::{wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue};

/// Instante en UTC; forma string RFC 3339.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampType;

fn parse_rfc3339(input: &Input, raw: &str) -> Result<DateTime<Utc>, ActionError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| fail(input, codes::INVALID_FORMAT, format!("'{raw}' is not an RFC 3339 timestamp: {e}")))
}

#[async_trait]
impl InputType for TimestampType {
    fn type_name(&self) -> &str {
        "timestamp"
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        match value {
            InputValue::Timestamp(_) => Ok(()),
            // un string RFC 3339 que llegó sin parsear
            InputValue::Text(raw) => parse_rfc3339(input, raw).map(|_| ()),
            other => Err(wrong_type(input, "timestamp", other)),
        }
    }

    fn parse_scalar(&self, input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        parse_rfc3339(input, raw).map(InputValue::Timestamp)
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        match value {
            InputValue::Timestamp(ts) => Ok(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            InputValue::Text(raw) => parse_rfc3339(input, raw).map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            other => Err(wrong_type(input, "timestamp", other)),
        }
    }
}
