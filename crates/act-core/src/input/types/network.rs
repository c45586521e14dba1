//! Tipos de red: `email`, `url`, `ip`.

use std::net::IpAddr;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::{text_of, wrong_type, InputType};
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?)+$")
        .expect("static email regex")
});

fn serialize_text(input: &Input, value: &InputValue) -> Result<String, ActionError> {
    value.as_str().map(str::to_string).ok_or_else(|| wrong_type(input, "text", value))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailType;

#[async_trait]
impl InputType for EmailType {
    fn type_name(&self) -> &str {
        "email"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let text = text_of(input, value)?;
        if EMAIL_RE.is_match(&text) {
            Ok(())
        } else {
            Err(fail(input, codes::INVALID_EMAIL, format!("'{text}' is not a valid email")))
        }
    }

    fn parse_scalar(&self, _input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        Ok(InputValue::Text(raw.trim().to_string()))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        serialize_text(input, value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlType;

#[async_trait]
impl InputType for UrlType {
    fn type_name(&self) -> &str {
        "url"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let text = text_of(input, value)?;
        Url::parse(&text).map(|_| ())
                         .map_err(|e| fail(input, codes::INVALID_URL, format!("'{text}' is not a valid url: {e}")))
    }

    fn parse_scalar(&self, _input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        Ok(InputValue::Text(raw.trim().to_string()))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        serialize_text(input, value)
    }
}

/// Dirección IP. Propiedades `allowV4` / `allowV6` (ambas activas por defecto).
#[derive(Debug, Clone, Copy, Default)]
pub struct IpType;

#[async_trait]
impl InputType for IpType {
    fn type_name(&self) -> &str {
        "ip"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("allowV4", true);
        props.register("allowV6", true);
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let text = text_of(input, value)?;
        let addr: IpAddr = text.parse()
                               .map_err(|_| fail(input, codes::INVALID_IP, format!("'{text}' is not an ip address")))?;
        let props = input.properties();
        let allowed = match addr {
            IpAddr::V4(_) => props.flag("allowV4"),
            IpAddr::V6(_) => props.flag("allowV6"),
        };
        if allowed {
            Ok(())
        } else {
            Err(fail(input, codes::INVALID_IP, format!("address family of '{text}' is not allowed")))
        }
    }

    fn parse_scalar(&self, _input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        Ok(InputValue::Text(raw.trim().to_string()))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        serialize_text(input, value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::input_of;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn email_shape() {
        let mut input = input_of(EmailType, "to: email", json!({}));
        input.set_value("ana@example.org").expect("set");
        input.validate().await.expect("valid");
        input.set_value("ana@").expect("set");
        assert_eq!(input.validate().await.unwrap_err().code(), codes::INVALID_EMAIL);
    }

    #[tokio::test]
    async fn url_uses_full_parser() {
        let mut input = input_of(UrlType, "home: url", json!({}));
        input.set_value("https://example.org/a?b=1").expect("set");
        input.validate().await.expect("valid");
        input.set_value("not a url").expect("set");
        assert_eq!(input.validate().await.unwrap_err().code(), codes::INVALID_URL);
    }

    #[tokio::test]
    async fn ip_family_switches() {
        let mut v4_only = input_of(IpType, "addr: ip", json!({"allowV6": false}));
        v4_only.set_value("10.0.0.1").expect("set");
        v4_only.validate().await.expect("v4 ok");
        v4_only.set_value("::1").expect("set");
        assert_eq!(v4_only.validate().await.unwrap_err().code(), codes::INVALID_IP);
    }
}
