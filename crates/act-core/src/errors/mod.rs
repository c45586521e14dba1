//! Errores del framework.
//!
//! Un único enum `ActionError` cubre los cuatro kinds de dominio
//! (`ValidationFail`, `Conflict`, `NotFound`, `NoContent`) y los fallos de
//! contrato del propio framework (nombres ilegales, registros inexistentes,
//! propiedades bloqueadas, ...). Todo fallo de contrato se clasifica como
//! kind `Internal`: se reporta siempre, nunca con detalle hacia el cliente.
//!
//! Cada variante expone un `code` estable (ver `codes`) y puede viajar por un
//! transporte con `to_json` / `from_json`.

pub mod codes;
mod policy;

pub use policy::{ErrorPolicy, KindSettings};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::registry::RegistryKind;

/// Clasificación de un error (no su tipo Rust).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationFail,
    Conflict,
    NotFound,
    NoContent,
    Internal,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActionError {
    #[error("validation failed for input '{input}': {message}")]
    ValidationFail { input: String, code: String, message: String },
    #[error("conflict: {message}")]
    Conflict { code: String, message: String },
    #[error("not found: {message}")]
    NotFound { code: String, message: String },
    #[error("no content: {message}")]
    NoContent { code: String, message: String },
    #[error("Illegal {kind} name: {name}")]
    IllegalName { kind: RegistryKind, name: String },
    #[error("{kind} not registered: {name}")]
    NotRegistered { kind: RegistryKind, name: String },
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("property '{property}' is not registered for input type '{type_name}'")]
    UnknownProperty { type_name: String, property: String },
    #[error("property '{0}' is locked")]
    PropertyLocked(String),
    #[error("input '{0}' is read-only")]
    ReadOnly(String),
    #[error("serialization not supported")]
    SerializationNotSupported,
    #[error("contract violation: {0}")]
    Contract(String),
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("cannot finalize more than once")]
    AlreadyFinalized,
    #[error("internal: {0}")]
    Internal(String),
}

/// Forma serializada de un error para transporte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl ActionError {
    pub fn validation(input: impl Into<String>, code: &str, message: impl Into<String>) -> Self {
        Self::ValidationFail { input: input.into(),
                               code: code.to_string(),
                               message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict { code: codes::CONFLICT.to_string(),
                         message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { code: codes::NOT_FOUND.to_string(),
                         message: message.into() }
    }

    pub fn no_content(message: impl Into<String>) -> Self {
        Self::NoContent { code: codes::NO_CONTENT.to_string(),
                          message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFail { .. } => ErrorKind::ValidationFail,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NoContent { .. } => ErrorKind::NoContent,
            _ => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::ValidationFail { code, .. }
            | Self::Conflict { code, .. }
            | Self::NotFound { code, .. }
            | Self::NoContent { code, .. } => code,
            Self::IllegalName { .. } => codes::ILLEGAL_NAME,
            Self::NotRegistered { .. } => codes::NOT_REGISTERED,
            Self::Syntax(_) => codes::SYNTAX,
            Self::UnknownProperty { .. } => codes::UNKNOWN_PROPERTY,
            Self::PropertyLocked(_) => codes::PROPERTY_LOCKED,
            Self::ReadOnly(_) => codes::READ_ONLY,
            Self::SerializationNotSupported => codes::SERIALIZATION_NOT_SUPPORTED,
            Self::Contract(_) => codes::CONTRACT,
            Self::NotImplemented(_) => codes::NOT_IMPLEMENTED,
            Self::AlreadyFinalized => codes::ALREADY_FINALIZED,
            Self::Internal(_) => codes::INTERNAL,
        }
    }

    /// Nombre del input causante (sólo `ValidationFail`).
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::ValidationFail { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Mensaje sin el prefijo del kind.
    pub fn message(&self) -> String {
        match self {
            Self::ValidationFail { message, .. }
            | Self::Conflict { message, .. }
            | Self::NotFound { message, .. }
            | Self::NoContent { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload { kind: self.kind(),
                       code: self.code().to_string(),
                       message: self.message(),
                       input: self.input().map(str::to_string) }
    }

    pub fn from_payload(payload: ErrorPayload) -> Self {
        let ErrorPayload { kind, code, message, input } = payload;
        match kind {
            ErrorKind::ValidationFail => Self::ValidationFail { input: input.unwrap_or_default(),
                                                                code,
                                                                message },
            ErrorKind::Conflict => Self::Conflict { code, message },
            ErrorKind::NotFound => Self::NotFound { code, message },
            ErrorKind::NoContent => Self::NoContent { code, message },
            // los fallos de contrato viajan como kind interno; se pierde la variante
            ErrorKind::Internal => Self::Internal(message),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.to_payload()).unwrap_or(Value::Null)
    }

    pub fn from_json(value: &Value) -> Result<Self, ActionError> {
        let payload: ErrorPayload =
            serde_json::from_value(value.clone()).map_err(|e| Self::Syntax(format!("error payload: {e}")))?;
        Ok(Self::from_payload(payload))
    }

    /// Conversión aplicada por la acción padre cuando falla una acción
    /// anidada: si el kind no es visible anidado, se oculta como interno.
    pub fn into_nested(self, policy: &ErrorPolicy) -> Self {
        if policy.settings(self.kind()).visible_when_nested {
            self
        } else {
            Self::Internal("nested action failed".to_string())
        }
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Syntax(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn illegal_name_message_matches_contract() {
        let err = ActionError::IllegalName { kind: RegistryKind::Action,
                                             name: "bad name".into() };
        assert_eq!(err.to_string(), "Illegal action name: bad name");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn validation_round_trips_through_json() {
        let err = ActionError::validation("a", codes::BELOW_MIN, "value below minimum");
        let wire = err.to_json();
        assert_eq!(wire["kind"], json!("ValidationFail"));
        assert_eq!(wire["code"], json!(codes::BELOW_MIN));
        assert_eq!(wire["input"], json!("a"));
        assert_eq!(ActionError::from_json(&wire).expect("decode"), err);
    }

    #[test]
    fn contract_failures_travel_as_internal() {
        let err = ActionError::AlreadyFinalized;
        let wire = err.to_json();
        assert_eq!(wire["kind"], json!("Internal"));
        assert_eq!(wire["code"], json!(codes::ALREADY_FINALIZED));
        let back = ActionError::from_json(&wire).expect("decode");
        assert_eq!(back.kind(), ErrorKind::Internal);
    }

    #[test]
    fn nested_validation_is_hidden_but_not_found_is_visible() {
        let policy = ErrorPolicy::default();
        let hidden = ActionError::validation("secret", codes::REQUIRED, "missing").into_nested(&policy);
        assert_eq!(hidden.kind(), ErrorKind::Internal);
        assert!(!hidden.to_string().contains("secret"));

        let visible = ActionError::not_found("user 7").into_nested(&policy);
        assert_eq!(visible, ActionError::not_found("user 7"));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(ActionError::from_json(&json!({"nope": 1})), Err(ActionError::Syntax(_))));
    }
}
