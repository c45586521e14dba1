//! Contrato entre el `Handler` y un transporte concreto.
//!
//! - `Reader`: obtiene valores de inputs y autofill desde la petición.
//! - `Writer`: produce la representación de un resultado o error.
//! - `Transport`: emite lo renderizado (stdout, respuesta HTTP, ...).
//! - `ErrorHook`: recibe los fallos que no pueden entregarse al cliente.
//!
//! Todos se registran por nombre de transporte y se resuelven con el nombre
//! de la acción como scope.

use async_trait::async_trait;
use indexmap::IndexMap;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::Handler;
use crate::action::Action;
use crate::constants::DEFAULT_RESULT_LABEL;
use crate::errors::ActionError;
use crate::input::InputValue;
use crate::metadata::{write_options_path, Metadata};

#[async_trait]
pub trait Reader: Send + Sync {
    /// Valores de inputs de la petición, ya convertidos al tipo de cada input.
    async fn input_values(&self, handler: &Handler, action: &Action) -> Result<IndexMap<String, InputValue>, ActionError>;

    /// Entradas de autofill que la petición aporta a la sesión.
    async fn autofill_values(&self, _handler: &Handler, _action: &Action) -> Result<Map<String, Value>, ActionError> {
        Ok(Map::new())
    }
}

pub trait Writer: Send + Sync {
    fn serialize(&self,
                 handler: &Handler,
                 outcome: Result<&Value, &ActionError>,
                 options: &WriteOptions)
                 -> Result<Rendered, ActionError>;
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn emit(&self, handler: &Handler, rendered: &Rendered) -> Result<(), ActionError>;
}

#[async_trait]
pub trait ErrorHook: Send + Sync {
    async fn on_error(&self, handler: &Handler, error: &ActionError);
}

/// Hook usado cuando el transporte no registra uno propio.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorHook;

#[async_trait]
impl ErrorHook for LoggingErrorHook {
    async fn on_error(&self, handler: &Handler, err: &ActionError) {
        error!("handler:error transport={} action={} code={} {err}",
               handler.name(),
               handler.action_name().unwrap_or("-"),
               err.code());
    }
}

/// Opciones de escritura derivadas de `handler.<transport>.writeOptions`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteOptions {
    pub headers_only: bool,
    pub result_root: Option<String>,
    pub result_label: Option<String>,
    pub status: Option<u16>,
}

impl WriteOptions {
    pub fn from_metadata(metadata: &Metadata, transport: &str) -> Result<Self, ActionError> {
        let options = metadata.object(&write_options_path(transport))?;
        serde_json::from_value(Value::Object(options))
            .map_err(|e| ActionError::Contract(format!("invalid write options for '{transport}': {e}")))
    }

    pub fn label(&self) -> &str {
        self.result_label.as_deref().unwrap_or(DEFAULT_RESULT_LABEL)
    }
}

/// Resultado renderizado listo para emitir.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub status: u16,
    pub headers_only: bool,
    pub body: Option<Value>,
    pub is_error: bool,
}

/// Writer JSON por defecto.
///
/// Éxito: `{label: value}` (dentro de `resultRoot` si se indica).
/// Error: `{"error": {kind, code, message, input?}}` con el status del kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl Writer for JsonWriter {
    fn serialize(&self,
                 handler: &Handler,
                 outcome: Result<&Value, &ActionError>,
                 options: &WriteOptions)
                 -> Result<Rendered, ActionError> {
        let (status, body, is_error) = match outcome {
            Ok(value) => {
                let mut body = wrap(options.label(), value.clone());
                if let Some(root) = &options.result_root {
                    body = wrap(root, body);
                }
                (options.status.unwrap_or(200), body, false)
            }
            Err(err) => {
                let policy = handler.runtime().config().errors.settings(err.kind());
                (options.status.unwrap_or(policy.status), json!({ "error": err.to_json() }), true)
            }
        };
        Ok(Rendered { status,
                      headers_only: options.headers_only,
                      body: (!options.headers_only).then_some(body),
                      is_error })
    }
}

fn wrap(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
