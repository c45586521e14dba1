//! Valor de un Input.
//!
//! `InputValue` es escalar o secuencia ordenada (`List`). `Json` con un
//! escalar JSON dentro es la forma "envuelta" de un primitivo; los tipos con
//! la propiedad `primitive = true` la rechazan.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
    Json(Value),
    List(Vec<InputValue>),
}

impl InputValue {
    pub fn is_null(&self) -> bool {
        matches!(self, InputValue::Null)
    }

    /// `Null` o secuencia vacía.
    pub fn is_empty(&self) -> bool {
        match self {
            InputValue::Null => true,
            InputValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_list(&self) -> Option<&[InputValue]> {
        match self {
            InputValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            InputValue::Number(n) => Some(*n),
            InputValue::Json(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            InputValue::Text(s) => Some(s),
            InputValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InputValue::Bool(b) => Some(*b),
            InputValue::Json(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// `Json` con un escalar (string, número o bool) dentro.
    pub fn is_wrapped_primitive(&self) -> bool {
        matches!(self, InputValue::Json(Value::String(_) | Value::Number(_) | Value::Bool(_)))
    }

    /// Desenvuelve un primitivo envuelto a su variante nativa.
    pub fn unwrap_primitive(&self) -> InputValue {
        match self {
            InputValue::Json(Value::String(s)) => InputValue::Text(s.clone()),
            InputValue::Json(Value::Bool(b)) => InputValue::Bool(*b),
            InputValue::Json(Value::Number(n)) => n.as_f64().map(InputValue::Number).unwrap_or(InputValue::Null),
            other => other.clone(),
        }
    }

    /// Etiqueta corta para mensajes de error.
    pub fn label(&self) -> &'static str {
        match self {
            InputValue::Null => "null",
            InputValue::Bool(_) => "bool",
            InputValue::Number(_) => "number",
            InputValue::Text(_) => "text",
            InputValue::Timestamp(_) => "timestamp",
            InputValue::Bytes(_) => "bytes",
            InputValue::Json(_) => "json",
            InputValue::List(_) => "list",
        }
    }

    /// Conversión desde JSON de transporte: arrays → `List`, objetos → `Json`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Bool(b),
            Value::Number(n) => n.as_f64().map(InputValue::Number).unwrap_or(InputValue::Null),
            Value::String(s) => InputValue::Text(s),
            Value::Array(items) => InputValue::List(items.into_iter().map(InputValue::from_json).collect()),
            obj @ Value::Object(_) => InputValue::Json(obj),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            InputValue::Null => Value::Null,
            InputValue::Bool(b) => Value::Bool(*b),
            InputValue::Number(n) => number_to_json(*n),
            InputValue::Text(s) => Value::String(s.clone()),
            InputValue::Timestamp(ts) => Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            InputValue::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
            InputValue::Json(v) => v.clone(),
            InputValue::List(items) => Value::Array(items.iter().map(InputValue::to_json).collect()),
        }
    }
}

fn number_to_json(n: f64) -> Value {
    // enteros exactos como i64 para que `2.0` viaje como `2`
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        InputValue::Number(n)
    }
}

impl From<i64> for InputValue {
    fn from(n: i64) -> Self {
        InputValue::Number(n as f64)
    }
}

impl From<i32> for InputValue {
    fn from(n: i32) -> Self {
        InputValue::Number(f64::from(n))
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        InputValue::Bool(b)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<DateTime<Utc>> for InputValue {
    fn from(ts: DateTime<Utc>) -> Self {
        InputValue::Timestamp(ts)
    }
}

impl From<Vec<u8>> for InputValue {
    fn from(bytes: Vec<u8>) -> Self {
        InputValue::Bytes(bytes)
    }
}

impl From<Vec<InputValue>> for InputValue {
    fn from(items: Vec<InputValue>) -> Self {
        InputValue::List(items)
    }
}

impl From<Value> for InputValue {
    fn from(v: Value) -> Self {
        InputValue::from_json(v)
    }
}
