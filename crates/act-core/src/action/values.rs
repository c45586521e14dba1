use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::errors::ActionError;
use crate::input::{Input, InputValue};

/// Vista de sólo lectura sobre los valores de los inputs de una acción, con
/// accesores tipados para `perform`.
#[derive(Debug, Clone, Copy)]
pub struct InputValues<'a> {
    inputs: &'a IndexMap<String, Input>,
}

static NULL: InputValue = InputValue::Null;

impl<'a> InputValues<'a> {
    pub fn new(inputs: &'a IndexMap<String, Input>) -> Self {
        Self { inputs }
    }

    /// Valor del input (`Null` si no existe o no tiene valor).
    pub fn get(&self, name: &str) -> &'a InputValue {
        self.inputs.get(name).map(Input::value).unwrap_or(&NULL)
    }

    pub fn is_set(&self, name: &str) -> bool {
        !self.get(name).is_null()
    }

    fn mismatch(name: &str, expected: &str, value: &InputValue) -> ActionError {
        ActionError::Contract(format!("input '{name}' holds {}, expected {expected}", value.label()))
    }

    pub fn number(&self, name: &str) -> Result<f64, ActionError> {
        let value = self.get(name);
        value.as_f64().ok_or_else(|| Self::mismatch(name, "a number", value))
    }

    pub fn text(&self, name: &str) -> Result<&'a str, ActionError> {
        let value = self.get(name);
        value.as_str().ok_or_else(|| Self::mismatch(name, "text", value))
    }

    pub fn flag(&self, name: &str) -> Result<bool, ActionError> {
        let value = self.get(name);
        value.as_bool().ok_or_else(|| Self::mismatch(name, "a bool", value))
    }

    pub fn list(&self, name: &str) -> Result<&'a [InputValue], ActionError> {
        let value = self.get(name);
        value.as_list().ok_or_else(|| Self::mismatch(name, "a list", value))
    }

    /// Todos los valores como objeto JSON (orden de declaración).
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.inputs
                                          .iter()
                                          .map(|(name, input)| (name.clone(), input.value().to_json()))
                                          .collect();
        Value::Object(map)
    }
}
