//! Forma serializada ("horneada") de una acción:
//! `{ actionName, inputs: {name: serializedString}, autofill? }`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ActionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakedAction {
    pub action_name: String,
    #[serde(default)]
    pub inputs: IndexMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autofill: Option<IndexMap<String, Value>>,
}

impl BakedAction {
    pub fn to_json(&self) -> Result<Value, ActionError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: &Value) -> Result<Self, ActionError> {
        serde_json::from_value(value.clone()).map_err(|e| ActionError::Syntax(format!("baked action: {e}")))
    }
}
