//! Tabla de propiedades de un Input.
//!
//! Cada tipo registra sus propiedades (con valor por defecto) al crear el
//! Input; leer o escribir una propiedad no registrada es un error. Una
//! propiedad bloqueada no puede reasignarse. Las marcadas
//! `lock_on_create` se bloquean al terminar la construcción del Input.

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::ActionError;

#[derive(Debug, Clone)]
struct PropertySlot {
    value: Value,
    locked: bool,
    lock_on_create: bool,
}

#[derive(Debug, Clone)]
pub struct PropertyTable {
    type_name: String,
    slots: IndexMap<String, PropertySlot>,
}

impl PropertyTable {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self { type_name: type_name.into(),
               slots: IndexMap::new() }
    }

    /// Registra (o re-declara) una propiedad con su valor por defecto.
    pub fn register(&mut self, name: &str, default: impl Into<Value>) {
        self.insert(name, default.into(), false);
    }

    /// Igual que `register`, pero la propiedad queda bloqueada tras construir
    /// el Input.
    pub fn register_locked_on_create(&mut self, name: &str, default: impl Into<Value>) {
        self.insert(name, default.into(), true);
    }

    fn insert(&mut self, name: &str, value: Value, lock_on_create: bool) {
        self.slots.insert(name.to_string(),
                          PropertySlot { value,
                                         locked: false,
                                         lock_on_create });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    fn unknown(&self, name: &str) -> ActionError {
        ActionError::UnknownProperty { type_name: self.type_name.clone(),
                                       property: name.to_string() }
    }

    pub fn get(&self, name: &str) -> Result<&Value, ActionError> {
        self.slots.get(name).map(|s| &s.value).ok_or_else(|| self.unknown(name))
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ActionError> {
        let unknown = self.unknown(name);
        let slot = self.slots.get_mut(name).ok_or(unknown)?;
        if slot.locked {
            return Err(ActionError::PropertyLocked(name.to_string()));
        }
        slot.value = value;
        Ok(())
    }

    pub fn lock(&mut self, name: &str) -> Result<(), ActionError> {
        let unknown = self.unknown(name);
        let slot = self.slots.get_mut(name).ok_or(unknown)?;
        slot.locked = true;
        Ok(())
    }

    pub fn is_locked(&self, name: &str) -> Result<bool, ActionError> {
        self.slots.get(name).map(|s| s.locked).ok_or_else(|| self.unknown(name))
    }

    pub(crate) fn lock_creation_properties(&mut self) {
        for slot in self.slots.values_mut().filter(|s| s.lock_on_create) {
            slot.locked = true;
        }
    }

    // Accesores tipados; un valor de tipo inesperado cuenta como ausente.

    pub fn flag(&self, name: &str) -> bool {
        self.slots.get(name).and_then(|s| s.value.as_bool()).unwrap_or(false)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.slots.get(name).and_then(|s| s.value.as_f64())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|s| s.value.as_str())
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).map(|s| &s.value).filter(|v| !v.is_null())
    }
}
