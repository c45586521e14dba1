use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use super::types::InputType;
use super::validation::{self, fail, ValidationStep};
use super::{InputSpec, InputValue, PropertyTable};
use crate::errors::{codes, ActionError};

/// Input declarado de una acción.
///
/// Guarda el tipo resuelto, la tabla de propiedades, el valor actual y un
/// caché interno de vida corta que los tipos usan para memorizar trabajo
/// costoso (p.ej. el stat de `filePath`). Cambiar el valor limpia el caché.
///
/// Con `immutable = true` (por defecto) el valor sólo puede reemplazarse
/// entero vía `set_value`; `value_mut` exige `immutable = false`.
#[derive(Clone)]
pub struct Input {
    name: String,
    type_name: String,
    ty: Arc<dyn InputType>,
    properties: PropertyTable,
    value: InputValue,
    cache: DashMap<String, Value>,
    read_only: bool,
    extra_validation: Option<Arc<dyn ValidationStep>>,
}

impl Input {
    /// Construye un Input desde una declaración ya parseada y su tipo.
    /// `options` (objeto JSON) asigna propiedades antes de bloquear las que
    /// se fijan en construcción (`vector`, `immutable`).
    pub fn new(spec: InputSpec,
               ty: Arc<dyn InputType>,
               options: Option<&Value>,
               extra_validation: Option<Arc<dyn ValidationStep>>)
               -> Result<Self, ActionError> {
        let mut properties = PropertyTable::new(spec.type_name.clone());
        properties.register("required", true);
        properties.register_locked_on_create("vector", false);
        properties.register("hidden", false);
        properties.register_locked_on_create("immutable", true);
        properties.register("autofill", Value::Null);
        properties.register("description", Value::Null);
        ty.register_properties(&mut properties);

        properties.set("required", Value::Bool(spec.required))?;
        properties.set("vector", Value::Bool(spec.vector))?;
        properties.set("hidden", Value::Bool(spec.hidden))?;

        match options {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    properties.set(key, value.clone())?;
                }
            }
            Some(other) => {
                return Err(ActionError::Contract(format!("options for input '{}' must be an object, got {other}", spec.name)));
            }
        }
        properties.lock_creation_properties();

        Ok(Self { name: spec.name,
                  type_name: spec.type_name,
                  ty,
                  properties,
                  value: InputValue::Null,
                  cache: DashMap::new(),
                  read_only: false,
                  extra_validation })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nombre con el que se resolvió el tipo en el registro.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn input_type(&self) -> &Arc<dyn InputType> {
        &self.ty
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    pub fn extra_validation(&self) -> Option<&Arc<dyn ValidationStep>> {
        self.extra_validation.as_ref()
    }

    pub fn is_vector(&self) -> bool {
        self.properties.flag("vector")
    }

    pub fn is_required(&self) -> bool {
        self.properties.flag("required")
    }

    pub fn is_hidden(&self) -> bool {
        self.properties.flag("hidden")
    }

    pub fn is_immutable(&self) -> bool {
        self.properties.flag("immutable")
    }

    /// Clave del autofill de sesión que alimenta este input, si tiene.
    pub fn autofill_key(&self) -> Option<&str> {
        self.properties.text("autofill")
    }

    pub fn description(&self) -> Option<&str> {
        self.properties.text("description")
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    // ------------------------------------------------------------------
    // Valor

    pub fn value(&self) -> &InputValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<InputValue>) -> Result<(), ActionError> {
        if self.read_only {
            return Err(ActionError::ReadOnly(self.name.clone()));
        }
        let value = value.into();
        if self.is_vector() && !matches!(value, InputValue::Null | InputValue::List(_)) {
            return Err(ActionError::Contract(format!("input '{}' is a vector; its value must be a list", self.name)));
        }
        self.value = value;
        self.cache.clear();
        Ok(())
    }

    /// Acceso mutable al valor; sólo para inputs con `immutable = false`.
    pub fn value_mut(&mut self) -> Result<&mut InputValue, ActionError> {
        if self.read_only {
            return Err(ActionError::ReadOnly(self.name.clone()));
        }
        if self.is_immutable() {
            return Err(ActionError::Contract(format!("input '{}' is immutable", self.name)));
        }
        self.cache.clear();
        Ok(&mut self.value)
    }

    pub async fn validate(&self) -> Result<(), ActionError> {
        validation::run(self).await
    }

    // ------------------------------------------------------------------
    // Propiedades

    pub fn property(&self, name: &str) -> Result<&Value, ActionError> {
        self.properties.get(name)
    }

    pub fn assign_property(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ActionError> {
        if self.read_only {
            return Err(ActionError::ReadOnly(self.name.clone()));
        }
        self.properties.set(name, value.into())
    }

    pub fn lock_property(&mut self, name: &str) -> Result<(), ActionError> {
        if self.read_only {
            return Err(ActionError::ReadOnly(self.name.clone()));
        }
        self.properties.lock(name)
    }

    pub fn is_property_locked(&self, name: &str) -> Result<bool, ActionError> {
        self.properties.is_locked(name)
    }

    // ------------------------------------------------------------------
    // Caché interno

    pub fn cache_get(&self, key: &str) -> Option<Value> {
        self.cache.get(key).map(|v| v.value().clone())
    }

    pub fn cache_set(&self, key: &str, value: Value) {
        self.cache.insert(key.to_string(), value);
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    // ------------------------------------------------------------------
    // Forma string

    /// Parsea la forma string sin asignar. Los vectores esperan un array JSON
    /// de strings (o `null`) por elemento.
    pub fn parse_value(&self, raw: &str) -> Result<InputValue, ActionError> {
        if !self.ty.is_serializable() {
            return Err(ActionError::SerializationNotSupported);
        }
        if !self.is_vector() {
            return self.ty.parse_scalar(self, raw);
        }
        let items: Vec<Option<String>> =
            serde_json::from_str(raw).map_err(|e| fail(self, codes::INVALID_FORMAT, format!("expected a JSON array of strings: {e}")))?;
        items.into_iter()
             .map(|item| match item {
                 None => Ok(InputValue::Null),
                 Some(s) => self.ty.parse_scalar(self, &s),
             })
             .collect::<Result<Vec<_>, _>>()
             .map(InputValue::List)
    }

    /// Forma string del valor actual; `None` si el valor es nulo.
    pub fn serialize_value(&self) -> Result<Option<String>, ActionError> {
        if !self.ty.is_serializable() {
            return Err(ActionError::SerializationNotSupported);
        }
        match &self.value {
            InputValue::Null => Ok(None),
            InputValue::List(items) if self.is_vector() => {
                let parts = items.iter()
                                 .map(|item| match item {
                                     InputValue::Null => Ok(None),
                                     v => self.ty.serialize_scalar(self, v).map(Some),
                                 })
                                 .collect::<Result<Vec<Option<String>>, _>>()?;
                Ok(Some(serde_json::to_string(&parts)?))
            }
            scalar => self.ty.serialize_scalar(self, scalar).map(Some),
        }
    }

    /// Asigna desde la forma string (`None` → nulo).
    pub fn load_serialized(&mut self, raw: Option<&str>) -> Result<(), ActionError> {
        let value = match raw {
            Some(raw) => self.parse_value(raw)?,
            None => InputValue::Null,
        };
        self.set_value(value)
    }

    /// Valor que aporta este input al fingerprint de la acción.
    pub fn fingerprint_value(&self) -> Result<Value, ActionError> {
        match &self.value {
            InputValue::Null => Ok(Value::Null),
            InputValue::List(items) if self.is_vector() => items.iter()
                                                                .map(|item| match item {
                                                                    InputValue::Null => Ok(Value::Null),
                                                                    v => self.ty.fingerprint_scalar(self, v),
                                                                })
                                                                .collect::<Result<Vec<_>, _>>()
                                                                .map(Value::Array),
            scalar => self.ty.fingerprint_scalar(self, scalar),
        }
    }

    // ------------------------------------------------------------------
    // Transferencia

    /// Copia el valor (y opcionalmente el caché) desde `source`.
    ///
    /// Combinaciones válidas: escalar→escalar y vector→vector sin `at`;
    /// vector→escalar con `at` obligatorio. El caché sólo se transfiere si
    /// ambos inputs son inmutables.
    pub fn setup_from(&mut self, source: &Input, at: Option<usize>, transfer_cache: bool) -> Result<(), ActionError> {
        if self.read_only {
            return Err(ActionError::ReadOnly(self.name.clone()));
        }
        let value = match (source.is_vector(), self.is_vector(), at) {
            (false, false, None) | (true, true, None) => source.value.clone(),
            (true, false, Some(index)) => source.value
                                                .as_list()
                                                .and_then(|items| items.get(index))
                                                .cloned()
                                                .ok_or_else(|| {
                                                    ActionError::Contract(format!("index {index} out of range for input '{}'",
                                                                                  source.name))
                                                })?,
            (src_vec, dst_vec, at) => {
                return Err(ActionError::Contract(format!("cannot set up input '{}' (vector={dst_vec}) from '{}' (vector={src_vec}) with at={at:?}",
                                                         self.name, source.name)));
            }
        };
        self.value = value;
        self.cache.clear();
        if transfer_cache && self.is_immutable() && source.is_immutable() {
            for entry in source.cache.iter() {
                self.cache.insert(entry.key().clone(), entry.value().clone());
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
         .field("name", &self.name)
         .field("type_name", &self.type_name)
         .field("vector", &self.is_vector())
         .field("value", &self.value)
         .field("read_only", &self.read_only)
         .finish()
    }
}
