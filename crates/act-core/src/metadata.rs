//! Árbol de metadata jerárquico de una acción.
//!
//! Es un objeto JSON anidado direccionado por rutas con puntos
//! (`handler.cli.readOptions.verbose`). Una ruta que empieza por `$` usa un
//! alias fijo para las opciones de lectura/escritura de cada transporte:
//! `$cliRead` → `handler.cli.readOptions`, `$webWrite` →
//! `handler.web.writeOptions`, ...

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::HANDLER_METADATA_ROOT;
use crate::errors::ActionError;

const ALIAS_TRANSPORTS: [&str; 3] = ["web", "cli", "direct"];

/// Expande un alias `$<transport>Read|Write` al comienzo de `path`.
pub fn expand_path(path: &str) -> Result<String, ActionError> {
    let Some(rest) = path.strip_prefix('$') else {
        return Ok(path.to_string());
    };
    let (alias, tail) = match rest.split_once('.') {
        Some((alias, tail)) => (alias, Some(tail)),
        None => (rest, None),
    };
    let expanded = ALIAS_TRANSPORTS.iter().find_map(|t| {
                                              let suffix = alias.strip_prefix(t)?;
                                              match suffix {
                                                  "Read" => Some(format!("{HANDLER_METADATA_ROOT}.{t}.readOptions")),
                                                  "Write" => Some(format!("{HANDLER_METADATA_ROOT}.{t}.writeOptions")),
                                                  _ => None,
                                              }
                                          });
    let base = expanded.ok_or_else(|| ActionError::Contract(format!("unknown metadata path variable '${alias}'")))?;
    Ok(match tail {
        Some(tail) => format!("{base}.{tail}"),
        None => base,
    })
}

/// Ruta de las opciones de lectura de un transporte.
pub fn read_options_path(transport: &str) -> String {
    format!("{HANDLER_METADATA_ROOT}.{transport}.readOptions")
}

/// Ruta de las opciones de escritura de un transporte.
pub fn write_options_path(transport: &str) -> String {
    format!("{HANDLER_METADATA_ROOT}.{transport}.writeOptions")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    root: Map<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, ActionError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(ActionError::Contract(format!("metadata must be an object, got {other}"))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, path: &str) -> Result<Option<&Value>, ActionError> {
        let path = expand_path(path)?;
        let mut node = &self.root;
        let mut segments = path.split('.').peekable();
        while let Some(seg) = segments.next() {
            let Some(child) = node.get(seg) else {
                return Ok(None);
            };
            if segments.peek().is_none() {
                return Ok(Some(child));
            }
            match child {
                Value::Object(map) => node = map,
                _ => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Asigna `value` en `path`, creando los nodos intermedios. Un nodo
    /// intermedio que no es objeto se reemplaza.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), ActionError> {
        let path = expand_path(path)?;
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ActionError::Contract(format!("invalid metadata path '{path}'")));
        }
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return Err(ActionError::Contract("empty metadata path".into())),
        };
        let mut node = &mut self.root;
        for seg in parents {
            let entry = node.entry((*seg).to_string()).or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => return Err(ActionError::Internal("metadata node is not an object".into())),
            };
        }
        node.insert((*last).to_string(), value);
        Ok(())
    }

    /// Objeto en `path` (vacío si no existe o no es objeto).
    pub fn object(&self, path: &str) -> Result<Map<String, Value>, ActionError> {
        Ok(match self.get(path)? {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        })
    }

    /// Mezcla profunda: los objetos se combinan, el resto se sobreescribe.
    pub fn merge(&mut self, other: &Metadata) {
        merge_maps(&mut self.root, &other.root);
    }
}

fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(dst)), Value::Object(src)) => merge_maps(dst, src),
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
