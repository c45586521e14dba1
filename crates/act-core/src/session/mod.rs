//! Sesión de una petición: datos clave→valor, mapa de autofill y cola de
//! trabajo diferido.
//!
//! Clonar una sesión produce una copia profunda de los datos y del autofill;
//! la cola de wrap-up es un handle compartido, de modo que lo encolado desde
//! acciones (anidadas o no) termina en el `finalize` de la petición.

mod tasks;

pub use tasks::TaskQueue;

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ActionError;

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    data: IndexMap<String, Value>,
    autofill: IndexMap<String, Value>,
    wrapup: Arc<TaskQueue>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(),
               data: IndexMap::new(),
               autofill: IndexMap::new(),
               wrapup: Arc::new(TaskQueue::new()) }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn data(&self) -> &IndexMap<String, Value> {
        &self.data
    }

    pub fn set_autofill(&mut self, key: impl Into<String>, value: Value) {
        self.autofill.insert(key.into(), value);
    }

    pub fn autofill(&self, key: &str) -> Option<&Value> {
        self.autofill.get(key)
    }

    pub fn autofill_values(&self) -> &IndexMap<String, Value> {
        &self.autofill
    }

    pub fn wrapup(&self) -> &Arc<TaskQueue> {
        &self.wrapup
    }

    /// Ejecuta la cola de wrap-up. Sólo puede llamarse una vez por sesión
    /// (incluidas sus copias); la segunda llamada falla.
    pub async fn finalize(&self) -> Result<(), ActionError> {
        debug!("finalize:start session={}", self.id);
        let tasks = self.wrapup.drain().await?;
        debug!("finalize:done session={} tasks={tasks}", self.id);
        Ok(())
    }

    pub async fn is_finalized(&self) -> bool {
        self.wrapup.is_closed().await
    }
}
