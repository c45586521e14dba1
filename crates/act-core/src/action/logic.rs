use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use super::{ActionContext, InputValues};
use crate::errors::ActionError;
use crate::input::{Input, ValidationStep};
use crate::metadata::Metadata;
use crate::runtime::Runtime;

/// Lógica de negocio de una acción.
///
/// Una implementación es sin estado por invocación: declara sus inputs en
/// `declare` y recibe los valores ya validados en `perform`. La misma
/// instancia (`Arc`) se comparte entre todas las acciones creadas con su
/// nombre.
#[async_trait]
pub trait ActionLogic: Send + Sync {
    /// Nombre con el que se registra por defecto.
    fn name(&self) -> &str;

    fn declare(&self, _decl: &mut ActionDeclaration<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Si es `true`, el resultado se guarda en el caché compartido bajo el
    /// `id()` de la invocación.
    fn is_cacheable(&self) -> bool {
        false
    }

    async fn perform(&self, _ctx: &ActionContext<'_>, _values: &InputValues<'_>) -> Result<Value, ActionError> {
        Err(ActionError::NotImplemented(format!("perform for action '{}'", self.name())))
    }

    /// Último paso de la ejecución; puede transformar el resultado o el
    /// error de `perform`.
    async fn finalize(&self,
                      _ctx: &ActionContext<'_>,
                      outcome: Result<Value, ActionError>)
                      -> Result<Value, ActionError> {
        outcome
    }
}

/// Constructor de inputs y metadata usado por `ActionLogic::declare`.
pub struct ActionDeclaration<'r> {
    runtime: &'r Runtime,
    pub(crate) inputs: IndexMap<String, Input>,
    pub(crate) metadata: Metadata,
}

impl<'r> ActionDeclaration<'r> {
    pub(crate) fn new(runtime: &'r Runtime) -> Self {
        Self { runtime,
               inputs: IndexMap::new(),
               metadata: Metadata::new() }
    }

    /// Declara un input con la gramática `"[_]name[?]: type[[]]"`.
    pub fn input(&mut self, spec: &str) -> Result<&mut Self, ActionError> {
        self.input_with(spec, None, None)
    }

    pub fn input_with(&mut self,
                      spec: &str,
                      options: Option<Value>,
                      extra_validation: Option<Arc<dyn ValidationStep>>)
                      -> Result<&mut Self, ActionError> {
        let input = self.runtime.create_input(spec, options.as_ref(), extra_validation)?;
        if self.inputs.contains_key(input.name()) {
            return Err(ActionError::Contract(format!("input '{}' declared twice", input.name())));
        }
        self.inputs.insert(input.name().to_string(), input);
        Ok(self)
    }

    pub fn set_metadata(&mut self, path: &str, value: Value) -> Result<&mut Self, ActionError> {
        self.metadata.set(path, value)?;
        Ok(self)
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn runtime(&self) -> &Runtime {
        self.runtime
    }
}

/// Lógica de la acción centinela devuelta para nombres no registrados.
pub(crate) struct UnregisteredAction {
    pub(crate) name: String,
}

#[async_trait]
impl ActionLogic for UnregisteredAction {
    fn name(&self) -> &str {
        &self.name
    }

    async fn perform(&self, _ctx: &ActionContext<'_>, _values: &InputValues<'_>) -> Result<Value, ActionError> {
        Err(ActionError::not_found(format!("action '{}' is not registered", self.name)))
    }
}
