//! Acciones: lógica tipada + inputs declarados + sesión + metadata.
//!
//! Ciclo de `execute()`:
//! 1. autofill de sesión sobre inputs sin valor;
//! 2. validación concurrente de todos los inputs (el primer fallo aborta);
//! 3. cálculo de `id()` (fingerprint de nombre + inputs no ocultos);
//! 4. si la acción es cacheable, consulta al caché compartido;
//! 5. `perform` y luego el hook `finalize`;
//! 6. en éxito y si es cacheable, el resultado se guarda bajo `id()`.
//!
//! Una acción anidada (creada desde el contexto de otra) convierte sus
//! errores a `Internal` salvo que el kind sea visible anidado.

mod baked;
mod context;
mod fingerprint;
mod logic;
mod values;

pub use baked::BakedAction;
pub use context::ActionContext;
pub use fingerprint::ActionFingerprintInput;
pub use logic::{ActionDeclaration, ActionLogic};
pub(crate) use logic::UnregisteredAction;
pub use values::InputValues;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::constants::FINGERPRINT_VERSION;
use crate::errors::ActionError;
use crate::input::{Input, InputValue};
use crate::metadata::Metadata;
use crate::runtime::Runtime;
use crate::session::Session;

pub struct Action {
    name: String,
    scope: String,
    logic: Arc<dyn ActionLogic>,
    inputs: IndexMap<String, Input>,
    session: Session,
    metadata: Metadata,
    runtime: Arc<Runtime>,
    pub(crate) nested: bool,
}

impl Action {
    pub(crate) fn build(runtime: Arc<Runtime>,
                        name: &str,
                        scope: &str,
                        logic: Arc<dyn ActionLogic>)
                        -> Result<Self, ActionError> {
        let mut decl = ActionDeclaration::new(&runtime);
        logic.declare(&mut decl)?;
        let ActionDeclaration { inputs, metadata, .. } = decl;
        Ok(Self { name: name.to_string(),
                  scope: scope.to_string(),
                  logic,
                  inputs,
                  session: Session::new(),
                  metadata,
                  runtime,
                  nested: false })
    }

    /// Nombre registrado (participa del fingerprint).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scope con el que se resolvió la máscara (p.ej. el transporte).
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    pub fn is_cacheable(&self) -> bool {
        self.logic.is_cacheable()
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    pub fn inputs(&self) -> &IndexMap<String, Input> {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Result<&Input, ActionError> {
        self.inputs
            .get(name)
            .ok_or_else(|| ActionError::Contract(format!("action '{}' has no input '{name}'", self.name)))
    }

    pub fn input_mut(&mut self, name: &str) -> Result<&mut Input, ActionError> {
        let action = self.name.clone();
        self.inputs
            .get_mut(name)
            .ok_or_else(|| ActionError::Contract(format!("action '{action}' has no input '{name}'")))
    }

    pub fn set_input(&mut self, name: &str, value: impl Into<InputValue>) -> Result<(), ActionError> {
        self.input_mut(name)?.set_value(value)
    }

    /// Asigna valores desde un objeto JSON `{input: valor}`.
    pub fn set_inputs_json(&mut self, values: Value) -> Result<(), ActionError> {
        match values {
            Value::Null => Ok(()),
            Value::Object(map) => {
                for (name, value) in map {
                    self.set_input(&name, InputValue::from_json(value))?;
                }
                Ok(())
            }
            other => Err(ActionError::Contract(format!("input values must be an object, got {other}"))),
        }
    }

    pub fn values(&self) -> InputValues<'_> {
        InputValues::new(&self.inputs)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Asigna una copia profunda de `session`.
    pub fn set_session(&mut self, session: &Session) {
        self.session = session.clone();
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    // ------------------------------------------------------------------
    // Fingerprint

    /// Fingerprint de la invocación (inputs ocultos excluidos).
    pub async fn id(&self) -> Result<String, ActionError> {
        self.id_with(false).await
    }

    pub async fn id_with(&self, include_hidden: bool) -> Result<String, ActionError> {
        let mut inputs = BTreeMap::new();
        for (name, input) in self.inputs.iter().filter(|(_, i)| include_hidden || !i.is_hidden()) {
            inputs.insert(name.clone(), input.fingerprint_value()?);
        }
        ActionFingerprintInput { version: FINGERPRINT_VERSION,
                                 action: &self.name,
                                 inputs: &inputs }.hash()
    }

    // ------------------------------------------------------------------
    // Ejecución

    pub async fn execute(&mut self) -> Result<Value, ActionError> {
        debug!("execute:start action={} scope={} nested={}", self.name, self.scope, self.nested);
        let result = match self.apply_autofill() {
            Ok(()) => self.execute_inner().await,
            Err(err) => Err(err),
        };
        match &result {
            Ok(_) => debug!("execute:done action={}", self.name),
            Err(err) => debug!("execute:failed action={} code={} {err}", self.name, err.code()),
        }
        if self.nested {
            let policy = &self.runtime.config().errors;
            result.map_err(|err| err.into_nested(policy))
        } else {
            result
        }
    }

    /// Alias de `execute`.
    pub async fn run(&mut self) -> Result<Value, ActionError> {
        self.execute().await
    }

    fn apply_autofill(&mut self) -> Result<(), ActionError> {
        let session = &self.session;
        for input in self.inputs.values_mut().filter(|i| i.value().is_null()) {
            let Some(key) = input.autofill_key() else {
                continue;
            };
            if let Some(value) = session.autofill(key) {
                let value = InputValue::from_json(value.clone());
                input.set_value(value)?;
            }
        }
        Ok(())
    }

    async fn execute_inner(&self) -> Result<Value, ActionError> {
        try_join_all(self.inputs.values().map(|input| input.validate())).await?;

        let id = self.id().await?;
        let cacheable = self.logic.is_cacheable();
        if cacheable {
            if let Some(hit) = self.runtime.cache().get(&id).await {
                return Ok(hit);
            }
        }

        let ctx = ActionContext::new(self);
        let values = self.values();
        let outcome = self.logic.perform(&ctx, &values).await;
        let outcome = self.logic.finalize(&ctx, outcome).await;

        if cacheable {
            if let Ok(value) = &outcome {
                self.runtime.cache().insert(id, value.clone()).await;
            }
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Forma serializada

    pub fn bake(&self, include_hidden: bool, include_autofill: bool) -> Result<BakedAction, ActionError> {
        let mut inputs = IndexMap::new();
        for (name, input) in self.inputs.iter().filter(|(_, i)| include_hidden || !i.is_hidden()) {
            inputs.insert(name.clone(), input.serialize_value()?);
        }
        let autofill = (include_autofill && !self.session.autofill_values().is_empty())
            .then(|| self.session.autofill_values().clone());
        Ok(BakedAction { action_name: self.name.clone(),
                         inputs,
                         autofill })
    }

    /// `bake(include_hidden, true)` como JSON.
    pub fn bake_to_json(&self, include_hidden: bool) -> Result<Value, ActionError> {
        self.bake(include_hidden, true)?.to_json()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
         .field("name", &self.name)
         .field("scope", &self.scope)
         .field("inputs", &self.inputs)
         .field("nested", &self.nested)
         .finish()
    }
}
