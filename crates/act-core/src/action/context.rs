use std::sync::Arc;

use serde_json::Value;

use super::Action;
use crate::errors::ActionError;
use crate::input::Input;
use crate::metadata::Metadata;
use crate::runtime::Runtime;
use crate::session::{Session, TaskQueue};

/// Contexto de ejecución que recibe `perform`.
pub struct ActionContext<'a> {
    action: &'a Action,
}

impl<'a> ActionContext<'a> {
    pub(crate) fn new(action: &'a Action) -> Self {
        Self { action }
    }

    pub fn action_name(&self) -> &str {
        self.action.name()
    }

    pub fn input(&self, name: &str) -> Option<&'a Input> {
        self.action.inputs().get(name)
    }

    pub fn session(&self) -> &'a Session {
        self.action.session()
    }

    pub fn metadata(&self) -> &'a Metadata {
        self.action.metadata()
    }

    pub fn runtime(&self) -> &'a Arc<Runtime> {
        self.action.runtime()
    }

    pub fn wrapup(&self) -> &'a Arc<TaskQueue> {
        self.action.session().wrapup()
    }

    pub fn is_nested(&self) -> bool {
        self.action.is_nested()
    }

    /// Crea una acción hija que comparte la sesión de la acción en curso.
    /// Sus errores se convierten según la visibilidad de errores anidados.
    pub fn create_action(&self, name: &str) -> Result<Action, ActionError> {
        let mut child = self.runtime().create_action_scoped(name, self.action.scope())?;
        child.set_session(self.session());
        child.nested = true;
        Ok(child)
    }

    /// Atajo: crea la acción hija, asigna valores desde un objeto JSON y la
    /// ejecuta.
    pub async fn run_nested(&self, name: &str, inputs: Value) -> Result<Value, ActionError> {
        let mut child = self.create_action(name)?;
        child.set_inputs_json(inputs)?;
        child.execute().await
    }
}
