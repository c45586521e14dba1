//! Handler: puente entre un transporte y el runtime.
//!
//! `execute` resuelve acción, reader y writer por máscara (nombre del
//! transporte como base, nombre de la acción como scope), carga los inputs y
//! ejecuta. `output` renderiza el resultado, lo emite y finaliza la sesión;
//! los fallos de render/emit/finalize y los errores no renderizables van al
//! error hook del transporte.

mod contract;

pub use contract::{ErrorHook, JsonWriter, LoggingErrorHook, Reader, Rendered, Transport, WriteOptions, Writer};

use std::any::Any;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::action::Action;
use crate::errors::ActionError;
use crate::metadata::Metadata;
use crate::runtime::Runtime;
use crate::session::Session;

pub struct Handler {
    name: String,
    runtime: Arc<Runtime>,
    session: Session,
    state: Arc<dyn Any + Send + Sync>,
    metadata: Metadata,
    action: Option<Action>,
}

impl Handler {
    pub fn new(runtime: Arc<Runtime>, name: impl Into<String>) -> Self {
        Self { name: name.into(),
               runtime,
               session: Session::new(),
               state: Arc::new(()),
               metadata: Metadata::new(),
               action: None }
    }

    /// Estado propio del transporte (argumentos, petición, colectores...).
    pub fn with_state<S: Any + Send + Sync>(mut self, state: S) -> Self {
        self.state = Arc::new(state);
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn state<S: Any>(&self) -> Option<&S> {
        self.state.downcast_ref::<S>()
    }

    /// Nombre del transporte.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Metadata a nivel de handler; se mezcla bajo la de cada acción.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Última acción resuelta por `execute`.
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action.as_ref().map(Action::name)
    }

    pub async fn execute(&mut self, action_name: &str, init: Option<Metadata>) -> Result<Value, ActionError> {
        debug!("handler:execute transport={} action={action_name}", self.name);
        self.action = None;
        let mut action = self.runtime.create_action_scoped(action_name, &self.name)?;
        let mut metadata = self.metadata.clone();
        metadata.merge(action.metadata());
        if let Some(init) = init {
            metadata.merge(&init);
        }
        *action.metadata_mut() = metadata;
        action.set_session(&self.session);

        let reader = self.runtime.readers().resolve(&self.name, action_name)?;
        // el writer se resuelve antes de ejecutar para fallar temprano
        self.runtime.writers().resolve(&self.name, action_name)?;

        let values = reader.input_values(self, &action).await?;
        for (name, value) in values {
            match action.input_mut(&name) {
                Ok(input) => input.set_value(value)?,
                Err(_) => debug!("handler:ignore-input transport={} action={action_name} input={name}", self.name),
            }
        }
        let autofill = reader.autofill_values(self, &action).await?;
        for (key, value) in autofill {
            action.session_mut().set_autofill(key, value);
        }

        let result = action.execute().await;
        self.action = Some(action);
        result
    }

    /// Renderiza `outcome`, lo emite y (opcionalmente) finaliza la sesión.
    /// Devuelve lo renderizado, o `None` si no hubo writer o falló el render.
    pub async fn output(&mut self,
                        outcome: Result<Value, ActionError>,
                        extra: Option<Metadata>,
                        finalize_session: bool)
                        -> Option<Rendered> {
        let mut metadata = match &self.action {
            Some(action) => action.metadata().clone(),
            None => self.metadata.clone(),
        };
        if let Some(extra) = extra {
            metadata.merge(&extra);
        }
        let options = match WriteOptions::from_metadata(&metadata, &self.name) {
            Ok(options) => options,
            Err(err) => {
                self.report(&err).await;
                WriteOptions::default()
            }
        };

        let rendered = self.render(&outcome, &options).await;
        if let Some(rendered) = &rendered {
            self.emit(rendered).await;
        }

        if finalize_session {
            if let Err(err) = self.session.finalize().await {
                self.report(&err).await;
            }
        }
        rendered
    }

    fn scope(&self) -> &str {
        self.action_name().unwrap_or_default()
    }

    async fn render(&self, outcome: &Result<Value, ActionError>, options: &WriteOptions) -> Option<Rendered> {
        let writer = match self.runtime.writers().resolve(&self.name, self.scope()) {
            Ok(writer) => writer,
            Err(err) => {
                self.report(&err).await;
                return None;
            }
        };
        let generic = ActionError::Internal("internal error".into());
        let shown = match outcome {
            Ok(value) => Ok(value),
            Err(err) if self.runtime.config().errors.settings(err.kind()).render => Err(err),
            Err(err) => {
                // no renderizable: el detalle va al hook, el cliente ve un error genérico
                self.report(err).await;
                Err(&generic)
            }
        };
        match writer.serialize(self, shown, options) {
            Ok(rendered) => Some(rendered),
            Err(err) => {
                self.report(&err).await;
                None
            }
        }
    }

    async fn emit(&self, rendered: &Rendered) {
        let transport = match self.runtime.transports().resolve(&self.name, self.scope()) {
            Ok(transport) => transport,
            Err(err) => {
                self.report(&err).await;
                return;
            }
        };
        if let Err(err) = transport.emit(self, rendered).await {
            self.report(&err).await;
        }
    }

    /// Entrega un error al hook del transporte (o al hook de logging si no
    /// hay uno registrado para este scope).
    pub async fn report(&self, err: &ActionError) {
        match self.runtime.error_hooks().resolve(&self.name, self.scope()) {
            Ok(hook) => hook.on_error(self, err).await,
            Err(_) => LoggingErrorHook.on_error(self, err).await,
        }
    }
}
