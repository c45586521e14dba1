//! Runtime: registros, caché de resultados y configuración.
//!
//! Es inyectable: los tests construyen su propio `Runtime`; las aplicaciones
//! pueden usar `Runtime::global()`, construido perezosamente desde el
//! entorno. `reset()` vacía todo y vuelve a registrar los tipos de fábrica.

use std::sync::Arc;

use log::{debug, error};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::action::{Action, ActionLogic, BakedAction, UnregisteredAction};
use crate::cache::ResultCache;
use crate::config::FrameworkConfig;
use crate::constants::DEFAULT_MASK;
use crate::errors::ActionError;
use crate::handler::{ErrorHook, Reader, Transport, Writer};
use crate::input::{types, Input, InputSpec, InputType, ValidationStep};
use crate::registry::{Registry, RegistryKind};

static GLOBAL: Lazy<Arc<Runtime>> = Lazy::new(|| Arc::new(Runtime::with_builtins(FrameworkConfig::from_env())));

pub struct Runtime {
    config: FrameworkConfig,
    input_types: Registry<Arc<dyn InputType>>,
    actions: Registry<Arc<dyn ActionLogic>>,
    transports: Registry<Arc<dyn Transport>>,
    readers: Registry<Arc<dyn Reader>>,
    writers: Registry<Arc<dyn Writer>>,
    error_hooks: Registry<Arc<dyn ErrorHook>>,
    cache: ResultCache,
}

impl Runtime {
    /// Runtime vacío (sin tipos de input registrados).
    pub fn new(config: FrameworkConfig) -> Self {
        let cache = ResultCache::new(&config.cache);
        Self { config,
               input_types: Registry::new(RegistryKind::InputType),
               actions: Registry::new(RegistryKind::Action),
               transports: Registry::new(RegistryKind::Handler),
               readers: Registry::new(RegistryKind::Reader),
               writers: Registry::new(RegistryKind::Writer),
               error_hooks: Registry::new(RegistryKind::ErrorHook),
               cache }
    }

    /// Runtime con los tipos de input de fábrica ya registrados.
    pub fn with_builtins(config: FrameworkConfig) -> Self {
        let runtime = Self::new(config);
        runtime.register_builtins();
        runtime
    }

    pub fn global() -> Arc<Runtime> {
        GLOBAL.clone()
    }

    fn register_builtins(&self) {
        for ty in types::builtins() {
            let name = ty.type_name().to_string();
            if let Err(err) = self.input_types.register(&name, DEFAULT_MASK, ty) {
                error!("runtime:builtin-failed type={name} {err}");
            }
        }
    }

    /// Vacía registros y caché, y re-registra los tipos de fábrica.
    pub fn reset(&self) {
        debug!("runtime:reset");
        self.input_types.clear();
        self.actions.clear();
        self.transports.clear();
        self.readers.clear();
        self.writers.clear();
        self.error_hooks.clear();
        self.cache.invalidate_all();
        self.register_builtins();
    }

    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    // ------------------------------------------------------------------
    // Tipos de input

    pub fn register_input_type(&self, ty: Arc<dyn InputType>, name: Option<&str>) -> Result<(), ActionError> {
        let name = name.unwrap_or(ty.type_name()).to_string();
        self.input_types.register(&name, DEFAULT_MASK, ty)
    }

    pub fn input_types(&self) -> &Registry<Arc<dyn InputType>> {
        &self.input_types
    }

    /// Crea un Input desde la gramática `"[_]name[?]: type[[]]"`.
    pub fn create_input(&self,
                        spec: &str,
                        options: Option<&Value>,
                        extra_validation: Option<Arc<dyn ValidationStep>>)
                        -> Result<Input, ActionError> {
        let spec = InputSpec::parse(spec)?;
        let ty = self.input_types.resolve(&spec.type_name, "")?;
        Input::new(spec, ty, options, extra_validation)
    }

    // ------------------------------------------------------------------
    // Acciones

    pub fn register_action(&self,
                           logic: Arc<dyn ActionLogic>,
                           name: Option<&str>,
                           mask: Option<&str>)
                           -> Result<(), ActionError> {
        let name = name.unwrap_or(logic.name()).to_string();
        self.actions.register(&name, mask.unwrap_or(DEFAULT_MASK), logic)
    }

    pub fn actions(&self) -> &Registry<Arc<dyn ActionLogic>> {
        &self.actions
    }

    /// Crea una acción con scope vacío (sólo la máscara `*` aplica).
    pub fn create_action(self: &Arc<Self>, name: &str) -> Result<Action, ActionError> {
        self.create_action_scoped(name, "")
    }

    /// Crea una acción resolviendo la máscara contra `scope`.
    pub fn create_action_scoped(self: &Arc<Self>, name: &str, scope: &str) -> Result<Action, ActionError> {
        let logic: Arc<dyn ActionLogic> = match self.actions.resolve(name, scope) {
            Ok(logic) => logic,
            Err(ActionError::NotRegistered { .. }) if self.config.unregistered_sentinel => {
                debug!("runtime:sentinel action={name} scope={scope}");
                Arc::new(UnregisteredAction { name: name.to_string() })
            }
            Err(err) => return Err(err),
        };
        Action::build(self.clone(), name, scope, logic)
    }

    pub fn create_action_from_baked(self: &Arc<Self>, baked: &BakedAction) -> Result<Action, ActionError> {
        let mut action = self.create_action(&baked.action_name)?;
        for (name, raw) in &baked.inputs {
            action.input_mut(name)?.load_serialized(raw.as_deref())?;
        }
        if let Some(autofill) = &baked.autofill {
            for (key, value) in autofill {
                action.session_mut().set_autofill(key.clone(), value.clone());
            }
        }
        Ok(action)
    }

    /// Inversa de `Action::bake_to_json`.
    pub fn create_action_from_json(self: &Arc<Self>, value: &Value) -> Result<Action, ActionError> {
        self.create_action_from_baked(&BakedAction::from_json(value)?)
    }

    // ------------------------------------------------------------------
    // Transportes

    /// Registra el transporte `name` (emisor) para las acciones que
    /// coincidan con `mask`.
    pub fn register_transport(&self, name: &str, mask: Option<&str>, transport: Arc<dyn Transport>) -> Result<(), ActionError> {
        self.transports.register(name, mask.unwrap_or(DEFAULT_MASK), transport)
    }

    pub fn register_reader(&self, name: &str, mask: Option<&str>, reader: Arc<dyn Reader>) -> Result<(), ActionError> {
        self.readers.register(name, mask.unwrap_or(DEFAULT_MASK), reader)
    }

    pub fn register_writer(&self, name: &str, mask: Option<&str>, writer: Arc<dyn Writer>) -> Result<(), ActionError> {
        self.writers.register(name, mask.unwrap_or(DEFAULT_MASK), writer)
    }

    pub fn register_error_hook(&self, name: &str, mask: Option<&str>, hook: Arc<dyn ErrorHook>) -> Result<(), ActionError> {
        self.error_hooks.register(name, mask.unwrap_or(DEFAULT_MASK), hook)
    }

    pub fn transports(&self) -> &Registry<Arc<dyn Transport>> {
        &self.transports
    }

    pub fn readers(&self) -> &Registry<Arc<dyn Reader>> {
        &self.readers
    }

    pub fn writers(&self) -> &Registry<Arc<dyn Writer>> {
        &self.writers
    }

    pub fn error_hooks(&self) -> &Registry<Arc<dyn ErrorHook>> {
        &self.error_hooks
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::with_builtins(FrameworkConfig::default())
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
         .field("input_types", &self.input_types)
         .field("actions", &self.actions)
         .field("transports", &self.transports)
         .finish_non_exhaustive()
    }
}
