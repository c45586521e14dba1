//! Transporte `direct`: invocación en proceso.
//!
//! Los inputs llegan como objeto JSON en el estado del handler y lo
//! renderizado se acumula en memoria para que el caller lo inspeccione.

use std::sync::{Arc, Mutex};

use act_core::{async_trait, Action, ActionError, Handler, InputValue, JsonWriter, LoggingErrorHook, Metadata, Reader,
               Rendered, Runtime, Transport};
use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

pub const DIRECT: &str = "direct";

#[derive(Debug, Default)]
pub struct DirectState {
    pub inputs: Map<String, Value>,
    pub autofill: Map<String, Value>,
    rendered: Mutex<Vec<Rendered>>,
}

impl DirectState {
    pub fn new(inputs: Value) -> Result<Self, ActionError> {
        let inputs = match inputs {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => return Err(ActionError::Contract(format!("direct inputs must be an object, got {other}"))),
        };
        Ok(Self { inputs,
                  ..Self::default() })
    }

    pub fn with_autofill(mut self, key: impl Into<String>, value: Value) -> Self {
        self.autofill.insert(key.into(), value);
        self
    }

    /// Copia de todo lo emitido hasta ahora.
    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

fn state(handler: &Handler) -> Result<&DirectState, ActionError> {
    handler.state::<DirectState>()
           .ok_or_else(|| ActionError::Internal("direct handler without DirectState".into()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectReader;

#[async_trait]
impl Reader for DirectReader {
    async fn input_values(&self, handler: &Handler, action: &Action) -> Result<IndexMap<String, InputValue>, ActionError> {
        let state = state(handler)?;
        let mut values = IndexMap::new();
        for (name, raw) in &state.inputs {
            if action.inputs().contains_key(name) {
                values.insert(name.clone(), InputValue::from_json(raw.clone()));
            } else {
                debug!("direct:unknown-input action={} input={name}", action.name());
            }
        }
        Ok(values)
    }

    async fn autofill_values(&self, handler: &Handler, _action: &Action) -> Result<Map<String, Value>, ActionError> {
        Ok(state(handler)?.autofill.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTransport;

#[async_trait]
impl Transport for DirectTransport {
    async fn emit(&self, handler: &Handler, rendered: &Rendered) -> Result<(), ActionError> {
        let state = state(handler)?;
        let mut sink = state.rendered
                            .lock()
                            .map_err(|_| ActionError::Internal("direct sink poisoned".into()))?;
        sink.push(rendered.clone());
        Ok(())
    }
}

/// Registra reader, writer, transporte y error hook de `direct` para las
/// acciones que coincidan con `mask`.
pub fn register(runtime: &Runtime, mask: Option<&str>) -> Result<(), ActionError> {
    runtime.register_reader(DIRECT, mask, Arc::new(DirectReader))?;
    runtime.register_writer(DIRECT, mask, Arc::new(JsonWriter))?;
    runtime.register_transport(DIRECT, mask, Arc::new(DirectTransport))?;
    runtime.register_error_hook(DIRECT, mask, Arc::new(LoggingErrorHook))?;
    Ok(())
}

/// Resultado de `call`: el valor crudo y lo que se emitió.
#[derive(Debug)]
pub struct DirectOutcome {
    pub result: Result<Value, ActionError>,
    pub rendered: Option<Rendered>,
}

/// Ejecuta `action` por el transporte `direct` y finaliza la sesión.
pub async fn call(runtime: &Arc<Runtime>, action: &str, inputs: Value, init: Option<Metadata>) -> Result<DirectOutcome, ActionError> {
    let mut handler = Handler::new(runtime.clone(), DIRECT).with_state(DirectState::new(inputs)?);
    let result = handler.execute(action, init).await;
    let rendered = handler.output(result.clone(), None, true).await;
    Ok(DirectOutcome { result, rendered })
}
