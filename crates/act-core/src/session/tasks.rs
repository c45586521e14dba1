//! Cola de trabajo diferido ("wrap-up") de una sesión.
//!
//! Contiene acciones pendientes (deduplicadas por fingerprint por defecto) y
//! operaciones arbitrarias. `drain` las ejecuta en orden de inserción, una
//! sola vez; los elementos que se encolan mientras se vacía también corren.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::{debug, warn};
use tokio::sync::Mutex;

use crate::action::Action;
use crate::errors::ActionError;

type Deferred = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), ActionError>> + Send>;

enum Task {
    Action(Box<Action>),
    Deferred(Deferred),
}

#[derive(Default)]
struct QueueState {
    items: Vec<Task>,
    fingerprints: HashSet<String>,
    draining: bool,
    closed: bool,
}

#[derive(Default)]
pub struct TaskQueue {
    state: Mutex<QueueState>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encola una acción. Con `dedupe`, una acción cuyo `id()` ya está en la
    /// cola se descarta y se devuelve `false`.
    pub async fn add_action(&self, action: Action, dedupe: bool) -> Result<bool, ActionError> {
        let id = if dedupe { Some(action.id().await?) } else { None };
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(ActionError::Contract("session already finalized".into()));
        }
        if let Some(id) = id {
            if !state.fingerprints.insert(id.clone()) {
                debug!("wrapup:dedupe action={} id={id}", action.name());
                return Ok(false);
            }
        }
        state.items.push(Task::Action(Box::new(action)));
        Ok(true)
    }

    /// Encola una operación diferida arbitraria.
    pub async fn add_wrapped<F, Fut>(&self, op: F) -> Result<(), ActionError>
        where F: FnOnce() -> Fut + Send + 'static,
              Fut: Future<Output = Result<(), ActionError>> + Send + 'static
    {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(ActionError::Contract("session already finalized".into()));
        }
        state.items.push(Task::Deferred(Box::new(move || op().boxed())));
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_closed(&self) -> bool {
        let state = self.state.lock().await;
        state.closed || state.draining
    }

    /// Ejecuta todo lo encolado una única vez. Corre todos los elementos
    /// aunque alguno falle y devuelve el primer error.
    pub(crate) async fn drain(&self) -> Result<usize, ActionError> {
        {
            let mut state = self.state.lock().await;
            if state.closed || state.draining {
                return Err(ActionError::AlreadyFinalized);
            }
            state.draining = true;
        }

        let mut ran = 0usize;
        let mut first_error: Option<ActionError> = None;
        loop {
            let batch = std::mem::take(&mut self.state.lock().await.items);
            if batch.is_empty() {
                break;
            }
            for task in batch {
                ran += 1;
                let result = match task {
                    Task::Action(mut action) => action.execute().await.map(|_| ()),
                    Task::Deferred(op) => op().await,
                };
                if let Err(err) = result {
                    warn!("wrapup:task-failed code={} {err}", err.code());
                    first_error.get_or_insert(err);
                }
            }
        }

        let mut state = self.state.lock().await;
        state.closed = true;
        state.draining = false;
        state.fingerprints.clear();
        drop(state);
        match first_error {
            Some(err) => Err(err),
            None => Ok(ran),
        }
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue").finish_non_exhaustive()
    }
}
