//! act-core: acciones tipadas, auto-validadas y cacheables, independientes
//! del transporte.
//!
//! Tres subsistemas acoplados:
//! - sistema de tipos de input (`input`): gramática compacta, propiedades,
//!   validación asíncrona y forma string;
//! - motor de acciones (`action`): fingerprint por invocación y caché de
//!   resultados (`cache`);
//! - registros con resolución por máscaras (`registry`).
//!
//! Alrededor: `session` (autofill + cola de wrap-up), `metadata`, `handler`
//! (contrato reader/writer/transport) y `runtime`.
pub mod action;
pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handler;
pub mod hashing;
pub mod input;
pub mod macros;
pub mod metadata;
pub mod registry;
pub mod runtime;
pub mod session;

pub use action::{Action, ActionContext, ActionDeclaration, ActionLogic, BakedAction, InputValues};
pub use cache::{CacheStats, ResultCache};
pub use config::{CacheConfig, FrameworkConfig};
pub use errors::{ActionError, ErrorKind, ErrorPolicy, KindSettings};
pub use handler::{ErrorHook, Handler, JsonWriter, LoggingErrorHook, Reader, Rendered, Transport, WriteOptions, Writer};
pub use input::{Input, InputSpec, InputType, InputValue, ValidationStep};
pub use metadata::Metadata;
pub use registry::{Mask, Registry, RegistryKind};
pub use runtime::Runtime;
pub use session::{Session, TaskQueue};

// Re-export para implementar traits async y para `define_action!`.
pub use async_trait::async_trait;
#[doc(hidden)]
pub use serde_json;
