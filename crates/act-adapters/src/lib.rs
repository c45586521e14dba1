//! act-adapters: transportes concretos sobre el contrato `Handler` de
//! act-core.
//!
//! - `direct`: invocación en proceso con inputs JSON.
//! - `cli`: argumentos `--nombre valor` y salida JSON por stdout/stderr.

pub mod cli;
pub mod direct;

pub use cli::{CliArgs, CliSink, CliTransport, CLI};
pub use direct::{DirectOutcome, DirectState, DIRECT};
