//! actflow: fachada del workspace.
//!
//! Re-exporta `act-core` completo y los transportes de `act-adapters`, y
//! ofrece `bootstrap` para armar un runtime con ambos transportes listos.
//!
//! ```ignore
//! let rt = actflow::bootstrap(actflow::FrameworkConfig::from_env())?;
//! rt.register_action(std::sync::Arc::new(Multiply::new()), None, None)?;
//! let out = actflow::direct::call(&rt, "multiply", json!({"a": 2, "b": 5}), None).await?;
//! ```

use std::sync::Arc;

pub use act_adapters::{cli, direct, CliArgs, CliSink, DirectOutcome, DirectState, CLI, DIRECT};
pub use act_core::*;

/// Runtime con los tipos built-in y los transportes `direct` y `cli`
/// (salida estándar) registrados con la máscara por defecto.
pub fn bootstrap(config: FrameworkConfig) -> Result<Arc<Runtime>, ActionError> {
    let runtime = Arc::new(Runtime::with_builtins(config));
    direct::register(&runtime, None)?;
    cli::register(&runtime, None, CliSink::Std)?;
    log::debug!("bootstrap:done transports=2");
    Ok(runtime)
}
