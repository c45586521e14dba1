//! Pipeline de validación de un Input.
//!
//! Orden fijo: requerido/vacío → forma (vector/escalar) → chequeos del tipo
//! (por elemento en vectores, saltando nulos) → paso de validación extra.
//! El primer fallo corta el pipeline.

use log::debug;

use super::{Input, InputValue};
use crate::errors::{codes, ActionError};

/// Paso de validación adicional adjunto a un Input al crearlo.
pub trait ValidationStep: Send + Sync {
    fn check(&self, input: &Input) -> Result<(), ActionError>;
}

impl<F> ValidationStep for F where F: Fn(&Input) -> Result<(), ActionError> + Send + Sync
{
    fn check(&self, input: &Input) -> Result<(), ActionError> {
        self(input)
    }
}

/// Atajo para construir un `ValidationFail` desde un Input.
pub fn fail(input: &Input, code: &str, message: impl Into<String>) -> ActionError {
    ActionError::validation(input.name(), code, message)
}

pub(crate) async fn run(input: &Input) -> Result<(), ActionError> {
    let value = input.value();
    if value.is_empty() {
        if input.is_required() {
            return Err(fail(input, codes::REQUIRED, "input is required"));
        }
        debug!("validate:skip-empty input={}", input.name());
        return Ok(());
    }

    match (input.is_vector(), value) {
        (true, InputValue::List(items)) => {
            for item in items.iter().filter(|v| !v.is_null()) {
                input.input_type().validate_scalar(input, item).await?;
            }
        }
        (true, other) => {
            return Err(fail(input, codes::VECTOR_EXPECTED, format!("expected a list, got {}", other.label())));
        }
        (false, InputValue::List(_)) => {
            return Err(fail(input, codes::SCALAR_EXPECTED, "expected a single value, got a list"));
        }
        (false, scalar) => input.input_type().validate_scalar(input, scalar).await?,
    }

    if let Some(step) = input.extra_validation() {
        step.check(input)?;
    }
    Ok(())
}
