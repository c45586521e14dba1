//! Gramática compacta de declaración de inputs: `"[_]name[?]: type[[]]"`.
//!
//! - `_` inicial: input oculto (no participa del fingerprint por defecto).
//! - `?` tras el nombre: input opcional.
//! - `[]` final: input vector.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ActionError;

static SPEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(_)?([A-Za-z0-9_]+)(\?)?:\s*([A-Za-z0-9_.]+)(\[\])?$").expect("static input grammar")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    pub type_name: String,
    pub required: bool,
    pub vector: bool,
    pub hidden: bool,
}

impl InputSpec {
    pub fn parse(spec: &str) -> Result<Self, ActionError> {
        let caps = SPEC_RE.captures(spec.trim())
                          .ok_or_else(|| ActionError::Syntax(format!("invalid input declaration '{spec}'")))?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
        Ok(Self { hidden: caps.get(1).is_some(),
                  name: group(2).to_string(),
                  required: caps.get(3).is_none(),
                  type_name: group(4).to_string(),
                  vector: caps.get(5).is_some() })
    }
}
