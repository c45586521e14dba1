//! Transporte `cli`: argumentos de línea de comandos → inputs, JSON → stdout.
//!
//! Formas aceptadas: `--name=value`, `--name value` y `--flag` (equivale a
//! `true`). Los guiones del nombre se leen como `_`. Un input vector acepta
//! la opción repetida (`--tag a --tag b`) o su forma JSON (`--tag '["a","b"]'`).
//! Cada valor pasa por `Input::parse_value`, así que el formato es el de la
//! forma string del tipo.

use std::io::Write;
use std::sync::{Arc, Mutex};

use act_core::{async_trait, Action, ActionError, Handler, InputValue, JsonWriter, LoggingErrorHook, Reader, Rendered,
               Runtime, Transport};
use indexmap::IndexMap;
use log::debug;

pub const CLI: &str = "cli";

/// Argumentos crudos de la invocación (sin el nombre de la acción).
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub args: Vec<String>,
}

impl CliArgs {
    pub fn new<I, S>(args: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { args: args.into_iter().map(Into::into).collect() }
    }

    /// Opciones agrupadas por nombre normalizado, en orden de aparición.
    pub fn options(&self) -> IndexMap<String, Vec<String>> {
        let mut out: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut i = 0;
        while i < self.args.len() {
            let arg = &self.args[i];
            match arg.strip_prefix("--") {
                Some(flag) => {
                    let (name, value) = match flag.split_once('=') {
                        Some((name, value)) => (name, value.to_string()),
                        None => match self.args.get(i + 1).filter(|next| !next.starts_with("--")) {
                            Some(next) => {
                                i += 1;
                                (flag, next.clone())
                            }
                            None => (flag, "true".to_string()),
                        },
                    };
                    out.entry(name.replace('-', "_")).or_default().push(value);
                }
                None => debug!("cli:ignore-positional arg={arg}"),
            }
            i += 1;
        }
        out
    }
}

/// Separa `[accion, args...]`.
pub fn split_command<I, S>(args: I) -> Option<(String, CliArgs)>
    where I: IntoIterator<Item = S>,
          S: Into<String>
{
    let mut args = args.into_iter().map(Into::into);
    let action = args.next()?;
    Some((action, CliArgs::new(args)))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CliReader;

#[async_trait]
impl Reader for CliReader {
    async fn input_values(&self, handler: &Handler, action: &Action) -> Result<IndexMap<String, InputValue>, ActionError> {
        let args = handler.state::<CliArgs>()
                          .ok_or_else(|| ActionError::Internal("cli handler without CliArgs".into()))?;
        let mut options = args.options();
        let mut values = IndexMap::new();
        for (name, input) in action.inputs() {
            let Some(raw) = options.shift_remove(name) else {
                continue;
            };
            let value = if !input.is_vector() {
                // la última aparición gana
                let last = raw.last().map(String::as_str).unwrap_or_default();
                input.parse_value(last)?
            } else if raw.len() == 1 && raw[0].trim_start().starts_with('[') {
                input.parse_value(&raw[0])?
            } else {
                input.parse_value(&serde_json::to_string(&raw)?)?
            };
            values.insert(name.clone(), value);
        }
        for name in options.keys() {
            debug!("cli:unknown-option action={} option={name}", action.name());
        }
        Ok(values)
    }
}

/// Destino de la salida del transporte.
#[derive(Debug, Clone, Default)]
pub enum CliSink {
    /// stdout para resultados, stderr para errores.
    #[default]
    Std,
    /// Memoria (tests): `(is_error, texto)`.
    Memory(Arc<Mutex<Vec<(bool, String)>>>),
}

#[derive(Debug, Clone, Default)]
pub struct CliTransport {
    sink: CliSink,
}

impl CliTransport {
    pub fn new(sink: CliSink) -> Self {
        Self { sink }
    }

    fn format(rendered: &Rendered) -> Result<String, ActionError> {
        match &rendered.body {
            Some(body) => Ok(serde_json::to_string_pretty(body)?),
            None => Ok(format!("status: {}", rendered.status)),
        }
    }
}

#[async_trait]
impl Transport for CliTransport {
    async fn emit(&self, _handler: &Handler, rendered: &Rendered) -> Result<(), ActionError> {
        let text = Self::format(rendered)?;
        match &self.sink {
            CliSink::Std => {
                let written = if rendered.is_error {
                    writeln!(std::io::stderr().lock(), "{text}")
                } else {
                    writeln!(std::io::stdout().lock(), "{text}")
                };
                written.map_err(|e| ActionError::Internal(format!("cli emit: {e}")))
            }
            CliSink::Memory(lines) => {
                let mut lines = lines.lock()
                                     .map_err(|_| ActionError::Internal("cli sink poisoned".into()))?;
                lines.push((rendered.is_error, text));
                Ok(())
            }
        }
    }
}

/// Código de salida del proceso para una respuesta renderizada.
pub fn exit_code(rendered: Option<&Rendered>) -> i32 {
    match rendered {
        None => 5,
        Some(r) if !r.is_error => 0,
        Some(r) => match r.status {
            400 => 2,
            404 => 3,
            409 => 4,
            204 => 0,
            _ => 5,
        },
    }
}

/// Registra reader, writer, transporte y error hook de `cli`.
pub fn register(runtime: &Runtime, mask: Option<&str>, sink: CliSink) -> Result<(), ActionError> {
    runtime.register_reader(CLI, mask, Arc::new(CliReader))?;
    runtime.register_writer(CLI, mask, Arc::new(JsonWriter))?;
    runtime.register_transport(CLI, mask, Arc::new(CliTransport::new(sink)))?;
    runtime.register_error_hook(CLI, mask, Arc::new(LoggingErrorHook))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_forms() {
        let args = CliArgs::new(["--a=2", "--b", "5", "--dry-run", "stray", "--tag", "x", "--tag=y"]);
        let opts = args.options();
        assert_eq!(opts["a"], vec!["2"]);
        assert_eq!(opts["b"], vec!["5"]);
        assert_eq!(opts["dry_run"], vec!["true"]);
        assert_eq!(opts["tag"], vec!["x", "y"]);
        assert!(!opts.contains_key("stray"));
    }

    #[test]
    fn flag_followed_by_option_is_boolean() {
        let opts = CliArgs::new(["--verbose", "--n", "1"]).options();
        assert_eq!(opts["verbose"], vec!["true"]);
        assert_eq!(opts["n"], vec!["1"]);
    }

    #[test]
    fn split_takes_first_word_as_action() {
        let (action, rest) = split_command(["multiply", "--a", "2"]).expect("command");
        assert_eq!(action, "multiply");
        assert_eq!(rest.args, vec!["--a", "2"]);
        assert!(split_command(Vec::<String>::new()).is_none());
    }

    #[test]
    fn exit_codes_follow_status() {
        let ok = Rendered { status: 200,
                            headers_only: false,
                            body: None,
                            is_error: false };
        let invalid = Rendered { status: 400,
                                 is_error: true,
                                 ..ok.clone() };
        assert_eq!(exit_code(Some(&ok)), 0);
        assert_eq!(exit_code(Some(&invalid)), 2);
        assert_eq!(exit_code(None), 5);
    }
}
