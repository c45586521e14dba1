//! Registro genérico nombre → implementación con resolución por máscaras.
//!
//! Se usa idéntico para acciones, tipos de input, transportes (handlers),
//! readers, writers y error hooks. Por cada nombre base guarda una lista de
//! `(máscara, implementación)` ordenada por especificidad (más segmentos
//! literales primero) y, a igual especificidad, por recencia (la última
//! registrada gana). La resolución recorre la lista linealmente y devuelve la
//! primera máscara que coincide con el scope pedido.

pub mod mask;

pub use mask::Mask;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ActionError;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("static name regex"));

/// Tipo de registro (sólo afecta a mensajes de error y logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Action,
    InputType,
    Handler,
    Reader,
    Writer,
    ErrorHook,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        RegistryKind::Action => "action",
                        RegistryKind::InputType => "input type",
                        RegistryKind::Handler => "handler",
                        RegistryKind::Reader => "reader",
                        RegistryKind::Writer => "writer",
                        RegistryKind::ErrorHook => "error hook",
                    })
    }
}

/// Valida un nombre de registro contra `^[A-Za-z0-9_.\-]+$`.
pub fn validate_name(kind: RegistryKind, name: &str) -> Result<(), ActionError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ActionError::IllegalName { kind,
                                       name: name.to_string() })
    }
}

#[derive(Debug, Clone)]
struct MaskEntry<T> {
    mask: Mask,
    item: T,
    seq: u64,
}

pub struct Registry<T: Clone> {
    kind: RegistryKind,
    entries: DashMap<String, Vec<MaskEntry<T>>>,
    clock: AtomicU64,
}

impl<T: Clone> Registry<T> {
    pub fn new(kind: RegistryKind) -> Self {
        Self { kind,
               entries: DashMap::new(),
               clock: AtomicU64::new(0) }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Registra `item` bajo `name` + `mask`. Un par `(name, mask)` repetido
    /// sobreescribe la entrada anterior (y la vuelve la más reciente).
    pub fn register(&self, name: &str, mask: &str, item: T) -> Result<(), ActionError> {
        validate_name(self.kind, name)?;
        let mask = Mask::parse(mask)?;
        let seq = self.clock.fetch_add(1, Ordering::SeqCst);
        let mut list = self.entries.entry(name.to_string()).or_default();
        if let Some(existing) = list.iter_mut().find(|e| e.mask == mask) {
            existing.item = item;
            existing.seq = seq;
            debug!("registry:overwrite kind={} name={name} mask={mask}", self.kind);
        } else {
            debug!("registry:add kind={} name={name} mask={mask}", self.kind);
            list.push(MaskEntry { mask, item, seq });
        }
        list.sort_by(|a, b| {
                b.mask
                 .specificity()
                 .cmp(&a.mask.specificity())
                 .then_with(|| b.seq.cmp(&a.seq))
            });
        Ok(())
    }

    /// Devuelve la implementación cuya máscara más específica coincide con
    /// `scope`. Un `name` sin registros (o sin máscara aplicable) falla con
    /// `NotRegistered`.
    pub fn resolve(&self, name: &str, scope: &str) -> Result<T, ActionError> {
        let not_registered = || ActionError::NotRegistered { kind: self.kind,
                                                             name: name.to_string() };
        let list = self.entries.get(name).ok_or_else(not_registered)?;
        match list.iter().find(|e| e.mask.matches(scope)) {
            Some(entry) => Ok(entry.item.clone()),
            None => {
                debug!("registry:no-match kind={} name={name} scope={scope}", self.kind);
                Err(not_registered())
            }
        }
    }

    /// Como `resolve` pero sin error: `None` si no hay coincidencia.
    pub fn find(&self, name: &str, scope: &str) -> Option<T> {
        self.resolve(name, scope).ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Máscaras registradas para `name`, en orden de resolución.
    pub fn masks(&self, name: &str) -> Vec<String> {
        self.entries
            .get(name)
            .map(|list| list.iter().map(|e| e.mask.to_string()).collect())
            .unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Total de pares `(name, mask)` registrados.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<T: Clone> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
         .field("kind", &self.kind)
         .field("names", &self.names())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_mask_wins_regardless_of_order() {
        let orders: [[(&str, &str); 3]; 3] = [[("*", "root"), ("a.b.*", "ab"), ("a.b.c.*", "abc")],
                                              [("a.b.c.*", "abc"), ("*", "root"), ("a.b.*", "ab")],
                                              [("a.b.*", "ab"), ("a.b.c.*", "abc"), ("*", "root")]];
        for order in orders {
            let reg: Registry<&str> = Registry::new(RegistryKind::Reader);
            for (mask, item) in order {
                reg.register("web", mask, item).expect("register");
            }
            assert_eq!(reg.resolve("web", "a.b.c.d").expect("resolve"), "abc");
            assert_eq!(reg.resolve("web", "a.b.d").expect("resolve"), "ab");
            assert_eq!(reg.resolve("web", "a.d").expect("resolve"), "root");
        }
    }

    #[test]
    fn same_name_and_mask_overwrites() {
        let reg: Registry<u32> = Registry::new(RegistryKind::Action);
        reg.register("foo", "*", 1).expect("register");
        reg.register("foo", "*", 2).expect("register");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve("foo", "").expect("resolve"), 2);
    }

    #[test]
    fn equal_specificity_prefers_most_recent() {
        let reg: Registry<u32> = Registry::new(RegistryKind::Writer);
        reg.register("cli", "x.*", 1).expect("register");
        reg.register("cli", "y.*", 2).expect("register");
        reg.register("cli", "x.*", 3).expect("register");
        assert_eq!(reg.masks("cli"), vec!["x.*".to_string(), "y.*".to_string()]);
        assert_eq!(reg.resolve("cli", "x.a").expect("resolve"), 3);
    }

    #[test]
    fn illegal_and_unknown_names_fail_distinctly() {
        let reg: Registry<u32> = Registry::new(RegistryKind::InputType);
        let err = reg.register("no spaces", "*", 1).unwrap_err();
        assert_eq!(err.to_string(), "Illegal input type name: no spaces");

        let err = reg.resolve("missing", "").unwrap_err();
        assert!(matches!(err, ActionError::NotRegistered { kind: RegistryKind::InputType, .. }));
    }

    #[test]
    fn no_matching_mask_is_not_registered() {
        let reg: Registry<u32> = Registry::new(RegistryKind::Reader);
        reg.register("web", "admin.*", 1).expect("register");
        assert!(matches!(reg.resolve("web", "public.page"), Err(ActionError::NotRegistered { .. })));
        assert!(reg.find("web", "admin.users").is_some());
    }
}
