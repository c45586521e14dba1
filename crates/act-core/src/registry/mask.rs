//! Máscaras glob segmentadas por puntos (`a.b.*`, `*`, `a.b`).
//!
//! Sólo el último segmento puede ser `*`. Un comodín final coincide con uno o
//! más segmentos restantes; la máscara `*` sola coincide con cualquier nombre,
//! incluido el vacío (scope por defecto).

use std::fmt;

use crate::errors::ActionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    raw: String,
    literals: Vec<String>,
    wildcard: bool,
}

impl Mask {
    pub fn parse(raw: &str) -> Result<Self, ActionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ActionError::Syntax("empty mask".into()));
        }
        let segments: Vec<&str> = raw.split('.').collect();
        let last = segments.len() - 1;
        let mut literals = Vec::with_capacity(segments.len());
        let mut wildcard = false;
        for (i, seg) in segments.iter().enumerate() {
            if *seg == "*" && i == last {
                wildcard = true;
            } else if seg.is_empty() || seg.contains('*') {
                return Err(ActionError::Syntax(format!("invalid mask '{raw}'")));
            } else {
                literals.push((*seg).to_string());
            }
        }
        Ok(Self { raw: raw.to_string(),
                  literals,
                  wildcard })
    }

    /// Máscara comodín `*`.
    pub fn catch_all() -> Self {
        Self { raw: "*".into(),
               literals: vec![],
               wildcard: true }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_catch_all(&self) -> bool {
        self.wildcard && self.literals.is_empty()
    }

    /// Número de segmentos literales iniciales; mayor = más específica.
    pub fn specificity(&self) -> usize {
        self.literals.len()
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.is_catch_all() {
            return true;
        }
        if name.is_empty() {
            return false;
        }
        let segments: Vec<&str> = name.split('.').collect();
        if self.wildcard {
            if segments.len() <= self.literals.len() {
                return false;
            }
        } else if segments.len() != self.literals.len() {
            return false;
        }
        self.literals.iter().zip(segments.iter()).all(|(l, s)| l == s)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_wildcard_needs_at_least_one_segment() {
        let m = Mask::parse("a.b.*").expect("mask");
        assert!(m.matches("a.b.c"));
        assert!(m.matches("a.b.c.d"));
        assert!(!m.matches("a.b"));
        assert!(!m.matches("a.x.c"));
        assert_eq!(m.specificity(), 2);
    }

    #[test]
    fn catch_all_matches_everything_including_empty_scope() {
        let m = Mask::parse("*").expect("mask");
        assert!(m.is_catch_all());
        assert!(m.matches(""));
        assert!(m.matches("x.y"));
    }

    #[test]
    fn exact_mask_matches_only_itself() {
        let m = Mask::parse("cli").expect("mask");
        assert!(m.matches("cli"));
        assert!(!m.matches("cli.run"));
    }

    #[test]
    fn wildcard_in_the_middle_is_a_syntax_error() {
        assert!(matches!(Mask::parse("a.*.c"), Err(ActionError::Syntax(_))));
        assert!(matches!(Mask::parse("a..c"), Err(ActionError::Syntax(_))));
        assert!(matches!(Mask::parse(""), Err(ActionError::Syntax(_))));
    }
}
