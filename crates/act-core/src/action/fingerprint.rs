use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::ActionError;
use crate::hashing::hash_value;

/// Insumos del fingerprint de una invocación.
/// NO es el fingerprint final (string hash) sino el modelo previo a canonicalizar.
#[derive(Serialize)]
pub struct ActionFingerprintInput<'a> {
    pub version: &'a str,
    pub action: &'a str,
    pub inputs: &'a BTreeMap<String, Value>, // ordenados por nombre
}

impl ActionFingerprintInput<'_> {
    pub fn hash(&self) -> Result<String, ActionError> {
        Ok(hash_value(&serde_json::to_value(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_order_does_not_matter() {
        let mut a = BTreeMap::new();
        a.insert("x".to_string(), json!("1"));
        a.insert("y".to_string(), json!("2"));
        let mut b = BTreeMap::new();
        b.insert("y".to_string(), json!("2"));
        b.insert("x".to_string(), json!("1"));
        let fa = ActionFingerprintInput { version: "v", action: "sum", inputs: &a }.hash().expect("hash");
        let fb = ActionFingerprintInput { version: "v", action: "sum", inputs: &b }.hash().expect("hash");
        assert_eq!(fa, fb);

        let other = ActionFingerprintInput { version: "v", action: "product", inputs: &a }.hash().expect("hash");
        assert_ne!(fa, other);
    }
}
