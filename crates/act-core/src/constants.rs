//! Constantes del framework.
//!
//! Agrupa valores estáticos que participan en el cálculo de fingerprints y en
//! la resolución de registros. Cambiar `FINGERPRINT_VERSION` invalida todos
//! los resultados cacheados aunque las acciones y sus inputs no cambien.

/// Versión lógica del esquema de fingerprint. Se incluye en
/// `ActionFingerprintInput`.
pub const FINGERPRINT_VERSION: &str = "A1.0";

/// Máscara comodín por defecto (coincide con cualquier nombre).
pub const DEFAULT_MASK: &str = "*";

/// Raíz del árbol de metadata donde viven las opciones por transporte.
pub const HANDLER_METADATA_ROOT: &str = "handler";

/// Etiqueta usada por los writers cuando la acción no define `resultLabel`.
pub const DEFAULT_RESULT_LABEL: &str = "data";

/// Clave del caché interno de un Input donde `filePath` memoriza el stat.
pub const STAT_CACHE_KEY: &str = "stat";
