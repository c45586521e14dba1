//! Configuración del runtime desde variables de entorno.
//! Convención `ACTFLOW_*`; todas opcionales con valores por defecto.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::errors::ErrorPolicy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const ENV_CACHE_MAX_ENTRIES: &str = "ACTFLOW_CACHE_MAX_ENTRIES";
pub const ENV_CACHE_TTL_SECS: &str = "ACTFLOW_CACHE_TTL_SECS";
pub const ENV_UNREGISTERED_SENTINEL: &str = "ACTFLOW_UNREGISTERED_SENTINEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub max_entries: u64,
    /// `None` desactiva la expiración por tiempo.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1000,
               ttl: Some(Duration::from_secs(300)) }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameworkConfig {
    pub cache: CacheConfig,
    pub errors: ErrorPolicy,
    /// Crear una acción no registrada devuelve una acción centinela que falla
    /// con `NotFound` al ejecutarse, en lugar de fallar en la creación.
    pub unregistered_sentinel: bool,
}

impl FrameworkConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = CacheConfig::default();
        let max_entries = lookup(ENV_CACHE_MAX_ENTRIES).and_then(|v| v.trim().parse().ok())
                                                       .unwrap_or(defaults.max_entries);
        let ttl = match lookup(ENV_CACHE_TTL_SECS).and_then(|v| v.trim().parse::<u64>().ok()) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.ttl,
        };
        let unregistered_sentinel =
            lookup(ENV_UNREGISTERED_SENTINEL).map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                                             .unwrap_or(false);
        Self { cache: CacheConfig { max_entries, ttl },
               errors: ErrorPolicy::default(),
               unregistered_sentinel }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
