//! Caché de resultados de acciones, compartido por todo el runtime.
//!
//! Clave = `id()` de la acción (fingerprint). Capacidad acotada con
//! desalojo LRU (todo resultado nuevo se admite) y expiración opcional por
//! TTL. No hay single-flight:
//! dos ejecuciones concurrentes idénticas pueden ejecutar `perform` ambas.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use serde_json::Value;

use crate::config::CacheConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub max_entries: u64,
}

pub struct ResultCache {
    cache: Cache<String, Value>,
    hits: AtomicU64,
    misses: AtomicU64,
    config: CacheConfig,
}

impl ResultCache {
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_entries)
                                           .eviction_policy(EvictionPolicy::lru());
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self { cache: builder.build(),
               hits: AtomicU64::new(0),
               misses: AtomicU64::new(0),
               config: config.clone() }
    }

    pub async fn get(&self, id: &str) -> Option<Value> {
        match self.cache.get(id).await {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("cache:hit id={id}");
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("cache:miss id={id}");
                None
            }
        }
    }

    pub async fn insert(&self, id: String, value: Value) {
        self.cache.insert(id, value).await;
    }

    pub async fn invalidate(&self, id: &str) {
        self.cache.invalidate(id).await;
    }

    /// Vacía el caché y reinicia contadores.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub async fn stats(&self) -> CacheStats {
        // entry_count es aproximado hasta procesar tareas pendientes
        self.cache.run_pending_tasks().await;
        CacheStats { hits: self.hits.load(Ordering::Relaxed),
                     misses: self.misses.load(Ordering::Relaxed),
                     entries: self.cache.entry_count(),
                     max_entries: self.config.max_entries }
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").field("config", &self.config).finish()
    }
}
