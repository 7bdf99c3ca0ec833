use crate::config::AppConfig;
use crate::session::{gate_from_config, SessionGate};
use crate::store::SchoolStore;
use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SchoolStore>,
    pub sessions: Arc<dyn SessionGate>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(store: SchoolStore, sessions: Arc<dyn SessionGate>, registry: Registry) -> Self {
        Self {
            store: Arc::new(store),
            sessions,
            started_at: Instant::now(),
            registry,
        }
    }

    pub fn from_config(config: &AppConfig, registry: Registry) -> Self {
        Self::new(SchoolStore::new(), gate_from_config(config), registry)
    }
}
