use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::registry::AgentRegistry;

pub type SharedAgentRegistry = Arc<RwLock<AgentRegistry>>;

#[derive(Clone)]
pub struct AppState {
    pub registry: SharedAgentRegistry,
    #[allow(dead_code)]
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let registry = AgentRegistry::with_seed(config.seed_agents());
        Self {
            registry: Arc::new(RwLock::new(registry)),
            config: Arc::new(config),
        }
    }
}
