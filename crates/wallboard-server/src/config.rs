use serde::Deserialize;

use wallboard_core::agent::{Agent, AgentStatus};

/// Top-level server configuration, loaded from `wallboard.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Agents registered at startup, in roster order.
    pub seed: Vec<SeedAgent>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3001".to_string(),
            seed: default_seed(),
        }
    }
}

/// One pre-registered agent from a `[[seed]]` config section.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAgent {
    pub code: String,
    pub name: String,
    #[serde(default = "default_seed_status")]
    pub status: AgentStatus,
}

fn default_seed_status() -> AgentStatus {
    AgentStatus::Offline
}

fn default_seed() -> Vec<SeedAgent> {
    vec![
        SeedAgent {
            code: "A001".to_string(),
            name: "John Doe".to_string(),
            status: AgentStatus::Available,
        },
        SeedAgent {
            code: "A002".to_string(),
            name: "Jane Roe".to_string(),
            status: AgentStatus::NotReady,
        },
        SeedAgent {
            code: "A003".to_string(),
            name: "Alex Kim".to_string(),
            status: AgentStatus::Active,
        },
    ]
}

impl ServerConfig {
    /// Validate configuration, exiting on fatal problems.
    pub fn validate(&self) {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            tracing::error!(
                addr = %self.listen_addr,
                "listen_addr is not a valid socket address"
            );
            std::process::exit(1);
        }

        if self.seed.iter().any(|s| s.code.trim().is_empty()) {
            tracing::error!("seed agent has an empty code");
            std::process::exit(1);
        }

        if let Some(code) = self.duplicate_seed_code() {
            tracing::error!(code, "duplicate seed agent code");
            std::process::exit(1);
        }
    }

    /// First seed code that appears more than once, if any.
    fn duplicate_seed_code(&self) -> Option<&str> {
        self.seed.iter().enumerate().find_map(|(i, seed)| {
            self.seed[..i]
                .iter()
                .any(|s| s.code == seed.code)
                .then_some(seed.code.as_str())
        })
    }

    /// Load config from `wallboard.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("wallboard.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from wallboard.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse wallboard.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No wallboard.toml found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("WALLBOARD_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }

        config
    }

    /// The seed roster as registry agents. Seeded agents are not logged in.
    pub fn seed_agents(&self) -> Vec<Agent> {
        self.seed
            .iter()
            .map(|s| Agent {
                code: s.code.clone(),
                name: s.name.clone(),
                status: s.status,
                login_time: None,
            })
            .collect()
    }
}
