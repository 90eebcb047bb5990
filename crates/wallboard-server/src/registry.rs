use chrono::{DateTime, Utc};
use serde::Serialize;

use wallboard_core::agent::{Agent, AgentStatus};

/// Result of a successful status update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub code: String,
    pub old_status: AgentStatus,
    pub new_status: AgentStatus,
}

/// Per-status slice of the dashboard breakdown.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusBucket {
    pub count: usize,
    pub percent: u32,
}

/// One bucket per canonical status, keyed the way the dashboard expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub available: StatusBucket,
    pub active: StatusBucket,
    pub wrap_up: StatusBucket,
    pub not_ready: StatusBucket,
    pub offline: StatusBucket,
}

/// Aggregate dashboard statistics.
///
/// Percentages are rounded per bucket independently and need not sum to
/// exactly 100.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub status_breakdown: StatusBreakdown,
}

/// In-memory agent roster. Insertion order is registration order and is
/// preserved by every operation; agents are never removed.
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Create a registry pre-populated with the given agents.
    pub fn with_seed(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Look up an agent by exact, case-sensitive code.
    pub fn get(&self, code: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.code == code)
    }

    /// All agents in registration order.
    pub fn list(&self) -> &[Agent] {
        &self.agents
    }

    pub fn count(&self) -> usize {
        self.agents.len()
    }

    /// Apply a status change. Returns `None` when no agent has the code.
    ///
    /// Any status may transition to any other. Does not touch `login_time`,
    /// even for a transition to `Offline`; only `logout` clears it.
    pub fn update_status(&mut self, code: &str, status: AgentStatus) -> Option<StatusChange> {
        let agent = self.agents.iter_mut().find(|a| a.code == code)?;
        let old_status = agent.status;
        agent.status = status;
        tracing::info!(code, old = %old_status, new = %status, "agent status changed");
        Some(StatusChange {
            code: agent.code.clone(),
            old_status,
            new_status: status,
        })
    }

    /// Log an agent in, creating the record if the code is unknown.
    ///
    /// A trimmed non-empty `name` overwrites the stored name; otherwise the
    /// stored name is kept (or `"Agent {code}"` generated for a new record).
    /// Status always ends `Available` and `login_time` is set to `at`.
    pub fn login(&mut self, code: &str, name: Option<&str>, at: DateTime<Utc>) -> Agent {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        match self.agents.iter_mut().find(|a| a.code == code) {
            Some(agent) => {
                let old_status = agent.status;
                if let Some(name) = name {
                    agent.name = name.to_string();
                }
                agent.status = AgentStatus::Available;
                agent.login_time = Some(at);
                tracing::info!(code, old = %old_status, new = %AgentStatus::Available, "agent logged in");
                agent.clone()
            },
            None => {
                let agent = Agent {
                    code: code.to_string(),
                    name: name
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Agent {code}")),
                    status: AgentStatus::Available,
                    login_time: Some(at),
                };
                tracing::info!(code, old = "none", new = %AgentStatus::Available, "agent logged in");
                self.agents.push(agent.clone());
                agent
            },
        }
    }

    /// Log an agent out. Returns `None` when no agent has the code.
    ///
    /// Status goes to `Offline` unconditionally and `login_time` is cleared.
    pub fn logout(&mut self, code: &str) -> Option<Agent> {
        let agent = self.agents.iter_mut().find(|a| a.code == code)?;
        let old_status = agent.status;
        agent.status = AgentStatus::Offline;
        agent.login_time = None;
        tracing::info!(code, old = %old_status, new = %AgentStatus::Offline, "agent logged out");
        Some(agent.clone())
    }

    /// Aggregate counts and percentages per canonical status.
    pub fn dashboard_stats(&self) -> DashboardStats {
        let total = self.agents.len();
        let bucket = |status: AgentStatus| {
            let count = self.agents.iter().filter(|a| a.status == status).count();
            let percent = if total == 0 {
                0
            } else {
                (count as f64 * 100.0 / total as f64).round() as u32
            };
            StatusBucket { count, percent }
        };
        DashboardStats {
            total,
            status_breakdown: StatusBreakdown {
                available: bucket(AgentStatus::Available),
                active: bucket(AgentStatus::Active),
                wrap_up: bucket(AgentStatus::WrapUp),
                not_ready: bucket(AgentStatus::NotReady),
                offline: bucket(AgentStatus::Offline),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_agent(code: &str, status: AgentStatus) -> Agent {
        Agent {
            code: code.to_string(),
            name: format!("Agent {code}"),
            status,
            login_time: None,
        }
    }

    fn login_at() -> DateTime<Utc> {
        "2026-01-01T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn seed_and_retrieve() {
        let registry = AgentRegistry::with_seed(vec![
            make_agent("A001", AgentStatus::Available),
            make_agent("A002", AgentStatus::NotReady),
        ]);
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get("A002").unwrap().status, AgentStatus::NotReady);
        assert!(registry.get("A999").is_none());
        // Lookup is case-sensitive
        assert!(registry.get("a001").is_none());
    }

    #[test]
    fn list_preserves_registration_order() {
        let mut registry = AgentRegistry::with_seed(vec![
            make_agent("A001", AgentStatus::Available),
            make_agent("A002", AgentStatus::NotReady),
        ]);
        registry.login("A003", Some("Newest"), login_at());
        let codes: Vec<&str> = registry.list().iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["A001", "A002", "A003"]);
        assert_eq!(registry.count(), registry.list().len());
    }

    #[test]
    fn update_status_records_old_and_new() {
        let mut registry = AgentRegistry::with_seed(vec![make_agent("A001", AgentStatus::Available)]);
        let change = registry.update_status("A001", AgentStatus::WrapUp).unwrap();
        assert_eq!(change.code, "A001");
        assert_eq!(change.old_status, AgentStatus::Available);
        assert_eq!(change.new_status, AgentStatus::WrapUp);
        assert_eq!(registry.get("A001").unwrap().status, AgentStatus::WrapUp);
    }

    #[test]
    fn update_status_unknown_code() {
        let mut registry = AgentRegistry::new();
        assert!(registry.update_status("A404", AgentStatus::Active).is_none());
    }

    #[test]
    fn update_status_to_offline_keeps_login_time() {
        let mut registry = AgentRegistry::new();
        registry.login("A001", Some("John Doe"), login_at());
        registry.update_status("A001", AgentStatus::Offline).unwrap();
        let agent = registry.get("A001").unwrap();
        assert_eq!(agent.status, AgentStatus::Offline);
        assert!(agent.login_time.is_some());
    }

    #[test]
    fn login_creates_unknown_agent() {
        let mut registry = AgentRegistry::new();
        let agent = registry.login("A099", Some("New Guy"), login_at());
        assert_eq!(agent.code, "A099");
        assert_eq!(agent.name, "New Guy");
        assert_eq!(agent.status, AgentStatus::Available);
        assert_eq!(agent.login_time, Some(login_at()));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn login_generates_default_name() {
        let mut registry = AgentRegistry::new();
        let agent = registry.login("A050", None, login_at());
        assert_eq!(agent.name, "Agent A050");
        // Whitespace-only names fall back to the default too
        let agent = registry.login("A051", Some("   "), login_at());
        assert_eq!(agent.name, "Agent A051");
    }

    #[test]
    fn login_existing_resets_status_and_keeps_name() {
        let mut registry = AgentRegistry::with_seed(vec![make_agent("A001", AgentStatus::WrapUp)]);
        let agent = registry.login("A001", None, login_at());
        assert_eq!(agent.status, AgentStatus::Available);
        assert_eq!(agent.name, "Agent A001");
        assert_eq!(agent.login_time, Some(login_at()));
    }

    #[test]
    fn login_existing_overwrites_name_when_supplied() {
        let mut registry = AgentRegistry::with_seed(vec![make_agent("A001", AgentStatus::Offline)]);
        let agent = registry.login("A001", Some("  Johnny  "), login_at());
        assert_eq!(agent.name, "Johnny");
    }

    #[test]
    fn repeat_login_refreshes_login_time() {
        let mut registry = AgentRegistry::new();
        registry.login("A001", None, login_at());
        let later: DateTime<Utc> = "2026-01-01T17:00:00Z".parse().unwrap();
        let agent = registry.login("A001", None, later);
        assert_eq!(agent.login_time, Some(later));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn logout_clears_login_time() {
        let mut registry = AgentRegistry::new();
        registry.login("A001", Some("John Doe"), login_at());
        let agent = registry.logout("A001").unwrap();
        assert_eq!(agent.status, AgentStatus::Offline);
        assert!(agent.login_time.is_none());
    }

    #[test]
    fn logout_when_already_offline() {
        let mut registry = AgentRegistry::with_seed(vec![make_agent("A001", AgentStatus::Offline)]);
        let agent = registry.logout("A001").unwrap();
        assert_eq!(agent.status, AgentStatus::Offline);
        assert!(agent.login_time.is_none());
    }

    #[test]
    fn logout_unknown_code() {
        let mut registry = AgentRegistry::new();
        assert!(registry.logout("A404").is_none());
    }

    #[test]
    fn stats_on_empty_registry() {
        let registry = AgentRegistry::new();
        let stats = registry.dashboard_stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.status_breakdown.available.count, 0);
        assert_eq!(stats.status_breakdown.available.percent, 0);
        assert_eq!(stats.status_breakdown.offline.percent, 0);
    }

    #[test]
    fn stats_percentages_round_independently() {
        let registry = AgentRegistry::with_seed(vec![
            make_agent("A001", AgentStatus::Available),
            make_agent("A002", AgentStatus::NotReady),
            make_agent("A003", AgentStatus::Active),
        ]);
        let stats = registry.dashboard_stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.status_breakdown.available.count, 1);
        assert_eq!(stats.status_breakdown.available.percent, 33);
        assert_eq!(stats.status_breakdown.not_ready.percent, 33);
        assert_eq!(stats.status_breakdown.active.percent, 33);
        assert_eq!(stats.status_breakdown.wrap_up.count, 0);
        assert_eq!(stats.status_breakdown.wrap_up.percent, 0);
        assert_eq!(stats.status_breakdown.offline.percent, 0);
    }

    #[test]
    fn stats_round_half_up() {
        // 1 of 8 = 12.5% → 13 under round-half-up
        let mut agents: Vec<Agent> = (0..7)
            .map(|i| make_agent(&format!("A00{i}"), AgentStatus::Offline))
            .collect();
        agents.push(make_agent("A100", AgentStatus::Available));
        let registry = AgentRegistry::with_seed(agents);
        let stats = registry.dashboard_stats();
        assert_eq!(stats.status_breakdown.available.percent, 13);
        assert_eq!(stats.status_breakdown.offline.percent, 88);
    }

    #[test]
    fn breakdown_serializes_with_camel_case_keys() {
        let registry = AgentRegistry::with_seed(vec![make_agent("A001", AgentStatus::WrapUp)]);
        let json = serde_json::to_value(registry.dashboard_stats()).unwrap();
        assert_eq!(json["statusBreakdown"]["wrapUp"]["count"], 1);
        assert_eq!(json["statusBreakdown"]["wrapUp"]["percent"], 100);
        assert_eq!(json["statusBreakdown"]["notReady"]["count"], 0);
    }
}
