use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a contact-center agent.
///
/// Serializes to the canonical human-cased wire strings (`"Wrap Up"`,
/// `"Not Ready"`). Parsing accepts any casing and whitespace via `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    Available,
    Active,
    #[serde(rename = "Wrap Up")]
    WrapUp,
    #[serde(rename = "Not Ready")]
    NotReady,
    Offline,
}

impl AgentStatus {
    /// The canonical status set, in dashboard order.
    pub const ALL: [AgentStatus; 5] = [
        AgentStatus::Available,
        AgentStatus::Active,
        AgentStatus::WrapUp,
        AgentStatus::NotReady,
        AgentStatus::Offline,
    ];

    /// Canonical wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Available => "Available",
            AgentStatus::Active => "Active",
            AgentStatus::WrapUp => "Wrap Up",
            AgentStatus::NotReady => "Not Ready",
            AgentStatus::Offline => "Offline",
        }
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = ParseStatusError;

    /// Trims, collapses internal whitespace runs to a single space, then
    /// matches case-insensitively against the canonical set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a status string that matches no canonical status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl std::fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown agent status: {:?}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

/// A contact-center agent tracked by the wallboard.
///
/// `login_time` is present iff the agent is in a logged-in session. It is
/// set by login and cleared only by explicit logout; a plain status update
/// to `Offline` leaves it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub code: String,
    pub name: String,
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_time: Option<DateTime<Utc>>,
}
