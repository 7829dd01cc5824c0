//! Incident model and request payloads

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::Analysis;

/// Timestamp format used everywhere in the persisted file and the action log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time, formatted for persistence.
pub fn now_stamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Exact-match parse; anything else is rejected so callers can coerce
    /// invalid input to the default instead of failing the request.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            "Critical" => Some(Priority::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    pub fn is_high_or_critical(&self) -> bool {
        matches!(self, Priority::High | Priority::Critical)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: Uuid,
    pub description: String,
    pub priority: Priority,
    pub resolved: bool,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub created_at: String,
    pub resolved_at: Option<String>,
    /// Present only when AI-assisted creation or re-analysis was requested.
    /// Serialized as an explicit `null` otherwise, matching the file layout.
    pub ai_analysis: Option<Analysis>,
}

impl Incident {
    pub fn new(description: String, priority: Priority, ai_analysis: Option<Analysis>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            priority,
            resolved: false,
            created_at: now_stamp(),
            resolved_at: None,
            ai_analysis,
        }
    }
}

/// Body of `POST /incidents/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /incidents`
#[derive(Debug, Deserialize)]
pub struct CreateIncidentRequest {
    #[serde(default)]
    pub description: String,
    /// Raw priority text; invalid or empty values coerce to Medium.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub use_ai: bool,
}

impl CreateIncidentRequest {
    /// Whether the caller explicitly supplied a priority (empty counts as no).
    pub fn has_explicit_priority(&self) -> bool {
        self.priority.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Body of `PUT /incidents/{id}`
#[derive(Debug, Deserialize)]
pub struct UpdateIncidentRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub reanalyze: bool,
}

/// Accepts a JSON bool or the form-data strings "true"/"1"/"yes"
/// (case-insensitive); anything else is false.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::Text(s) => matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parse_is_exact() {
        assert_eq!(Priority::parse("Critical"), Some(Priority::Critical));
        assert_eq!(Priority::parse("critical"), None);
        assert_eq!(Priority::parse("Urgent"), None);
        assert_eq!(Priority::parse(""), None);
    }

    #[test]
    fn use_ai_accepts_bool_and_form_strings() {
        let req: CreateIncidentRequest =
            serde_json::from_str(r#"{"description":"x","use_ai":true}"#).unwrap();
        assert!(req.use_ai);

        let req: CreateIncidentRequest =
            serde_json::from_str(r#"{"description":"x","use_ai":"yes"}"#).unwrap();
        assert!(req.use_ai);

        let req: CreateIncidentRequest =
            serde_json::from_str(r#"{"description":"x","use_ai":"nope"}"#).unwrap();
        assert!(!req.use_ai);

        let req: CreateIncidentRequest = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert!(!req.use_ai);
    }

    #[test]
    fn explicit_priority_ignores_blank() {
        let req: CreateIncidentRequest =
            serde_json::from_str(r#"{"description":"x","priority":""}"#).unwrap();
        assert!(!req.has_explicit_priority());

        let req: CreateIncidentRequest =
            serde_json::from_str(r#"{"description":"x","priority":"High"}"#).unwrap();
        assert!(req.has_explicit_priority());
    }
}
