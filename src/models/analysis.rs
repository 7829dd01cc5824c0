//! Analysis model

use serde::{Deserialize, Serialize};

use crate::models::{now_stamp, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Security,
    Infrastructure,
    Application,
    #[serde(rename = "User Access")]
    UserAccess,
    Data,
    General,
    /// Only produced by a degraded analysis, never by keyword matching.
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Security => "Security",
            Category::Infrastructure => "Infrastructure",
            Category::Application => "Application",
            Category::UserAccess => "User Access",
            Category::Data => "Data",
            Category::General => "General",
            Category::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification output, embedded in an incident or returned transiently
/// from the analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub suggested_priority: Priority,
    pub category: Category,
    pub risk_level: RiskLevel,
    pub response_steps: Vec<String>,
    pub analysis_timestamp: String,
    /// Set only when classification fell back to defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Analysis {
    /// Fallback analysis carrying a diagnostic, so callers can tell a real
    /// classification from a degraded one without an error path.
    pub fn degraded(diagnostic: impl Into<String>) -> Self {
        Self {
            suggested_priority: Priority::Medium,
            category: Category::Unknown,
            risk_level: RiskLevel::Medium,
            response_steps: vec!["Manual assessment required".to_string()],
            analysis_timestamp: now_stamp(),
            error: Some(diagnostic.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
