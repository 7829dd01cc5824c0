//! Rule-based incident analysis.
//!
//! Classification is a fixed keyword table: ordered priority tiers, an
//! ordered category map, and regex disjunctions for risk level and the
//! response-step dispatch. First matching entry wins everywhere; matching is
//! case-insensitive substring. Deterministic for a given description, except
//! for the timestamp field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{now_stamp, Analysis, Category, Priority, RiskLevel};

const CRITICAL_KEYWORDS: &[&str] = &[
    "ransomware",
    "data breach",
    "security breach",
    "hack",
    "malware",
    "virus",
    "ddos",
    "attack",
    "critical system down",
    "outage",
];

const HIGH_KEYWORDS: &[&str] = &[
    "server down",
    "network issue",
    "database error",
    "login problem",
    "payment system",
    "customer data",
];

const MEDIUM_KEYWORDS: &[&str] = &[
    "slow performance",
    "minor bug",
    "update needed",
    "configuration",
];

/// Category map, in match order. Security is checked before Infrastructure,
/// and so on; the first category with any keyword hit wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Security,
        &["security", "breach", "hack", "malware", "virus", "ransomware", "attack"],
    ),
    (
        Category::Infrastructure,
        &["server", "network", "hardware", "outage", "connectivity"],
    ),
    (
        Category::Application,
        &["bug", "error", "crash", "performance", "slow"],
    ),
    (
        Category::UserAccess,
        &["login", "password", "account", "access", "authentication"],
    ),
    (Category::Data, &["database", "data", "backup", "corruption"]),
];

static HIGH_RISK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"critical|breach|attack|ransomware|data loss").unwrap());
static MEDIUM_RISK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"server|network|database|payment").unwrap());

static SECURITY_STEPS_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"security|breach|hack|malware|ransomware").unwrap());
static INFRASTRUCTURE_STEPS_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"server|network|outage|connectivity").unwrap());
static APPLICATION_STEPS_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"bug|error|crash|performance").unwrap());

/// Analyze an incident description.
///
/// Never fails; an empty description simply lands in the lowest tiers. The
/// caller is expected to reject blank input before getting here.
pub fn analyze(description: &str) -> Analysis {
    let desc_lower = description.to_lowercase();

    Analysis {
        suggested_priority: assess_priority(&desc_lower),
        category: categorize(&desc_lower),
        risk_level: assess_risk(&desc_lower),
        response_steps: response_steps(&desc_lower),
        analysis_timestamp: now_stamp(),
        error: None,
    }
}

fn assess_priority(desc_lower: &str) -> Priority {
    if contains_any(desc_lower, CRITICAL_KEYWORDS) {
        Priority::Critical
    } else if contains_any(desc_lower, HIGH_KEYWORDS) {
        Priority::High
    } else if contains_any(desc_lower, MEDIUM_KEYWORDS) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn categorize(desc_lower: &str) -> Category {
    for (category, keywords) in CATEGORY_KEYWORDS {
        if contains_any(desc_lower, keywords) {
            return *category;
        }
    }
    Category::General
}

fn assess_risk(desc_lower: &str) -> RiskLevel {
    if HIGH_RISK.is_match(desc_lower) {
        RiskLevel::High
    } else if MEDIUM_RISK.is_match(desc_lower) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn response_steps(desc_lower: &str) -> Vec<String> {
    let steps: &[&str] = if SECURITY_STEPS_TRIGGER.is_match(desc_lower) {
        &[
            "1. Isolate affected systems immediately",
            "2. Preserve forensic evidence",
            "3. Notify security team and management",
            "4. Document all observed indicators",
            "5. Begin containment procedures",
            "6. Assess scope of compromise",
        ]
    } else if INFRASTRUCTURE_STEPS_TRIGGER.is_match(desc_lower) {
        &[
            "1. Verify system status and availability",
            "2. Check network connectivity and routing",
            "3. Review system logs for errors",
            "4. Test failover systems if available",
            "5. Notify affected users if necessary",
            "6. Implement workaround if possible",
        ]
    } else if APPLICATION_STEPS_TRIGGER.is_match(desc_lower) {
        &[
            "1. Reproduce the issue if possible",
            "2. Check application logs for errors",
            "3. Verify recent deployments or changes",
            "4. Test in staging environment",
            "5. Implement temporary fix if available",
            "6. Plan permanent solution",
        ]
    } else {
        &[
            "1. Gather detailed information about the issue",
            "2. Assess impact and affected systems",
            "3. Determine urgency and priority",
            "4. Assign to appropriate team member",
            "5. Document troubleshooting steps",
            "6. Monitor for resolution",
        ]
    };

    steps.iter().map(|s| s.to_string()).collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
