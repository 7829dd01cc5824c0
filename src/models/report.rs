//! Summary report and dashboard insight models

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub summary: SummaryCounts,
    /// Only priorities actually present in the data appear as keys.
    pub priority_breakdown: BTreeMap<String, usize>,
    /// Counted over incidents carrying an analysis; others are excluded.
    pub category_breakdown: BTreeMap<String, usize>,
    pub recent_activity: RecentActivity,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryCounts {
    pub total_incidents: usize,
    pub resolved_incidents: usize,
    pub open_incidents: usize,
    /// Percentage rounded to two decimals; 0 when there are no incidents.
    pub resolution_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub incidents_last_7_days: usize,
    pub average_per_day: f64,
}

#[derive(Debug, Serialize)]
pub struct Insights {
    pub alerts: Alerts,
    pub trends: Trends,
}

#[derive(Debug, Serialize)]
pub struct Alerts {
    pub high_priority_open: usize,
    pub recent_spike: bool,
    /// "None" when no incident carries an analysis.
    pub categories_most_affected: String,
}

#[derive(Debug, Serialize)]
pub struct Trends {
    pub weekly_incidents: usize,
    pub category_breakdown: BTreeMap<String, usize>,
    pub resolution_rate: f64,
}
