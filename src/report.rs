//! Aggregate reporting over the incident collection.
//!
//! Pure reads: both entry points take the already-loaded slice and never
//! touch storage.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::models::{
    now_stamp, Alerts, Incident, Insights, RecentActivity, SummaryCounts, SummaryReport, Trends,
    TIMESTAMP_FORMAT,
};

/// Trailing-window length in days. The lower bound is `today - 7`, inclusive,
/// so the window actually spans eight calendar dates.
const RECENT_WINDOW_DAYS: i64 = 7;

pub fn summary_report(incidents: &[Incident]) -> SummaryReport {
    let total = incidents.len();
    let resolved = incidents.iter().filter(|i| i.resolved).count();

    let mut priority_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for incident in incidents {
        *priority_breakdown
            .entry(incident.priority.as_str().to_string())
            .or_insert(0) += 1;
    }

    let mut category_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for incident in incidents {
        if let Some(analysis) = &incident.ai_analysis {
            *category_breakdown
                .entry(analysis.category.as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    let recent = recent_count(incidents, Local::now().date_naive());

    SummaryReport {
        summary: SummaryCounts {
            total_incidents: total,
            resolved_incidents: resolved,
            open_incidents: total - resolved,
            resolution_rate: resolution_rate(resolved, total),
        },
        priority_breakdown,
        category_breakdown,
        recent_activity: RecentActivity {
            incidents_last_7_days: recent,
            average_per_day: round2(recent as f64 / RECENT_WINDOW_DAYS as f64),
        },
        generated_at: now_stamp(),
    }
}

pub fn insights(incidents: &[Incident]) -> Insights {
    let weekly = recent_count(incidents, Local::now().date_naive());

    let high_priority_open = incidents
        .iter()
        .filter(|i| !i.resolved && i.priority.is_high_or_critical())
        .count();

    // Category counts in first-encounter order, so the most-affected
    // tie-break is deterministic over the stored incident order.
    let mut ordered_categories: Vec<(String, usize)> = Vec::new();
    for incident in incidents {
        if let Some(analysis) = &incident.ai_analysis {
            let name = analysis.category.as_str();
            match ordered_categories.iter_mut().find(|(c, _)| c == name) {
                Some((_, count)) => *count += 1,
                None => ordered_categories.push((name.to_string(), 1)),
            }
        }
    }

    // Strict > keeps the first-encountered category on ties
    // (Iterator::max_by_key would keep the last).
    let mut most_affected = "None".to_string();
    let mut best = 0usize;
    for (category, count) in &ordered_categories {
        if *count > best {
            best = *count;
            most_affected = category.clone();
        }
    }

    let resolved = incidents.iter().filter(|i| i.resolved).count();

    Insights {
        alerts: Alerts {
            high_priority_open,
            recent_spike: weekly > 10,
            categories_most_affected: most_affected,
        },
        trends: Trends {
            weekly_incidents: weekly,
            category_breakdown: ordered_categories.into_iter().collect(),
            resolution_rate: resolution_rate(resolved, incidents.len()),
        },
    }
}

fn resolution_rate(resolved: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(resolved as f64 / total as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Incidents created on or after `today - 7` days. Records whose timestamp
/// does not parse are skipped, not treated as an error.
fn recent_count(incidents: &[Incident], today: NaiveDate) -> usize {
    let cutoff = today - chrono::Duration::days(RECENT_WINDOW_DAYS);
    incidents
        .iter()
        .filter_map(|i| NaiveDateTime::parse_from_str(&i.created_at, TIMESTAMP_FORMAT).ok())
        .filter(|dt| dt.date() >= cutoff)
        .count()
}
