//! Interactive incident management CLI.
//!
//! Menu-driven front end over the same flat-file store as the HTTP server.
//! Every operation reloads the collection from disk, so the CLI and server
//! can be used side by side against the same files.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use uuid::Uuid;

use incident_response::analyzer;
use incident_response::config::Config;
use incident_response::models::{Incident, Priority};
use incident_response::report;
use incident_response::store::IncidentStore;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let store = IncidentStore::new(&config.incident_file, &config.log_file);

    loop {
        println!("\n{}", "=".repeat(80));
        println!("{:^80}", "*  AI-Enhanced Incident Response Automation  *");
        println!("{}", "=".repeat(80));

        let choice = Select::new()
            .with_prompt("Main Menu")
            .items(&[
                "View Incidents",
                "Create Incident",
                "Update Incident",
                "Resolve Incident",
                "Delete Incident",
                "AI Summary Report",
                "Exit",
            ])
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => view_incidents(&store),
            1 => create_incident(&store),
            2 => update_incident(&store),
            3 => resolve_incident(&store),
            4 => delete_incident(&store),
            5 => view_summary(&store),
            _ => {
                println!("Exiting... Goodbye!");
                return Ok(());
            }
        };

        if let Err(e) = outcome {
            println!("{}", format!("Error: {e}").red());
        }
    }
}

fn view_incidents(store: &IncidentStore) -> Result<()> {
    let incidents = store.load_all()?;
    if incidents.is_empty() {
        println!("No incidents found.");
        return Ok(());
    }

    println!("\nList of Incidents:");
    for incident in &incidents {
        print_incident_line(incident);
    }
    Ok(())
}

fn print_incident_line(incident: &Incident) {
    let status = if incident.resolved { "[Resolved]" } else { "[Open]" };
    let line = format!(
        "{} ID: {} | {} [{}]",
        status, incident.id, incident.description, incident.priority
    );

    let styled = match incident.priority {
        Priority::Critical => line.red().bold(),
        Priority::High => line.red(),
        Priority::Medium => line.yellow(),
        Priority::Low => line.green(),
    };
    println!("{styled}");

    if let Some(analysis) = &incident.ai_analysis {
        println!(
            "  {}",
            format!("AI: {} | Risk: {}", analysis.category, analysis.risk_level).cyan()
        );
    }
}

fn create_incident(store: &IncidentStore) -> Result<()> {
    let description: String = Input::new()
        .with_prompt("Enter incident description")
        .allow_empty(true)
        .interact_text()?;

    if description.trim().is_empty() {
        println!("{}", "Description cannot be blank.".red());
        return Ok(());
    }

    let priorities = [Priority::Low, Priority::Medium, Priority::High, Priority::Critical];
    let selected = Select::new()
        .with_prompt("Priority")
        .items(&priorities.map(|p| p.as_str()))
        .default(1)
        .interact()?;
    let mut priority = priorities[selected];

    let use_ai = Confirm::new()
        .with_prompt("Use AI analysis?")
        .default(false)
        .interact()?;

    let mut analysis = None;
    if use_ai {
        println!("Performing AI analysis...");
        let result = analyzer::analyze(description.trim());
        println!("{}", format!("AI Suggested Priority: {}", result.suggested_priority).cyan());
        println!("{}", format!("Category: {}", result.category).cyan());
        println!("{}", format!("Risk Level: {}", result.risk_level).cyan());

        let adopt = Confirm::new()
            .with_prompt(format!(
                "Use AI suggested priority ({})?",
                result.suggested_priority
            ))
            .default(false)
            .interact()?;
        if adopt {
            priority = result.suggested_priority;
        }
        analysis = Some(result);
    }

    let incident = store.create(&description, priority, analysis)?;
    println!("{}", "Incident created successfully!".green());

    if let Some(analysis) = &incident.ai_analysis {
        println!("\n{}", "AI Suggested Response Steps:".yellow());
        for step in &analysis.response_steps {
            println!("  {step}");
        }
    }
    Ok(())
}

fn update_incident(store: &IncidentStore) -> Result<()> {
    view_incidents(store)?;
    if store.load_all()?.is_empty() {
        return Ok(());
    }

    let Some(id) = prompt_incident_id("Enter ID of incident to update")? else {
        return Ok(());
    };

    let incidents = store.load_all()?;
    let Some(existing) = incidents.iter().find(|i| i.id == id) else {
        println!("{}", "Incident not found!".red());
        return Ok(());
    };

    let description: String = Input::new()
        .with_prompt("Enter new description")
        .allow_empty(true)
        .interact_text()?;
    if description.trim().is_empty() {
        return Ok(());
    }

    let mut reanalyze = false;
    if existing.ai_analysis.is_some() {
        reanalyze = Confirm::new()
            .with_prompt("Re-run AI analysis with new description?")
            .default(false)
            .interact()?;
    }

    let updated = store.update(id, &description, reanalyze)?;
    if reanalyze {
        if let Some(analysis) = &updated.ai_analysis {
            println!("{}", "Updated AI Analysis:".cyan());
            println!("  Priority: {}", analysis.suggested_priority);
            println!("  Category: {}", analysis.category);
            println!("  Risk Level: {}", analysis.risk_level);
        }
    }
    println!("{}", "Incident updated successfully!".green());
    Ok(())
}

fn resolve_incident(store: &IncidentStore) -> Result<()> {
    view_incidents(store)?;
    if store.load_all()?.is_empty() {
        return Ok(());
    }

    let Some(id) = prompt_incident_id("Enter ID of incident to resolve")? else {
        return Ok(());
    };

    match store.resolve(id) {
        Ok(_) => println!("{}", "Incident resolved!".green()),
        Err(incident_response::AppError::NotFound(_)) => {
            println!("{}", "Incident not found!".red())
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn delete_incident(store: &IncidentStore) -> Result<()> {
    view_incidents(store)?;
    if store.load_all()?.is_empty() {
        return Ok(());
    }

    let Some(id) = prompt_incident_id("Enter ID of incident to delete")? else {
        return Ok(());
    };

    match store.delete(id) {
        Ok(_) => println!("{}", "Incident deleted!".green()),
        Err(incident_response::AppError::NotFound(_)) => {
            println!("{}", "Incident not found!".red())
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn view_summary(store: &IncidentStore) -> Result<()> {
    let incidents = store.load_all()?;
    if incidents.is_empty() {
        println!("No incidents found for summary.");
        return Ok(());
    }

    println!("Generating AI summary report...");
    let report = report::summary_report(&incidents);

    println!("\n{}", "=== AI INCIDENT SUMMARY REPORT ===".cyan());
    println!("Generated at: {}", report.generated_at);

    println!("\n{}", "Overview:".yellow());
    println!("  Total Incidents: {}", report.summary.total_incidents);
    println!("  Resolved: {}", report.summary.resolved_incidents);
    println!("  Open: {}", report.summary.open_incidents);
    println!("  Resolution Rate: {}%", report.summary.resolution_rate);

    if !report.priority_breakdown.is_empty() {
        println!("\n{}", "Priority Breakdown:".yellow());
        for (priority, count) in &report.priority_breakdown {
            println!("  {priority}: {count}");
        }
    }

    if !report.category_breakdown.is_empty() {
        println!("\n{}", "Category Breakdown:".yellow());
        for (category, count) in &report.category_breakdown {
            println!("  {category}: {count}");
        }
    }

    println!("\n{}", "Recent Activity (Last 7 days):".yellow());
    println!("  Incidents: {}", report.recent_activity.incidents_last_7_days);
    println!("  Average per day: {}", report.recent_activity.average_per_day);
    Ok(())
}

/// Prompt for an incident id; a string that is not a UUID cannot match any
/// stored incident, so it is reported the same way as an unknown id.
fn prompt_incident_id(prompt: &str) -> Result<Option<Uuid>> {
    let raw: String = Input::new().with_prompt(prompt).allow_empty(true).interact_text()?;
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("{}", "Incident not found!".red());
            Ok(None)
        }
    }
}
