//! Listing and moderating stored citizen reports.

use air_map_air_models::ReportStatus;
use air_map_database::reports::{StatusUpdate, recent_reports, update_report_status};
use air_map_database_models::ReportRow;
use dialoguer::{Confirm, Input, Select};
use switchy_database::Database;

const DESCRIPTION_WIDTH: usize = 40;

/// Renders reports as a fixed-width table.
#[must_use]
pub fn format_table(rows: &[ReportRow]) -> String {
    let mut out = format!(
        "{:<38} {:<20} {:<4} {:<9} {:<20} DESCRIPTION\n",
        "ID", "TYPE", "SEV", "STATUS", "REPORTED"
    );
    out.push_str(&"-".repeat(120));
    out.push('\n');

    for row in rows {
        let description = row.description.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{:<38} {:<20} {:<4} {:<9} {:<20} {}\n",
            row.id,
            row.report_type.as_ref(),
            row.severity.value(),
            row.status.as_ref(),
            row.reported_at.format("%Y-%m-%d %H:%M:%S"),
            truncate(description, DESCRIPTION_WIDTH),
        ));
    }

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Describes the outcome of a moderation request. Failures are `Err`.
///
/// # Errors
///
/// * If the report does not exist
/// * If the report has already been moderated
pub fn describe_update(id: &str, update: &StatusUpdate) -> Result<String, String> {
    match update {
        StatusUpdate::Updated(row) => Ok(format!("Report {id} is now {}", row.status)),
        StatusUpdate::NotFound => Err(format!("Report not found: {id}")),
        StatusUpdate::Conflict { current } => {
            Err(format!("Report {id} is already {current}, nothing changed"))
        }
    }
}

/// Prints the most recent reports.
///
/// # Errors
///
/// * If the store query fails
pub async fn list(db: &dyn Database, limit: u32) -> Result<(), Box<dyn std::error::Error>> {
    let rows = recent_reports(db, limit).await?;

    if rows.is_empty() {
        println!("No reports found.");
        return Ok(());
    }

    print!("{}", format_table(&rows));
    println!("\n{} report(s)", rows.len());
    Ok(())
}

/// Moves one report to `status` and prints the outcome.
///
/// # Errors
///
/// * If the store update fails
/// * If the report is unknown or already moderated
pub async fn moderate(
    db: &dyn Database,
    id: &str,
    status: ReportStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let update = update_report_status(db, id, status).await?;
    let message = describe_update(id, &update)?;
    println!("{message}");
    Ok(())
}

/// Prompts for a limit, then lists reports.
///
/// # Errors
///
/// * If the prompt or the store query fails
pub async fn interactive_list(db: &dyn Database) -> Result<(), Box<dyn std::error::Error>> {
    let limit: u32 = Input::new()
        .with_prompt("How many reports?")
        .default(20)
        .interact_text()?;

    list(db, limit).await
}

/// Picks a pending report and a verdict, then applies it.
///
/// # Errors
///
/// * If a prompt or store operation fails
pub async fn interactive_moderate(db: &dyn Database) -> Result<(), Box<dyn std::error::Error>> {
    let pending: Vec<ReportRow> = recent_reports(db, air_map_database_models::RECENT_REPORTS_LIMIT)
        .await?
        .into_iter()
        .filter(|r| r.status == ReportStatus::Pending)
        .collect();

    if pending.is_empty() {
        println!("No pending reports.");
        return Ok(());
    }

    let labels: Vec<String> = pending
        .iter()
        .map(|r| {
            format!(
                "{} {} (severity {}) {}",
                &r.id,
                r.report_type.label(),
                r.severity.value(),
                truncate(r.description.as_deref().unwrap_or(""), DESCRIPTION_WIDTH)
            )
        })
        .collect();

    let idx = Select::new()
        .with_prompt("Report")
        .items(&labels)
        .default(0)
        .interact()?;
    let report = &pending[idx];

    let verdicts = [ReportStatus::Verified, ReportStatus::Rejected];
    let verdict_labels: Vec<String> = verdicts.iter().map(ToString::to_string).collect();
    let verdict = verdicts[Select::new()
        .with_prompt("Verdict")
        .items(&verdict_labels)
        .default(0)
        .interact()?];

    if !Confirm::new()
        .with_prompt(format!("Mark report {} as {verdict}?", report.id))
        .default(true)
        .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    moderate(db, &report.id, verdict).await
}
