//! Report CRUD.

use air_map_air_models::{CitizenReport, ReportStatus, ReportType, Severity};
use air_map_database_models::{NewReport, ReportRow};
use air_map_geography::wkt;
use chrono::{DateTime, SecondsFormat, Utc};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue, Row};

use crate::DbError;

const SELECT_COLUMNS: &str =
    "SELECT id, report_type, severity, description, location, user_id, status, reported_at
     FROM citizen_reports";

/// Outcome of a moderation request.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// The report moved to the new state.
    Updated(ReportRow),
    /// No report has that id.
    NotFound,
    /// The report is not in a state that allows the transition.
    Conflict {
        /// State the report is currently in.
        current: ReportStatus,
    },
}

/// Inserts a new report in the pending state and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails.
pub async fn insert_report(db: &dyn Database, report: &NewReport) -> Result<ReportRow, DbError> {
    let row = ReportRow {
        id: uuid::Uuid::new_v4().to_string(),
        report_type: report.report_type,
        severity: report.severity,
        description: report.description.clone(),
        location: wkt::point(report.location),
        user_id: report.user_id.clone(),
        status: ReportStatus::Pending,
        reported_at: Utc::now(),
    };

    db.exec_raw_params(
        "INSERT INTO citizen_reports
            (id, report_type, severity, description, location, user_id, status, reported_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        &[
            DatabaseValue::String(row.id.clone()),
            DatabaseValue::String(row.report_type.as_ref().to_string()),
            DatabaseValue::Int32(i32::from(row.severity.value())),
            row.description
                .clone()
                .map_or(DatabaseValue::Null, DatabaseValue::String),
            DatabaseValue::String(row.location.clone()),
            DatabaseValue::String(row.user_id.clone()),
            DatabaseValue::String(row.status.as_ref().to_string()),
            DatabaseValue::String(row.reported_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        ],
    )
    .await
    .map_err(|e| DbError::Database(e.to_string()))?;

    log::info!(
        "Stored report {} ({}) from {}",
        row.id,
        row.report_type,
        row.user_id
    );

    Ok(row)
}

/// Returns the most recent reports, newest first.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a row cannot be decoded.
pub async fn recent_reports(db: &dyn Database, limit: u32) -> Result<Vec<ReportRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("{SELECT_COLUMNS} ORDER BY reported_at DESC LIMIT $1"),
            &[DatabaseValue::Int32(
                i32::try_from(limit).unwrap_or(i32::MAX),
            )],
        )
        .await
        .map_err(|e| DbError::Database(e.to_string()))?;

    rows.iter().map(decode_row).collect()
}

/// Looks up one report.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or the row cannot be decoded.
pub async fn get_report(db: &dyn Database, id: &str) -> Result<Option<ReportRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("{SELECT_COLUMNS} WHERE id = $1"),
            &[DatabaseValue::String(id.to_string())],
        )
        .await
        .map_err(|e| DbError::Database(e.to_string()))?;

    rows.first().map(decode_row).transpose()
}

/// Moves a report to `next` if its current state allows it.
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn update_report_status(
    db: &dyn Database,
    id: &str,
    next: ReportStatus,
) -> Result<StatusUpdate, DbError> {
    let Some(current) = get_report(db, id).await? else {
        return Ok(StatusUpdate::NotFound);
    };

    if !current.status.can_transition_to(next) {
        return Ok(StatusUpdate::Conflict {
            current: current.status,
        });
    }

    let changed = db
        .exec_raw_params(
            "UPDATE citizen_reports SET status = $1 WHERE id = $2 AND status = $3",
            &[
                DatabaseValue::String(next.as_ref().to_string()),
                DatabaseValue::String(id.to_string()),
                DatabaseValue::String(current.status.as_ref().to_string()),
            ],
        )
        .await
        .map_err(|e| DbError::Database(e.to_string()))?;

    if changed == 0 {
        // Another moderator got there first.
        let latest = get_report(db, id).await?;
        return Ok(latest.map_or(StatusUpdate::NotFound, |r| StatusUpdate::Conflict {
            current: r.status,
        }));
    }

    log::info!("Report {id}: {} -> {next}", current.status);

    Ok(StatusUpdate::Updated(ReportRow {
        status: next,
        ..current
    }))
}

/// Returns the number of stored reports.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub async fn count_reports(db: &dyn Database) -> Result<u64, DbError> {
    let rows = db
        .query_raw_params("SELECT COUNT(*) as cnt FROM citizen_reports", &[])
        .await
        .map_err(|e| DbError::Database(e.to_string()))?;

    let count: i64 = rows.first().map_or(0, |r| r.to_value("cnt").unwrap_or(0));

    #[allow(clippy::cast_sign_loss)]
    Ok(count as u64)
}

/// Converts a stored row into the record the map displays.
///
/// # Errors
///
/// * [`DbError::Conversion`] if the stored location is not a WKT point
pub fn to_citizen_report(row: ReportRow) -> Result<CitizenReport, DbError> {
    let location = wkt::parse_point(&row.location).map_err(|e| DbError::Conversion {
        message: format!("report {}: {e}", row.id),
    })?;

    Ok(CitizenReport {
        id: row.id,
        report_type: row.report_type,
        severity: row.severity,
        location,
        timestamp: row.reported_at,
        status: row.status,
        description: row.description,
    })
}

fn decode_row(row: &Row) -> Result<ReportRow, DbError> {
    let conversion = |message: String| DbError::Conversion { message };

    let id: String = row
        .to_value("id")
        .map_err(|e| conversion(format!("Failed to read id: {e}")))?;

    let report_type: String = row.to_value("report_type").unwrap_or_default();
    let report_type: ReportType = report_type
        .parse()
        .map_err(|_| conversion(format!("{id}: unknown report type {report_type:?}")))?;

    let severity: i32 = row.to_value("severity").unwrap_or(0);
    let severity = u8::try_from(severity)
        .ok()
        .and_then(|v| Severity::from_value(v).ok())
        .ok_or_else(|| conversion(format!("{id}: invalid severity {severity}")))?;

    let status: String = row.to_value("status").unwrap_or_default();
    let status: ReportStatus = status
        .parse()
        .map_err(|_| conversion(format!("{id}: unknown status {status:?}")))?;

    let reported_at: String = row.to_value("reported_at").unwrap_or_default();
    let reported_at = DateTime::parse_from_rfc3339(&reported_at)
        .map_err(|e| conversion(format!("{id}: bad timestamp {reported_at:?}: {e}")))?
        .with_timezone(&Utc);

    Ok(ReportRow {
        report_type,
        severity,
        description: row.to_value("description").unwrap_or(None),
        location: row.to_value("location").unwrap_or_default(),
        user_id: row.to_value("user_id").unwrap_or_default(),
        status,
        reported_at,
        id,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use air_map_geography_models::Coordinates;

    use super::*;
    use crate::open_db;

    fn temp_db_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("air_map_database_tests")
            .join(format!("{name}-{}.db", uuid::Uuid::new_v4()))
    }

    fn burning_report() -> NewReport {
        NewReport {
            report_type: ReportType::GarbageBurning,
            severity: Severity::from_value(4).unwrap(),
            description: Some("smoke near the market".to_string()),
            location: Coordinates::new(28.6139, 77.209),
            user_id: "user_abc".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_read_back() {
        let db = open_db(&temp_db_path("insert")).await.unwrap();

        let stored = insert_report(db.as_ref(), &burning_report()).await.unwrap();
        assert_eq!(stored.status, ReportStatus::Pending);
        assert_eq!(stored.location, "POINT(77.209 28.6139)");

        let fetched = get_report(db.as_ref(), &stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, stored.id);
        assert_eq!(fetched.report_type, ReportType::GarbageBurning);
        assert_eq!(fetched.severity.value(), 4);
        assert_eq!(fetched.description.as_deref(), Some("smoke near the market"));
        assert_eq!(count_reports(db.as_ref()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn recent_reports_are_newest_first_and_limited() {
        let db = open_db(&temp_db_path("recent")).await.unwrap();

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(insert_report(db.as_ref(), &burning_report()).await.unwrap().id);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let recent = recent_reports(db.as_ref(), 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, ids[2]);
        assert_eq!(recent[1].id, ids[1]);
    }

    #[tokio::test]
    async fn moderation_moves_pending_once() {
        let db = open_db(&temp_db_path("moderate")).await.unwrap();
        let stored = insert_report(db.as_ref(), &burning_report()).await.unwrap();

        let first = update_report_status(db.as_ref(), &stored.id, ReportStatus::Verified)
            .await
            .unwrap();
        assert!(matches!(first, StatusUpdate::Updated(ref r) if r.status == ReportStatus::Verified));

        let second = update_report_status(db.as_ref(), &stored.id, ReportStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(
            second,
            StatusUpdate::Conflict {
                current: ReportStatus::Verified
            }
        );

        let missing = update_report_status(db.as_ref(), "nope", ReportStatus::Verified)
            .await
            .unwrap();
        assert_eq!(missing, StatusUpdate::NotFound);
    }

    #[tokio::test]
    async fn rows_convert_to_map_records() {
        let db = open_db(&temp_db_path("convert")).await.unwrap();
        let stored = insert_report(db.as_ref(), &burning_report()).await.unwrap();

        let report = to_citizen_report(stored).unwrap();
        assert!((report.location.lat - 28.6139).abs() < 1e-9);
        assert!((report.location.lng - 77.209).abs() < 1e-9);
        assert!(report.report_type.is_burning());
    }

    #[test]
    fn bad_location_fails_conversion() {
        let row = ReportRow {
            id: "r1".to_string(),
            report_type: ReportType::IndustrialSmoke,
            severity: Severity::MIN,
            description: None,
            location: "0101000020E6100000".to_string(),
            user_id: "u".to_string(),
            status: ReportStatus::Pending,
            reported_at: Utc::now(),
        };
        assert!(matches!(
            to_citizen_report(row),
            Err(DbError::Conversion { .. })
        ));
    }
}
