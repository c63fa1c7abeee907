//! Report record model
//!
//! One row per generated PDF, so previously issued reports can be listed and
//! located again.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A generated report as stored in the history table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: i64,
    pub report_id: String,
    pub disease: String,
    pub risk_category: String,
    pub confidence: Option<f64>,
    pub file_path: String,
    pub patient_name: Option<String>,
    pub profile_status: String,
    pub created_at: String,
}

/// Data for recording a new report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecordCreate {
    pub report_id: String,
    pub disease: String,
    pub risk_category: String,
    pub confidence: Option<f64>,
    pub file_path: String,
    pub patient_name: Option<String>,
    pub profile_status: String,
}

impl ReportRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            report_id: row.get("report_id")?,
            disease: row.get("disease")?,
            risk_category: row.get("risk_category")?,
            confidence: row.get("confidence")?,
            file_path: row.get("file_path")?,
            patient_name: row.get("patient_name")?,
            profile_status: row.get("profile_status")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new record
    pub fn create(conn: &Connection, data: &ReportRecordCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO reports (report_id, disease, risk_category, confidence, file_path, patient_name, profile_status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                data.report_id,
                data.disease,
                data.risk_category,
                data.confidence,
                data.file_path,
                data.patient_name,
                data.profile_status,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM reports WHERE id = ?1")?;
        match stmt.query_row([id], Self::from_row) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up by the human-facing report identifier (newest wins on collision)
    pub fn get_by_report_id(conn: &Connection, report_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM reports WHERE report_id = ?1 ORDER BY id DESC LIMIT 1",
        )?;
        match stmt.query_row([report_id], Self::from_row) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List most recent reports, optionally for a single disease
    pub fn list_recent(conn: &Connection, disease: Option<&str>, limit: i64) -> DbResult<Vec<Self>> {
        let records = match disease {
            Some(d) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM reports WHERE disease = ?1 ORDER BY id DESC LIMIT ?2",
                )?;
                let rows = stmt.query_map(params![d, limit], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM reports ORDER BY id DESC LIMIT ?1")?;
                let rows = stmt.query_map([limit], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(records)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        Ok(conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?)
    }

    /// Count of the rows `list_recent` would page through for `disease`
    pub fn count_for(conn: &Connection, disease: Option<&str>) -> DbResult<i64> {
        match disease {
            Some(d) => Ok(conn.query_row(
                "SELECT COUNT(*) FROM reports WHERE disease = ?1",
                [d],
                |row| row.get(0),
            )?),
            None => Self::count(conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample(report_id: &str, disease: &str) -> ReportRecordCreate {
        ReportRecordCreate {
            report_id: report_id.to_string(),
            disease: disease.to_string(),
            risk_category: "high".to_string(),
            confidence: Some(0.91),
            file_path: format!("/tmp/{}.pdf", report_id),
            patient_name: Some("Jane Doe".to_string()),
            profile_status: "fetched".to_string(),
        }
    }

    #[test]
    fn test_create_and_fetch() {
        let conn = setup();
        let created = ReportRecord::create(&conn, &sample("RPT-ABC", "heart")).unwrap();
        assert_eq!(created.report_id, "RPT-ABC");
        assert_eq!(created.confidence, Some(0.91));

        let found = ReportRecord::get_by_report_id(&conn, "RPT-ABC").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(ReportRecord::get_by_report_id(&conn, "RPT-NONE").unwrap().is_none());
    }

    #[test]
    fn test_list_filters_by_disease() {
        let conn = setup();
        ReportRecord::create(&conn, &sample("RPT-1", "heart")).unwrap();
        ReportRecord::create(&conn, &sample("RPT-2", "liver")).unwrap();
        ReportRecord::create(&conn, &sample("RPT-3", "heart")).unwrap();

        let hearts = ReportRecord::list_recent(&conn, Some("heart"), 10).unwrap();
        assert_eq!(hearts.len(), 2);
        assert_eq!(hearts[0].report_id, "RPT-3");

        let all = ReportRecord::list_recent(&conn, None, 2).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(ReportRecord::count(&conn).unwrap(), 3);
    }

    #[test]
    fn test_count_for_disease() {
        let conn = setup();
        ReportRecord::create(&conn, &sample("RPT-1", "heart")).unwrap();
        ReportRecord::create(&conn, &sample("RPT-2", "liver")).unwrap();
        ReportRecord::create(&conn, &sample("RPT-3", "heart")).unwrap();

        assert_eq!(ReportRecord::count_for(&conn, Some("heart")).unwrap(), 2);
        assert_eq!(ReportRecord::count_for(&conn, Some("liver")).unwrap(), 1);
        assert_eq!(ReportRecord::count_for(&conn, Some("bone")).unwrap(), 0);
        assert_eq!(ReportRecord::count_for(&conn, None).unwrap(), 3);
    }
}
