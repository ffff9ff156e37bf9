use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::Result;
use crate::models::TeamAssessment;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS assessments (
                id INTEGER PRIMARY KEY,
                company_name TEXT NOT NULL,
                team_size INTEGER NOT NULL,
                overall_score REAL NOT NULL,
                risk_level TEXT NOT NULL,
                assessment_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_company
                ON assessments(company_name);
            "#,
        )?;
        Ok(())
    }

    pub fn save_assessment(&self, assessment: &TeamAssessment) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO assessments
                (company_name, team_size, overall_score, risk_level, assessment_json, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                assessment.company_name,
                assessment.team_size as i64,
                assessment.overall_score,
                assessment.risk_level.to_string(),
                serde_json::to_string(assessment)?,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn latest_for_company(&self, company: &str) -> Result<Option<TeamAssessment>> {
        let result = self.conn.query_row(
            r#"
            SELECT assessment_json FROM assessments
            WHERE company_name = ?1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
            params![company],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_companies(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT company_name FROM assessments ORDER BY company_name",
        )?;

        let companies = stmt.query_map([], |row| row.get(0))?;
        companies
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}
