//! Record of past analyses in SQLite.
//!
//! Only the analysis type, a CRC-32 fingerprint of the inputs and the
//! creation time are kept; sequences and results are not stored.

use std::path::Path;

use crc::crc32;
use linked_hash_map::LinkedHashMap;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::info;

use crate::analysis::{AnalysisRequest, AnalysisType};
use crate::error::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS analysis_result (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    analysis_type TEXT    NOT NULL,
    fingerprint   INTEGER NOT NULL,
    created_at    TEXT    NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS analysis_result_created_at ON analysis_result (created_at);
";

impl ToSql for AnalysisType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AnalysisType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|_| FromSqlError::InvalidType)
    }
}

/// One recorded analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: i64,
    pub analysis_type: AnalysisType,
    pub fingerprint: u32,
    /// UTC time as "YYYY-MM-DD HH:MM:SS"
    pub created_at: String,
}

/// Number of analyses of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub analysis_type: AnalysisType,
    pub analysis_count: i64,
}

/// Per-date analysis counts: date -> analysis type -> count, dates ascending.
pub type DailyCounts = LinkedHashMap<String, LinkedHashMap<String, i64>>;

/// CRC-32 over the input sequences of a request.
pub fn fingerprint(request: &AnalysisRequest) -> u32 {
    let joined = request.sequences()
        .iter()
        .map(|&(_, seq)| seq)
        .collect::<Vec<&str>>()
        .join("\n");
    crc32::checksum_ieee(joined.as_bytes())
}

pub struct History {
    conn: Connection,
}

impl History {
    /// Open or create a history database at a given file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        History::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        History::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(History { conn: conn })
    }

    /// Record a request at the current time; returns the new entry id.
    pub fn record(&self, request: &AnalysisRequest) -> Result<i64> {
        let analysis_type = request.analysis_type();
        self.conn.execute(
            "INSERT INTO analysis_result (analysis_type, fingerprint) VALUES (?1, ?2)",
            params![analysis_type, fingerprint(request)],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, analysis = %analysis_type, "recorded analysis");
        Ok(id)
    }

    /// Record an analysis with an explicit creation time.
    pub fn record_at(&self, analysis_type: AnalysisType, fingerprint: u32, created_at: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO analysis_result (analysis_type, fingerprint, created_at) VALUES (?1, ?2, ?3)",
            params![analysis_type, fingerprint, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All entries, newest first.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, analysis_type, fingerprint, created_at FROM analysis_result
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Entry {
                id: row.get(0)?,
                analysis_type: row.get(1)?,
                fingerprint: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// Number of analyses per type, for types that occur.
    pub fn counts_by_type(&self) -> Result<Vec<TypeCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT analysis_type, COUNT(*) FROM analysis_result
             GROUP BY analysis_type ORDER BY analysis_type",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TypeCount { analysis_type: row.get(0)?, analysis_count: row.get(1)? })
        })?;

        let mut counts = Vec::new();
        for count in rows {
            counts.push(count?);
        }
        Ok(counts)
    }

    /// Number of analyses per calendar date and type.
    pub fn counts_by_date(&self) -> Result<DailyCounts> {
        let mut stmt = self.conn.prepare(
            "SELECT date(created_at) AS day, analysis_type, COUNT(*) FROM analysis_result
             GROUP BY day, analysis_type ORDER BY day, analysis_type",
        )?;
        let mut rows = stmt.query([])?;

        let mut daily = DailyCounts::new();
        while let Some(row) = rows.next()? {
            let day: String = row.get(0)?;
            let analysis_type: String = row.get(1)?;
            let count: i64 = row.get(2)?;
            if daily.get(&day).is_none() {
                daily.insert(day.clone(), LinkedHashMap::new());
            }
            if let Some(by_type) = daily.get_mut(&day) {
                by_type.insert(analysis_type, count);
            }
        }
        Ok(daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orf_request(seq: &str) -> AnalysisRequest {
        AnalysisRequest::OrfDetection { input_sequence: seq.to_owned() }
    }

    #[test]
    fn test_fingerprint() {
        assert_eq!(fingerprint(&orf_request("ATG")), fingerprint(&orf_request("ATG")));
        assert!(fingerprint(&orf_request("ATG")) != fingerprint(&orf_request("ATGA")));

        let a = AnalysisRequest::VariantDetection {
            reference_sequence: "AC".to_owned(),
            sample_sequence: "GT".to_owned(),
        };
        let b = AnalysisRequest::VariantDetection {
            reference_sequence: "ACG".to_owned(),
            sample_sequence: "T".to_owned(),
        };
        assert!(fingerprint(&a) != fingerprint(&b));
    }

    #[test]
    fn test_record_and_entries() {
        let history = History::in_memory().unwrap();
        let request = orf_request("ATGAAATAG");
        let first = history.record(&request).unwrap();
        let second = history.record(&request).unwrap();
        assert!(second > first);

        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, second);
        assert_eq!(entries[0].analysis_type, AnalysisType::OrfDetection);
        assert_eq!(entries[0].fingerprint, fingerprint(&request));
        assert_eq!(entries[0].created_at.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn test_counts_by_type() {
        let history = History::in_memory().unwrap();
        history.record_at(AnalysisType::OrfDetection, 1, "2024-11-01 09:00:00").unwrap();
        history.record_at(AnalysisType::VariantDetection, 2, "2024-11-01 10:00:00").unwrap();
        history.record_at(AnalysisType::OrfDetection, 3, "2024-11-02 11:00:00").unwrap();

        assert_eq!(history.counts_by_type().unwrap(), vec![
            TypeCount { analysis_type: AnalysisType::OrfDetection, analysis_count: 2 },
            TypeCount { analysis_type: AnalysisType::VariantDetection, analysis_count: 1 },
        ]);
    }

    #[test]
    fn test_counts_by_date() {
        let history = History::in_memory().unwrap();
        history.record_at(AnalysisType::SequenceAlignment, 1, "2024-11-02 08:00:00").unwrap();
        history.record_at(AnalysisType::OrfDetection, 2, "2024-11-01 09:00:00").unwrap();
        history.record_at(AnalysisType::OrfDetection, 3, "2024-11-01 23:59:59").unwrap();
        history.record_at(AnalysisType::VariantDetection, 4, "2024-11-01 12:00:00").unwrap();

        let daily = history.counts_by_date().unwrap();
        let days: Vec<&String> = daily.keys().collect();
        assert_eq!(days, vec!["2024-11-01", "2024-11-02"]);
        assert_eq!(daily["2024-11-01"]["orf_detection"], 2);
        assert_eq!(daily["2024-11-01"]["variant_detection"], 1);
        assert_eq!(daily["2024-11-02"]["sequence_alignment"], 1);

        let json = serde_json::to_string(&daily).unwrap();
        assert_eq!(
            json,
            r#"{"2024-11-01":{"orf_detection":2,"variant_detection":1},"2024-11-02":{"sequence_alignment":1}}"#
        );
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");
        {
            let history = History::open(&path).unwrap();
            history.record(&orf_request("ATG")).unwrap();
        }
        let history = History::open(&path).unwrap();
        assert_eq!(history.entries().unwrap().len(), 1);
    }
}
