use crate::completion::HistoryWriter;
use crate::error::QuizError;
use crate::models::CompletionRecord;
use rusqlite::{Connection, Result};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub session_id: String,
    pub title: String,
    pub level: u8,
    pub score: usize,
    pub total_questions: usize,
    pub created_at: u64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn append_history(conn: &Connection, record: &CompletionRecord) -> Result<u64> {
    conn.execute(
        "INSERT INTO history (session_id, title, level, score, total_questions, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            record.session_id,
            record.title,
            record.level,
            record.score,
            record.total_questions,
            now()
        ],
    )?;

    Ok(conn.last_insert_rowid() as u64)
}

/// Most recent entries first.
pub fn load_history(conn: &Connection, limit: usize) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, title, level, score, total_questions, created_at
         FROM history ORDER BY created_at DESC, id DESC LIMIT ?",
    )?;

    let entries = stmt
        .query_map([limit], |row| {
            Ok(HistoryEntry {
                id: row.get(0)?,
                session_id: row.get(1)?,
                title: row.get(2)?,
                level: row.get(3)?,
                score: row.get(4)?,
                total_questions: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(entries)
}

/// Append-only history table behind the [`HistoryWriter`] seam.
#[derive(Debug)]
pub struct SqliteHistory {
    conn: Connection,
}

impl SqliteHistory {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl HistoryWriter for SqliteHistory {
    fn append_history(&mut self, record: &CompletionRecord) -> Result<(), QuizError> {
        append_history(&self.conn, record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;

    fn record(session_id: &str, score: usize) -> CompletionRecord {
        CompletionRecord {
            session_id: session_id.to_string(),
            title: "Rust Basics".to_string(),
            level: 2,
            score,
            total_questions: 3,
        }
    }

    fn open() -> (tempfile::TempDir, Connection) {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(temp_dir.path().join("test.db")).unwrap();
        run_migrations(&conn).unwrap();
        (temp_dir, conn)
    }

    #[test]
    fn test_append_and_load() {
        let (_dir, conn) = open();
        let id = append_history(&conn, &record("1700000000000", 2)).unwrap();
        assert_eq!(id, 1);

        let entries = load_history(&conn, 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].session_id, "1700000000000");
        assert_eq!(entries[0].title, "Rust Basics");
        assert_eq!(entries[0].level, 2);
        assert_eq!(entries[0].score, 2);
        assert_eq!(entries[0].total_questions, 3);
    }

    #[test]
    fn test_load_is_newest_first_and_limited() {
        let (_dir, conn) = open();
        for i in 0..5 {
            append_history(&conn, &record(&i.to_string(), i)).unwrap();
        }

        let entries = load_history(&conn, 3).unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.session_id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_same_session_id_is_appended_not_replaced() {
        let (_dir, conn) = open();
        append_history(&conn, &record("same", 1)).unwrap();
        append_history(&conn, &record("same", 2)).unwrap();
        assert_eq!(load_history(&conn, 10).unwrap().len(), 2);
    }

    #[test]
    fn test_sqlite_history_writer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("test.db");
        let conn = Connection::open(&path).unwrap();
        run_migrations(&conn).unwrap();

        let mut writer = SqliteHistory::new(conn);
        writer.append_history(&record("w", 3)).unwrap();

        let reader = Connection::open(&path).unwrap();
        assert_eq!(load_history(&reader, 10).unwrap()[0].score, 3);
    }

    #[test]
    fn test_writer_surfaces_database_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(temp_dir.path().join("test.db")).unwrap();
        let mut writer = SqliteHistory::new(conn);
        assert!(matches!(
            writer.append_history(&record("x", 0)),
            Err(QuizError::Database(_))
        ));
    }
}
