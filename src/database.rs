use crate::error::{RecommendError, Result as RecommendResult};
use crate::history::HistorySource;
use chrono::Utc;
use rusqlite::{params, Connection, Result, Transaction};

pub struct Database {
    conn: Connection,
}

#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub id: i64,
    pub user_id: i64,
    pub search_query: String,
    /// Absent on rows written before the column existed.
    pub searched_at: Option<String>,
}

pub struct SearchImportSession<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SearchImportSession<'conn> {
    pub fn insert(&mut self, user_id: i64, search_query: &str) -> Result<()> {
        let searched_at = Utc::now().to_rfc3339();
        let mut stmt = self.tx.prepare_cached(
            "INSERT INTO search_history (user_id, search_query, searched_at) VALUES (?1, ?2, ?3)",
        )?;
        stmt.execute(params![user_id, search_query, searched_at])?;
        Ok(())
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()
    }
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Database { conn };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS search_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                search_query TEXT NOT NULL,
                searched_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_search_history_user ON search_history(user_id)",
            [],
        )?;

        self.add_missing_columns()
    }

    // Older stores only carry (user_id, search_query).
    fn add_missing_columns(&self) -> Result<()> {
        let mut stmt = self.conn.prepare("PRAGMA table_info(search_history)")?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<String>>>()?;

        if !columns.iter().any(|c| c == "searched_at") {
            self.conn
                .execute("ALTER TABLE search_history ADD COLUMN searched_at TEXT", [])?;
        }

        Ok(())
    }

    pub fn insert_search(&self, user_id: i64, search_query: &str) -> Result<i64> {
        let searched_at = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO search_history (user_id, search_query, searched_at) VALUES (?1, ?2, ?3)",
            params![user_id, search_query, searched_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn start_search_import(&mut self) -> Result<SearchImportSession<'_>> {
        let tx = self.conn.transaction()?;
        Ok(SearchImportSession { tx })
    }

    /// Record several queries for one user in a single transaction.
    pub fn record_searches(&mut self, user_id: i64, queries: &[String]) -> Result<usize> {
        let mut session = self.start_search_import()?;
        for query in queries {
            session.insert(user_id, query)?;
        }
        session.commit()?;
        Ok(queries.len())
    }

    /// History rows for a user, most recent (highest rowid) first.
    pub fn get_user_history(&self, user_id: i64, limit: Option<usize>) -> Result<Vec<SearchRecord>> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = self.conn.prepare(
            "SELECT rowid, user_id, search_query, searched_at FROM search_history
             WHERE user_id = ?1
             ORDER BY rowid DESC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![user_id, limit], |row| {
            Ok(SearchRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                search_query: row.get(2)?,
                searched_at: row.get(3)?,
            })
        })?;

        rows.collect()
    }

    pub fn clear_history_for_user(&self, user_id: i64) -> Result<usize> {
        self.conn
            .execute("DELETE FROM search_history WHERE user_id = ?1", params![user_id])
    }
}

impl HistorySource for Database {
    fn fetch_history(&self, user_id: i64, limit: Option<usize>) -> RecommendResult<Vec<String>> {
        let rows = self
            .get_user_history(user_id, limit)
            .map_err(|e| RecommendError::data_unavailable("search history", e))?;
        Ok(rows.into_iter().map(|row| row.search_query).collect())
    }
}
