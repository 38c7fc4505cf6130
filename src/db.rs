//! Database module for the question catalog
//!
//! Read-only to the sequencer: questions and skip rules are loaded fresh
//! on every request. Writes exist only for seeding and tests.

mod schema;

pub use schema::*;

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database connection lock poisoned")]
    Poisoned,
    #[error("Failed to read catalog seed: {0}")]
    SeedIo(#[from] std::io::Error),
    #[error("Invalid catalog seed: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Question Operations ====================

    /// All questions in catalog order
    pub fn list_questions(&self) -> DbResult<Vec<Question>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT question_id, question_text, possible_answers
             FROM general_questions ORDER BY question_id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Question {
                id: row.get(0)?,
                text: row.get(1)?,
                possible_answers: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Insert or replace a question
    pub fn upsert_question(&self, question: &Question) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO general_questions (question_id, question_text, possible_answers)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(question_id) DO UPDATE SET
                question_text = excluded.question_text,
                possible_answers = excluded.possible_answers",
            params![question.id, question.text, question.possible_answers],
        )?;
        Ok(())
    }

    // ==================== Skip Rule Operations ====================

    pub fn list_skip_rules(&self) -> DbResult<Vec<SkipRule>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT parent_question_text, trigger_answer, skip_child_text
             FROM skip_rules ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SkipRule {
                parent_question_text: row.get(0)?,
                trigger_answer: row.get(1)?,
                skip_child_text: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    pub fn insert_skip_rule(&self, rule: &SkipRule) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO skip_rules (parent_question_text, trigger_answer, skip_child_text)
             VALUES (?1, ?2, ?3)",
            params![
                rule.parent_question_text,
                rule.trigger_answer,
                rule.skip_child_text
            ],
        )?;
        Ok(())
    }

    // ==================== Seeding ====================

    /// Whether the catalog has no questions and no rules
    pub fn is_catalog_empty(&self) -> DbResult<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM general_questions) + (SELECT COUNT(*) FROM skip_rules)",
            [],
            |row| row.get(0),
        )?;
        Ok(count == 0)
    }

    /// Load a seed document into the catalog in a single transaction
    pub fn seed(&self, seed: &CatalogSeed) -> DbResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for q in &seed.questions {
            tx.execute(
                "INSERT OR REPLACE INTO general_questions (question_id, question_text, possible_answers)
                 VALUES (?1, ?2, ?3)",
                params![q.id, q.text, q.possible_answers],
            )?;
        }
        for rule in &seed.skip_rules {
            tx.execute(
                "INSERT INTO skip_rules (parent_question_text, trigger_answer, skip_child_text)
                 VALUES (?1, ?2, ?3)",
                params![
                    rule.parent_question_text,
                    rule.trigger_answer,
                    rule.skip_child_text
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Seed from a JSON file, but only when the catalog is empty.
    /// Returns whether anything was written.
    pub fn seed_from_file_if_empty<P: AsRef<Path>>(&self, path: P) -> DbResult<bool> {
        if !self.is_catalog_empty()? {
            return Ok(false);
        }
        let raw = std::fs::read_to_string(path)?;
        let seed: CatalogSeed = serde_json::from_str(&raw)?;
        self.seed(&seed)?;
        Ok(true)
    }
}
