#![allow(dead_code)]

use std::sync::Mutex;

use sqlforge_core::dialect::{Dialect, UpsertSyntax};
use sqlforge_core::error::BoxError;
use sqlforge_core::{Database, Executor, Row, SqlValue};

/// An execution port that records every call and answers with canned rows.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, Vec<SqlValue>)>>,
    rows: Vec<Row>,
    fail_with: Option<String>,
}

impl RecordingExecutor {
    pub fn returning(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(String::from(message)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_sql(&self) -> String {
        self.calls()
            .last()
            .map(|(sql, _)| sql.clone())
            .unwrap_or_else(|| panic!("No statement was executed"))
    }
}

impl Executor for RecordingExecutor {
    async fn execute(&self, sql: &str, binds: &[SqlValue]) -> Result<Vec<Row>, BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push((String::from(sql), binds.to_vec()));
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(self.rows.clone()),
        }
    }
}

/// MySQL-style quoting and placeholders with standard ON CONFLICT syntax.
pub fn test_dialect() -> Dialect {
    Dialect::mysql()
        .with_name("test")
        .with_upsert_syntax(UpsertSyntax::Standard)
}

pub fn test_db() -> Database<RecordingExecutor> {
    Database::new(RecordingExecutor::default(), test_dialect())
}

pub fn test_db_with_rows(rows: Vec<Row>) -> Database<RecordingExecutor> {
    Database::new(RecordingExecutor::returning(rows), test_dialect())
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}
