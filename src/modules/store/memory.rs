//! In-memory [`EntityStore`] for service and handler tests
//!
//! Mimics the store-side behavior the services rely on: generated `id`,
//! store-set timestamp columns, and unique constraints.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::store::{EntityStore, RowQuery, SortOrder};

#[derive(Debug, Clone, Default)]
struct TableSpec {
    unique_columns: Vec<String>,
    timestamp_column: Option<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    specs: HashMap<String, TableSpec>,
    tables: Mutex<HashMap<String, Vec<Value>>>,
    last_timestamp: Mutex<Option<DateTime<Utc>>>,
    inserts: AtomicUsize,
    selects: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique(mut self, table: &str, column: &str) -> Self {
        self.specs
            .entry(table.to_string())
            .or_default()
            .unique_columns
            .push(column.to_string());
        self
    }

    pub fn with_timestamp(mut self, table: &str, column: &str) -> Self {
        self.specs.entry(table.to_string()).or_default().timestamp_column =
            Some(column.to_string());
        self
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn select_count(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    /// Strictly increasing clock so rows inserted back to back still order
    fn next_timestamp(&self) -> String {
        let mut last = self.last_timestamp.lock().unwrap();
        let mut now = Utc::now();
        if let Some(previous) = *last {
            if now <= previous {
                now = previous + Duration::microseconds(1);
            }
        }
        *last = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn matches(row: &Value, column: &str, expected: &str) -> bool {
        match row.get(column) {
            Some(Value::String(s)) => s == expected,
            Some(other) => other.to_string() == expected,
            None => false,
        }
    }

    fn sort_key(row: &Value, column: &str) -> String {
        match row.get(column) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let Value::Object(mut fields) = row else {
            return Err(AppError::Unknown(format!(
                "Insert into {} expects an object",
                table
            )));
        };

        let spec = self.specs.get(table).cloned().unwrap_or_default();
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();

        for column in &spec.unique_columns {
            if let Some(Value::String(value)) = fields.get(column) {
                if rows.iter().any(|existing| Self::matches(existing, column, value)) {
                    return Err(AppError::Conflict(format!(
                        "duplicate key value violates unique constraint \"{}_{}_key\"",
                        table, column
                    )));
                }
            }
        }

        fields
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::now_v7().to_string()));
        if let Some(column) = &spec.timestamp_column {
            fields.insert(column.clone(), Value::String(self.next_timestamp()));
        }

        let stored = Value::Object(fields);
        rows.push(stored.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);

        Ok(stored)
    }

    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>> {
        self.selects.fetch_add(1, Ordering::SeqCst);

        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(column, value)| Self::matches(row, column, value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, order)) = &query.order {
            rows.sort_by_key(|row| Self::sort_key(row, column));
            if *order == SortOrder::Descending {
                rows.reverse();
            }
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}
