//! Row-level access to the remote relational store
//!
//! The [`EntityStore`] trait is deliberately narrow: insert one row and
//! select rows by column equality with an optional ordering. Typed mapping
//! to entities happens in the feature services.

mod postgrest_client;

#[cfg(test)]
mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::{AppError, Result};

pub use postgrest_client::PostgrestClient;

#[cfg(test)]
pub use memory::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Equality filters (AND-combined) plus optional ordering and limit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowQuery {
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, SortOrder)>,
    pub limit: Option<usize>,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, column: &str, order: SortOrder) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert one row and return it as stored, including generated columns
    async fn insert(&self, table: &str, row: Value) -> Result<Value>;

    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>>;
}

pub fn decode_row<T: DeserializeOwned>(table: &str, row: Value) -> Result<T> {
    serde_json::from_value(row)
        .map_err(|e| AppError::Unknown(format!("Failed to decode {} row: {}", table, e)))
}

pub fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter().map(|row| decode_row(table, row)).collect()
}
