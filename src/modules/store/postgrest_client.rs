//! PostgREST-backed [`EntityStore`]
//!
//! Filter values travel as URL-encoded query parameters (`column=eq.value`),
//! never spliced into a composite filter expression.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error};

use crate::core::error::{AppError, Result};
use crate::modules::store::{EntityStore, RowQuery};
use crate::modules::supabase::{error_from_response, transport_error, SupabaseConnection};

pub struct PostgrestClient {
    connection: Arc<SupabaseConnection>,
}

impl PostgrestClient {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }

    fn table_path(table: &str) -> String {
        format!("/rest/v1/{}", table)
    }

    /// Query-string pairs for a select
    fn query_params(query: &RowQuery) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        for (column, value) in &query.filters {
            params.push((column.clone(), format!("eq.{}", value)));
        }

        if let Some((column, order)) = &query.order {
            params.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }

        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }

    async fn send_insert(&self, table: &str, row: Value) -> Result<Value> {
        let response = self
            .connection
            .request(Method::POST, &Self::table_path(table))?
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let rows = response.json::<Vec<Value>>().await.map_err(transport_error)?;

        rows.into_iter().next().ok_or_else(|| {
            AppError::Unknown(format!("Insert into {} returned no representation", table))
        })
    }

    async fn send_select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>> {
        let response = self
            .connection
            .request(Method::GET, &Self::table_path(table))?
            .query(&Self::query_params(query))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json::<Vec<Value>>().await.map_err(transport_error)
    }
}

#[async_trait]
impl EntityStore for PostgrestClient {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        debug!("Inserting row into '{}'", table);

        self.send_insert(table, row).await.inspect_err(|e| {
            error!(operation = "insert", table = table, "Store insert failed: {}", e);
        })
    }

    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>> {
        debug!("Selecting from '{}' with {:?}", table, query);

        self.send_select(table, query).await.inspect_err(|e| {
            error!(operation = "select", table = table, "Store select failed: {}", e);
        })
    }
}
