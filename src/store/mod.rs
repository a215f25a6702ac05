//! Client for the remote inventory store.
//!
//! The store is a Supabase-compatible REST service (PostgREST conventions):
//! five tables reachable under `/rest/v1/<table>`, authenticated with an API
//! key sent both as `apikey` and bearer token. Tables and columns keep the
//! human-readable names the production database uses, spaces included.

use crate::models::{
    Asset, AssetChanges, AssetStatusRecord, AssetTypeRecord, Inventory, ModelRecord, NewAsset,
    OfficeLocationRecord,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// The assets table.
const ASSETS_TABLE: &str = "Assets";

/// Errors surfaced by the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store configuration: {0}")]
    Config(String),

    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status} for {table}: {body}")]
    Api {
        status: StatusCode,
        table: String,
        body: String,
    },
}

/// Connection settings for the store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Base URL of the store, e.g. `https://project.supabase.co`.
    pub url: String,
    /// API key, sent as `apikey` and `Authorization: Bearer`.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// One of the four lookup tables backing the dashboard's dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Models,
    Locations,
    Types,
    Statuses,
}

impl Lookup {
    /// Store table name.
    pub fn table(&self) -> &'static str {
        match self {
            Lookup::Models => "Models",
            Lookup::Locations => "Office Locations",
            Lookup::Types => "Asset Types",
            Lookup::Statuses => "Asset Status",
        }
    }

    /// The single name column of the table.
    pub fn column(&self) -> &'static str {
        match self {
            Lookup::Models => "Model Name",
            Lookup::Locations => "Office Name",
            Lookup::Types => "Type",
            Lookup::Statuses => "Status Type",
        }
    }
}

/// HTTP client for the inventory store.
#[derive(Debug)]
pub struct StoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl StoreClient {
    /// Create a client from connection settings.
    pub fn new(options: &StoreOptions) -> Result<Self, StoreError> {
        if options.url.is_empty() {
            return Err(StoreError::Config("store URL is not set".to_string()));
        }
        if options.api_key.is_empty() {
            return Err(StoreError::Config("store API key is not set".to_string()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&options.api_key)
            .map_err(|_| StoreError::Config("API key contains invalid characters".to_string()))?;
        headers.insert("apikey", key);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", options.api_key))
            .map_err(|_| StoreError::Config("API key contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: options.url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Select rows from a table. `select` is the PostgREST column list
    /// (`*`, or a quoted column name).
    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
    ) -> Result<Vec<T>, StoreError> {
        debug!("Selecting {} from {}", select, table);
        let response = self
            .http
            .get(self.table_url(table))
            .query(&[("select", select)])
            .send()
            .await?;

        let response = check_status(response, table).await?;
        Ok(response.json().await?)
    }

    async fn insert_rows<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), StoreError> {
        debug!("Inserting {} row(s) into {}", rows.len(), table);
        let response = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        check_status(response, table).await?;
        Ok(())
    }

    /// Update rows where `key_column` equals `key`.
    async fn update_rows<T: Serialize>(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        changes: &T,
    ) -> Result<(), StoreError> {
        debug!("Updating {} where {} = {}", table, key_column, key);
        let response = self
            .http
            .patch(self.table_url(table))
            .query(&[(key_column, format!("eq.{}", key))])
            .json(changes)
            .send()
            .await?;

        check_status(response, table).await?;
        Ok(())
    }

    /// Delete rows where `key_column` equals `key`.
    async fn delete_rows(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
    ) -> Result<(), StoreError> {
        debug!("Deleting from {} where {} = {}", table, key_column, key);
        let response = self
            .http
            .delete(self.table_url(table))
            .query(&[(key_column, format!("eq.{}", key))])
            .send()
            .await?;

        check_status(response, table).await?;
        Ok(())
    }

    /// Fetch every asset record.
    pub async fn fetch_assets(&self) -> Result<Vec<Asset>, StoreError> {
        self.select_rows(ASSETS_TABLE, "*").await
    }

    /// Fetch the name column of one lookup table.
    pub async fn fetch_lookup(&self, lookup: Lookup) -> Result<Vec<String>, StoreError> {
        let select = format!("\"{}\"", lookup.column());
        match lookup {
            Lookup::Models => Ok(self
                .select_rows::<ModelRecord>(lookup.table(), &select)
                .await?
                .into_iter()
                .map(|r| r.name)
                .collect()),
            Lookup::Locations => Ok(self
                .select_rows::<OfficeLocationRecord>(lookup.table(), &select)
                .await?
                .into_iter()
                .map(|r| r.name)
                .collect()),
            Lookup::Types => Ok(self
                .select_rows::<AssetTypeRecord>(lookup.table(), &select)
                .await?
                .into_iter()
                .map(|r| r.name)
                .collect()),
            Lookup::Statuses => Ok(self
                .select_rows::<AssetStatusRecord>(lookup.table(), &select)
                .await?
                .into_iter()
                .map(|r| r.name)
                .collect()),
        }
    }

    /// Fetch the asset list and all four lookup tables in parallel.
    pub async fn fetch_inventory(&self) -> Result<Inventory, StoreError> {
        let (assets, models, locations, types, statuses) = futures::try_join!(
            self.fetch_assets(),
            self.fetch_lookup(Lookup::Models),
            self.fetch_lookup(Lookup::Locations),
            self.fetch_lookup(Lookup::Types),
            self.fetch_lookup(Lookup::Statuses),
        )?;

        info!(
            "Fetched {} assets, {} models, {} locations, {} types, {} statuses",
            assets.len(),
            models.len(),
            locations.len(),
            types.len(),
            statuses.len()
        );

        Ok(Inventory {
            assets,
            models,
            locations,
            types,
            statuses,
        })
    }

    /// Insert a new asset. The store assigns the id; `date_added` is set
    /// here, once, and never again.
    #[allow(dead_code)] // CRUD surface, exercised in tests
    pub async fn insert_asset(&self, asset: &NewAsset) -> Result<(), StoreError> {
        self.insert_rows(ASSETS_TABLE, std::slice::from_ref(asset))
            .await
    }

    /// Update the mutable fields of an asset row.
    #[allow(dead_code)] // CRUD surface, exercised in tests
    pub async fn update_asset(&self, id: i64, changes: &AssetChanges) -> Result<(), StoreError> {
        self.update_rows(ASSETS_TABLE, "id", &id.to_string(), changes)
            .await
    }

    /// Delete an asset row.
    #[allow(dead_code)] // CRUD surface, exercised in tests
    pub async fn delete_asset(&self, id: i64) -> Result<(), StoreError> {
        self.delete_rows(ASSETS_TABLE, "id", &id.to_string()).await
    }

    /// Add a name to a lookup table.
    #[allow(dead_code)] // Maintenance operation, exercised in tests
    pub async fn add_lookup_name(&self, lookup: Lookup, name: &str) -> Result<(), StoreError> {
        self.insert_rows(lookup.table(), &[name_row(lookup, name)])
            .await
    }

    /// Rename a lookup entry. Asset rows referencing the old name are not
    /// rewritten; references are free text.
    #[allow(dead_code)] // Maintenance operation, exercised in tests
    pub async fn rename_lookup_name(
        &self,
        lookup: Lookup,
        old: &str,
        new: &str,
    ) -> Result<(), StoreError> {
        self.update_rows(lookup.table(), lookup.column(), old, &name_row(lookup, new))
            .await
    }

    /// Remove a name from a lookup table.
    #[allow(dead_code)] // Maintenance operation, exercised in tests
    pub async fn remove_lookup_name(&self, lookup: Lookup, name: &str) -> Result<(), StoreError> {
        self.delete_rows(lookup.table(), lookup.column(), name).await
    }
}

/// Single-column row for a lookup table, keyed by the table's name column.
fn name_row(lookup: Lookup, name: &str) -> serde_json::Value {
    let mut row = serde_json::Map::new();
    row.insert(
        lookup.column().to_string(),
        serde_json::Value::String(name.to_string()),
    );
    serde_json::Value::Object(row)
}

async fn check_status(
    response: reqwest::Response,
    table: &str,
) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status,
        table: table.to_string(),
        body,
    })
}
