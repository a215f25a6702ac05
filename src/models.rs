//! Data models for the asset inventory.
//!
//! This module contains all the core data structures used throughout
//! the application for representing inventory records, chart rows, and
//! reports. Field renames mirror the column names of the backing store,
//! which uses human-readable headers with embedded spaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One inventory record: one or more physical units of a model at a location.
///
/// The grouping fields (`model`, `office_location`, `asset_type`, `status`)
/// are free-text references to the lookup tables; the store does not enforce
/// them as foreign keys. A record missing one of them still deserializes,
/// with an empty string as the group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Store-assigned row id. Unique and immutable.
    pub id: i64,
    #[serde(rename = "Model", default)]
    pub model: String,
    #[serde(rename = "Office Location", default)]
    pub office_location: String,
    #[serde(rename = "Asset Type", default)]
    pub asset_type: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    /// Units this record represents. `None` counts as one unit in item-count
    /// aggregations and as zero in quantity sums. Kept as a float so that a
    /// store delivering fractional values still aggregates (sums are floored
    /// after accumulation).
    #[serde(rename = "Quantity", default)]
    pub quantity: Option<f64>,
    /// Free text, shown as "Assigned To/Notes" in the UI.
    #[serde(rename = "Serial Tag", default)]
    pub assigned_notes: Option<String>,
    #[serde(rename = "Company ID", default)]
    pub company_id: Option<String>,
    /// Set once at creation, never mutated by updates.
    #[serde(rename = "Date Added", default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl Asset {
    /// Units this record contributes to item-count aggregations.
    pub fn unit_count(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }

    /// Units this record contributes to raw quantity sums.
    pub fn raw_quantity(&self) -> f64 {
        self.quantity.unwrap_or(0.0)
    }
}

/// Fields for a new asset row. `date_added` is stamped by the caller at
/// creation time; updates go through [`AssetChanges`] and can never touch it.
#[derive(Debug, Clone, Serialize)]
pub struct NewAsset {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Office Location")]
    pub office_location: String,
    #[serde(rename = "Asset Type")]
    pub asset_type: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Quantity")]
    pub quantity: Option<f64>,
    #[serde(rename = "Serial Tag")]
    pub assigned_notes: Option<String>,
    #[serde(rename = "Company ID")]
    pub company_id: Option<String>,
    #[serde(rename = "Date Added")]
    pub date_added: DateTime<Utc>,
}

/// Mutable fields of an asset row, for update-by-id.
#[derive(Debug, Clone, Serialize)]
pub struct AssetChanges {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Office Location")]
    pub office_location: String,
    #[serde(rename = "Asset Type")]
    pub asset_type: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Quantity")]
    pub quantity: Option<f64>,
    #[serde(rename = "Serial Tag")]
    pub assigned_notes: Option<String>,
    #[serde(rename = "Company ID")]
    pub company_id: Option<String>,
}

/// Row of the `Models` lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(rename = "Model Name")]
    pub name: String,
}

/// Row of the `Office Locations` lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeLocationRecord {
    #[serde(rename = "Office Name")]
    pub name: String,
}

/// Row of the `Asset Types` lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetTypeRecord {
    #[serde(rename = "Type")]
    pub name: String,
}

/// Row of the `Asset Status` lookup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetStatusRecord {
    #[serde(rename = "Status Type")]
    pub name: String,
}

/// The full inventory snapshot: the asset list plus the four lookup tables,
/// fetched together in one round of parallel requests.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub assets: Vec<Asset>,
    pub models: Vec<String>,
    pub locations: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
}

/// One of the four grouping dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Location,
    Type,
    Model,
    Status,
}

impl Dimension {
    /// The asset field this dimension groups by.
    pub fn key<'a>(&self, asset: &'a Asset) -> &'a str {
        match self {
            Dimension::Location => &asset.office_location,
            Dimension::Type => &asset.asset_type,
            Dimension::Model => &asset.model,
            Dimension::Status => &asset.status,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Location => write!(f, "Location"),
            Dimension::Type => write!(f, "Type"),
            Dimension::Model => write!(f, "Model"),
            Dimension::Status => write!(f, "Status"),
        }
    }
}

/// One chart-ready row: a dimension value, its total count, and a per-status
/// sub-breakdown for stacked rendering. The status map is flattened on
/// serialization so the JSON shape is `{"name": .., "count": .., "Stock": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub name: String,
    pub count: u64,
    #[serde(flatten)]
    pub statuses: BTreeMap<String, u64>,
}

impl ChartRow {
    /// Count attributed to a given status, zero when absent.
    pub fn status_count(&self, status: &str) -> u64 {
        self.statuses.get(status).copied().unwrap_or(0)
    }
}

/// The full derived bundle of chart-ready row sets. All fields are always
/// present; row sets not applicable to the current mode/filter combination
/// are empty. Recomputed wholesale on every input change, never mutated in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    pub by_location: Vec<ChartRow>,
    pub by_type: Vec<ChartRow>,
    pub by_model: Vec<ChartRow>,
    pub by_status: Vec<ChartRow>,
    pub by_location_and_type: Vec<ChartRow>,
    pub by_location_and_model: Vec<ChartRow>,
    pub filtered_breakdown: Vec<ChartRow>,
    pub filtered_status: Vec<ChartRow>,
    pub filtered_quantity: Vec<ChartRow>,
    /// Distinct status values observed in the data source, in first-occurrence
    /// order. Drives the column set of stacked tables.
    pub statuses: Vec<String>,
}

impl ChartBundle {
    /// Total item count across one dimension table. Dimension-invariant:
    /// every asset has exactly one location and one status, so the same
    /// total falls out of `by_location` and `by_status`.
    pub fn total_of(rows: &[ChartRow]) -> u64 {
        rows.iter().map(|r| r.count).sum()
    }
}

/// Metadata about an analytics report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// URL of the backing store.
    pub store_url: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Mode the engine ran in (`filter` or `selection`).
    pub mode: String,
    /// Active dimension filters, if any.
    pub filters: Vec<String>,
    /// Number of ids in the selection set, if in selection mode.
    pub selected_ids: usize,
    /// Total asset records fetched.
    pub total_assets: usize,
    /// Headline shown on the dashboard's stat header.
    pub headline: Headline,
    /// Duration of fetch plus aggregation in seconds.
    pub duration_seconds: f64,
}

/// The dashboard's headline figure: which record count is front and center
/// given the current mode and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub label: String,
    pub count: usize,
}

/// The complete analytics report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub metadata: ReportMetadata,
    pub charts: ChartBundle,
    /// Selection-mode model table; empty outside selection mode.
    pub selected_models: Vec<ChartRow>,
}
