//! The aggregation engine.
//!
//! A pure, synchronous pass over the asset list that derives every
//! chart-ready row set for the dashboard. The engine performs no I/O and
//! cannot fail: empty input produces an all-empty bundle, and records with
//! missing fields degrade per the unit-count rules on [`Asset`].
//!
//! Scoping is deliberately asymmetric. The four base tables (by location,
//! type, model, status) are always computed over the *unfiltered* data
//! source so they stay stable while a filter is being explored; only the
//! drill-down tables use the filtered set. Preserved as observed in the
//! production dashboard rather than normalized.

use crate::analytics::selection::SelectionSet;
use crate::models::{Asset, ChartBundle, ChartRow, Dimension, Headline};
use std::collections::HashMap;

/// The model table keeps only the ten largest groups.
const TOP_MODELS: usize = 10;
/// The model-within-location drill-down keeps only the eight largest groups.
const TOP_LOCATION_MODELS: usize = 8;

/// Which population the engine aggregates over.
///
/// Filter mode narrows drill-downs by dimension equality; selection mode
/// narrows everything to a hand-picked set of asset ids. The two are
/// mutually exclusive: each mode ignores the other mode's state entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsMode {
    #[default]
    Filter,
    Selection,
}

impl AnalyticsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsMode::Filter => "filter",
            AnalyticsMode::Selection => "selection",
        }
    }
}

/// Optional equality filters on the three drill-down dimensions, combined
/// with AND semantics. Values are matched exactly; normalization (trimming,
/// case) is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub location: Option<String>,
    pub asset_type: Option<String>,
    pub model: Option<String>,
}

impl FilterCriteria {
    /// True when any of the three filters is set.
    pub fn is_active(&self) -> bool {
        self.location.is_some() || self.asset_type.is_some() || self.model.is_some()
    }

    /// True when a type or model filter is set (the location-breakdown
    /// drill-down trigger).
    pub fn has_type_or_model(&self) -> bool {
        self.asset_type.is_some() || self.model.is_some()
    }

    fn matches(&self, asset: &Asset) -> bool {
        if let Some(ref location) = self.location {
            if asset.office_location != *location {
                return false;
            }
        }
        if let Some(ref asset_type) = self.asset_type {
            if asset.asset_type != *asset_type {
                return false;
            }
        }
        if let Some(ref model) = self.model {
            if asset.model != *model {
                return false;
            }
        }
        true
    }

    /// Human-readable `dimension=value` pairs for the active filters.
    pub fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(ref location) = self.location {
            parts.push(format!("location={}", location));
        }
        if let Some(ref asset_type) = self.asset_type {
            parts.push(format!("type={}", asset_type));
        }
        if let Some(ref model) = self.model {
            parts.push(format!("model={}", model));
        }
        parts
    }
}

/// Group totals accumulated in first-encounter order. Sums stay fractional
/// until emission, where both the total and each per-status sub-total are
/// floored to integers.
#[derive(Default)]
struct GroupTotals {
    order: Vec<String>,
    index: HashMap<String, usize>,
    totals: Vec<f64>,
    status_totals: Vec<Vec<(String, f64)>>,
}

impl GroupTotals {
    fn add(&mut self, key: &str, status: Option<&str>, amount: f64) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.order.len();
                self.order.push(key.to_string());
                self.index.insert(key.to_string(), slot);
                self.totals.push(0.0);
                self.status_totals.push(Vec::new());
                slot
            }
        };
        self.totals[slot] += amount;

        if let Some(status) = status {
            let sub = &mut self.status_totals[slot];
            match sub.iter_mut().find(|(name, _)| name == status) {
                Some((_, total)) => *total += amount,
                None => sub.push((status.to_string(), amount)),
            }
        }
    }

    fn into_rows(self) -> Vec<ChartRow> {
        self.order
            .into_iter()
            .zip(self.totals)
            .zip(self.status_totals)
            .map(|((name, total), sub)| ChartRow {
                name,
                count: total.floor() as u64,
                statuses: sub
                    .into_iter()
                    .map(|(status, total)| (status, total.floor() as u64))
                    .collect(),
            })
            .collect()
    }
}

/// Group `assets` by `dimension`, weighting each record by `weight`.
/// Rows come back in first-encounter order; `with_status` adds the
/// per-status sub-breakdown using the same weight.
fn tally<'a, I>(
    assets: I,
    dimension: Dimension,
    weight: fn(&Asset) -> f64,
    with_status: bool,
) -> Vec<ChartRow>
where
    I: IntoIterator<Item = &'a Asset>,
{
    let mut totals = GroupTotals::default();
    for asset in assets {
        let status = with_status.then_some(asset.status.as_str());
        totals.add(dimension.key(asset), status, weight(asset));
    }
    totals.into_rows()
}

/// Stable descending sort by count; ties keep first-encounter order.
fn sort_descending(rows: &mut [ChartRow]) {
    rows.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Derive the full chart bundle from the current inputs.
///
/// In selection mode the data source is the selected subset and `filter` is
/// ignored; in filter mode the data source is the full list and `selection`
/// is ignored. Calling twice with identical inputs yields identical output.
pub fn build_chart_data(
    assets: &[Asset],
    mode: AnalyticsMode,
    filter: &FilterCriteria,
    selection: &SelectionSet,
) -> ChartBundle {
    let data_source: Vec<&Asset> = match mode {
        AnalyticsMode::Selection => assets.iter().filter(|a| selection.contains(a.id)).collect(),
        AnalyticsMode::Filter => assets.iter().collect(),
    };

    let filtered: Vec<&Asset> = match mode {
        AnalyticsMode::Filter => data_source
            .iter()
            .copied()
            .filter(|a| filter.matches(a))
            .collect(),
        AnalyticsMode::Selection => data_source.clone(),
    };

    let mut by_location = tally(
        data_source.iter().copied(),
        Dimension::Location,
        Asset::unit_count,
        true,
    );
    sort_descending(&mut by_location);

    let mut by_type = tally(
        data_source.iter().copied(),
        Dimension::Type,
        Asset::unit_count,
        true,
    );
    sort_descending(&mut by_type);

    let mut by_model = tally(
        data_source.iter().copied(),
        Dimension::Model,
        Asset::unit_count,
        true,
    );
    sort_descending(&mut by_model);
    by_model.truncate(TOP_MODELS);

    // Status table keeps first-occurrence order and no sub-breakdown.
    let by_status = tally(
        data_source.iter().copied(),
        Dimension::Status,
        Asset::unit_count,
        false,
    );

    let drilling = mode == AnalyticsMode::Filter;

    // Location-scoped drill-downs: only when location is the sole filter.
    // Scoped to the unfiltered data source restricted to that location.
    let (by_location_and_type, by_location_and_model) = match filter.location {
        Some(ref location) if drilling && !filter.has_type_or_model() => {
            let in_location = || {
                data_source
                    .iter()
                    .copied()
                    .filter(|a| a.office_location == *location)
            };

            let mut types_here = tally(in_location(), Dimension::Type, Asset::unit_count, false);
            sort_descending(&mut types_here);

            let mut models_here = tally(in_location(), Dimension::Model, Asset::unit_count, false);
            sort_descending(&mut models_here);
            models_here.truncate(TOP_LOCATION_MODELS);

            (types_here, models_here)
        }
        _ => (Vec::new(), Vec::new()),
    };

    // Where did the filtered assets end up? Only meaningful once a type or
    // model narrows the population.
    let filtered_breakdown = if drilling && filter.has_type_or_model() {
        let mut rows = tally(
            filtered.iter().copied(),
            Dimension::Location,
            Asset::unit_count,
            true,
        );
        sort_descending(&mut rows);
        rows
    } else {
        Vec::new()
    };

    let filtered_status = if drilling && filter.is_active() {
        tally(
            filtered.iter().copied(),
            Dimension::Status,
            Asset::unit_count,
            false,
        )
    } else {
        Vec::new()
    };

    // The one quantity-sum table: a missing quantity contributes zero here,
    // not one.
    let filtered_quantity = if drilling && filter.is_active() {
        let mut rows = tally(
            filtered.iter().copied(),
            Dimension::Model,
            Asset::raw_quantity,
            true,
        );
        sort_descending(&mut rows);
        rows
    } else {
        Vec::new()
    };

    let statuses = distinct_statuses(&data_source);

    ChartBundle {
        by_location,
        by_type,
        by_model,
        by_status,
        by_location_and_type,
        by_location_and_model,
        filtered_breakdown,
        filtered_status,
        filtered_quantity,
        statuses,
    }
}

/// Distinct non-empty status values in first-occurrence order.
fn distinct_statuses(assets: &[&Asset]) -> Vec<String> {
    let mut seen = Vec::new();
    for asset in assets {
        if asset.status.is_empty() {
            continue;
        }
        if !seen.iter().any(|s| s == &asset.status) {
            seen.push(asset.status.clone());
        }
    }
    seen
}

/// The selection-mode model table: per-model counts with status breakdown
/// over the selected assets only. Sorted descending by count and, unlike the
/// bundle's model table, never truncated. Empty when nothing is selected.
pub fn selected_models_data(assets: &[Asset], selection: &SelectionSet) -> Vec<ChartRow> {
    if selection.is_empty() {
        return Vec::new();
    }

    let mut rows = tally(
        assets.iter().filter(|a| selection.contains(a.id)),
        Dimension::Model,
        Asset::unit_count,
        true,
    );
    sort_descending(&mut rows);
    rows
}

/// The stat-header figure: which record count leads the dashboard.
///
/// Counts here are record counts, not unit counts. Filter precedence when
/// several are set: model, then type, then location.
pub fn headline(
    assets: &[Asset],
    mode: AnalyticsMode,
    filter: &FilterCriteria,
    selection: &SelectionSet,
) -> Headline {
    if mode == AnalyticsMode::Selection {
        let count = selection.len();
        let label = if count == 1 {
            "Selected Asset".to_string()
        } else {
            "Selected Assets".to_string()
        };
        return Headline { label, count };
    }

    if let Some(ref model) = filter.model {
        return Headline {
            label: format!("{} (Model)", model),
            count: assets.iter().filter(|a| a.model == *model).count(),
        };
    }
    if let Some(ref asset_type) = filter.asset_type {
        return Headline {
            label: format!("{} (Type)", asset_type),
            count: assets.iter().filter(|a| a.asset_type == *asset_type).count(),
        };
    }
    if let Some(ref location) = filter.location {
        return Headline {
            label: format!("{} (Location)", location),
            count: assets
                .iter()
                .filter(|a| a.office_location == *location)
                .count(),
        };
    }

    Headline {
        label: "Total Assets".to_string(),
        count: assets.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartBundle;

    fn asset(id: i64, model: &str, location: &str, asset_type: &str, status: &str) -> Asset {
        Asset {
            id,
            model: model.to_string(),
            office_location: location.to_string(),
            asset_type: asset_type.to_string(),
            status: status.to_string(),
            quantity: None,
            assigned_notes: None,
            company_id: None,
            date_added: None,
        }
    }

    fn asset_with_qty(
        id: i64,
        model: &str,
        location: &str,
        asset_type: &str,
        status: &str,
        quantity: f64,
    ) -> Asset {
        Asset {
            quantity: Some(quantity),
            ..asset(id, model, location, asset_type, status)
        }
    }

    fn no_filter() -> FilterCriteria {
        FilterCriteria::default()
    }

    fn location_filter(location: &str) -> FilterCriteria {
        FilterCriteria {
            location: Some(location.to_string()),
            ..FilterCriteria::default()
        }
    }

    fn model_filter(model: &str) -> FilterCriteria {
        FilterCriteria {
            model: Some(model.to_string()),
            ..FilterCriteria::default()
        }
    }

    /// The two-asset fixture from the dashboard: one quantified, one not.
    fn two_laptops() -> Vec<Asset> {
        vec![
            asset_with_qty(1, "X", "A", "Laptop", "Stock", 2.0),
            asset(2, "X", "B", "Laptop", "Deployed"),
        ]
    }

    #[test]
    fn test_empty_assets_all_empty() {
        let bundle = build_chart_data(
            &[],
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );
        assert_eq!(bundle, ChartBundle::default());
    }

    #[test]
    fn test_model_table_merges_across_locations() {
        let bundle = build_chart_data(
            &two_laptops(),
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        assert_eq!(bundle.by_model.len(), 1);
        let row = &bundle.by_model[0];
        assert_eq!(row.name, "X");
        assert_eq!(row.count, 3);
        assert_eq!(row.status_count("Stock"), 2);
        assert_eq!(row.status_count("Deployed"), 1);
    }

    #[test]
    fn test_location_rows_split_before_status() {
        let bundle = build_chart_data(
            &two_laptops(),
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        assert_eq!(bundle.by_location.len(), 2);
        let a = bundle.by_location.iter().find(|r| r.name == "A").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.status_count("Stock"), 2);
        let b = bundle.by_location.iter().find(|r| r.name == "B").unwrap();
        assert_eq!(b.count, 1);
        assert_eq!(b.status_count("Deployed"), 1);
    }

    #[test]
    fn test_quantity_default_asymmetry() {
        // Missing quantity counts as one unit in the model table but as zero
        // in the quantity sum.
        let bundle = build_chart_data(
            &two_laptops(),
            AnalyticsMode::Filter,
            &model_filter("X"),
            &SelectionSet::new(),
        );

        assert_eq!(bundle.by_model[0].count, 3);
        assert_eq!(bundle.filtered_quantity.len(), 1);
        let qty = &bundle.filtered_quantity[0];
        assert_eq!(qty.name, "X");
        assert_eq!(qty.count, 2);
        assert_eq!(qty.status_count("Stock"), 2);
        assert_eq!(qty.status_count("Deployed"), 0);
    }

    #[test]
    fn test_model_table_truncated_to_top_ten() {
        // Fifteen distinct models; five heavy, ten light. The light ones tie
        // and break by first encounter.
        let mut assets = Vec::new();
        let mut id = 0;
        for m in 0..5 {
            for _ in 0..3 {
                id += 1;
                assets.push(asset(id, &format!("big-{}", m), "A", "Laptop", "Stock"));
            }
        }
        for m in 0..10 {
            id += 1;
            assets.push(asset(id, &format!("small-{}", m), "A", "Laptop", "Stock"));
        }

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        assert_eq!(bundle.by_model.len(), 10);
        for m in 0..5 {
            assert_eq!(bundle.by_model[m].name, format!("big-{}", m));
            assert_eq!(bundle.by_model[m].count, 3);
        }
        // Ties fill the remaining five slots in encounter order.
        for m in 0..5 {
            assert_eq!(bundle.by_model[5 + m].name, format!("small-{}", m));
            assert_eq!(bundle.by_model[5 + m].count, 1);
        }
    }

    #[test]
    fn test_status_table_keeps_first_occurrence_order() {
        let assets = vec![
            asset(1, "X", "A", "Laptop", "Deployed"),
            asset(2, "X", "A", "Laptop", "Stock"),
            asset(3, "X", "A", "Laptop", "Deployed"),
            asset(4, "X", "A", "Laptop", "Repair"),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        let names: Vec<_> = bundle.by_status.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Deployed", "Stock", "Repair"]);
        assert_eq!(bundle.statuses, vec!["Deployed", "Stock", "Repair"]);
        // No sub-breakdown on the status table itself.
        assert!(bundle.by_status.iter().all(|r| r.statuses.is_empty()));
    }

    #[test]
    fn test_filters_compose_with_and_semantics() {
        let assets = vec![
            asset(1, "X", "A", "Laptop", "Stock"),
            asset(2, "X", "B", "Laptop", "Stock"),
            asset(3, "Y", "A", "Monitor", "Stock"),
        ];
        let filter = FilterCriteria {
            location: Some("A".to_string()),
            asset_type: Some("Laptop".to_string()),
            model: None,
        };

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &filter,
            &SelectionSet::new(),
        );

        // Only asset 1 matches both; the status drill-down reflects that.
        assert_eq!(bundle.filtered_status.len(), 1);
        assert_eq!(bundle.filtered_status[0].name, "Stock");
        assert_eq!(bundle.filtered_status[0].count, 1);
    }

    #[test]
    fn test_base_tables_ignore_filters() {
        // The base charts stay stable while a filter narrows the drill-downs.
        let assets = vec![
            asset(1, "X", "A", "Laptop", "Stock"),
            asset(2, "Y", "B", "Monitor", "Stock"),
        ];

        let unfiltered = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );
        let filtered = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &model_filter("X"),
            &SelectionSet::new(),
        );

        assert_eq!(unfiltered.by_location, filtered.by_location);
        assert_eq!(unfiltered.by_type, filtered.by_type);
        assert_eq!(unfiltered.by_model, filtered.by_model);
        assert_eq!(unfiltered.by_status, filtered.by_status);
        // While the drill-down sees only the matching asset.
        assert_eq!(filtered.filtered_breakdown.len(), 1);
        assert_eq!(filtered.filtered_breakdown[0].name, "A");
    }

    #[test]
    fn test_location_drilldowns_require_sole_location_filter() {
        let assets = vec![
            asset_with_qty(1, "X", "A", "Laptop", "Stock", 4.0),
            asset(2, "Y", "A", "Monitor", "Stock"),
            asset(3, "X", "B", "Laptop", "Stock"),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &location_filter("A"),
            &SelectionSet::new(),
        );

        let type_names: Vec<_> = bundle
            .by_location_and_type
            .iter()
            .map(|r| (r.name.as_str(), r.count))
            .collect();
        assert_eq!(type_names, vec![("Laptop", 4), ("Monitor", 1)]);
        let model_names: Vec<_> = bundle
            .by_location_and_model
            .iter()
            .map(|r| (r.name.as_str(), r.count))
            .collect();
        assert_eq!(model_names, vec![("X", 4), ("Y", 1)]);
        // Simple counts, no status columns.
        assert!(bundle.by_location_and_type.iter().all(|r| r.statuses.is_empty()));

        // Adding a type filter turns the location-scoped tables off.
        let with_type = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &FilterCriteria {
                location: Some("A".to_string()),
                asset_type: Some("Laptop".to_string()),
                model: None,
            },
            &SelectionSet::new(),
        );
        assert!(with_type.by_location_and_type.is_empty());
        assert!(with_type.by_location_and_model.is_empty());
        // But the status and quantity drill-downs stay on.
        assert!(!with_type.filtered_status.is_empty());
        assert!(!with_type.filtered_quantity.is_empty());
    }

    #[test]
    fn test_location_models_truncated_to_eight() {
        let mut assets = Vec::new();
        for m in 0..12 {
            // Descending counts so the cut is unambiguous.
            for i in 0..(12 - m) {
                assets.push(asset(
                    (m * 100 + i) as i64,
                    &format!("model-{}", m),
                    "A",
                    "Laptop",
                    "Stock",
                ));
            }
        }

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &location_filter("A"),
            &SelectionSet::new(),
        );

        assert_eq!(bundle.by_location_and_model.len(), 8);
        assert_eq!(bundle.by_location_and_model[0].name, "model-0");
        assert_eq!(bundle.by_location_and_model[7].name, "model-7");
    }

    #[test]
    fn test_location_filter_alone_triggers_status_and_quantity() {
        let assets = vec![
            asset_with_qty(1, "X", "A", "Laptop", "Stock", 2.0),
            asset(2, "Y", "B", "Monitor", "Deployed"),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &location_filter("A"),
            &SelectionSet::new(),
        );

        // Location alone does not produce the location breakdown...
        assert!(bundle.filtered_breakdown.is_empty());
        // ...but does produce the status and quantity drill-downs, scoped to
        // the filtered set.
        assert_eq!(bundle.filtered_status.len(), 1);
        assert_eq!(bundle.filtered_status[0].name, "Stock");
        assert_eq!(bundle.filtered_quantity.len(), 1);
        assert_eq!(bundle.filtered_quantity[0].count, 2);
    }

    #[test]
    fn test_mode_isolation() {
        let assets = two_laptops();
        let mut selection = SelectionSet::new();
        selection.toggle(1);

        // Filter mode: the selection set is invisible.
        let with_selection = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &selection,
        );
        let without_selection = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );
        assert_eq!(with_selection, without_selection);

        // Selection mode: the filter is invisible.
        let with_filter = build_chart_data(
            &assets,
            AnalyticsMode::Selection,
            &model_filter("nonexistent"),
            &selection,
        );
        let without_filter = build_chart_data(
            &assets,
            AnalyticsMode::Selection,
            &no_filter(),
            &selection,
        );
        assert_eq!(with_filter, without_filter);
    }

    #[test]
    fn test_selection_mode_scopes_all_base_tables() {
        let assets = two_laptops();
        let mut selection = SelectionSet::new();
        selection.toggle(2);

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Selection,
            &no_filter(),
            &selection,
        );

        assert_eq!(bundle.by_location.len(), 1);
        assert_eq!(bundle.by_location[0].name, "B");
        assert_eq!(bundle.by_model[0].count, 1);
        assert_eq!(bundle.statuses, vec!["Deployed"]);
        // Drill-downs never fire in selection mode.
        assert!(bundle.filtered_breakdown.is_empty());
        assert!(bundle.filtered_status.is_empty());
        assert!(bundle.filtered_quantity.is_empty());
    }

    #[test]
    fn test_status_totals_match_location_totals() {
        let assets = vec![
            asset_with_qty(1, "X", "A", "Laptop", "Stock", 2.0),
            asset(2, "X", "B", "Laptop", "Deployed"),
            asset_with_qty(3, "Y", "A", "Monitor", "Repair", 5.0),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        assert_eq!(
            ChartBundle::total_of(&bundle.by_status),
            ChartBundle::total_of(&bundle.by_location)
        );
    }

    #[test]
    fn test_idempotence() {
        let assets = vec![
            asset_with_qty(1, "X", "A", "Laptop", "Stock", 2.0),
            asset(2, "Y", "B", "Monitor", "Deployed"),
            asset(3, "X", "A", "Laptop", "Repair"),
        ];
        let filter = location_filter("A");

        let first = build_chart_data(&assets, AnalyticsMode::Filter, &filter, &SelectionSet::new());
        let second =
            build_chart_data(&assets, AnalyticsMode::Filter, &filter, &SelectionSet::new());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_fractional_quantities_floor_after_summation() {
        let assets = vec![
            asset_with_qty(1, "X", "A", "Laptop", "Stock", 1.5),
            asset_with_qty(2, "X", "A", "Laptop", "Stock", 1.7),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        // 1.5 + 1.7 = 3.2, floored once after summation, not per record.
        assert_eq!(bundle.by_model[0].count, 3);
        assert_eq!(bundle.by_model[0].status_count("Stock"), 3);
    }

    #[test]
    fn test_missing_grouping_field_is_a_valid_group() {
        let assets = vec![
            Asset {
                model: String::new(),
                ..asset(1, "", "A", "Laptop", "Stock")
            },
            asset(2, "X", "A", "Laptop", "Stock"),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        assert_eq!(bundle.by_model.len(), 2);
        assert!(bundle.by_model.iter().any(|r| r.name.is_empty()));
    }

    #[test]
    fn test_empty_status_excluded_from_status_list() {
        let assets = vec![
            asset(1, "X", "A", "Laptop", ""),
            asset(2, "X", "A", "Laptop", "Stock"),
        ];

        let bundle = build_chart_data(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );

        // The empty status still forms a group in the status table...
        assert_eq!(bundle.by_status.len(), 2);
        // ...but is dropped from the stacked-column list.
        assert_eq!(bundle.statuses, vec!["Stock"]);
    }

    #[test]
    fn test_selected_models_data() {
        let assets = two_laptops();
        let mut selection = SelectionSet::new();
        selection.toggle(1);

        let rows = selected_models_data(&assets, &selection);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);

        // Scenario from the dashboard: toggling the second asset in pulls it
        // into the recomputation.
        selection.toggle(2);
        let rows = selected_models_data(&assets, &selection);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "X");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].status_count("Stock"), 2);
        assert_eq!(rows[0].status_count("Deployed"), 1);
    }

    #[test]
    fn test_selected_models_data_empty_selection() {
        assert!(selected_models_data(&two_laptops(), &SelectionSet::new()).is_empty());
    }

    #[test]
    fn test_selected_models_data_not_truncated() {
        let mut assets = Vec::new();
        let mut selection = SelectionSet::new();
        for m in 0..15 {
            assets.push(asset(m, &format!("model-{}", m), "A", "Laptop", "Stock"));
            selection.toggle(m);
        }

        assert_eq!(selected_models_data(&assets, &selection).len(), 15);
    }

    #[test]
    fn test_headline_precedence() {
        let assets = vec![
            asset(1, "X", "A", "Laptop", "Stock"),
            asset(2, "Y", "A", "Monitor", "Stock"),
        ];

        let all = headline(
            &assets,
            AnalyticsMode::Filter,
            &no_filter(),
            &SelectionSet::new(),
        );
        assert_eq!(all.label, "Total Assets");
        assert_eq!(all.count, 2);

        // Model wins over type and location.
        let filter = FilterCriteria {
            location: Some("A".to_string()),
            asset_type: Some("Laptop".to_string()),
            model: Some("X".to_string()),
        };
        let by_model = headline(&assets, AnalyticsMode::Filter, &filter, &SelectionSet::new());
        assert_eq!(by_model.label, "X (Model)");
        assert_eq!(by_model.count, 1);

        let mut selection = SelectionSet::new();
        selection.toggle(1);
        let selected = headline(
            &assets,
            AnalyticsMode::Selection,
            &filter,
            &selection,
        );
        assert_eq!(selected.label, "Selected Asset");
        assert_eq!(selected.count, 1);
        selection.toggle(2);
        let selected = headline(
            &assets,
            AnalyticsMode::Selection,
            &filter,
            &selection,
        );
        assert_eq!(selected.label, "Selected Assets");
        assert_eq!(selected.count, 2);
    }
}
