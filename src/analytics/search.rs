//! Search and grouping helpers for the selection browser.
//!
//! These back the free-text search box and the grouped list views that sit
//! next to the charts. Matching is case-insensitive substring over the four
//! dimension fields; this is intentionally looser than the engine's
//! exact-match filters.

use crate::models::{Asset, Dimension};

/// True when any dimension field of `asset` contains `query`,
/// case-insensitively. An empty query matches everything.
#[allow(dead_code)] // Selection-browser helper, exercised in tests
pub fn asset_matches(asset: &Asset, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    [
        &asset.model,
        &asset.office_location,
        &asset.asset_type,
        &asset.status,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&query))
}

/// Assets matching the search query, in list order.
#[allow(dead_code)] // Selection-browser helper, exercised in tests
pub fn search_assets<'a>(assets: &'a [Asset], query: &str) -> Vec<&'a Asset> {
    assets.iter().filter(|a| asset_matches(a, query)).collect()
}

/// Group the matching assets by one dimension, groups sorted alphabetically
/// by name. Assets keep their list order within each group.
#[allow(dead_code)] // Selection-browser helper, exercised in tests
pub fn group_by_dimension<'a>(
    assets: &'a [Asset],
    query: &str,
    dimension: Dimension,
) -> Vec<(String, Vec<&'a Asset>)> {
    let mut groups: Vec<(String, Vec<&'a Asset>)> = Vec::new();

    for asset in search_assets(assets, query) {
        let key = dimension.key(asset);
        match groups.iter_mut().find(|(name, _)| name == key) {
            Some((_, members)) => members.push(asset),
            None => groups.push((key.to_string(), vec![asset])),
        }
    }

    groups.sort_by(|a, b| a.0.cmp(&b.0));
    groups
}
