//! Markdown report generation.
//!
//! This module renders the aggregated chart data as a Markdown document:
//! one table per row set, with the per-status breakdown spread across
//! columns the way the dashboard stacks its bars.

use crate::models::{AnalyticsReport, ChartBundle, ChartRow, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &AnalyticsReport) -> String {
    let mut output = String::new();

    output.push_str("# Asset Analytics Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_base_section(&report.charts));
    output.push_str(&generate_drilldown_section(&report.charts));
    output.push_str(&generate_selection_section(&report.selected_models, &report.charts));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report. The chart bundle keeps the dashboard's field
/// names (`byLocation`, `filteredQuantity`, ...) and flat row shape.
pub fn generate_json_report(report: &AnalyticsReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Store:** {}\n", metadata.store_url));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Mode:** {}\n", metadata.mode));
    if !metadata.filters.is_empty() {
        section.push_str(&format!("- **Filters:** {}\n", metadata.filters.join(", ")));
    }
    if metadata.selected_ids > 0 {
        section.push_str(&format!("- **Selected Ids:** {}\n", metadata.selected_ids));
    }
    section.push_str(&format!("- **Total Assets:** {}\n", metadata.total_assets));
    section.push_str(&format!(
        "- **{}:** {}\n",
        metadata.headline.label, metadata.headline.count
    ));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the four base tables.
fn generate_base_section(charts: &ChartBundle) -> String {
    let mut section = String::new();

    section.push_str("## Inventory Overview\n\n");

    section.push_str("### Assets by Location\n\n");
    section.push_str(&stacked_table(&charts.by_location, &charts.statuses));

    section.push_str("### Assets by Type\n\n");
    section.push_str(&stacked_table(&charts.by_type, &charts.statuses));

    section.push_str("### Top Models\n\n");
    section.push_str(&stacked_table(&charts.by_model, &charts.statuses));

    section.push_str("### Assets by Status\n\n");
    section.push_str(&simple_table(&charts.by_status));

    section
}

/// Generate the drill-down tables that are active for the current filters.
fn generate_drilldown_section(charts: &ChartBundle) -> String {
    let mut section = String::new();

    if !charts.by_location_and_type.is_empty() || !charts.by_location_and_model.is_empty() {
        section.push_str("## Location Drill-Down\n\n");

        if !charts.by_location_and_type.is_empty() {
            section.push_str("### Types at This Location\n\n");
            section.push_str(&simple_table(&charts.by_location_and_type));
        }
        if !charts.by_location_and_model.is_empty() {
            section.push_str("### Top Models at This Location\n\n");
            section.push_str(&simple_table(&charts.by_location_and_model));
        }
    }

    if !charts.filtered_breakdown.is_empty()
        || !charts.filtered_status.is_empty()
        || !charts.filtered_quantity.is_empty()
    {
        section.push_str("## Filtered View\n\n");

        if !charts.filtered_breakdown.is_empty() {
            section.push_str("### Distribution by Location\n\n");
            section.push_str(&stacked_table(&charts.filtered_breakdown, &charts.statuses));
        }
        if !charts.filtered_status.is_empty() {
            section.push_str("### Status Breakdown\n\n");
            section.push_str(&simple_table(&charts.filtered_status));
        }
        if !charts.filtered_quantity.is_empty() {
            section.push_str("### Quantity by Model\n\n");
            section.push_str(&stacked_table(&charts.filtered_quantity, &charts.statuses));
        }
    }

    section
}

/// Generate the selection-mode model table.
fn generate_selection_section(selected_models: &[ChartRow], charts: &ChartBundle) -> String {
    if selected_models.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Selected Assets by Model\n\n");
    section.push_str(&stacked_table(selected_models, &charts.statuses));
    section
}

/// Render rows with one column per observed status.
fn stacked_table(rows: &[ChartRow], statuses: &[String]) -> String {
    if rows.is_empty() {
        return "_No data._\n\n".to_string();
    }

    let mut table = String::new();

    table.push_str("| Name | Count |");
    for status in statuses {
        table.push_str(&format!(" {} |", status));
    }
    table.push('\n');

    table.push_str("|:---|:---:|");
    for _ in statuses {
        table.push_str(":---:|");
    }
    table.push('\n');

    for row in rows {
        table.push_str(&format!("| {} | {} |", display_name(&row.name), row.count));
        for status in statuses {
            table.push_str(&format!(" {} |", row.status_count(status)));
        }
        table.push('\n');
    }
    table.push('\n');

    table
}

/// Render rows as a plain name/count table.
fn simple_table(rows: &[ChartRow]) -> String {
    if rows.is_empty() {
        return "_No data._\n\n".to_string();
    }

    let mut table = String::new();
    table.push_str("| Name | Count |\n");
    table.push_str("|:---|:---:|\n");
    for row in rows {
        table.push_str(&format!("| {} | {} |\n", display_name(&row.name), row.count));
    }
    table.push('\n');

    table
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unset)"
    } else {
        name
    }
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by assetlens*\n");

    footer
}
