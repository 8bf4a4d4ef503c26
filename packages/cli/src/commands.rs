//! Implementations of the CLI subcommands.

use std::path::Path;
use std::sync::Arc;

use malaria_dash_analytics_models::EdaSummary;
use malaria_dash_cli_utils::{IndicatifProgress, MultiProgress};
use malaria_dash_config::DashboardConfig;
use malaria_dash_dashboard::{Dashboard, DashboardError};

/// Loads the dashboard with a progress bar over the three datasets.
fn load(multi: &MultiProgress, config: &DashboardConfig) -> Result<Dashboard, DashboardError> {
    let progress = IndicatifProgress::steps_bar(multi, "Loading datasets");
    Dashboard::load(config, &progress).inspect_err(|e| log::error!("{e}"))
}

/// Loads the datasets, then serves until stopped.
///
/// # Errors
///
/// Returns an error if loading fails or the server cannot bind.
pub fn serve(
    multi: &MultiProgress,
    config: &DashboardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = Arc::new(load(multi, config)?);
    actix_web::rt::System::new().block_on(malaria_dash_server::serve(config, dashboard))?;
    Ok(())
}

/// Prints the exploratory summary.
///
/// # Errors
///
/// Returns an error if loading fails.
pub fn summary(
    multi: &MultiProgress,
    config: &DashboardConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load(multi, config)?;
    let summary = dashboard.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", format_summary(summary));
    }

    Ok(())
}

/// Writes every chart to `out` as JSON.
///
/// # Errors
///
/// Returns an error if loading fails or a file cannot be written.
pub fn export(
    multi: &MultiProgress,
    config: &DashboardConfig,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load(multi, config)?;
    let report = malaria_dash_dashboard::export::export_charts(&dashboard, out)?;
    println!("Wrote {} files to {}", report.files.len(), out.display());
    Ok(())
}

fn format_summary(summary: &EdaSummary) -> String {
    let (first, last) = summary.year_range().unwrap_or_default();
    format!(
        "Exploratory Data Analysis (EDA) Summary\n\
         Years: {first}-{last} ({} countries, {} regions)\n\
         Average Malaria Death Rate (per 100,000 people): {}\n\
         The year with the highest malaria death rate: {} at {} with a rate of {}.",
        summary.country_count,
        summary.region_count,
        summary.average_rate,
        summary.max_rate_year,
        summary.max_rate_entity,
        summary.max_rate
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_text_mentions_max_and_average() {
        let summary = EdaSummary {
            years: vec![2000, 2001],
            entities: vec!["CountryA".to_string(), "CountryB".to_string()],
            country_count: 2,
            region_count: 0,
            average_rate: 5.17,
            max_rate: 7.5,
            max_rate_entity: "CountryA".to_string(),
            max_rate_year: 2001,
        };
        let text = format_summary(&summary);
        assert!(text.contains("Years: 2000-2001 (2 countries, 0 regions)"));
        assert!(text.contains("(per 100,000 people): 5.17"));
        assert!(text.contains("highest malaria death rate: 2001 at CountryA with a rate of 7.5."));
    }
}
