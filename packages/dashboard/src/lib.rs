#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The dashboard's application context.
//!
//! [`Dashboard`] is built once at startup: it loads the three datasets,
//! computes every derived series and the static charts, and is then shared
//! read-only with whoever serves them (the HTTP server, or the CLI export).
//! The only chart computed on demand is the map, through the pure
//! [`Dashboard::map_chart`].

pub mod export;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use malaria_dash_analytics::AnalyticsError;
use malaria_dash_analytics_models::{AgeGroupSeries, EdaSummary, TopNSet, YearlyTopNSeries};
use malaria_dash_chart::BarChartOptions;
use malaria_dash_chart_models::ChartSpec;
use malaria_dash_config::{AnalysisConfig, ConfigError, DashboardConfig};
use malaria_dash_dataset::DatasetError;
use malaria_dash_dataset::progress::ProgressCallback;
use malaria_dash_dataset_models::{Datasets, MortalityRecord};
use thiserror::Error;

/// Errors that can occur while building the dashboard or exporting it.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A dataset could not be read or parsed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A dataset was readable but insufficient.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Writing exported files failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing exported files failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loaded datasets plus everything derived from them.
#[derive(Debug)]
pub struct Dashboard {
    mortality: Vec<MortalityRecord>,
    summary: EdaSummary,
    age_groups: AgeGroupSeries,
    top_n: TopNSet,
    yearly: YearlyTopNSeries,
    age_group_chart: ChartSpec,
    incidence_charts: Vec<ChartSpec>,
    default_year: i32,
    loaded_at: DateTime<Utc>,
}

impl Dashboard {
    /// Loads the datasets named by `config` and builds the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if a dataset cannot be loaded or has
    /// insufficient data.
    pub fn load(
        config: &DashboardConfig,
        progress: &Arc<dyn ProgressCallback>,
    ) -> Result<Self, DashboardError> {
        let paths = config.data.paths();
        log::info!("Loading datasets from {}", config.data.dir.display());
        let datasets = malaria_dash_dataset::load_all(&paths, progress)?;
        Self::build(datasets, &config.analysis)
    }

    /// Computes every derived series and static chart from `datasets`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Analytics`] if a dataset is empty or the
    /// reference year is missing from the incidence data.
    pub fn build(datasets: Datasets, analysis: &AnalysisConfig) -> Result<Self, DashboardError> {
        let Datasets {
            mortality,
            age_deaths,
            incidence,
        } = datasets;

        let summary = malaria_dash_analytics::summarize(&mortality)?;
        let age_groups = malaria_dash_analytics::aggregate_by_age_group(&age_deaths)?;
        let top_n =
            malaria_dash_analytics::select_top_n(&incidence, analysis.reference_year, analysis.top_n)?;
        let yearly = malaria_dash_analytics::build_yearly_series(&incidence, &top_n);

        let bar_options = BarChartOptions {
            top_n: analysis.top_n,
            axis_max: analysis.incidence_axis_max,
        };
        let age_group_chart = malaria_dash_chart::age_group_line_chart(&age_groups);
        let incidence_charts = malaria_dash_chart::incidence_bar_charts(&yearly, &bar_options);

        let default_year = summary
            .year_range()
            .map_or(analysis.default_year, |(min, max)| {
                analysis.default_year.clamp(min, max)
            });
        if default_year != analysis.default_year {
            log::warn!(
                "Default year {} is outside the data, using {default_year}",
                analysis.default_year
            );
        }

        log::info!(
            "Dashboard ready: {} mortality rows over {} years, {} age groups, {} incidence charts",
            mortality.len(),
            summary.years.len(),
            age_groups.groups.len(),
            incidence_charts.len()
        );

        Ok(Self {
            mortality,
            summary,
            age_groups,
            top_n,
            yearly,
            age_group_chart,
            incidence_charts,
            default_year,
            loaded_at: Utc::now(),
        })
    }

    #[must_use]
    pub const fn summary(&self) -> &EdaSummary {
        &self.summary
    }

    #[must_use]
    pub const fn age_groups(&self) -> &AgeGroupSeries {
        &self.age_groups
    }

    #[must_use]
    pub const fn top_n(&self) -> &TopNSet {
        &self.top_n
    }

    #[must_use]
    pub const fn yearly_series(&self) -> &YearlyTopNSeries {
        &self.yearly
    }

    /// Distinct mortality years, ascending. This is the year selector's
    /// domain.
    #[must_use]
    pub fn years(&self) -> &[i32] {
        &self.summary.years
    }

    /// First and last mortality year.
    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.summary.year_range()
    }

    /// Whether `year` lies within the selector's `[min, max]` range.
    #[must_use]
    pub fn in_year_range(&self, year: i32) -> bool {
        self.year_range()
            .is_some_and(|(min, max)| (min..=max).contains(&year))
    }

    /// The year the map shows initially, clamped into the data's range.
    #[must_use]
    pub const fn default_year(&self) -> i32 {
        self.default_year
    }

    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Choropleth of mortality rates for `year`.
    ///
    /// Total over every year: a year without rows yields an empty map.
    #[must_use]
    pub fn map_chart(&self, year: i32) -> ChartSpec {
        let rates = malaria_dash_analytics::mortality_for_year(&self.mortality, year);
        malaria_dash_chart::map_chart(year, &rates)
    }

    #[must_use]
    pub const fn age_group_chart(&self) -> &ChartSpec {
        &self.age_group_chart
    }

    /// Bar charts for every incidence year, ascending by year.
    #[must_use]
    pub fn incidence_charts(&self) -> &[ChartSpec] {
        &self.incidence_charts
    }

    /// Bar chart for one incidence year.
    #[must_use]
    pub fn incidence_chart(&self, year: i32) -> Option<&ChartSpec> {
        let idx = self.yearly.by_year.keys().position(|&y| y == year)?;
        self.incidence_charts.get(idx)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use malaria_dash_chart_models::Trace;

    fn dashboard() -> Dashboard {
        Dashboard::build(fixtures::datasets(), &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn builds_summary_and_series() {
        let dash = dashboard();
        assert!((dash.summary().average_rate - 5.17).abs() < 1e-9);
        assert_eq!(dash.years(), &[2000, 2001]);
        assert_eq!(dash.top_n().entities, vec!["CountryB", "CountryA"]);
        assert_eq!(dash.age_groups().groups.len(), 2);
        assert_eq!(dash.incidence_charts().len(), 2);
    }

    #[test]
    fn default_year_is_clamped_into_range() {
        // 2016 is past the fixture's last year.
        assert_eq!(dashboard().default_year(), 2001);

        let analysis = AnalysisConfig {
            default_year: 2000,
            ..AnalysisConfig::default()
        };
        let dash = Dashboard::build(fixtures::datasets(), &analysis).unwrap();
        assert_eq!(dash.default_year(), 2000);
    }

    #[test]
    fn map_chart_is_pure() {
        let dash = dashboard();
        let a = dash.map_chart(2000);
        let b = dash.map_chart(2000);
        assert_eq!(a, b);
        let Trace::Choropleth(trace) = &a.data[0] else {
            panic!("expected choropleth trace");
        };
        assert_eq!(trace.locations, vec!["CountryA", "CountryB"]);
    }

    #[test]
    fn year_range_checks() {
        let dash = dashboard();
        assert!(dash.in_year_range(2000));
        assert!(dash.in_year_range(2001));
        assert!(!dash.in_year_range(1999));
        assert!(!dash.in_year_range(2002));
    }

    #[test]
    fn incidence_chart_lookup_by_year() {
        let dash = dashboard();
        assert_eq!(
            dash.incidence_chart(2001).map(ChartSpec::title),
            Some("Top 10 Malaria Incidence in 2001")
        );
        assert!(dash.incidence_chart(1990).is_none());
    }

    #[test]
    fn missing_reference_year_is_fatal() {
        let analysis = AnalysisConfig {
            reference_year: 1995,
            ..AnalysisConfig::default()
        };
        let err = Dashboard::build(fixtures::datasets(), &analysis).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Analytics(AnalyticsError::ReferenceYearMissing { year: 1995 })
        ));
    }

    #[test]
    fn empty_datasets_are_fatal() {
        let err = Dashboard::build(Datasets::default(), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Analytics(AnalyticsError::EmptyDataset { .. })
        ));
    }
}
