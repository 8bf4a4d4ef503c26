#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure transformations from loaded dataset rows to chart-ready values.
//!
//! Each public function takes an immutable slice of records and returns an
//! owned result type from `malaria_dash_analytics_models`. Nothing here does
//! I/O, so every function is deterministic over its input.

pub mod age_groups;
pub mod summary;
pub mod top_n;

use malaria_dash_dataset_models::DatasetKind;
use thiserror::Error;

pub use age_groups::aggregate_by_age_group;
pub use summary::{mortality_for_year, summarize};
pub use top_n::{build_yearly_series, select_top_n};

/// Year whose incidence ranking fixes the top-N entity set.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2000;

/// Number of entities kept by the top-N selection.
pub const DEFAULT_TOP_N: usize = 10;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The dataset had no rows at all.
    #[error("{dataset} dataset contains no records")]
    EmptyDataset {
        /// Dataset that was empty.
        dataset: DatasetKind,
    },

    /// The incidence dataset has no rows for the reference year.
    #[error("Incidence dataset has no rows for reference year {year}")]
    ReferenceYearMissing {
        /// The requested reference year.
        year: i32,
    },
}
