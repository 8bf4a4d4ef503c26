#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loader for the three malaria datasets.
//!
//! Every dataset is read once at startup. Columns are located by header
//! name, so column order and extra columns do not matter, but a missing
//! required column or an unparseable cell fails the whole load. There is no
//! defaulting and no partial result.

pub mod loader;
pub mod progress;

use std::path::PathBuf;

use malaria_dash_dataset_models::DatasetKind;
use thiserror::Error;

pub use loader::{DatasetPaths, load_age_deaths, load_all, load_incidence, load_mortality};

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source file could not be opened.
    #[error("Failed to open {kind} dataset at {}: {source}", .path.display())]
    Io {
        /// Dataset being loaded.
        kind: DatasetKind,
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself was malformed.
    #[error("CSV error in {kind} dataset: {source}")]
    Csv {
        /// Dataset being loaded.
        kind: DatasetKind,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A required header is absent.
    #[error("{kind} dataset is missing required column '{column}'")]
    MissingColumn {
        /// Dataset being loaded.
        kind: DatasetKind,
        /// Name of the missing header.
        column: String,
    },

    /// A cell could not be parsed into the expected type.
    #[error("{kind} dataset row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        /// Dataset being loaded.
        kind: DatasetKind,
        /// 1-based data row (the header is not counted).
        row: u64,
        /// Column header.
        column: String,
        /// Raw cell text.
        value: String,
    },
}
