#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed row records for the three malaria datasets.
//!
//! Each CSV source is parsed into one of the record types defined here. The
//! column names each dataset must expose are part of the contract with the
//! data source and are listed alongside the record types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifies one of the three source datasets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetKind {
    /// Age-standardized death rates by entity and year.
    Mortality,
    /// Deaths by age group, entity and year.
    AgeDeaths,
    /// Incidence per 1,000 population at risk by entity and year.
    Incidence,
}

impl DatasetKind {
    /// Returns all variants of this enum, in load order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Mortality, Self::AgeDeaths, Self::Incidence]
    }

    /// Header names that must be present in this dataset's CSV file.
    #[must_use]
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Mortality => &[
                mortality_columns::ENTITY,
                mortality_columns::CODE,
                mortality_columns::YEAR,
                mortality_columns::RATE,
            ],
            Self::AgeDeaths => &[
                age_death_columns::ENTITY,
                age_death_columns::CODE,
                age_death_columns::YEAR,
                age_death_columns::AGE_GROUP,
                age_death_columns::DEATHS,
            ],
            Self::Incidence => &[
                incidence_columns::ENTITY,
                incidence_columns::CODE,
                incidence_columns::YEAR,
                incidence_columns::INCIDENCE,
            ],
        }
    }

    /// Default file name of this dataset inside the data directory.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Mortality => "malaria_deaths.csv",
            Self::AgeDeaths => "malaria_deaths_age.csv",
            Self::Incidence => "malaria_inc.csv",
        }
    }
}

/// Column headers of the mortality dataset.
pub mod mortality_columns {
    pub const ENTITY: &str = "Entity";
    pub const CODE: &str = "Code";
    pub const YEAR: &str = "Year";
    pub const RATE: &str =
        "Deaths - Malaria - Sex: Both - Age: Age-standardized (Rate) (per 100,000 people)";
}

/// Column headers of the deaths-by-age dataset.
pub mod age_death_columns {
    pub const ENTITY: &str = "entity";
    pub const CODE: &str = "code";
    pub const YEAR: &str = "year";
    pub const AGE_GROUP: &str = "age_group";
    pub const DEATHS: &str = "deaths";
}

/// Column headers of the incidence dataset.
pub mod incidence_columns {
    pub const ENTITY: &str = "Entity";
    pub const CODE: &str = "Code";
    pub const YEAR: &str = "Year";
    pub const INCIDENCE: &str =
        "Incidence of malaria (per 1,000 population at risk) (per 1,000 population at risk)";
}

/// Age-standardized malaria death rate for one entity in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortalityRecord {
    /// Country or aggregate region name.
    pub entity: String,
    /// ISO code; `None` for aggregate regions.
    pub code: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Deaths per 100,000 people, age-standardized.
    pub rate: f64,
}

impl MortalityRecord {
    /// Whether this row describes a country rather than an aggregate region.
    #[must_use]
    pub const fn is_country(&self) -> bool {
        self.code.is_some()
    }
}

/// Malaria deaths within one age group for one entity in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeDeathRecord {
    /// Country or aggregate region name.
    pub entity: String,
    /// ISO code; `None` for aggregate regions.
    pub code: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Age bracket label, e.g. `"Under 5"`.
    pub age_group: String,
    /// Number of deaths.
    pub deaths: f64,
}

/// Malaria incidence for one entity in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidenceRecord {
    /// Country or aggregate region name.
    pub entity: String,
    /// ISO code; `None` for aggregate regions.
    pub code: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// New cases per 1,000 population at risk.
    pub incidence: f64,
}

/// The three datasets, as loaded at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub mortality: Vec<MortalityRecord>,
    pub age_deaths: Vec<AgeDeathRecord>,
    pub incidence: Vec<IncidenceRecord>,
}
