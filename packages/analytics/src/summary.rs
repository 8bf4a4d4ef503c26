//! Exploratory summary of the mortality dataset.

use std::collections::BTreeSet;

use malaria_dash_analytics_models::{EdaSummary, EntityValue};
use malaria_dash_dataset_models::{DatasetKind, MortalityRecord};

use crate::AnalyticsError;

/// Computes the [`EdaSummary`] of the mortality rows.
///
/// The average covers every row, regions included. When several rows share
/// the maximum rate the first one in source order wins.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if `records` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(records: &[MortalityRecord]) -> Result<EdaSummary, AnalyticsError> {
    let Some(first) = records.first() else {
        return Err(AnalyticsError::EmptyDataset {
            dataset: DatasetKind::Mortality,
        });
    };

    let mut max = first;
    let mut total = 0.0;
    let mut years = BTreeSet::new();
    let mut entities = BTreeSet::new();
    let mut countries = BTreeSet::new();
    let mut regions = BTreeSet::new();

    for record in records {
        total += record.rate;
        if record.rate > max.rate {
            max = record;
        }
        years.insert(record.year);
        entities.insert(record.entity.as_str());
        if record.is_country() {
            countries.insert(record.entity.as_str());
        } else {
            regions.insert(record.entity.as_str());
        }
    }

    let average_rate = round_to_cents(total / records.len() as f64);

    log::debug!(
        "Mortality summary: {} rows, {} years, {} entities, avg {average_rate}, max {} ({} {})",
        records.len(),
        years.len(),
        entities.len(),
        max.rate,
        max.entity,
        max.year
    );

    Ok(EdaSummary {
        years: years.into_iter().collect(),
        entities: entities.into_iter().map(str::to_string).collect(),
        country_count: countries.len(),
        region_count: regions.len(),
        average_rate,
        max_rate: max.rate,
        max_rate_entity: max.entity.clone(),
        max_rate_year: max.year,
    })
}

/// Mortality rates of every entity reporting in `year`, in source order.
///
/// Returns an empty list for years without data.
#[must_use]
pub fn mortality_for_year(records: &[MortalityRecord], year: i32) -> Vec<EntityValue> {
    records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| EntityValue {
            entity: r.entity.clone(),
            value: r.rate,
        })
        .collect()
}

/// Rounds to two decimal places, ties to even.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
