//! Mean deaths per age group and year.

use std::collections::BTreeMap;

use malaria_dash_analytics_models::{AgeGroupSeries, AgeGroupTrend, YearValue};
use malaria_dash_dataset_models::{AgeDeathRecord, DatasetKind};

use crate::AnalyticsError;

/// Running sum and row count for one (age group, year) cell.
#[derive(Default)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / f64::from(self.count)
    }
}

/// Groups the age dataset by age group, then by year, and averages deaths
/// across every entity reporting in that cell.
///
/// This is an unweighted mean over entities, regions included. Groups are
/// returned in the order they first appear in `records`; each group's
/// points are ascending by year and cover only the years the group has rows
/// for.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if `records` is empty.
pub fn aggregate_by_age_group(
    records: &[AgeDeathRecord],
) -> Result<AgeGroupSeries, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset {
            dataset: DatasetKind::AgeDeaths,
        });
    }

    let mut order: Vec<&str> = Vec::new();
    let mut cells: BTreeMap<&str, BTreeMap<i32, MeanAccumulator>> = BTreeMap::new();

    for record in records {
        let group = record.age_group.as_str();
        let years = cells.entry(group).or_insert_with(|| {
            order.push(group);
            BTreeMap::new()
        });
        years.entry(record.year).or_default().push(record.deaths);
    }

    let groups: Vec<AgeGroupTrend> = order
        .into_iter()
        .map(|group| AgeGroupTrend {
            age_group: group.to_string(),
            points: cells
                .get(group)
                .map(|years| {
                    years
                        .iter()
                        .map(|(&year, acc)| YearValue {
                            year,
                            value: acc.mean(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();

    log::debug!(
        "Aggregated {} age rows into {} groups",
        records.len(),
        groups.len()
    );

    Ok(AgeGroupSeries { groups })
}
