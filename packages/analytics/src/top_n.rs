//! Fixed top-N entity selection and the per-year incidence series built on
//! top of it.

use std::collections::BTreeMap;

use malaria_dash_analytics_models::{EntityValue, TopNSet, YearlyTopNSeries};
use malaria_dash_dataset_models::IncidenceRecord;

use crate::AnalyticsError;

/// Selects the `n` entities with the highest incidence in `reference_year`.
///
/// The sort is stable, so equal incidences keep their source row order.
/// Fewer than `n` entities are returned when the reference year has fewer
/// rows.
///
/// # Errors
///
/// Returns [`AnalyticsError::ReferenceYearMissing`] if no row exists for
/// `reference_year`.
pub fn select_top_n(
    records: &[IncidenceRecord],
    reference_year: i32,
    n: usize,
) -> Result<TopNSet, AnalyticsError> {
    let mut rows: Vec<&IncidenceRecord> = records
        .iter()
        .filter(|r| r.year == reference_year)
        .collect();

    if rows.is_empty() {
        return Err(AnalyticsError::ReferenceYearMissing {
            year: reference_year,
        });
    }

    rows.sort_by(|a, b| b.incidence.total_cmp(&a.incidence));

    let entities: Vec<String> = rows.into_iter().take(n).map(|r| r.entity.clone()).collect();

    log::debug!("Top {n} entities for {reference_year}: {entities:?}");

    Ok(TopNSet {
        reference_year,
        entities,
    })
}

/// Restricts every year of the incidence dataset to the `top` entities.
///
/// Every distinct year gets an entry, possibly empty. Within a year rows
/// keep source order; they are not re-ranked.
#[must_use]
pub fn build_yearly_series(records: &[IncidenceRecord], top: &TopNSet) -> YearlyTopNSeries {
    let mut by_year: BTreeMap<i32, Vec<EntityValue>> = BTreeMap::new();

    for record in records {
        let rows = by_year.entry(record.year).or_default();
        if top.contains(&record.entity) {
            rows.push(EntityValue {
                entity: record.entity.clone(),
                value: record.incidence,
            });
        }
    }

    YearlyTopNSeries { by_year }
}
