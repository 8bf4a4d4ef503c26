#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived result types computed from the malaria datasets.
//!
//! Everything here is produced once at startup by `malaria_dash_analytics`
//! and never mutated afterwards. The types serialize to camelCase JSON for
//! the API and for exported files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Exploratory summary of the mortality dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdaSummary {
    /// Distinct years, ascending.
    pub years: Vec<i32>,
    /// Distinct entity names, ascending.
    pub entities: Vec<String>,
    /// Distinct entities that carry a country code.
    pub country_count: usize,
    /// Distinct entities without a country code (aggregate regions).
    pub region_count: usize,
    /// Mean rate across every row, rounded to 2 decimals.
    pub average_rate: f64,
    /// Highest rate in the dataset.
    pub max_rate: f64,
    /// Entity of the row holding [`Self::max_rate`].
    pub max_rate_entity: String,
    /// Year of the row holding [`Self::max_rate`].
    pub max_rate_year: i32,
}

impl EdaSummary {
    /// First and last year of the dataset.
    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

/// A single value observed in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// A single value attached to a named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityValue {
    pub entity: String,
    pub value: f64,
}

/// Mean deaths per year for one age group, ascending by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupTrend {
    pub age_group: String,
    pub points: Vec<YearValue>,
}

impl AgeGroupTrend {
    /// Mean deaths for `year`, if the group has rows in that year.
    #[must_use]
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .binary_search_by_key(&year, |p| p.year)
            .ok()
            .map(|idx| self.points[idx].value)
    }
}

/// One trend per age group, in the order the groups first appear in the
/// source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupSeries {
    pub groups: Vec<AgeGroupTrend>,
}

impl AgeGroupSeries {
    /// Union of every group's years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .groups
            .iter()
            .flat_map(|g| g.points.iter().map(|p| p.year))
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Looks up a group by label.
    #[must_use]
    pub fn group(&self, age_group: &str) -> Option<&AgeGroupTrend> {
        self.groups.iter().find(|g| g.age_group == age_group)
    }
}

/// The entities with the highest incidence in the reference year, highest
/// first. Selected once and reused for every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNSet {
    pub reference_year: i32,
    pub entities: Vec<String>,
}

impl TopNSet {
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.entities.iter().any(|e| e == entity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Incidence of the [`TopNSet`] entities for every year of the incidence
/// dataset. Rows keep source order within a year; entities without data in
/// a year are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTopNSeries {
    pub by_year: BTreeMap<i32, Vec<EntityValue>>,
}

impl YearlyTopNSeries {
    /// Years covered, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.by_year.keys().copied().collect()
    }

    /// Rows for `year`, or `None` if the year is not in the dataset.
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&[EntityValue]> {
        self.by_year.get(&year).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(group: &str, points: &[(i32, f64)]) -> AgeGroupTrend {
        AgeGroupTrend {
            age_group: group.to_string(),
            points: points
                .iter()
                .map(|&(year, value)| YearValue { year, value })
                .collect(),
        }
    }

    #[test]
    fn series_years_is_sorted_union() {
        let series = AgeGroupSeries {
            groups: vec![
                trend("Under 5", &[(1990, 1.0), (1992, 2.0)]),
                trend("70 or older", &[(1991, 3.0), (1992, 4.0)]),
            ],
        };
        assert_eq!(series.years(), vec![1990, 1991, 1992]);
    }

    #[test]
    fn trend_value_lookup() {
        let t = trend("5-14", &[(1990, 1.5), (1991, 2.5)]);
        assert_eq!(t.value_at(1991), Some(2.5));
        assert_eq!(t.value_at(1989), None);
    }

    #[test]
    fn summary_year_range() {
        let summary = EdaSummary {
            years: vec![1990, 2000, 2016],
            entities: vec!["A".to_string()],
            country_count: 1,
            region_count: 0,
            average_rate: 1.0,
            max_rate: 1.0,
            max_rate_entity: "A".to_string(),
            max_rate_year: 1990,
        };
        assert_eq!(summary.year_range(), Some((1990, 2016)));
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = EdaSummary {
            years: vec![2000],
            entities: vec!["A".to_string()],
            country_count: 1,
            region_count: 0,
            average_rate: 5.17,
            max_rate: 7.5,
            max_rate_entity: "A".to_string(),
            max_rate_year: 2001,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["averageRate"], 5.17);
        assert_eq!(json["maxRateEntity"], "A");
        assert_eq!(json["maxRateYear"], 2001);
    }

    #[test]
    fn yearly_series_lookup() {
        let mut series = YearlyTopNSeries::default();
        series.by_year.insert(2005, Vec::new());
        series.by_year.insert(2000, vec![EntityValue {
            entity: "Mali".to_string(),
            value: 400.0,
        }]);
        assert_eq!(series.years(), vec![2000, 2005]);
        assert_eq!(series.get(2000).map(<[EntityValue]>::len), Some(1));
        assert_eq!(series.get(2005).map(<[EntityValue]>::len), Some(0));
        assert!(series.get(2010).is_none());
    }
}
