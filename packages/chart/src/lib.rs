#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Turns analytics results into [`ChartSpec`]s.
//!
//! The builders here only arrange numbers into traces and set titles and
//! axes. They never look at the raw datasets, so every chart is a pure
//! function of the derived values passed in.

use malaria_dash_analytics_models::{AgeGroupSeries, EntityValue, YearlyTopNSeries};
use malaria_dash_chart_models::{
    Axis, BarTrace, ChartKind, ChartSpec, ChoroplethTrace, ColorBar, GeoLayout, Layout,
    LineTrace, Margin, Projection, Title, Trace,
};

/// Upper bound of the incidence bar charts' value axis.
pub const DEFAULT_INCIDENCE_AXIS_MAX: f64 = 800.0;

/// Settings shared by every incidence bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartOptions {
    /// Size of the top-N set, shown in the title.
    pub top_n: usize,
    /// Fixed maximum of the value axis, so charts compare across years.
    pub axis_max: f64,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            axis_max: DEFAULT_INCIDENCE_AXIS_MAX,
        }
    }
}

/// Choropleth of mortality rates for one year.
///
/// `rates` may be empty; the result is then a map with no shaded countries.
#[must_use]
pub fn map_chart(year: i32, rates: &[EntityValue]) -> ChartSpec {
    let locations: Vec<String> = rates.iter().map(|r| r.entity.clone()).collect();

    let trace = ChoroplethTrace {
        text: locations.clone(),
        locations,
        z: rates.iter().map(|r| r.value).collect(),
        location_mode: "country names".to_string(),
        colorscale: "Sunset".to_string(),
        colorbar: ColorBar {
            title: Title::new("Rate"),
        },
    };

    let mut layout = Layout::titled(format!("Heatmap of Rates for Year {year}"));
    layout.geo = Some(GeoLayout {
        showcoastlines: true,
        coastlinecolor: "rgb(255, 255, 255)".to_string(),
        projection: Projection {
            kind: "natural earth".to_string(),
        },
    });
    layout.margin = Some(Margin::zero());

    ChartSpec {
        kind: ChartKind::Choropleth,
        data: vec![Trace::Choropleth(trace)],
        layout,
    }
}

/// One line per age group over the union of all years.
///
/// A group without rows in some year is drawn at `0` for that year.
#[must_use]
pub fn age_group_line_chart(series: &AgeGroupSeries) -> ChartSpec {
    let years = series.years();

    let data = series
        .groups
        .iter()
        .map(|group| {
            Trace::Line(LineTrace {
                name: group.age_group.clone(),
                x: years.clone(),
                y: years
                    .iter()
                    .map(|&year| group.value_at(year).unwrap_or(0.0))
                    .collect(),
                mode: "lines+markers".to_string(),
            })
        })
        .collect();

    let mut layout = Layout::titled("Malaria Deaths by Age Group Over Time");
    layout.xaxis = Some(Axis::titled("Year"));
    layout.yaxis = Some(Axis::titled("Average Deaths"));
    layout.showlegend = Some(true);

    ChartSpec {
        kind: ChartKind::Line,
        data,
        layout,
    }
}

/// Horizontal bar chart of the top-N entities' incidence in one year.
#[must_use]
pub fn incidence_bar_chart(year: i32, rows: &[EntityValue], options: &BarChartOptions) -> ChartSpec {
    let trace = BarTrace {
        x: rows.iter().map(|r| r.value).collect(),
        y: rows.iter().map(|r| r.entity.clone()).collect(),
        text: rows.iter().map(|r| r.value.to_string()).collect(),
        orientation: "h".to_string(),
    };

    let mut layout = Layout::titled(format!(
        "Top {} Malaria Incidence in {year}",
        options.top_n
    ));
    layout.xaxis = Some(
        Axis::titled("Incidence (per 1,000 population at risk)").with_range(0.0, options.axis_max),
    );
    layout.yaxis = Some(Axis::titled("Country"));
    layout.showlegend = Some(false);

    ChartSpec {
        kind: ChartKind::Bar,
        data: vec![Trace::Bar(trace)],
        layout,
    }
}

/// One bar chart per year of `series`, ascending by year.
#[must_use]
pub fn incidence_bar_charts(series: &YearlyTopNSeries, options: &BarChartOptions) -> Vec<ChartSpec> {
    let charts: Vec<ChartSpec> = series
        .by_year
        .iter()
        .map(|(&year, rows)| incidence_bar_chart(year, rows, options))
        .collect();

    log::debug!("Built {} incidence bar charts", charts.len());

    charts
}

#[cfg(test)]
mod tests {
    use super::*;
    use malaria_dash_analytics_models::{AgeGroupTrend, YearValue};

    fn ev(entity: &str, value: f64) -> EntityValue {
        EntityValue {
            entity: entity.to_string(),
            value,
        }
    }

    #[test]
    fn map_chart_lists_entities_and_rates() {
        let spec = map_chart(2016, &[ev("Nigeria", 80.0), ev("Chad", 60.5)]);
        assert_eq!(spec.kind, ChartKind::Choropleth);
        assert_eq!(spec.title(), "Heatmap of Rates for Year 2016");
        let Trace::Choropleth(trace) = &spec.data[0] else {
            panic!("expected choropleth trace");
        };
        assert_eq!(trace.locations, vec!["Nigeria", "Chad"]);
        assert_eq!(trace.text, trace.locations);
        assert_eq!(trace.z, vec![80.0, 60.5]);
        assert_eq!(trace.location_mode, "country names");
    }

    #[test]
    fn map_chart_for_empty_year_has_empty_arrays() {
        let spec = map_chart(1850, &[]);
        let Trace::Choropleth(trace) = &spec.data[0] else {
            panic!("expected choropleth trace");
        };
        assert!(trace.locations.is_empty());
        assert!(trace.z.is_empty());
    }

    #[test]
    fn map_chart_is_idempotent() {
        let rates = [ev("Mali", 1.0)];
        assert_eq!(map_chart(2000, &rates), map_chart(2000, &rates));
    }

    #[test]
    fn line_chart_zero_fills_missing_years() {
        let series = AgeGroupSeries {
            groups: vec![
                AgeGroupTrend {
                    age_group: "Under 5".to_string(),
                    points: vec![
                        YearValue {
                            year: 1990,
                            value: 10.0,
                        },
                        YearValue {
                            year: 1991,
                            value: 12.0,
                        },
                    ],
                },
                AgeGroupTrend {
                    age_group: "5-14".to_string(),
                    points: vec![YearValue {
                        year: 1991,
                        value: 3.0,
                    }],
                },
            ],
        };
        let spec = line_chart_traces(&age_group_line_chart(&series));
        assert_eq!(spec.len(), 2);
        assert_eq!(spec[0].name, "Under 5");
        assert_eq!(spec[0].x, vec![1990, 1991]);
        assert_eq!(spec[1].y, vec![0.0, 3.0]);
    }

    fn line_chart_traces(spec: &ChartSpec) -> Vec<LineTrace> {
        spec.data
            .iter()
            .filter_map(|t| match t {
                Trace::Line(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bar_chart_has_fixed_axis_and_horizontal_bars() {
        let options = BarChartOptions::default();
        let spec = incidence_bar_chart(2005, &[ev("Mali", 400.5), ev("Chad", 200.0)], &options);
        assert_eq!(spec.title(), "Top 10 Malaria Incidence in 2005");
        assert_eq!(
            spec.layout.xaxis.as_ref().and_then(|a| a.range),
            Some([0.0, 800.0])
        );
        let Trace::Bar(trace) = &spec.data[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(trace.orientation, "h");
        assert_eq!(trace.y, vec!["Mali", "Chad"]);
        assert_eq!(trace.text, vec!["400.5", "200"]);
    }

    #[test]
    fn one_bar_chart_per_year() {
        let mut series = YearlyTopNSeries::default();
        series.by_year.insert(2010, vec![ev("Mali", 1.0)]);
        series.by_year.insert(2000, vec![ev("Mali", 2.0)]);
        series.by_year.insert(2005, Vec::new());
        let charts = incidence_bar_charts(&series, &BarChartOptions::default());
        let titles: Vec<&str> = charts.iter().map(ChartSpec::title).collect();
        assert_eq!(
            titles,
            vec![
                "Top 10 Malaria Incidence in 2000",
                "Top 10 Malaria Incidence in 2005",
                "Top 10 Malaria Incidence in 2010",
            ]
        );
    }

    #[test]
    fn figure_json_is_plotly_shaped() {
        let spec = map_chart(2000, &[ev("Mali", 1.0)]);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "choropleth");
        assert_eq!(json["data"][0]["type"], "choropleth");
        assert_eq!(json["layout"]["geo"]["projection"]["type"], "natural earth");
        assert_eq!(json["layout"]["margin"]["t"], 0);
    }
}
