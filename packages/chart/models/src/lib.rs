#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart specifications handed to the rendering layer.
//!
//! A [`ChartSpec`] carries everything the browser needs to draw a chart:
//! the traces (category and numeric axis values, series labels) and the
//! layout (title, axis titles, fixed axis ranges). The field names follow
//! Plotly's figure schema so a spec can be passed to `Plotly.newPlot`
//! as-is; the extra `kind` field is ignored by the renderer.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The three chart families the dashboard produces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    /// World map shaded by value per country.
    Choropleth,
    /// One line per series over a shared year axis.
    Line,
    /// Horizontal bars, one per entity.
    Bar,
}

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    /// The chart's title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }
}

/// One drawable series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choropleth(ChoroplethTrace),
    #[serde(rename = "scatter")]
    Line(LineTrace),
    Bar(BarTrace),
}

/// Values keyed by country name, drawn on a world map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethTrace {
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub text: Vec<String>,
    #[serde(rename = "locationmode")]
    pub location_mode: String,
    pub colorscale: String,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: Title,
}

/// A named series of yearly values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    /// Plotly draw mode, e.g. `"lines+markers"`.
    pub mode: String,
}

/// Horizontal bars: `x` holds the values, `y` the category labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub x: Vec<f64>,
    pub y: Vec<String>,
    pub text: Vec<String>,
    pub orientation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Figure-level layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

impl Layout {
    /// A layout with only a title set.
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            xaxis: None,
            yaxis: None,
            showlegend: None,
            geo: None,
            margin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
    /// Fixed `[min, max]`; autoscaled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl Axis {
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            range: None,
        }
    }

    #[must_use]
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some([min, max]);
        self
    }
}

/// Map projection and coastline styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLayout {
    pub showcoastlines: bool,
    pub coastlinecolor: String,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            l: 0,
            r: 0,
            t: 0,
            b: 0,
        }
    }
}
