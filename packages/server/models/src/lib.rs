#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the malaria dashboard server.
//!
//! Summary and chart bodies are served with the analytics and chart types
//! directly; this crate only holds the envelopes specific to the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// When the datasets were loaded.
    pub loaded_at: DateTime<Utc>,
}

/// Domain of the year selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiYears {
    /// First selectable year.
    pub min: i32,
    /// Last selectable year.
    pub max: i32,
    /// Year shown before the user moves the selector.
    pub default: i32,
    /// Years that actually have data, ascending.
    pub years: Vec<i32>,
}

/// Query parameters for the map chart endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Year to draw; the default year when absent.
    pub year: Option<i32>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
