//! HTTP handler functions for the malaria dashboard API.

use actix_web::{HttpResponse, web};
use malaria_dash_server_models::{ApiError, ApiHealth, ApiYears, MapQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        loaded_at: state.dashboard.loaded_at(),
    })
}

/// `GET /api/summary`
///
/// Returns the exploratory summary of the mortality dataset.
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.summary())
}

/// `GET /api/years`
///
/// Returns the year selector's domain.
pub async fn years(state: web::Data<AppState>) -> HttpResponse {
    let dashboard = &state.dashboard;
    let default = dashboard.default_year();
    let (min, max) = dashboard.year_range().unwrap_or((default, default));

    HttpResponse::Ok().json(ApiYears {
        min,
        max,
        default,
        years: dashboard.years().to_vec(),
    })
}

/// `GET /api/charts/map?year=Y`
///
/// Redraws the choropleth for the selected year. Any year inside the
/// selector's range yields a chart, possibly with no shaded countries.
pub async fn map_chart(
    state: web::Data<AppState>,
    params: web::Query<MapQueryParams>,
) -> HttpResponse {
    let dashboard = &state.dashboard;
    let year = params.year.unwrap_or_else(|| dashboard.default_year());

    if !dashboard.in_year_range(year) {
        log::debug!("Rejecting map request for out-of-range year {year}");
        return HttpResponse::BadRequest().json(ApiError::new(format!(
            "Year {year} is outside the available range"
        )));
    }

    HttpResponse::Ok().json(dashboard.map_chart(year))
}

/// `GET /api/charts/age-groups`
pub async fn age_group_chart(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.age_group_chart())
}

/// `GET /api/charts/incidence`
///
/// Returns every per-year incidence bar chart, ascending by year.
pub async fn incidence_charts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dashboard.incidence_charts())
}

/// `GET /api/charts/incidence/{year}`
pub async fn incidence_chart(state: web::Data<AppState>, year: web::Path<i32>) -> HttpResponse {
    let year = year.into_inner();
    state.dashboard.incidence_chart(year).map_or_else(
        || {
            HttpResponse::NotFound().json(ApiError::new(format!(
                "No incidence data for year {year}"
            )))
        },
        |chart| HttpResponse::Ok().json(chart),
    )
}
