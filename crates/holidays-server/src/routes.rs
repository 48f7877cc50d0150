//! REST API routes (Axum)

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use holidays_core::model::{CountryHolidayCount, Holiday};
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;
use crate::validation::{Validator, all, first};

type QueryPairs = Query<Vec<(String, String)>>;

/// Create the REST API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/holidays", holiday_routes())
        .with_state(state)
}

// The first segment is a country code or a year depending on the route; the
// router needs one parameter name per position.
fn holiday_routes() -> Router<AppState> {
    Router::new()
        .route("/{segment}", get(last_three_holidays))
        .route("/{segment}/public-holidays", get(public_holidays_count))
        .route("/{segment}/common-holidays", get(common_holidays))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Last three observed holidays of a country; 404 when there are none
async fn last_three_holidays(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<Vec<Holiday>>, ApiError> {
    let mut v = Validator::new();
    let country_code = v.country_code("countryCode", Some(country_code.as_str()));
    v.finish()?;

    info!(country = %country_code, "Fetching last 3 holidays");
    let holidays = state.aggregator.last_three_holidays(&country_code).await?;

    non_empty(holidays)
}

/// Non-weekend holiday counts per country, highest first
async fn public_holidays_count(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): QueryPairs,
) -> Result<Json<Vec<CountryHolidayCount>>, ApiError> {
    let mut v = Validator::new();
    let year = v.year("year", &year);
    let country_codes = v.country_codes("countryCodes", all(&query, "countryCodes"));
    v.finish()?;

    info!(year, countries = ?country_codes, "Fetching public holidays count");
    let counts = state
        .aggregator
        .non_weekend_holiday_counts(year, &country_codes)
        .await?;

    Ok(Json(counts))
}

/// Holidays shared by two countries; 404 when there are none
async fn common_holidays(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): QueryPairs,
) -> Result<Json<Vec<Holiday>>, ApiError> {
    let mut v = Validator::new();
    let year = v.year("year", &year);
    let first_code = v.country_code("countryCode1", first(&query, "countryCode1"));
    let second_code = v.country_code("countryCode2", first(&query, "countryCode2"));
    v.finish()?;

    info!(year, first = %first_code, second = %second_code, "Fetching common holidays");
    let holidays = state
        .aggregator
        .common_holidays(year, &first_code, &second_code)
        .await?;

    non_empty(holidays)
}

fn non_empty(holidays: Vec<Holiday>) -> Result<Json<Vec<Holiday>>, ApiError> {
    if holidays.is_empty() {
        Err(ApiError::NotFound)
    } else {
        Ok(Json(holidays))
    }
}
