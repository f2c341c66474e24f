use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tokio::time::Instant;

use crate::config::MAX_REQUEST_TIMEOUT;
use crate::entities::Person;
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DistanceQuery {
    pub distance: Option<String>,
}

/// List every person known to the upstream provider
pub async fn list_people(State(state): State<AppState>) -> AppResult<Json<Vec<Person>>> {
    let deadline = request_deadline(&state);
    let people = state.service.retrieve_all_people(deadline).await?;

    Ok(Json(people))
}

/// List people near a configured city plus the people tagged with it
pub async fn list_people_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<DistanceQuery>,
) -> AppResult<Json<Vec<Person>>> {
    let distance = parse_distance(query.distance.as_deref(), state.config.default_distance)?;

    let city = normalise_city(&city);
    if !state.service.cities().contains(&city) {
        tracing::info!(city = %city, "City Not Found");
        return Err(AppError::NotFound("City Not Found".to_string()));
    }

    let deadline = request_deadline(&state);
    let people = state
        .service
        .retrieve_people_by_city(&city, distance, deadline)
        .await?;

    Ok(Json(people))
}

/// `request_timeout` is public, so an oversized value is clamped instead of
/// overflowing the clock.
fn request_deadline(state: &AppState) -> Instant {
    let now = Instant::now();
    now.checked_add(state.config.request_timeout)
        .unwrap_or_else(|| now + MAX_REQUEST_TIMEOUT)
}

fn parse_distance(raw: Option<&str>, default: u32) -> AppResult<u32> {
    match raw {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            tracing::info!(distance = raw, "Bad distance query");
            AppError::BadRequest(format!(
                "Invalid distance query - {raw} is not an integer"
            ))
        }),
    }
}

/// Upper-case the first character so `london` resolves to `London`.
fn normalise_city(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
