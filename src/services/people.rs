//! Aggregation of the two upstream people listings.
//!
//! [`PeopleService::retrieve_people_by_city`] fetches "all people" and "people
//! tagged with the city" concurrently under one deadline. The first branch is
//! narrowed to those within the requested radius of the city, the second is
//! trusted as-is, and the two are concatenated in that order. Any branch
//! failure fails the whole call and drops the sibling's in-flight request.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::time::{timeout_at, Instant};

use crate::entities::{CityRegistry, Coordinate, Person};
use crate::upstream::{PeopleSource, UpstreamError};
use crate::utils::geo::is_within_radius;

/// Which upstream call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AllPeople,
    PeopleByCity,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::AllPeople => f.write_str("retrieving all people"),
            Stage::PeopleByCity => f.write_str("retrieving people by city"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PeopleError {
    #[error("{0}'s coordinates have not been configured")]
    CityNotConfigured(String),
    #[error("{stage}: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: UpstreamError,
    },
    #[error("request deadline elapsed before the upstream provider answered")]
    Cancelled,
}

impl PeopleError {
    fn upstream(stage: Stage) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::Upstream { stage, source }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { source, .. } => source.is_retryable(),
            Self::CityNotConfigured(_) | Self::Cancelled => false,
        }
    }
}

/// Stateless façade over a [`PeopleSource`]; cheap to clone and safe to share
/// between concurrent requests.
#[derive(Clone)]
pub struct PeopleService {
    source: Arc<dyn PeopleSource>,
    cities: Arc<CityRegistry>,
}

impl PeopleService {
    pub fn new(source: Arc<dyn PeopleSource>, cities: Arc<CityRegistry>) -> Self {
        Self { source, cities }
    }

    pub fn cities(&self) -> &CityRegistry {
        &self.cities
    }

    /// Every person known to the provider, unfiltered.
    pub async fn retrieve_all_people(&self, deadline: Instant) -> Result<Vec<Person>, PeopleError> {
        tracing::info!("Attempting to retrieve all people");

        let people = timeout_at(deadline, self.source.fetch_all_people())
            .await
            .map_err(|_| PeopleError::Cancelled)?
            .map_err(PeopleError::upstream(Stage::AllPeople))
            .inspect_err(|e| tracing::warn!(error = %e, "Upstream call failed"))?;

        tracing::info!(count = people.len(), "All people retrieved successfully");
        Ok(people)
    }

    /// People within `distance` miles of `city` followed by the people the
    /// provider tags with `city`. Duplicates across the two lists are kept.
    pub async fn retrieve_people_by_city(
        &self,
        city: &str,
        distance: u32,
        deadline: Instant,
    ) -> Result<Vec<Person>, PeopleError> {
        let centre = self
            .cities
            .coordinate(city)
            .ok_or_else(|| PeopleError::CityNotConfigured(city.to_string()))?;

        let nearby = async {
            tracing::info!("Attempting to retrieve all people");
            let people = self
                .source
                .fetch_all_people()
                .await
                .map_err(PeopleError::upstream(Stage::AllPeople))?;
            tracing::info!(count = people.len(), "All people retrieved successfully");

            Ok::<_, PeopleError>(filter_within(people, centre, distance))
        };

        let tagged = async {
            tracing::info!(city, "Attempting to retrieve people by city");
            let people = self
                .source
                .fetch_people_by_city(city)
                .await
                .map_err(PeopleError::upstream(Stage::PeopleByCity))?;
            tracing::info!(city, count = people.len(), "People by city retrieved successfully");

            Ok::<_, PeopleError>(people)
        };

        // try_join! drops the other branch as soon as one fails.
        let (mut people, tagged) = timeout_at(deadline, async { tokio::try_join!(nearby, tagged) })
            .await
            .map_err(|_| PeopleError::Cancelled)?
            .inspect_err(|e| tracing::warn!(city, error = %e, "Upstream call failed"))?;

        people.extend(tagged);
        Ok(people)
    }
}

/// Keep the people whose distance to `centre` is at most `distance` miles.
pub fn filter_within(people: Vec<Person>, centre: Coordinate, distance: u32) -> Vec<Person> {
    let total = people.len();
    let max_distance = f64::from(distance);

    let nearby: Vec<Person> = people
        .into_iter()
        .filter(|person| is_within_radius(person.coordinate(), centre, max_distance))
        .collect();

    tracing::debug!(total, kept = nearby.len(), distance, "Filtered people by distance");
    nearby
}
