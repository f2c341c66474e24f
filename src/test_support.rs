//! Shared fixtures for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{Coordinate, Person};
use crate::upstream::{PeopleSource, UpstreamError};

pub(crate) const LONDON: Coordinate = Coordinate::new(51.514248, -0.093145);

pub(crate) fn person_at(id: i64, at: Coordinate) -> Person {
    Person {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("person{id}@example.com"),
        ip_address: format!("10.0.0.{id}"),
        latitude: at.latitude,
        longitude: at.longitude,
    }
}

/// Canned [`PeopleSource`] that counts calls and can delay either operation.
pub(crate) struct StubSource {
    all: Result<Vec<Person>, UpstreamError>,
    city: Result<Vec<Person>, UpstreamError>,
    all_delay: Option<Duration>,
    city_delay: Option<Duration>,
    pub all_calls: AtomicUsize,
    pub city_calls: AtomicUsize,
    pub all_completed: AtomicUsize,
    pub city_completed: AtomicUsize,
    pub last_city: Mutex<Option<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            all: Ok(Vec::new()),
            city: Ok(Vec::new()),
            all_delay: None,
            city_delay: None,
            all_calls: AtomicUsize::new(0),
            city_calls: AtomicUsize::new(0),
            all_completed: AtomicUsize::new(0),
            city_completed: AtomicUsize::new(0),
            last_city: Mutex::new(None),
        }
    }

    pub fn all_people(mut self, result: Result<Vec<Person>, UpstreamError>) -> Self {
        self.all = result;
        self
    }

    pub fn city_people(mut self, result: Result<Vec<Person>, UpstreamError>) -> Self {
        self.city = result;
        self
    }

    pub fn all_delay(mut self, delay: Duration) -> Self {
        self.all_delay = Some(delay);
        self
    }

    pub fn city_delay(mut self, delay: Duration) -> Self {
        self.city_delay = Some(delay);
        self
    }
}

#[async_trait]
impl PeopleSource for StubSource {
    async fn fetch_all_people(&self) -> Result<Vec<Person>, UpstreamError> {
        self.all_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.all_delay {
            tokio::time::sleep(delay).await;
        }
        self.all_completed.fetch_add(1, Ordering::SeqCst);
        self.all.clone()
    }

    async fn fetch_people_by_city(&self, city: &str) -> Result<Vec<Person>, UpstreamError> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_city.lock() {
            *last = Some(city.to_string());
        }
        if let Some(delay) = self.city_delay {
            tokio::time::sleep(delay).await;
        }
        self.city_completed.fetch_add(1, Ordering::SeqCst);
        self.city.clone()
    }
}
