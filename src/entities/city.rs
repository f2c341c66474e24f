use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CityParseError {
    #[error("city entry `{0}` must look like Name=lat,lon")]
    Malformed(String),
    #[error("city entry `{0}` has an empty name")]
    EmptyName(String),
    #[error("city `{city}` has a non-numeric {field}: `{value}`")]
    InvalidNumber {
        city: String,
        field: &'static str,
        value: String,
    },
    #[error("city `{0}` has a coordinate outside the valid range")]
    OutOfRange(String),
}

/// Read-only mapping from city name to its reference coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CityRegistry {
    cities: HashMap<String, Coordinate>,
}

impl CityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.cities.insert(name.into(), coordinate);
        self
    }

    pub fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.cities.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse `Name=lat,lon` entries separated by `;`, e.g.
    /// `London=51.514248,-0.093145;Leeds=53.8008,-1.5491`.
    /// Blank entries are skipped; a repeated name keeps the last coordinate.
    pub fn parse(entries: &str) -> Result<Self, CityParseError> {
        let mut registry = Self::new();

        for entry in entries.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, coords) = entry
                .split_once('=')
                .ok_or_else(|| CityParseError::Malformed(entry.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(CityParseError::EmptyName(entry.to_string()));
            }

            let (lat, lon) = coords
                .split_once(',')
                .ok_or_else(|| CityParseError::Malformed(entry.to_string()))?;
            let coordinate = Coordinate::new(
                parse_degrees(name, "latitude", lat)?,
                parse_degrees(name, "longitude", lon)?,
            );
            if !coordinate.is_valid() {
                return Err(CityParseError::OutOfRange(name.to_string()));
            }

            registry.cities.insert(name.to_string(), coordinate);
        }

        Ok(registry)
    }
}

fn parse_degrees(city: &str, field: &'static str, raw: &str) -> Result<f64, CityParseError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CityParseError::InvalidNumber {
            city: city.to_string(),
            field,
            value: raw.trim().to_string(),
        })
}
