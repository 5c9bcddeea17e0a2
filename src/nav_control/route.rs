use super::common::GeoVec2D;
use crate::info;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use strum_macros::Display;

/// A single fixed geographic target point on a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lng")]
    longitude: f64,
}

impl Waypoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self { Self { latitude, longitude } }
    pub const fn latitude(&self) -> f64 { self.latitude }
    pub const fn longitude(&self) -> f64 { self.longitude }
    pub const fn as_vec(&self) -> GeoVec2D<f64> {
        GeoVec2D::from_lat_lng(self.latitude, self.longitude)
    }

    fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Configuration errors raised when routes are built, loaded or looked up.
#[derive(Debug, Display)]
pub enum RouteError {
    #[strum(to_string = "route '{city}' has {count} waypoints, at least 2 are required")]
    TooFewWaypoints { city: String, count: usize },
    #[strum(to_string = "route '{city}' has an invalid waypoint at index {index}")]
    InvalidWaypoint { city: String, index: usize },
    #[strum(to_string = "no route known for city '{city}'")]
    UnknownCity { city: String },
    #[strum(to_string = "no route has been selected")]
    NoRouteSelected,
    #[strum(to_string = "route file is malformed: {reason}")]
    MalformedRouteFile { reason: String },
    #[strum(to_string = "route file could not be read: {reason}")]
    RouteFileUnreadable { reason: String },
}

impl std::error::Error for RouteError {}

impl From<serde_json::Error> for RouteError {
    fn from(value: serde_json::Error) -> Self {
        RouteError::MalformedRouteFile { reason: value.to_string() }
    }
}

impl From<std::io::Error> for RouteError {
    fn from(value: std::io::Error) -> Self {
        RouteError::RouteFileUnreadable { reason: value.to_string() }
    }
}

/// An ordered, named, immutable sequence of at least two waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    city: String,
    waypoints: Vec<Waypoint>,
}

impl Route {
    /// Minimum number of waypoints a route must carry.
    pub const MIN_WAYPOINTS: usize = 2;

    /// Validates and builds a route.
    ///
    /// # Errors
    /// - `RouteError::TooFewWaypoints` if fewer than [`Route::MIN_WAYPOINTS`] are given.
    /// - `RouteError::InvalidWaypoint` for non-finite or out-of-range coordinates.
    pub fn new(name: impl Into<String>, waypoints: Vec<Waypoint>) -> Result<Self, RouteError> {
        let city = name.into();
        if waypoints.len() < Self::MIN_WAYPOINTS {
            return Err(RouteError::TooFewWaypoints { city, count: waypoints.len() });
        }
        if let Some(index) = waypoints.iter().position(|wp| !wp.is_valid()) {
            return Err(RouteError::InvalidWaypoint { city, index });
        }
        Ok(Self { city, waypoints })
    }

    pub fn city(&self) -> &str { &self.city }
    pub fn len(&self) -> usize { self.waypoints.len() }

    pub fn is_empty(&self) -> bool { self.waypoints.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Waypoint> { self.waypoints.get(index) }

    /// The waypoint the avatar is anchored at when a journey starts.
    pub fn origin(&self) -> &Waypoint { &self.waypoints[0] }

    /// Planar length of the route in degrees, summed over all segments.
    pub fn total_length(&self) -> f64 {
        self.waypoints
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.as_vec().euclid_distance(&b.as_vec()))
            .sum()
    }
}

/// Route supplier keyed by city identifier.
#[derive(Debug, Clone, Default)]
pub struct RouteBook {
    routes: HashMap<String, Route>,
}

impl RouteBook {
    pub fn new() -> Self { Self::default() }

    /// Short walking routes shipped with the demo.
    pub fn builtin() -> Self {
        let raw: [(&str, &[(f64, f64)]); 3] = [
            (
                "new-york",
                &[(40.7128, -74.0060), (40.7134, -74.0052), (40.7141, -74.0058), (40.7147, -74.0049)],
            ),
            (
                "paris",
                &[(48.8584, 2.2945), (48.8590, 2.2953), (48.8597, 2.2947)],
            ),
            (
                "tokyo",
                &[(35.6595, 139.7005), (35.6600, 139.7012), (35.6606, 139.7008), (35.6611, 139.7015)],
            ),
        ];
        let mut book = Self::new();
        for (city, points) in raw {
            let waypoints = points.iter().map(|&(lat, lng)| Waypoint::new(lat, lng)).collect();
            if let Ok(route) = Route::new(city, waypoints) {
                book.insert(route);
            }
        }
        book
    }

    /// Parses a document of the form `{ "city": [{ "lat": .., "lng": .. }, ..], .. }`.
    ///
    /// # Errors
    /// Malformed JSON or any invalid route fails the whole document.
    pub fn from_json_str(json: &str) -> Result<Self, RouteError> {
        let raw: HashMap<String, Vec<Waypoint>> = serde_json::from_str(json)?;
        let mut book = Self::new();
        for (city, waypoints) in raw {
            book.insert(Route::new(city, waypoints)?);
        }
        Ok(book)
    }

    /// Reads and parses a route document from disk.
    ///
    /// # Errors
    /// See [`RouteBook::from_json_str`]; I/O failures yield `RouteError::RouteFileUnreadable`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let book = Self::from_json_str(&content)?;
        info!("Loaded {} routes from {}", book.len(), path.as_ref().display());
        Ok(book)
    }

    pub fn insert(&mut self, route: Route) { self.routes.insert(route.city.clone(), route); }

    /// Looks up the route for a city.
    ///
    /// # Errors
    /// `RouteError::UnknownCity` if the book has no route for `city`.
    pub fn route(&self, city: &str) -> Result<&Route, RouteError> {
        self.routes.get(city).ok_or_else(|| RouteError::UnknownCity { city: city.to_string() })
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> { self.routes.keys().map(String::as_str).sorted() }

    pub fn len(&self) -> usize { self.routes.len() }

    pub fn is_empty(&self) -> bool { self.routes.is_empty() }
}
