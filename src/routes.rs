use std::{
    collections::{HashMap, HashSet},
    error::Error,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::DataError;

static CITIES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/src/cities.csv"));
static DISTANCES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/src/distances.csv"));

/// A known location, as listed in `cities.csv`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
}

/// A row of `distances.csv`: an unordered pair of cities and the road distance between them
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub from: String,
    pub to: String,
    /// the distance in km
    pub km: f64,
}

/// Returns the lookup key of the unordered pair `(a, b)`
fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// The in-memory, immutable table of known cities and the distances between them.
#[derive(Debug, Clone)]
pub struct RouteTable {
    cities: Vec<String>,
    distances: HashMap<(String, String), f64>,
}

impl RouteTable {
    /// Builds a table from its cities (in display order) and routes.
    /// # Error
    /// Errors if a city is repeated, or if a route is repeated (in any order),
    /// connects a city to itself, references an unknown city or has a
    /// non-positive distance.
    pub fn new(cities: Vec<String>, routes: Vec<Route>) -> Result<Self, DataError> {
        let mut known = HashSet::with_capacity(cities.len());
        for city in &cities {
            if !known.insert(city.as_str()) {
                return Err(DataError::DuplicateCity(city.clone()));
            }
        }

        let mut distances = HashMap::with_capacity(routes.len());
        for Route { from, to, km } in routes {
            if from == to {
                return Err(DataError::SelfRoute(from));
            }
            if !known.contains(from.as_str()) || !known.contains(to.as_str()) {
                return Err(DataError::UnknownCity { from, to });
            }
            if !(km.is_finite() && km > 0.0) {
                return Err(DataError::InvalidDistance { from, to, km });
            }
            if distances.insert(key(&from, &to), km).is_some() {
                return Err(DataError::DuplicateRoute { from, to });
            }
        }

        Ok(Self { cities, distances })
    }

    /// Returns the table shipped with this crate (10 Brazilian capitals)
    /// # Error
    /// Errors if the embedded data is malformed
    pub fn embedded() -> Result<Self, Box<dyn Error>> {
        Self::from_csv(CITIES.as_bytes(), DISTANCES.as_bytes())
    }

    /// Builds a table from CSV-encoded `cities` (`name`) and `distances` (`from,to,km`)
    pub fn from_csv(cities: &[u8], distances: &[u8]) -> Result<Self, Box<dyn Error>> {
        Self::from_records(
            crate::csv::deserialize(cities)?,
            crate::csv::deserialize(distances)?,
        )
    }

    fn from_records(cities: Vec<City>, routes: Vec<Route>) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(
            cities.into_iter().map(|c| c.name).collect(),
            routes,
        )?)
    }

    /// Loads a table from two CSV files on disk
    pub fn load(cities: impl AsRef<Path>, distances: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let table =
            Self::from_records(crate::csv::load(cities)?, crate::csv::load(distances)?)?;
        log::info!(
            "Loaded {} cities and {} routes",
            table.cities.len(),
            table.distances.len()
        );
        Ok(table)
    }

    /// The known cities, in display order
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// The known cities, in lexicographic order
    pub fn cities_sorted(&self) -> Vec<&str> {
        let mut cities = self.cities.iter().map(|c| c.as_str()).collect::<Vec<_>>();
        cities.sort_unstable();
        cities
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Returns the distance in km between `a` and `b`, in any order.
    ///
    /// A city is at distance 0 from itself, whether or not it is known.
    /// `None` means there is no known route between them.
    pub fn distance_between(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(0.0);
        }
        self.distances.get(&key(a, b)).copied()
    }

    pub fn route_exists(&self, a: &str, b: &str) -> bool {
        self.distance_between(a, b).is_some()
    }

    /// All routes, sorted by their (normalized) pair of cities
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = self
            .distances
            .iter()
            .map(|((from, to), km)| Route {
                from: from.clone(),
                to: to.clone(),
                km: *km,
            })
            .collect::<Vec<_>>();
        routes.sort_unstable_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        routes
    }
}
