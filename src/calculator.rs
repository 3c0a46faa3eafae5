use serde::{Deserialize, Serialize};

use crate::{CalculationError, EmissionModel, RouteTable};

/// Rounds the exact binary value of `value` to the nearest hundredth.
///
/// The decimal a literal like `2.675` denotes is not what is rounded: its f64 is
/// 2.67499999999999982236..., so it rounds to 2.67. Only values that are exactly
/// halfway in binary (odd multiples of 1/8, e.g. 0.125) are ties, and those round
/// away from zero.
pub fn round2(value: f64) -> f64 {
    // scaling by a power of two is exact
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// The inputs of a trip, as entered by a user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub mode: String,
    pub passengers: u32,
}

/// The footprint of a trip
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Calculation {
    /// distance in km
    pub distance: f64,
    /// total emissions in kg of CO2, to 2 decimal places
    pub emission: f64,
    /// emissions per passenger in kg of CO2, to 2 decimal places
    pub emission_per_passenger: f64,
    /// number of trees needed to offset `emission` in one year
    pub trees_needed: u64,
}

/// Computes footprints against a [`RouteTable`] and an [`EmissionModel`].
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'a> {
    routes: &'a RouteTable,
    model: &'a EmissionModel,
}

impl<'a> Calculator<'a> {
    pub fn new(routes: &'a RouteTable, model: &'a EmissionModel) -> Self {
        Self { routes, model }
    }

    pub fn routes(&self) -> &'a RouteTable {
        self.routes
    }

    pub fn model(&self) -> &'a EmissionModel {
        self.model
    }

    /// Returns the distance in km between `origin` and `destination`.
    ///
    /// `None` if either is empty or no route connects them. Equal cities are at
    /// distance 0; callers must reject them as a trip.
    pub fn get_distance(&self, origin: &str, destination: &str) -> Option<f64> {
        if origin.is_empty() || destination.is_empty() {
            log::warn!("origin or destination not provided");
            return None;
        }
        if origin == destination {
            log::warn!("origin and destination are the same ({origin})");
            return Some(0.0);
        }
        let distance = self.routes.distance_between(origin, destination);
        if distance.is_none() {
            log::warn!("route \"{origin}\" - \"{destination}\" not found");
        }
        distance
    }

    /// Returns the emissions in kg of CO2 of `passengers` travelling `distance` km by `mode`,
    /// i.e. `distance * factor(mode) * passengers`, rounded with [`round2`].
    ///
    /// Callers that prefer a zero emission on invalid input can use `unwrap_or_default`.
    /// # Error
    /// Errors if `distance` is not positive, `passengers` is 0, or `mode` is empty or unknown
    pub fn calculate_emission(
        &self,
        distance: f64,
        mode: &str,
        passengers: u32,
    ) -> Result<f64, CalculationError> {
        if !(distance.is_finite() && distance > 0.0) {
            log::error!("distance must be a positive number, got {distance}");
            return Err(CalculationError::InvalidInput(format!(
                "distance must be a positive number of km, got {distance}"
            )));
        }
        if passengers < 1 {
            log::error!("passengers must be at least 1");
            return Err(CalculationError::InvalidInput(
                "passengers must be at least 1".to_string(),
            ));
        }
        if mode.is_empty() {
            log::error!("transport mode not provided");
            return Err(CalculationError::InvalidInput(
                "transport mode not provided".to_string(),
            ));
        }
        let factor = self.model.factor_for(mode).ok_or_else(|| {
            log::warn!("transport mode \"{mode}\" not found");
            CalculationError::UnknownTransportMode(mode.to_string())
        })?;

        let emission = distance * factor * passengers as f64;
        if !emission.is_finite() {
            log::error!("emissions of {passengers} passengers over {distance} km overflow");
            return Err(CalculationError::InvalidInput(format!(
                "emissions of {passengers} passengers over {distance} km are too large"
            )));
        }
        Ok(round2(emission))
    }

    /// Returns the number of trees needed to offset `co2_kg` in one year, rounded up.
    /// # Error
    /// Errors if `co2_kg` is negative or not finite
    pub fn calculate_trees_needed(&self, co2_kg: f64) -> Result<u64, CalculationError> {
        if !(co2_kg.is_finite() && co2_kg >= 0.0) {
            log::error!("emissions must be a non-negative number, got {co2_kg}");
            return Err(CalculationError::InvalidInput(format!(
                "emissions must be a non-negative number of kg, got {co2_kg}"
            )));
        }
        let tons = co2_kg / 1000.0;
        Ok((tons * self.model.trees_per_ton()).ceil() as u64)
    }

    /// Computes the full footprint of a trip.
    /// # Error
    /// Errors with
    /// * [`CalculationError::InvalidInput`] if a field is empty or there are no passengers
    /// * [`CalculationError::DegenerateRoute`] if origin and destination are the same
    /// * [`CalculationError::UnknownRoute`] if no route connects them
    /// * [`CalculationError::UnknownTransportMode`] if the mode is unknown
    pub fn perform_full_calculation(
        &self,
        request: &TripRequest,
    ) -> Result<Calculation, CalculationError> {
        let TripRequest {
            origin,
            destination,
            mode,
            passengers,
        } = request;
        if origin.is_empty() || destination.is_empty() || mode.is_empty() || *passengers < 1 {
            log::error!("incomplete request: {request:?}");
            return Err(CalculationError::InvalidInput(
                "origin, destination, transport mode and at least 1 passenger are required"
                    .to_string(),
            ));
        }
        if origin == destination {
            return Err(CalculationError::DegenerateRoute(origin.clone()));
        }

        let distance = self.get_distance(origin, destination).ok_or_else(|| {
            CalculationError::UnknownRoute {
                origin: origin.clone(),
                destination: destination.clone(),
            }
        })?;
        let emission = self.calculate_emission(distance, mode, *passengers)?;
        let trees_needed = self.calculate_trees_needed(emission)?;
        let emission_per_passenger = round2(emission / *passengers as f64);

        log::debug!("{origin} -> {destination} by {mode}: {distance} km, {emission} kg CO2");

        Ok(Calculation {
            distance,
            emission,
            emission_per_passenger,
            trees_needed,
        })
    }
}
