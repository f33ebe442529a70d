//! Core types for the transportation order server

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Truck identifier, the natural key of an order
pub type TruckId = String;

/// Epoch timestamp in milliseconds
pub type EpochMillis = i64;

/// A single pickup-to-delivery shipment assigned to a truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationOrder {
    pub toid: String,
    pub truck: TruckId,
    pub pickup_time: EpochMillis,
    pub pickup_lat: f64,
    pub pickup_lon: f64,
    pub delivery_time: EpochMillis,
    pub delivery_lat: f64,
    pub delivery_lon: f64,

    /// Last reported position; carried through untouched
    #[serde(default)]
    pub last_time: EpochMillis,
    #[serde(default)]
    pub last_lat: f64,
    #[serde(default)]
    pub last_lon: f64,

    /// State code; carried through untouched
    #[serde(default)]
    pub st: i32,
}

impl TransportationOrder {
    /// Reject orders that cannot be stored under a key
    pub fn validate(&self) -> Result<()> {
        if self.truck.trim().is_empty() {
            return Err(Error::invalid_request("'truck' must not be empty"));
        }
        if self.truck.chars().any(char::is_control) {
            return Err(Error::invalid_request(
                "'truck' must not contain control characters",
            ));
        }
        if self.toid.trim().is_empty() {
            return Err(Error::invalid_request("'toid' must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_order(toid: &str, truck: &str) -> TransportationOrder {
    TransportationOrder {
        toid: toid.to_string(),
        truck: truck.to_string(),
        pickup_time: 1591682400000,
        pickup_lat: 40.4562191,
        pickup_lon: -3.8707211,
        delivery_time: 1591692196000,
        delivery_lat: 42.0206372,
        delivery_lon: -4.5330132,
        last_time: 0,
        last_lat: 0.0,
        last_lon: 0.0,
        st: 0,
    }
}
