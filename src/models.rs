use serde::{Deserialize, Serialize};

use crate::error::ReducerError;

/// A WGS84 coordinate pair
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Reducer-facing form of [`Coordinate::is_valid`].
    pub fn ensure_valid(&self) -> Result<(), ReducerError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ReducerError::new(format!(
                "invalid coordinate {}, {}",
                self.latitude, self.longitude
            )))
        }
    }
}

/// Card shown in the card stack
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub body: Option<String>,
}

/// Last reported position of a single shuttle
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ShuttlePosition {
    pub shuttle_id: String,
    pub position: Coordinate,
    pub heading: Option<f64>,   // Degrees clockwise from north
}

impl ShuttlePosition {
    pub fn ensure_valid(&self) -> Result<(), ReducerError> {
        self.position
            .ensure_valid()
            .map_err(|err| ReducerError::new(format!("shuttle {}: {}", self.shuttle_id, err.message())))?;
        match self.heading {
            Some(heading) if !heading.is_finite() => Err(ReducerError::new(format!(
                "shuttle {}: heading must be finite, got {}",
                self.shuttle_id, heading
            ))),
            _ => Ok(()),
        }
    }
}
