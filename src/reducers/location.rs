//! Location domain reducer: last known position of the device.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::messages::Message;
use crate::models::Coordinate;
use crate::reducer::{changed, unchanged, ReduceResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub current: Option<Coordinate>,
    pub accuracy: Option<f64>,
}

pub fn reduce(state: Option<Rc<LocationState>>, msg: &Message) -> ReduceResult<LocationState> {
    match msg {
        Message::LocationUpdated { position, accuracy } => {
            position.ensure_valid()?;
            let next = LocationState {
                current: Some(*position),
                accuracy: *accuracy,
            };
            match state {
                Some(prev) if *prev == next => Ok(prev),
                _ => changed(next),
            }
        }
        Message::LocationLost => match state {
            Some(prev) if prev.current.is_some() => changed(LocationState::default()),
            other => unchanged(other),
        },
        _ => unchanged(state),
    }
}
