// src/messages.rs
//
// The actions the app dispatches into the root store.
//
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::constants::{INIT_ACTION_TYPE, REPLACE_ACTION_TYPE};
use crate::models::{Card, Coordinate, ShuttlePosition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    // Store lifecycle (dispatched by the store itself)
    #[serde(rename = "@@INIT")]
    Init,
    #[serde(rename = "@@REPLACE")]
    Replace,

    // Cards
    CardAdded { card: Card },
    CardRemoved { id: String },
    CardsCleared,

    // Device location
    LocationUpdated {
        position: Coordinate,
        accuracy: Option<f64>,           // Metres, when the platform reports it
    },
    LocationLost,

    // Shuttles
    ShuttleSelected { shuttle_id: String },
    ShuttleDeselected,
    ShuttlePositionsReceived { positions: Vec<ShuttlePosition> },

    // Map viewport
    MapMoved { center: Coordinate },
    MapZoomed { zoom: f64 },
    MapFollowUser,
}

impl Action for Message {
    fn init() -> Self {
        Message::Init
    }

    fn replace() -> Self {
        Message::Replace
    }

    fn kind(&self) -> &str {
        match self {
            Message::Init => INIT_ACTION_TYPE,
            Message::Replace => REPLACE_ACTION_TYPE,
            Message::CardAdded { .. } => "CARD_ADDED",
            Message::CardRemoved { .. } => "CARD_REMOVED",
            Message::CardsCleared => "CARDS_CLEARED",
            Message::LocationUpdated { .. } => "LOCATION_UPDATED",
            Message::LocationLost => "LOCATION_LOST",
            Message::ShuttleSelected { .. } => "SHUTTLE_SELECTED",
            Message::ShuttleDeselected => "SHUTTLE_DESELECTED",
            Message::ShuttlePositionsReceived { .. } => "SHUTTLE_POSITIONS_RECEIVED",
            Message::MapMoved { .. } => "MAP_MOVED",
            Message::MapZoomed { .. } => "MAP_ZOOMED",
            Message::MapFollowUser => "MAP_FOLLOW_USER",
        }
    }
}
