//! Actions and the reserved lifecycle actions the store dispatches itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{INIT_ACTION_TYPE, REPLACE_ACTION_TYPE};

/// A message describing an intended state transition.
///
/// Besides the application's own variants, every action type must be able to
/// express the two lifecycle actions the store dispatches on its own: `init`
/// right after construction and `replace` after a reducer swap. Slices see
/// them like any other action and usually answer with their defaults.
pub trait Action: fmt::Debug {
    fn init() -> Self
    where
        Self: Sized;

    fn replace() -> Self
    where
        Self: Sized;

    /// Short name used for logging and the dispatch history.
    fn kind(&self) -> &str;

    fn is_reserved(&self) -> bool {
        matches!(self.kind(), INIT_ACTION_TYPE | REPLACE_ACTION_TYPE)
    }
}

/// Schemaless action: a `type` tag plus arbitrary JSON fields.
///
/// Serialises flat, e.g. `{"type": "ADD", "item": "A"}`, which is also the
/// shape the wasm binding accepts from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl JsonAction {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Builder-style payload field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

impl Action for JsonAction {
    fn init() -> Self {
        JsonAction::new(INIT_ACTION_TYPE)
    }

    fn replace() -> Self {
        JsonAction::new(REPLACE_ACTION_TYPE)
    }

    fn kind(&self) -> &str {
        &self.kind
    }
}
