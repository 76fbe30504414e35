//! Error types for reducers and the store.

use std::fmt;

use wasm_bindgen::JsValue;

/// Failure raised by a reducer while processing an action.
///
/// `path` records which slice failed; combinators prepend their slice name as
/// the error bubbles up, so a nested failure reads like `map.viewport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducerError {
    path: Vec<String>,
    message: String,
}

impl ReducerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Attribute the error to `slice` (outermost name ends up first).
    pub fn in_slice(mut self, slice: &str) -> Self {
        self.path.insert(0, slice.to_string());
        self
    }

    /// Dotted slice path, empty when raised by a root reducer.
    pub fn path(&self) -> String {
        self.path.join(".")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ReducerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "reducer failed: {}", self.message)
        } else {
            write!(f, "slice `{}` failed: {}", self.path(), self.message)
        }
    }
}

impl std::error::Error for ReducerError {}

/// Everything that can go wrong building or driving a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A slice mapping contained an empty name.
    EmptySliceName,
    /// The same slice name was registered twice.
    DuplicateSlice(String),
    /// A reducer failed; the store state was left as it was.
    Reducer(ReducerError),
    /// State or action could not cross the JSON / JS boundary.
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::EmptySliceName => write!(f, "slice names must not be empty"),
            StoreError::DuplicateSlice(name) => write!(f, "slice `{}` registered twice", name),
            StoreError::Reducer(err) => write!(f, "{}", err),
            StoreError::Serialize(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Reducer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ReducerError> for StoreError {
    fn from(err: ReducerError) -> Self {
        StoreError::Reducer(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for StoreError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        StoreError::Serialize(err.to_string())
    }
}

impl From<StoreError> for JsValue {
    fn from(err: StoreError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_path_is_outermost_first() {
        let err = ReducerError::new("bad zoom").in_slice("viewport").in_slice("map");
        assert_eq!(err.path(), "map.viewport");
        assert_eq!(err.to_string(), "slice `map.viewport` failed: bad zoom");
    }

    #[test]
    fn test_root_error_display() {
        let err = ReducerError::new("boom");
        assert_eq!(err.path(), "");
        assert_eq!(err.to_string(), "reducer failed: boom");
    }

    #[test]
    fn test_store_error_source() {
        use std::error::Error;
        let err = StoreError::from(ReducerError::new("boom").in_slice("cards"));
        assert!(err.source().is_some());
        assert!(StoreError::EmptySliceName.source().is_none());
        assert_eq!(
            StoreError::DuplicateSlice("map".into()).to_string(),
            "slice `map` registered twice"
        );
    }
}
