//! State store for the shuttle app.
//!
//! Four independent slices (`cards`, `location`, `shuttle`, `map`) are
//! combined into one root reducer; a [`Store`] drives it. The combinator is
//! available both as the compile-time `combine_reducers!` macro and as the
//! runtime [`combine`] function.

pub mod macros;

pub mod action;
pub mod bindings;
pub mod combine;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod reducer;
pub mod reducers;
pub mod store;

pub use action::{Action, JsonAction};
pub use combine::{combine, CombinedReducer, Composite, SliceMap};
pub use config::StoreConfig;
pub use error::{ReducerError, StoreError};
pub use reducer::{ReduceResult, Reducer};
pub use reducers::{RootReducer, RootState, RootStore};
pub use store::{HistoryEntry, Store, SubscriptionId};
