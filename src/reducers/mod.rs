//! Slice reducers and the root reducer wiring them together.
//!
//! Each domain (cards, location, shuttle, map) lives in its own module and
//! owns exactly one field of [`RootState`]. None of them can see another
//! slice's state; they only share the dispatched [`Message`].

use serde::{Deserialize, Serialize};

use crate::combine_reducers;
use crate::messages::Message;
use crate::store::Store;

pub mod cards;
pub mod location;
pub mod map;
pub mod shuttle;

use cards::CardsState;
use location::LocationState;
use map::MapState;
use shuttle::ShuttleState;

combine_reducers! {
    /// Root state of the app.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct RootState, RootReducer for Message {
        cards: CardsState => cards::reduce,
        location: LocationState => location::reduce,
        shuttle: ShuttleState => shuttle::reduce,
        map: MapState => map::reduce,
    }
}

pub type RootStore = Store<RootState, Message, RootReducer>;

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::StoreConfig;
    use crate::models::{Card, Coordinate};
    use crate::reducer::Reducer;

    fn root() -> Rc<RootState> {
        RootReducer.reduce(None, &Message::Init).unwrap()
    }

    #[test]
    fn test_slice_names_in_wiring_order() {
        assert_eq!(RootState::SLICES, &["cards", "location", "shuttle", "map"]);
    }

    #[test]
    fn test_init_populates_every_slice() {
        let state = root();
        assert_eq!(*state.cards, CardsState::default());
        assert_eq!(*state.location, LocationState::default());
        assert_eq!(*state.shuttle, ShuttleState::default());
        assert_eq!(*state.map, MapState::default());
    }

    #[test]
    fn test_unhandled_message_returns_same_root() {
        let state = root();
        let next = RootReducer.reduce(Some(Rc::clone(&state)), &Message::ShuttleDeselected).unwrap();
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_change_is_isolated_to_its_slice() {
        let state = root();
        let card = Card { id: "c1".into(), title: "Welcome".into(), body: None };
        let next = RootReducer
            .reduce(Some(Rc::clone(&state)), &Message::CardAdded { card })
            .unwrap();

        assert_eq!(next.cards.cards.len(), 1);
        assert!(Rc::ptr_eq(&state.location, &next.location));
        assert!(Rc::ptr_eq(&state.shuttle, &next.shuttle));
        assert!(Rc::ptr_eq(&state.map, &next.map));
    }

    #[test]
    fn test_shared_action_updates_two_slices() {
        let state = root();
        let fix = Message::LocationUpdated { position: Coordinate::new(60.0, 25.0), accuracy: None };
        let next = RootReducer.reduce(Some(Rc::clone(&state)), &fix).unwrap();

        assert_eq!(next.location.current, Some(Coordinate::new(60.0, 25.0)));
        assert_eq!(next.map.center, Some(Coordinate::new(60.0, 25.0)));
        assert!(Rc::ptr_eq(&state.cards, &next.cards));
    }

    #[test]
    fn test_slice_failure_is_attributed() {
        let err = RootReducer
            .reduce(Some(root()), &Message::MapZoomed { zoom: f64::INFINITY })
            .unwrap_err();
        assert_eq!(err.path(), "map");
    }

    #[test]
    fn test_root_store_round_trip_through_json() {
        let mut store = RootStore::new(RootReducer, StoreConfig::default()).unwrap();
        store.dispatch(Message::ShuttleSelected { shuttle_id: "s7".into() }).unwrap();

        let snapshot = store.snapshot_json().unwrap();
        assert_eq!(snapshot["shuttle"]["selected"], "s7");

        let restored: RootState = serde_json::from_value(snapshot).unwrap();
        assert_eq!(restored, *store.state());
    }
}
