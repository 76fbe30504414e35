//! Map domain reducer: viewport centre, zoom and whether the map follows the
//! device location.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAP_ZOOM, MAX_MAP_ZOOM, MIN_MAP_ZOOM};
use crate::error::ReducerError;
use crate::messages::Message;
use crate::models::Coordinate;
use crate::reducer::{changed, unchanged, ReduceResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    pub center: Option<Coordinate>,
    pub zoom: f64,
    pub follow_user: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            center: None,
            zoom: DEFAULT_MAP_ZOOM,
            follow_user: true,
        }
    }
}

pub fn reduce(state: Option<Rc<MapState>>, msg: &Message) -> ReduceResult<MapState> {
    let prev = state.clone().unwrap_or_default();
    let next = match msg {
        Message::MapMoved { center } => {
            center.ensure_valid()?;
            MapState {
                center: Some(*center),
                follow_user: false,
                ..(*prev).clone()
            }
        }
        Message::MapZoomed { zoom } => {
            if !zoom.is_finite() {
                return Err(ReducerError::new(format!("zoom must be finite, got {}", zoom)));
            }
            MapState {
                zoom: zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM),
                ..(*prev).clone()
            }
        }
        Message::MapFollowUser => MapState {
            follow_user: true,
            ..(*prev).clone()
        },
        // Every slice sees every action; the map only reads the action itself,
        // never the location slice.
        Message::LocationUpdated { position, .. } if prev.follow_user => {
            position.ensure_valid()?;
            MapState {
                center: Some(*position),
                ..(*prev).clone()
            }
        }
        _ => return unchanged(state),
    };

    match state {
        Some(prev) if *prev == next => Ok(prev),
        _ => changed(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() -> Rc<MapState> {
        reduce(None, &Message::Init).unwrap()
    }

    #[test]
    fn test_init_defaults() {
        let state = init();
        assert_eq!(state.zoom, DEFAULT_MAP_ZOOM);
        assert!(state.follow_user);
        assert_eq!(state.center, None);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let state = reduce(Some(init()), &Message::MapZoomed { zoom: 99.0 }).unwrap();
        assert_eq!(state.zoom, MAX_MAP_ZOOM);
        let state = reduce(Some(state), &Message::MapZoomed { zoom: -3.0 }).unwrap();
        assert_eq!(state.zoom, MIN_MAP_ZOOM);
    }

    #[test]
    fn test_nan_zoom_fails() {
        let err = reduce(Some(init()), &Message::MapZoomed { zoom: f64::NAN }).unwrap_err();
        assert!(err.message().starts_with("zoom must be finite"));
    }

    #[test]
    fn test_follows_location_until_moved() {
        let fix = |lat| Message::LocationUpdated { position: Coordinate::new(lat, 10.0), accuracy: None };

        let state = reduce(Some(init()), &fix(50.0)).unwrap();
        assert_eq!(state.center, Some(Coordinate::new(50.0, 10.0)));

        let moved = reduce(Some(state), &Message::MapMoved { center: Coordinate::new(1.0, 1.0) }).unwrap();
        assert!(!moved.follow_user);

        let ignored = reduce(Some(Rc::clone(&moved)), &fix(51.0)).unwrap();
        assert!(Rc::ptr_eq(&moved, &ignored));

        let following = reduce(Some(ignored), &Message::MapFollowUser).unwrap();
        assert!(following.follow_user);
    }

    #[test]
    fn test_non_finite_centre_fails() {
        let state = init();
        let err = reduce(Some(Rc::clone(&state)), &Message::MapMoved { center: Coordinate::new(f64::NAN, 0.0) })
            .unwrap_err();
        assert!(err.message().contains("invalid coordinate"));

        let drift = Message::LocationUpdated { position: Coordinate::new(0.0, f64::INFINITY), accuracy: None };
        assert!(reduce(Some(state), &drift).is_err());
    }

    #[test]
    fn test_repeated_move_keeps_reference() {
        let moved = reduce(Some(init()), &Message::MapMoved { center: Coordinate::new(1.0, 1.0) }).unwrap();
        let again = reduce(Some(Rc::clone(&moved)), &Message::MapMoved { center: Coordinate::new(1.0, 1.0) }).unwrap();
        assert!(Rc::ptr_eq(&moved, &again));
    }

    #[test]
    fn test_same_zoom_keeps_reference() {
        let state = init();
        let same = reduce(Some(Rc::clone(&state)), &Message::MapZoomed { zoom: DEFAULT_MAP_ZOOM }).unwrap();
        assert!(Rc::ptr_eq(&state, &same));
    }
}
