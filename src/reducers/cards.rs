//! Cards domain reducer: the ordered stack of cards shown to the user.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::messages::Message;
use crate::models::Card;
use crate::reducer::{edit, unchanged, ReduceResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardsState {
    pub cards: Vec<Card>,
}

impl CardsState {
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

pub fn reduce(state: Option<Rc<CardsState>>, msg: &Message) -> ReduceResult<CardsState> {
    match msg {
        Message::CardAdded { card } => {
            // Re-adding an identical card is a no-op; same id replaces in place
            if state.as_ref().and_then(|s| s.get(&card.id)) == Some(card) {
                return unchanged(state);
            }
            edit(state, |s| match s.cards.iter_mut().find(|c| c.id == card.id) {
                Some(existing) => *existing = card.clone(),
                None => s.cards.push(card.clone()),
            })
        }
        Message::CardRemoved { id } => {
            if state.as_ref().and_then(|s| s.get(id)).is_none() {
                return unchanged(state);
            }
            edit(state, |s| s.cards.retain(|c| c.id != *id))
        }
        Message::CardsCleared => match state {
            Some(s) if !s.cards.is_empty() => edit(Some(s), |s| s.cards.clear()),
            other => unchanged(other),
        },
        _ => unchanged(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, title: &str) -> Card {
        Card { id: id.into(), title: title.into(), body: None }
    }

    fn added(state: Option<Rc<CardsState>>, c: Card) -> Rc<CardsState> {
        reduce(state, &Message::CardAdded { card: c }).unwrap()
    }

    #[test]
    fn test_init_is_empty() {
        let state = reduce(None, &Message::Init).unwrap();
        assert!(state.cards.is_empty());
    }

    #[test]
    fn test_add_appends_and_replaces() {
        let state = added(None, card("a", "First"));
        let state = added(Some(state), card("b", "Second"));
        let state = added(Some(state), card("a", "Renamed"));
        let titles: Vec<_> = state.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Renamed", "Second"]);
    }

    #[test]
    fn test_identical_add_is_noop() {
        let state = added(None, card("a", "First"));
        let again = added(Some(Rc::clone(&state)), card("a", "First"));
        assert!(Rc::ptr_eq(&state, &again));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let state = added(None, card("a", "First"));
        let next = reduce(Some(Rc::clone(&state)), &Message::CardRemoved { id: "zz".into() }).unwrap();
        assert!(Rc::ptr_eq(&state, &next));

        let next = reduce(Some(next), &Message::CardRemoved { id: "a".into() }).unwrap();
        assert!(next.cards.is_empty());
    }

    #[test]
    fn test_clear() {
        let empty = reduce(None, &Message::Init).unwrap();
        let still = reduce(Some(Rc::clone(&empty)), &Message::CardsCleared).unwrap();
        assert!(Rc::ptr_eq(&empty, &still));

        let full = added(Some(empty), card("a", "First"));
        let cleared = reduce(Some(full), &Message::CardsCleared).unwrap();
        assert!(cleared.cards.is_empty());
    }
}
