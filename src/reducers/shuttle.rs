//! Shuttle domain reducer: which shuttle the user follows and where the
//! shuttles were last reported.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::messages::Message;
use crate::models::ShuttlePosition;
use crate::reducer::{edit, unchanged, ReduceResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShuttleState {
    pub selected: Option<String>,
    pub positions: BTreeMap<String, ShuttlePosition>,
}

impl ShuttleState {
    pub fn selected_position(&self) -> Option<&ShuttlePosition> {
        self.selected.as_ref().and_then(|id| self.positions.get(id))
    }
}

pub fn reduce(state: Option<Rc<ShuttleState>>, msg: &Message) -> ReduceResult<ShuttleState> {
    match msg {
        Message::ShuttleSelected { shuttle_id } => {
            if state.as_ref().and_then(|s| s.selected.as_ref()) == Some(shuttle_id) {
                return unchanged(state);
            }
            edit(state, |s| s.selected = Some(shuttle_id.clone()))
        }
        Message::ShuttleDeselected => match state {
            Some(s) if s.selected.is_some() => edit(Some(s), |s| s.selected = None),
            other => unchanged(other),
        },
        Message::ShuttlePositionsReceived { positions } => {
            // Reject the whole batch; a partial merge would hide the bad report.
            for p in positions {
                p.ensure_valid()?;
            }
            let fresh = positions.iter().any(|p| {
                state.as_ref().and_then(|s| s.positions.get(&p.shuttle_id)) != Some(p)
            });
            if !fresh {
                return unchanged(state);
            }
            edit(state, |s| {
                for p in positions {
                    s.positions.insert(p.shuttle_id.clone(), p.clone());
                }
            })
        }
        _ => unchanged(state),
    }
}
