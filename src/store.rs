//! Explicit state store: construct, dispatch, discard.
//!
//! The store owns the root reducer and the current state handle. There is no
//! global instance; whoever needs the state gets a reference to the store (or
//! a cloned `Rc` of the state) passed in.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::action::Action;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::{debug_log, warn_log};

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Rebuild an id handed out through [`SubscriptionId::raw`].
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// One dispatched action as remembered by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub kind: String,
    pub at: DateTime<Utc>,
    /// Whether the root state reference changed.
    pub changed: bool,
}

type Listener<S> = Box<dyn FnMut(&Rc<S>)>;

pub struct Store<S, A, R>
where
    A: Action,
    R: Reducer<S, A>,
{
    reducer: R,
    state: Rc<S>,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_subscription: u64,
    history: VecDeque<HistoryEntry>,
    config: StoreConfig,
    _action: PhantomData<fn(A)>,
}

impl<S, A, R> Store<S, A, R>
where
    A: Action,
    R: Reducer<S, A>,
{
    /// Build the store and run the init action so every slice supplies its
    /// default. Fails when any slice rejects the init action.
    pub fn new(reducer: R, config: StoreConfig) -> Result<Self, StoreError> {
        Self::start(reducer, None, config)
    }

    /// Like [`Store::new`] but starting from a preloaded state. The init action
    /// still runs so slices can fill in whatever the preload lacks.
    pub fn with_state(reducer: R, preloaded: S, config: StoreConfig) -> Result<Self, StoreError> {
        Self::start(reducer, Some(Rc::new(preloaded)), config)
    }

    fn start(reducer: R, preloaded: Option<Rc<S>>, config: StoreConfig) -> Result<Self, StoreError> {
        let init = A::init();
        let state = Reducer::<S, A>::reduce(&reducer, preloaded, &init)?;
        debug_log!("store created (history_limit={})", config.history_limit);

        let mut store = Self {
            reducer,
            state,
            listeners: Vec::new(),
            next_subscription: 0,
            history: VecDeque::new(),
            config,
            _action: PhantomData,
        };
        store.record(&init, true);
        Ok(store)
    }

    /// Current root state.
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.state)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Run `action` through the root reducer.
    ///
    /// Returns whether the root state changed; listeners only run in that
    /// case. When the reducer fails the previous state stays in place and the
    /// error is handed back untouched.
    pub fn dispatch(&mut self, action: A) -> Result<bool, StoreError> {
        if self.config.log_actions {
            debug_log!("dispatch {}", action.kind());
        }

        let next = Reducer::<S, A>::reduce(&self.reducer, Some(Rc::clone(&self.state)), &action)
            .map_err(|err| {
                warn_log!("dispatch {} failed: {}", action.kind(), err);
                StoreError::from(err)
            })?;

        Ok(self.commit(next, &action))
    }

    /// Swap in a new root reducer and dispatch the replace action through it.
    ///
    /// Returns the previous reducer. If the new reducer fails on the replace
    /// action nothing is swapped.
    pub fn replace_reducer(&mut self, reducer: R) -> Result<R, StoreError> {
        let replace = A::replace();
        let next = Reducer::<S, A>::reduce(&reducer, Some(Rc::clone(&self.state)), &replace)?;
        let previous = std::mem::replace(&mut self.reducer, reducer);
        debug_log!("root reducer replaced");
        self.commit(next, &replace);
        Ok(previous)
    }

    /// Register a listener called with the new state after every changing
    /// dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Rc<S>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch records, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn snapshot_json(&self) -> Result<serde_json::Value, StoreError>
    where
        S: Serialize,
    {
        Ok(serde_json::to_value(&*self.state)?)
    }

    fn commit(&mut self, next: Rc<S>, action: &A) -> bool {
        let changed = !Rc::ptr_eq(&self.state, &next);
        self.state = next;
        self.record(action, changed);
        if changed {
            for (_, listener) in self.listeners.iter_mut() {
                listener(&self.state);
            }
        }
        changed
    }

    fn record(&mut self, action: &A, changed: bool) {
        let limit = self.config.history_limit;
        if limit == 0 {
            return;
        }
        self.history.push_back(HistoryEntry {
            kind: action.kind().to_string(),
            at: Utc::now(),
            changed,
        });
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }
}
