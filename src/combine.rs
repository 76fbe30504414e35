//! Runtime state combinator.
//!
//! [`combine`] takes an ordered name → reducer mapping and yields one reducer
//! over a [`Composite`] record keyed by exactly those names. Use it when the
//! slice set is only known at runtime; for a fixed set prefer the
//! `combine_reducers!` macro, which checks the wiring at compile time.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::StoreError;
use crate::reducer::{ReduceResult, Reducer};
use crate::warn_log;

/// Ordered slice registrations waiting to be validated by [`combine`].
pub struct SliceMap<S, A: ?Sized> {
    entries: Vec<(String, Box<dyn Reducer<S, A>>)>,
}

impl<S, A: ?Sized> Default for SliceMap<S, A> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<S, A: ?Sized> SliceMap<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reducer` under `name`. Validation happens in [`combine`].
    pub fn slice<R>(mut self, name: impl Into<String>, reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        self.entries.push((name.into(), Box::new(reducer)));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable record of slice states in slice registration order.
#[derive(Debug)]
pub struct Composite<S> {
    entries: Vec<(Rc<str>, Rc<S>)>,
}

impl<S> Composite<S> {
    /// Build a composite by hand, e.g. to preload a store. A repeated name
    /// overwrites the earlier value but keeps its position.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
    {
        let mut out: Vec<(Rc<str>, Rc<S>)> = Vec::new();
        for (name, value) in entries {
            let name: String = name.into();
            let value = Rc::new(value);
            match out.iter_mut().find(|(existing, _)| **existing == *name) {
                Some(slot) => slot.1 = value,
                None => out.push((Rc::from(name), value)),
            }
        }
        Self { entries: out }
    }

    pub fn get(&self, name: &str) -> Option<&Rc<S>> {
        self.entries
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| &**key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<S>)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: PartialEq> PartialEq for Composite<S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<S: Serialize> Serialize for Composite<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&**key, &**value)?;
        }
        map.end()
    }
}

/// Reducer produced by [`combine`].
pub struct CombinedReducer<S, A: ?Sized> {
    slices: Vec<(Rc<str>, Box<dyn Reducer<S, A>>)>,
    /// Unexpected keys already reported, so each one is logged once.
    warned: RefCell<HashSet<Rc<str>>>,
}

impl<S, A: ?Sized> CombinedReducer<S, A> {
    pub fn slice_names(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(name, _)| &**name)
    }

    /// Report keys with no slice that were not reported before. Returns the
    /// newly reported keys.
    fn warn_unexpected_keys(&self, state: &Composite<S>) -> Vec<Rc<str>> {
        let mut warned = self.warned.borrow_mut();
        let fresh: Vec<Rc<str>> = state
            .entries
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !self.slices.iter().any(|(name, _)| name == *key))
            .filter(|key| !warned.contains(*key))
            .cloned()
            .collect();
        if !fresh.is_empty() {
            warn_log!(
                "Unexpected keys {:?} in composite state; expected one of {:?}. They will be dropped.",
                fresh,
                self.slice_names().collect::<Vec<_>>()
            );
            warned.extend(fresh.iter().cloned());
        }
        fresh
    }

    /// True when `state` holds exactly the slice keys, in slice order.
    fn has_slice_shape(&self, state: &Composite<S>) -> bool {
        state.names().eq(self.slice_names())
    }
}

/// Validate `slices` and build the combined reducer.
///
/// Names must be non-empty and unique. An empty mapping is accepted and
/// reduces to an empty composite.
pub fn combine<S, A: ?Sized>(slices: SliceMap<S, A>) -> Result<CombinedReducer<S, A>, StoreError> {
    let mut seen = HashSet::new();
    for (name, _) in &slices.entries {
        if name.is_empty() {
            return Err(StoreError::EmptySliceName);
        }
        if !seen.insert(name.as_str()) {
            return Err(StoreError::DuplicateSlice(name.clone()));
        }
    }

    Ok(CombinedReducer {
        slices: slices
            .entries
            .into_iter()
            .map(|(name, reducer)| (Rc::from(name), reducer))
            .collect(),
        warned: RefCell::new(HashSet::new()),
    })
}

impl<S, A: ?Sized> Reducer<Composite<S>, A> for CombinedReducer<S, A> {
    fn reduce(&self, state: Option<Rc<Composite<S>>>, action: &A) -> ReduceResult<Composite<S>> {
        if let Some(prev) = &state {
            self.warn_unexpected_keys(prev);
        }

        let mut entries = Vec::with_capacity(self.slices.len());
        let mut has_changed = false;
        for (name, reducer) in &self.slices {
            let prev_slice = state.as_ref().and_then(|prev| prev.get(name)).cloned();
            let next_slice = Reducer::<S, A>::reduce(&**reducer, prev_slice.clone(), action)
                .map_err(|err| err.in_slice(name))?;
            has_changed |= !matches!(&prev_slice, Some(prev) if Rc::ptr_eq(prev, &next_slice));
            entries.push((Rc::clone(name), next_slice));
        }

        match state {
            // Dropped or reordered keys change the shape even if every slice
            // kept its value.
            Some(prev) if !has_changed && self.has_slice_shape(&prev) => Ok(prev),
            _ => Ok(Rc::new(Composite { entries })),
        }
    }
}
