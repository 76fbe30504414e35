//! The reducer contract every slice and every combinator satisfies.

use std::rc::Rc;

use crate::error::ReducerError;

pub type ReduceResult<S> = Result<Rc<S>, ReducerError>;

/// Pure `(previous state, action) -> next state` transition.
///
/// `state` is `None` on the very first call, when the reducer must produce
/// its own initial value. Returning a clone of the incoming `Rc` (the same
/// allocation) signals "nothing changed" to whoever combines this reducer;
/// callers compare with [`Rc::ptr_eq`] rather than by value.
pub trait Reducer<S, A: ?Sized> {
    fn reduce(&self, state: Option<Rc<S>>, action: &A) -> ReduceResult<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    A: ?Sized,
    F: Fn(Option<Rc<S>>, &A) -> ReduceResult<S>,
{
    fn reduce(&self, state: Option<Rc<S>>, action: &A) -> ReduceResult<S> {
        self(state, action)
    }
}

/// Keep the previous value, or build the default on the first call.
pub fn unchanged<S: Default>(state: Option<Rc<S>>) -> ReduceResult<S> {
    Ok(state.unwrap_or_default())
}

/// Wrap a freshly computed slice value.
pub fn changed<S>(next: S) -> ReduceResult<S> {
    Ok(Rc::new(next))
}

/// Copy-on-write edit of the previous value (default on the first call).
///
/// The returned state is always a new allocation, so only use this from
/// branches that really change something.
pub fn edit<S, F>(state: Option<Rc<S>>, f: F) -> ReduceResult<S>
where
    S: Clone + Default,
    F: FnOnce(&mut S),
{
    let mut next = state.map(|prev| (*prev).clone()).unwrap_or_default();
    f(&mut next);
    changed(next)
}
