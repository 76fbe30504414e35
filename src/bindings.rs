//! JavaScript surface of the root store.
//!
//! Actions cross the boundary as plain objects shaped like the serde form of
//! [`Message`], e.g. `{ type: "MAP_ZOOMED", zoom: 12 }`. State goes back out
//! as a JSON-compatible object.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::messages::Message;
use crate::reducers::{RootReducer, RootState, RootStore};
use crate::store::SubscriptionId;
use crate::{debug_log, warn_log};

#[wasm_bindgen(start)]
pub fn start() {
    // Better panic messages in the browser console
    console_error_panic_hook::set_once();
    debug_log!("shuttle-store loaded");
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, StoreError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

fn build_config() -> Result<StoreConfig, JsValue> {
    StoreConfig::from_env().map_err(|e| JsValue::from_str(&e))
}

/// Subscriber calls waiting for the current dispatch to finish.
type Pending = Rc<RefCell<VecDeque<(js_sys::Function, Rc<RootState>)>>>;

/// JS handle to a [`RootStore`].
///
/// Methods take `&self` so a subscriber may call back into the store (e.g.
/// `dispatch` from a listener). Subscribers are queued while the store is
/// borrowed and called once the borrow is released.
#[wasm_bindgen]
pub struct AppStore {
    inner: RefCell<RootStore>,
    pending: Pending,
}

#[wasm_bindgen]
impl AppStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AppStore, JsValue> {
        let inner = RootStore::new(RootReducer, build_config()?)?;
        Ok(AppStore::wrap(inner))
    }

    /// Start from a previously captured `state()` object.
    #[wasm_bindgen(js_name = fromState)]
    pub fn from_state(state: JsValue) -> Result<AppStore, JsValue> {
        let preloaded: RootState = serde_wasm_bindgen::from_value(state).map_err(StoreError::from)?;
        let inner = RootStore::with_state(RootReducer, preloaded, build_config()?)?;
        Ok(AppStore::wrap(inner))
    }

    /// Returns whether the state changed.
    pub fn dispatch(&self, action: JsValue) -> Result<bool, JsValue> {
        let msg: Message = serde_wasm_bindgen::from_value(action).map_err(StoreError::from)?;
        let changed = self.inner.borrow_mut().dispatch(msg)?;
        self.notify();
        Ok(changed)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(to_js(&*self.inner.borrow().state())?)
    }

    /// Call `callback(state)` after every changing dispatch. Returns the id
    /// to pass to `unsubscribe`.
    pub fn subscribe(&self, callback: js_sys::Function) -> f64 {
        let pending = Rc::clone(&self.pending);
        let id = self.inner.borrow_mut().subscribe(move |state| {
            pending.borrow_mut().push_back((callback.clone(), Rc::clone(state)));
        });
        id.raw() as f64
    }

    pub fn unsubscribe(&self, id: f64) -> bool {
        self.inner.borrow_mut().unsubscribe(SubscriptionId::from_raw(id as u64))
    }

    /// Recent dispatches, oldest first.
    pub fn history(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        let entries: Vec<_> = inner.history().collect();
        Ok(to_js(&entries)?)
    }

    #[wasm_bindgen(js_name = sliceNames)]
    pub fn slice_names() -> js_sys::Array {
        RootState::SLICES.iter().map(|name| JsValue::from_str(name)).collect()
    }
}

impl AppStore {
    fn wrap(inner: RootStore) -> Self {
        AppStore {
            inner: RefCell::new(inner),
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Run queued subscriber calls. Each entry is popped before its callback
    /// runs, so a nested dispatch can queue (and drain) more.
    fn notify(&self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((callback, state)) = next else {
                break;
            };
            let value = match to_js(&*state) {
                Ok(value) => value,
                Err(e) => {
                    warn_log!("subscriber skipped: {}", e);
                    continue;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                warn_log!("subscriber threw: {:?}", e);
            }
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn action(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_dispatch_from_js_object() {
        let store = AppStore::new().unwrap();
        assert!(store.dispatch(action(r#"{"type":"MAP_ZOOMED","zoom":3}"#)).unwrap());
        assert!(!store.dispatch(action(r#"{"type":"SHUTTLE_DESELECTED"}"#)).unwrap());

        let state = store.state().unwrap();
        let zoom = js_sys::Reflect::get(
            &js_sys::Reflect::get(&state, &"map".into()).unwrap(),
            &"zoom".into(),
        )
        .unwrap();
        assert_eq!(zoom.as_f64(), Some(3.0));
    }

    #[wasm_bindgen_test]
    fn test_unknown_action_type_is_rejected() {
        let store = AppStore::new().unwrap();
        assert!(store.dispatch(action(r#"{"type":"NOPE"}"#)).is_err());
    }

    #[wasm_bindgen_test]
    fn test_subscriber_can_dispatch() {
        let store = Rc::new(AppStore::new().unwrap());
        let calls = Rc::new(Cell::new(0u32));

        let handle = Rc::clone(&store);
        let seen = Rc::clone(&calls);
        let listener = Closure::wrap(Box::new(move |_state: JsValue| {
            seen.set(seen.get() + 1);
            if seen.get() == 1 {
                assert!(handle.dispatch(action(r#"{"type":"MAP_ZOOMED","zoom":5}"#)).unwrap());
            }
        }) as Box<dyn FnMut(JsValue)>);
        store.subscribe(listener.as_ref().unchecked_ref::<js_sys::Function>().clone());
        listener.forget();

        assert!(store.dispatch(action(r#"{"type":"MAP_ZOOMED","zoom":3}"#)).unwrap());
        assert_eq!(calls.get(), 2);
        let history = store.inner.borrow().history().count();
        assert_eq!(history, 3);
        let zoom = store.inner.borrow().state().map.zoom;
        assert_eq!(zoom, 5.0);
    }

    #[wasm_bindgen_test]
    fn test_slice_names() {
        assert_eq!(AppStore::slice_names().length(), 4);
    }
}
