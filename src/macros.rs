//! Small crate-wide convenience macros.

/// Console level used by [`debug_log!`] and [`warn_log!`].
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub enum ConsoleLevel {
    Debug,
    Warn,
}

/// Forward a formatted line to the browser console.
///
/// Console imports only exist on `wasm32`; elsewhere the line is discarded so
/// native unit-tests never trip over a missing JS host.
#[doc(hidden)]
pub fn console(level: ConsoleLevel, line: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            ConsoleLevel::Debug => web_sys::console::debug_1(&value),
            ConsoleLevel::Warn => web_sys::console::warn_1(&value),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (level, line);
    }
}

/// `format!`-style debug line on the browser console.
///
/// ```rust,ignore
/// debug_log!("dispatch {}", action.kind());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::macros::console($crate::macros::ConsoleLevel::Debug, &format!($($arg)*))
    };
}

/// Same as [`debug_log!`] but routed to `console.warn`.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::macros::console($crate::macros::ConsoleLevel::Warn, &format!($($arg)*))
    };
}

/// Wire a fixed set of slice reducers into one root reducer.
///
/// Generates the composite state struct (one `Rc` per slice), a `SLICES`
/// constant listing the slice names in wiring order, and a unit reducer type
/// implementing [`Reducer`](crate::reducer::Reducer) for the composite.
///
/// ```rust,ignore
/// combine_reducers! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct RootState, RootReducer for Message {
///         cards: CardsState => cards::reduce,
///         location: LocationState => location::reduce,
///     }
/// }
/// ```
///
/// The generated reducer hands every slice its previous value (`None` on the
/// first call) plus the action. When every slice hands back the very same
/// `Rc`, the previous composite is returned untouched; otherwise a new
/// composite is built. A failing slice aborts the pass and the error carries
/// the slice name.
#[macro_export]
macro_rules! combine_reducers {
    (
        $(#[$meta:meta])*
        $vis:vis struct $state:ident, $reducer:ident for $action:ty {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $slice:ty => $slice_reducer:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $state {
            $(
                $(#[$fmeta])*
                pub $field: ::std::rc::Rc<$slice>,
            )+
        }

        impl $state {
            /// Slice names in wiring order.
            pub const SLICES: &'static [&'static str] = &[$(stringify!($field)),+];
        }

        #[doc = concat!("Root reducer for [`", stringify!($state), "`].")]
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $reducer;

        impl $crate::reducer::Reducer<$state, $action> for $reducer {
            fn reduce(
                &self,
                state: ::std::option::Option<::std::rc::Rc<$state>>,
                action: &$action,
            ) -> $crate::reducer::ReduceResult<$state> {
                let next = $state {
                    $(
                        $field: <_ as $crate::reducer::Reducer<$slice, $action>>::reduce(
                            &$slice_reducer,
                            state.as_ref().map(|prev| ::std::rc::Rc::clone(&prev.$field)),
                            action,
                        )
                        .map_err(|err| err.in_slice(stringify!($field)))?,
                    )+
                };

                if let ::std::option::Option::Some(prev) = state {
                    let untouched = [$(::std::rc::Rc::ptr_eq(&prev.$field, &next.$field)),+];
                    if untouched.iter().all(|same| *same) {
                        return ::std::result::Result::Ok(prev);
                    }
                }

                ::std::result::Result::Ok(::std::rc::Rc::new(next))
            }
        }
    };
}
