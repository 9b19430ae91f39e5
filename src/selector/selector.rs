use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

use crate::registry::TypeMap;

/// A selector's compute function over state `S`, yielding a derived `R`.
pub type SelectorFn<S, R> = Arc<dyn Fn(&S) -> R + Send + Sync>;

/// A change callback receiving `(previous, new)` derived values.
pub type SelectorCallback<R> = Arc<dyn Fn(&R, &R) + Send + Sync>;

/// Why a selector-side evaluation produced no usable value.
///
/// Never crosses the crate boundary: compute failures collapse to
/// `R::default()` and callback failures mute the entry.
#[derive(Debug, Error)]
pub(crate) enum SelectorError {
    #[error("computation panicked")]
    ComputePanicked,
    #[error("change callback panicked")]
    CallbackPanicked,
}

/// One named derived value registered on a store.
///
/// `last` holds the value computed from the most recent state this entry
/// has observed. `callback` transitions to `None` permanently the first
/// time it panics; the compute/cache path keeps running afterwards.
pub(crate) struct SelectorEntry<S, R> {
    pub compute: SelectorFn<S, R>,
    pub last: R,
    pub callback: Option<SelectorCallback<R>>,
}

/// The per-derived-type name table held in a store's selector registry.
pub(crate) type SelectorTable<S, R> = HashMap<String, SelectorEntry<S, R>>;

/// Wrap a raw compute function so evaluation failures stay inside the
/// selector subsystem: a panic is logged and replaced with `R::default()`.
pub(crate) fn guard_compute<S, R, F>(name: &str, compute: F) -> SelectorFn<S, R>
where
    R: Default,
    F: Fn(&S) -> R + Send + Sync + 'static,
{
    let name = name.to_owned();
    Arc::new(move |state: &S| match evaluate(&compute, state) {
        Ok(value) => value,
        Err(err) => {
            warn!("selector '{name}' {err}; substituting the default value");
            R::default()
        }
    })
}

fn evaluate<S, R>(compute: &impl Fn(&S) -> R, state: &S) -> Result<R, SelectorError> {
    catch_unwind(AssertUnwindSafe(|| compute(state))).map_err(|_| SelectorError::ComputePanicked)
}

fn invoke_callback<R>(
    callback: &SelectorCallback<R>,
    prev: &R,
    new: &R,
) -> Result<(), SelectorError> {
    catch_unwind(AssertUnwindSafe(|| callback(prev, new)))
        .map_err(|_| SelectorError::CallbackPanicked)
}

/// The state-change handler body for one registered selector.
///
/// The entry is resolved by name at fire time, so re-registering a name
/// swaps the compute used for subsequent changes. The cached value is
/// compared against the recomputed one; on inequality the cache is updated
/// first, then the callback fires. No registry lock is held while the
/// compute or the callback runs.
pub(crate) fn selector_tick<S, R>(selectors: &TypeMap, name: &str, state: &S)
where
    S: 'static,
    R: Clone + PartialEq + Send + Sync + 'static,
{
    let snapshot = selectors.with_slot::<R, SelectorTable<S, R>, _>(|table| {
        table
            .get(name)
            .map(|entry| (entry.compute.clone(), entry.last.clone(), entry.callback.clone()))
    });
    let Some((compute, last, callback)) = snapshot else {
        return;
    };

    let value = compute(state);
    if value == last {
        return;
    }

    selectors.with_slot::<R, SelectorTable<S, R>, _>(|table| {
        if let Some(entry) = table.get_mut(name) {
            entry.last = value.clone();
        }
    });

    if let Some(callback) = callback {
        if let Err(err) = invoke_callback(&callback, &last, &value) {
            debug!("{err} in selector '{name}'; muting its callback");
            selectors.with_slot::<R, SelectorTable<S, R>, _>(|table| {
                if let Some(entry) = table.get_mut(name) {
                    entry.callback = None;
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_compute_swallows_panics() {
        let compute: SelectorFn<i32, i32> =
            guard_compute("broken", |_state: &i32| -> i32 { panic!("boom") });
        assert_eq!(compute(&7), 0);
    }

    #[test]
    fn guarded_compute_passes_values_through() {
        let compute: SelectorFn<i32, i32> = guard_compute("double", |state: &i32| state * 2);
        assert_eq!(compute(&21), 42);
    }

    #[test]
    fn callback_panic_is_reported_not_propagated() {
        let callback: SelectorCallback<i32> = Arc::new(|_prev, _new| panic!("boom"));
        assert!(invoke_callback(&callback, &1, &2).is_err());
    }
}
