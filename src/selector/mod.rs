//! Derived values with change-detection callbacks.
//!
//! A selector is a named compute function over the store's state. Its
//! result is cached; on every state change the value is recomputed and the
//! optional callback fires with `(previous, new)` when the two differ.
//! Evaluation failures never escape this module: a panicking compute
//! yields the derived type's default, and a panicking callback mutes the
//! entry permanently.

mod selector;

pub use selector::{SelectorCallback, SelectorFn};

pub(crate) use selector::{guard_compute, selector_tick, SelectorEntry, SelectorTable};
