//! # Capstan
//!
//! A unidirectional state container for Rust.
//!
//! One state value per store, changed only by dispatching actions:
//!
//! - `Store<S>` - Thread-safe state container; dispatch, subscriptions,
//!   and per-action-type registrations
//! - Reducers - Pure `(state, action) -> state` transitions, folded in
//!   registration order
//! - Middleware - Composable layers around the reducer fold that can
//!   observe, transform, or swallow actions
//! - Selectors - Named derived values with change-detection callbacks
//! - `Thunk` - Dispatchable closures that receive the store itself
//!
//! ## Quick start
//!
//! ```
//! use capstan::StoreBuilder;
//!
//! #[derive(Clone, PartialEq)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! let store = StoreBuilder::new(Counter { value: 0 })
//!     .with_reducer(|state: Counter, action: &CounterAction| match action {
//!         CounterAction::Increment => Counter { value: state.value + 1 },
//!         CounterAction::Decrement => Counter { value: state.value - 1 },
//!     })
//!     .build();
//!
//! store.dispatch(CounterAction::Increment);
//! store.dispatch(CounterAction::Increment);
//! store.dispatch(CounterAction::Decrement);
//!
//! assert_eq!(store.read(|state| state.value), 1);
//! ```
//!
//! ## Dispatch semantics
//!
//! Dispatch is synchronous: the action is queued and the queue head is
//! drained on the same call stack. A dispatch issued from inside a
//! reducer, middleware, or callback runs depth-first, completing before
//! the outer dispatch returns. Dispatching concurrently from multiple
//! threads is memory-safe but folds are not serialized against each other;
//! see [`Store::dispatch`].

mod queue;
mod registry;

pub mod middleware;
pub mod selector;
pub mod store;

// Re-export main types for convenience
pub use middleware::{Dispatcher, Layer, Middleware, Thunk};
pub use selector::{SelectorCallback, SelectorFn};
pub use store::{Reducer, Store, StoreBuilder};
