//! The store: state ownership, the dispatch pipeline, and the fluent
//! builder.
//!
//! A [`Store`] aggregates the action queue, the per-action-type reducer and
//! middleware registries, and the selector tables, and exposes the whole
//! registration and dispatch surface.

mod builder;
mod store;

pub use builder::StoreBuilder;
pub use store::{Reducer, Store};
