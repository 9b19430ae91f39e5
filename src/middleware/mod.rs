//! Middleware chain composition.
//!
//! A middleware is a factory invoked with the store on every dispatch; it
//! produces a layer that wraps the `next` dispatcher and decides whether
//! and when to forward the action. The first-registered middleware ends up
//! outermost: it runs first on the way in and last on the way out.

mod middleware;
mod thunk;

pub use middleware::{Dispatcher, Layer, Middleware};
pub use thunk::Thunk;

pub(crate) use middleware::compose;
pub(crate) use thunk::thunk_middleware;
