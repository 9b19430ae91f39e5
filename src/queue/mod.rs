//! Serialized action queue.
//!
//! Dispatched actions are wrapped in pending closures and queued here; the
//! store drains the head synchronously right after every enqueue, which is
//! what serializes action processing.

mod queue;

pub(crate) use queue::ActionQueue;
