use crate::middleware::{Dispatcher, Layer};
use crate::store::Store;

/// A deferred action: a closure dispatched like any other action and run
/// with the store by the thunk middleware.
///
/// A named wrapper is needed because a bare closure's anonymous type cannot
/// serve as a registry key; `Thunk<S>` is the action type the thunk
/// middleware is registered for.
///
/// # Examples
///
/// ```
/// use capstan::{Store, Thunk};
///
/// let store = Store::new(0);
/// store.register_reducer(|state: i32, delta: &i32| state + delta);
/// store.register_thunk_middleware();
///
/// store.dispatch(Thunk::new(|store: &Store<i32>| {
///     store.dispatch(2);
///     store.dispatch(3);
/// }));
/// assert_eq!(store.get(), 5);
/// ```
pub struct Thunk<S>(Box<dyn FnOnce(&Store<S>) + Send>);

impl<S> Thunk<S> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&Store<S>) + Send + 'static,
    {
        Self(Box::new(f))
    }

    pub(crate) fn run(self, store: &Store<S>) {
        (self.0)(store)
    }
}

/// The pre-built middleware that executes [`Thunk`] actions.
///
/// The thunk is invoked with the store and `next` is never called, so no
/// reducer fold runs for the thunk action itself; state changes happen
/// through the dispatches the thunk issues.
pub(crate) fn thunk_middleware<S>(store: &Store<S>) -> Layer<Thunk<S>>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    let store = store.clone();
    Box::new(move |_next: Dispatcher<Thunk<S>>| {
        let store = store.clone();
        Box::new(move |thunk: Thunk<S>| thunk.run(&store))
    })
}
