use crate::middleware::{Layer, Middleware};
use crate::store::{Reducer, Store};

/// Fluent construction facade over [`Store`].
///
/// Every `with_*` call forwards to the corresponding registration method
/// on the store being built; [`build`](StoreBuilder::build) hands the
/// finished store out.
///
/// # Examples
///
/// ```
/// use capstan::StoreBuilder;
///
/// enum CounterAction {
///     Increment,
///     Decrement,
/// }
///
/// let store = StoreBuilder::new(0)
///     .with_reducer(|state: i32, action: &CounterAction| match action {
///         CounterAction::Increment => state + 1,
///         CounterAction::Decrement => state - 1,
///     })
///     .with_selector("is_positive", |state: &i32| *state > 0)
///     .build();
///
/// store.dispatch(CounterAction::Increment);
/// assert_eq!(store.get(), 1);
/// ```
pub struct StoreBuilder<S> {
    store: Store<S>,
}

impl<S> StoreBuilder<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start building a store with the given initial state.
    pub fn new(initial: S) -> Self {
        Self {
            store: Store::new(initial),
        }
    }

    /// Register a reducer for the action type `A`.
    pub fn with_reducer<A, F>(self, reducer: F) -> Self
    where
        A: 'static,
        F: Fn(S, &A) -> S + Send + Sync + 'static,
    {
        self.store.register_reducer(reducer);
        self
    }

    /// Register several reducers for the action type `A` at once.
    pub fn with_reducers<A>(self, reducers: impl IntoIterator<Item = Reducer<S, A>>) -> Self
    where
        A: 'static,
    {
        self.store.register_reducers(reducers);
        self
    }

    /// Register a middleware for the action type `A`.
    pub fn with_middleware<A, F>(self, middleware: F) -> Self
    where
        A: 'static,
        F: Fn(&Store<S>) -> Layer<A> + Send + Sync + 'static,
    {
        self.store.register_middleware(middleware);
        self
    }

    /// Register several middleware for the action type `A` at once.
    pub fn with_middlewares<A>(self, middleware: impl IntoIterator<Item = Middleware<S, A>>) -> Self
    where
        A: 'static,
    {
        self.store.register_middlewares(middleware);
        self
    }

    /// Register the pre-built thunk middleware.
    pub fn with_thunk_middleware(self) -> Self {
        self.store.register_thunk_middleware();
        self
    }

    /// Register a named selector without a change callback.
    pub fn with_selector<R, F>(self, name: impl Into<String>, compute: F) -> Self
    where
        R: Clone + Default + PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> R + Send + Sync + 'static,
    {
        self.store.register_selector(name, compute);
        self
    }

    /// Register a named selector with a change callback.
    pub fn with_selector_callback<R, F, C>(
        self,
        name: impl Into<String>,
        compute: F,
        callback: C,
    ) -> Self
    where
        R: Clone + Default + PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> R + Send + Sync + 'static,
        C: Fn(&R, &R) + Send + Sync + 'static,
    {
        self.store.register_selector_with(name, compute, callback);
        self
    }

    /// Finish building and return the store.
    pub fn build(self) -> Store<S> {
        self.store
    }
}
