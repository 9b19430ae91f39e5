use std::any::type_name;
use std::sync::{Arc, RwLock};

use log::{debug, trace};

use crate::middleware::{compose, thunk_middleware, Dispatcher, Layer, Middleware, Thunk};
use crate::queue::ActionQueue;
use crate::registry::TypeMap;
use crate::selector::{
    guard_compute, selector_tick, SelectorCallback, SelectorEntry, SelectorFn, SelectorTable,
};

/// A pure state transition: consumes the current state and an action,
/// produces the next state.
pub type Reducer<S, A> = Arc<dyn Fn(S, &A) -> S + Send + Sync>;

type PendingAction = Box<dyn FnOnce() + Send>;
type StateSubscriber<S> = Arc<dyn Fn(&S, &S) + Send + Sync>;

/// A unidirectional state container.
///
/// A store owns one state value; the only way to change it is to
/// [`dispatch`](Store::dispatch) an action, which runs through the
/// middleware chain registered for the action's type and terminates in a
/// fold over the registered reducers. When the folded state differs from
/// the previous one, subscribers and selectors are notified with
/// `(previous, new)`.
///
/// Stores are cheap handles: cloning shares the state, the queue, and all
/// registrations.
///
/// # Reentrancy and threads
///
/// Dispatch is synchronous and runs to completion on the calling thread.
/// A dispatch issued from inside a reducer, middleware, or callback is
/// drained depth-first: the nested action's fold and notification complete
/// before the outer dispatch returns. Dispatching concurrently from
/// multiple threads is memory-safe but not serialized across a whole fold;
/// two simultaneous folds can interleave and the later write wins. Callers
/// that need cross-thread ordering must synchronize externally.
pub struct Store<S> {
    state: Arc<RwLock<S>>,
    queue: Arc<ActionQueue<PendingAction>>,
    reducers: Arc<TypeMap>,
    middleware: Arc<TypeMap>,
    selectors: Arc<TypeMap>,
    subscribers: Arc<RwLock<Vec<StateSubscriber<S>>>>,
}

impl<S> Store<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a new store with the given initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            queue: Arc::new(ActionQueue::new()),
            reducers: Arc::new(TypeMap::new()),
            middleware: Arc::new(TypeMap::new()),
            selectors: Arc::new(TypeMap::new()),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> S {
        self.state.read().unwrap().clone()
    }

    /// Read the current state without cloning.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Subscribe to state changes.
    ///
    /// The callback receives `(previous, new)` whenever a dispatched
    /// action's reducer fold produces a state that differs from the
    /// previous one. A fold that returns an equal state does not notify.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        self.subscribers.write().unwrap().push(Arc::new(callback));
    }

    /// Dispatch an action.
    ///
    /// The action is wrapped in a pending closure and queued; the queue
    /// head is drained immediately on this call stack. The middleware
    /// chain for `A` is rebuilt fresh for every action, invoked outermost
    /// layer first, and terminates in the reducer fold.
    ///
    /// Panics from reducers or middleware are not caught and propagate out
    /// of this call (or out of whichever frame triggered a nested
    /// dispatch).
    ///
    /// # Examples
    ///
    /// ```
    /// use capstan::Store;
    ///
    /// let store = Store::new(0);
    /// store.register_reducer(|state: i32, delta: &i32| state + delta);
    ///
    /// store.dispatch(4);
    /// assert_eq!(store.get(), 4);
    /// ```
    pub fn dispatch<A>(&self, action: A)
    where
        A: Send + 'static,
    {
        let store = self.clone();
        self.queue.enqueue(Box::new(move || {
            let chain = store.resolve_dispatcher::<A>();
            chain(action);
        }));
        trace!("queued {}; {} pending", type_name::<A>(), self.queue.len());
        self.process_queue_head();
    }

    /// Register a reducer for the action type `A`.
    ///
    /// Reducers registered for the same action type run in registration
    /// order, each consuming the previous reducer's output.
    pub fn register_reducer<A, F>(&self, reducer: F)
    where
        A: 'static,
        F: Fn(S, &A) -> S + Send + Sync + 'static,
    {
        self.register_reducers::<A>([Arc::new(reducer) as Reducer<S, A>]);
    }

    /// Register several reducers for the action type `A` at once.
    pub fn register_reducers<A>(&self, reducers: impl IntoIterator<Item = Reducer<S, A>>)
    where
        A: 'static,
    {
        self.reducers
            .with_slot::<A, Vec<Reducer<S, A>>, _>(|list| list.extend(reducers));
    }

    /// Register a middleware for the action type `A`.
    ///
    /// The factory is invoked with the store on every dispatch of an `A`;
    /// the first-registered middleware becomes the outermost layer of the
    /// chain.
    pub fn register_middleware<A, F>(&self, middleware: F)
    where
        A: 'static,
        F: Fn(&Store<S>) -> Layer<A> + Send + Sync + 'static,
    {
        self.register_middlewares::<A>([Arc::new(middleware) as Middleware<S, A>]);
    }

    /// Register several middleware for the action type `A` at once.
    pub fn register_middlewares<A>(&self, middleware: impl IntoIterator<Item = Middleware<S, A>>)
    where
        A: 'static,
    {
        self.middleware
            .with_slot::<A, Vec<Middleware<S, A>>, _>(|list| list.extend(middleware));
    }

    /// Register the pre-built thunk middleware, enabling dispatch of
    /// [`Thunk`] actions that receive the store itself.
    pub fn register_thunk_middleware(&self) {
        self.register_middleware::<Thunk<S>, _>(thunk_middleware::<S>);
    }

    /// Register a named selector without a change callback.
    ///
    /// The compute function is evaluated immediately against the current
    /// state to seed the cached value, and re-evaluated on every state
    /// change. A panic inside the compute yields `R::default()` instead of
    /// propagating. Registering an existing name overwrites its entry.
    pub fn register_selector<R, F>(&self, name: impl Into<String>, compute: F)
    where
        R: Clone + Default + PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> R + Send + Sync + 'static,
    {
        let name = name.into();
        let compute = guard_compute(&name, compute);
        self.install_selector::<R>(name, compute, None);
    }

    /// Register a named selector with a change callback.
    ///
    /// The callback receives `(previous, new)` whenever a state change
    /// moves the selector's value. A callback that panics is muted
    /// permanently: the cached value keeps tracking state, but the
    /// callback never fires again for this entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use capstan::Store;
    ///
    /// let store = Store::new(1);
    /// store.register_reducer(|state: i32, delta: &i32| state + delta);
    /// store.register_selector_with(
    ///     "is_even",
    ///     |state: &i32| state % 2 == 0,
    ///     |prev: &bool, new: &bool| println!("parity changed: {prev} -> {new}"),
    /// );
    ///
    /// store.dispatch(1);
    /// let is_even = store.get_selector::<bool>("is_even").unwrap();
    /// assert!(is_even(&store.get()));
    /// ```
    pub fn register_selector_with<R, F, C>(&self, name: impl Into<String>, compute: F, callback: C)
    where
        R: Clone + Default + PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> R + Send + Sync + 'static,
        C: Fn(&R, &R) + Send + Sync + 'static,
    {
        let name = name.into();
        let compute = guard_compute(&name, compute);
        self.install_selector::<R>(name, compute, Some(Arc::new(callback)));
    }

    /// Get a previously registered selector's compute function by name, or
    /// `None` if no selector of that name yields an `R`.
    ///
    /// The returned function is the guarded compute, not the cached value.
    pub fn get_selector<R>(&self, name: &str) -> Option<SelectorFn<S, R>>
    where
        R: Send + Sync + 'static,
    {
        self.selectors
            .with_slot::<R, SelectorTable<S, R>, _>(|table| {
                table.get(name).map(|entry| entry.compute.clone())
            })
    }

    fn install_selector<R>(
        &self,
        name: String,
        compute: SelectorFn<S, R>,
        callback: Option<SelectorCallback<R>>,
    ) where
        R: Clone + Default + PartialEq + Send + Sync + 'static,
    {
        let snapshot = self.get();
        let initial = compute(&snapshot);
        self.selectors
            .with_slot::<R, SelectorTable<S, R>, _>(|table| {
                table.insert(
                    name.clone(),
                    SelectorEntry {
                        compute,
                        last: initial,
                        callback,
                    },
                );
            });

        // The handler holds the registry, not the store, and resolves the
        // entry by name at fire time.
        let selectors = Arc::clone(&self.selectors);
        self.subscribe(move |_prev, next| selector_tick::<S, R>(&selectors, &name, next));
    }

    /// Pop and run the queue head, if any.
    ///
    /// Runs inline on the caller's stack; a dispatch issued from inside a
    /// running action drains its own entry here before the outer action
    /// finishes, which is what produces depth-first reentrant ordering.
    fn process_queue_head(&self) {
        if let Some(pending) = self.queue.try_dequeue() {
            pending();
        }
    }

    /// Resolve the middleware chain for `A`, terminating in the reducer
    /// fold. Rebuilt fresh for every dispatched action.
    fn resolve_dispatcher<A>(&self) -> Dispatcher<A>
    where
        A: 'static,
    {
        let factories = self
            .middleware
            .with_slot::<A, Vec<Middleware<S, A>>, _>(|list| list.clone());
        let layers: Vec<Layer<A>> = factories.iter().map(|factory| factory(self)).collect();

        let store = self.clone();
        let base: Dispatcher<A> = Box::new(move |action: A| store.reduce(&action));
        compose(layers, base)
    }

    /// The base dispatcher: fold the registered reducers for `A` over the
    /// current state and notify on change.
    fn reduce<A>(&self, action: &A)
    where
        A: 'static,
    {
        let reducers = self
            .reducers
            .with_slot::<A, Vec<Reducer<S, A>>, _>(|list| list.clone());

        // No lock is held while the reducers run, so reducers are free to
        // dispatch nested actions.
        let prev = self.get();
        let next = reducers
            .iter()
            .fold(prev.clone(), |state, reducer| reducer(state, action));
        *self.state.write().unwrap() = next.clone();

        if next != prev {
            debug!("{} changed state", type_name::<A>());
            self.notify(&prev, &next);
        } else {
            trace!("{} left state unchanged", type_name::<A>());
        }
    }

    fn notify(&self, prev: &S, next: &S) {
        let snapshot: Vec<StateSubscriber<S>> = self.subscribers.read().unwrap().clone();
        for subscriber in snapshot {
            subscriber(prev, next);
        }
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            queue: Arc::clone(&self.queue),
            reducers: Arc::clone(&self.reducers),
            middleware: Arc::clone(&self.middleware),
            selectors: Arc::clone(&self.selectors),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}
