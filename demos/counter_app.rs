//! Counter application demonstrating dispatch, middleware, and selectors

use capstan::{Dispatcher, Layer, Store, StoreBuilder};

#[derive(Clone, Debug, PartialEq)]
struct CounterState {
    count: i32,
    step: i32,
}

enum CounterAction {
    Increment,
    Decrement,
    SetStep(i32),
}

fn main() {
    env_logger::init();

    println!("=== Counter Application ===\n");

    println!("1. Building the store");
    let store = StoreBuilder::new(CounterState { count: 0, step: 1 })
        .with_reducer(|state: CounterState, action: &CounterAction| match action {
            CounterAction::Increment => CounterState {
                count: state.count + state.step,
                ..state
            },
            CounterAction::Decrement => CounterState {
                count: state.count - state.step,
                ..state
            },
            CounterAction::SetStep(step) => CounterState {
                step: *step,
                ..state
            },
        })
        .with_middleware(|_store: &Store<CounterState>| -> Layer<CounterAction> {
            Box::new(|next: Dispatcher<CounterAction>| {
                Box::new(move |action: CounterAction| {
                    println!("   [Middleware] action incoming");
                    next(action);
                    println!("   [Middleware] action handled");
                })
            })
        })
        .with_selector_callback(
            "is_positive",
            |state: &CounterState| state.count > 0,
            |prev: &bool, new: &bool| println!("   [Selector] is_positive: {prev} -> {new}"),
        )
        .build();

    println!("\n2. Subscribing to state changes");
    store.subscribe(|prev: &CounterState, next: &CounterState| {
        println!("   [State] count {} -> {}", prev.count, next.count);
    });

    println!("\n3. Dispatching");
    store.dispatch(CounterAction::Increment);
    store.dispatch(CounterAction::Increment);
    store.dispatch(CounterAction::SetStep(5));
    store.dispatch(CounterAction::Increment);
    store.dispatch(CounterAction::Decrement);

    println!("\n4. Final state: {:?}", store.get());
    let is_positive = store.get_selector::<bool>("is_positive").unwrap();
    println!("   is_positive: {}", is_positive(&store.get()));
}
