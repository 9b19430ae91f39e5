use std::sync::Arc;

use crate::store::Store;

/// The terminal shape of a middleware chain: consumes one action.
pub type Dispatcher<A> = Box<dyn Fn(A)>;

/// One layer of a middleware chain: wraps the `next` dispatcher and returns
/// the dispatcher callers of this layer see.
pub type Layer<A> = Box<dyn Fn(Dispatcher<A>) -> Dispatcher<A>>;

/// A middleware factory, invoked with the store on every dispatch to
/// produce a fresh [`Layer`] for that action's chain.
pub type Middleware<S, A> = Arc<dyn Fn(&Store<S>) -> Layer<A> + Send + Sync>;

/// Fold `layers` around `base` so the first layer becomes the outermost.
///
/// Layers are reversed and applied right-to-left; the resulting dispatcher
/// enters layer 1 first, reaches `base` innermost, and unwinds back out in
/// reverse order.
pub(crate) fn compose<A>(layers: Vec<Layer<A>>, base: Dispatcher<A>) -> Dispatcher<A> {
    layers.into_iter().rev().fold(base, |next, layer| layer(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn first_layer_is_outermost() {
        let order = Arc::new(Mutex::new(Vec::new()));

        let layers: Vec<Layer<u8>> = ["a", "b"]
            .into_iter()
            .map(|tag| {
                let order = Arc::clone(&order);
                let layer: Layer<u8> = Box::new(move |next: Dispatcher<u8>| {
                    let order = Arc::clone(&order);
                    Box::new(move |action: u8| {
                        order.lock().unwrap().push(format!("{tag} in"));
                        next(action);
                        order.lock().unwrap().push(format!("{tag} out"));
                    })
                });
                layer
            })
            .collect();

        let base: Dispatcher<u8> = {
            let order = Arc::clone(&order);
            Box::new(move |_| order.lock().unwrap().push("base".to_string()))
        };

        compose(layers, base)(0);

        assert_eq!(
            order.lock().unwrap().as_slice(),
            ["a in", "b in", "base", "b out", "a out"]
        );
    }

    #[test]
    fn empty_chain_is_just_the_base() {
        let hits = Arc::new(Mutex::new(0));
        let base: Dispatcher<u8> = {
            let hits = Arc::clone(&hits);
            Box::new(move |_| *hits.lock().unwrap() += 1)
        };

        compose(Vec::new(), base)(0);
        assert_eq!(*hits.lock().unwrap(), 1);
    }
}
