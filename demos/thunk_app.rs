//! Thunks: dispatching closures that drive the store

use capstan::{Store, StoreBuilder, Thunk};

#[derive(Clone, Debug, Default, PartialEq)]
struct Session {
    user: Option<String>,
    attempts: u32,
}

enum SessionAction {
    AttemptFailed,
    LoggedIn(String),
    LoggedOut,
}

fn main() {
    env_logger::init();

    let store = StoreBuilder::new(Session::default())
        .with_reducer(|state: Session, action: &SessionAction| match action {
            SessionAction::AttemptFailed => Session {
                attempts: state.attempts + 1,
                ..state
            },
            SessionAction::LoggedIn(user) => Session {
                user: Some(user.clone()),
                ..state
            },
            SessionAction::LoggedOut => Session { user: None, ..state },
        })
        .with_thunk_middleware()
        .build();

    store.subscribe(|_prev: &Session, next: &Session| {
        println!("[State] {next:?}");
    });

    // A thunk bundles a multi-step flow into one dispatchable value.
    let login_flow = Thunk::new(|store: &Store<Session>| {
        store.dispatch(SessionAction::AttemptFailed);
        store.dispatch(SessionAction::AttemptFailed);
        store.dispatch(SessionAction::LoggedIn("ada".to_string()));
    });

    store.dispatch(login_flow);
    store.dispatch(SessionAction::LoggedOut);

    println!("final: {:?}", store.get());
}
