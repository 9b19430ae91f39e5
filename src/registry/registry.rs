use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

/// A heterogeneous map keyed by a compile-time type witness.
///
/// Every slot is created lazily on first access, so lookups never observe
/// an "absent" table — an unregistered action type simply yields an empty
/// slot.
pub(crate) struct TypeMap {
    slots: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Run `f` against the slot registered for the witness type `K`,
    /// creating a `V::default()` slot on first access.
    ///
    /// Callers must pair each witness `K` with a single value type `V` for
    /// the lifetime of the map; all access in this crate goes through typed
    /// store methods that uphold the pairing.
    pub fn with_slot<K, V, R>(&self, f: impl FnOnce(&mut V) -> R) -> R
    where
        K: 'static,
        V: Default + Send + Sync + 'static,
    {
        let mut slots = self.slots.write().unwrap();
        let slot = slots
            .entry(TypeId::of::<K>())
            .or_insert_with(|| Box::new(V::default()));
        let slot = slot
            .downcast_mut::<V>()
            .expect("registry slot bound to a different value type");
        f(slot)
    }
}
