//! The observable value container.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle identifying one subscriber of a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// An observable value container.
///
/// Holds a single value and a list of subscribers. Every [`set`](Self::set)
/// or [`update`](Self::update) notifies all subscribers synchronously with
/// the new value, in subscription order, before the call returns.
///
/// Subscribing also invokes the callback once immediately with the current
/// value, so a new observer never has to ask for the initial state
/// separately.
///
/// The container is `Send + Sync`; the subscriber list is snapshotted before
/// notification, so callbacks may call back into the same store (read,
/// subscribe, unsubscribe) without deadlocking.
pub struct Store<T> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<(SubscriberId, Callback<T>)>>,
    next_id: AtomicU64,
}

impl<T: Clone> Store<T> {
    /// Create a store holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the value and notify all subscribers.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            *guard = value;
        }
        self.notify();
    }

    /// Mutate the value in place and notify all subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
        }
        self.notify();
    }

    /// Register a subscriber.
    ///
    /// The callback is invoked once immediately with the current value, then
    /// again after every change, until [`unsubscribe`](Self::unsubscribe) is
    /// called with the returned id.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let callback: Callback<T> = Arc::new(callback);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::clone(&callback)));
        callback(&self.get());
        id
    }

    /// Remove a subscriber. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(sub_id, _)| *sub_id != id);
    }

    fn notify(&self) {
        let value = self.get();
        let snapshot: Vec<Callback<T>> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(&value);
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug + Clone> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("value", &self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_get_returns_current_value() {
        let store = Store::new(1);
        assert_eq!(store.get(), 1);
        store.set(2);
        assert_eq!(store.get(), 2);
    }

    #[test]
    fn test_update_produces_new_value_from_old() {
        let store = Store::new(10);
        store.update(|n| *n += 5);
        assert_eq!(store.get(), 15);
    }

    #[test]
    fn test_subscriber_invoked_immediately_with_current_value() {
        let store = Store::new(7);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_sub = Arc::clone(&seen);
        store.subscribe(move |n| seen_by_sub.lock().expect("lock").push(*n));
        assert_eq!(*seen.lock().expect("lock"), vec![7]);
    }

    #[test]
    fn test_all_subscribers_notified_once_per_update_in_order() {
        let store = Store::new(0);
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.subscribe(move |n| order.lock().expect("lock").push((tag, *n)));
        }
        order.lock().expect("lock").clear();

        store.set(9);
        assert_eq!(
            *order.lock().expect("lock"),
            vec![("first", 9), ("second", 9), ("third", 9)]
        );
    }

    #[test]
    fn test_unsubscribed_observer_not_notified() {
        let store = Store::new(0);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_by_sub = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            calls_by_sub.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.unsubscribe(id);
        store.set(1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_reenter_store() {
        let store = Arc::new(Store::new(0));
        let observed = Arc::new(Mutex::new(None));
        let store_for_sub = Arc::clone(&store);
        let observed_by_sub = Arc::clone(&observed);
        store.subscribe(move |_| {
            *observed_by_sub.lock().expect("lock") = Some(store_for_sub.get());
        });
        store.set(3);
        assert_eq!(*observed.lock().expect("lock"), Some(3));
    }
}
