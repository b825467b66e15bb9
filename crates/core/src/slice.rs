//! Observable state cells.
//!
//! Every slice of the state tree is a [`Slice`]: a clonable handle over one
//! value that is only ever replaced wholesale through a pure transition.
//! All slices of one tree share a [`Notifier`], so the rendering layer can
//! subscribe once and re-read state after any transition anywhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Subscriber registry shared by every slice of one state tree.
#[derive(Default)]
pub struct Notifier {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Callback)>>,
}

impl Notifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a callback invoked after every slice transition.
    ///
    /// Dropping the returned [`Subscription`] unregisters the callback.
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().push((id, Arc::new(callback)));
        Subscription {
            id,
            notifier: Arc::clone(self),
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.lock().retain(|(sub_id, _)| *sub_id != id);
    }

    /// Invoke every live subscriber.
    ///
    /// The registry is snapshotted before invocation, so a callback may
    /// subscribe, unsubscribe (including itself), or dispatch another
    /// transition without re-entering the lock. A subscriber removed mid
    /// notification may still see that notification once.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

/// RAII handle for one registered subscriber.
pub struct Subscription {
    id: u64,
    notifier: Arc<Notifier>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.id);
    }
}

/// One slice of the observable state tree.
///
/// Cheap to clone; clones share the same state. A transition holds the write
/// lock for the whole replacement, so readers always observe a fully settled
/// value, never a partially applied one.
#[derive(Clone)]
pub struct Slice<S> {
    inner: Arc<SliceInner<S>>,
}

struct SliceInner<S> {
    state: RwLock<S>,
    notifier: Arc<Notifier>,
}

impl<S: Clone> Slice<S> {
    pub fn new(initial: S, notifier: Arc<Notifier>) -> Self {
        Self {
            inner: Arc::new(SliceInner {
                state: RwLock::new(initial),
                notifier,
            }),
        }
    }

    /// Clone out the current state.
    pub fn snapshot(&self) -> S {
        self.inner.state.read().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.read())
    }

    /// Replace the slice through a pure transition and notify subscribers.
    pub fn transition(&self, f: impl FnOnce(S) -> S) {
        {
            let mut state = self.inner.state.write();
            let next = f(state.clone());
            *state = next;
        }
        self.inner.notifier.notify();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn transition_replaces_state_and_notifies() {
        let notifier = Notifier::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let _sub = notifier.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let slice = Slice::new(0u32, Arc::clone(&notifier));
        slice.transition(|n| n + 1);
        slice.transition(|n| n + 1);

        assert_eq!(slice.snapshot(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let notifier = Notifier::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let sub = notifier.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let slice = Slice::new(0u32, Arc::clone(&notifier));
        slice.transition(|n| n + 1);
        drop(sub);
        slice.transition(|n| n + 1);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscriber_may_dispatch_a_nested_transition() {
        let notifier = Notifier::new();
        let slice = Slice::new(0u32, Arc::clone(&notifier));

        let nested = slice.clone();
        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        let _sub = notifier.subscribe(move || {
            // Only the outer notification re-dispatches, so the cascade
            // terminates.
            if count.fetch_add(1, Ordering::SeqCst) == 0 {
                nested.transition(|n| n + 10);
            }
        });

        slice.transition(|n| n + 1);

        assert_eq!(slice.snapshot(), 11);
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn subscriber_may_unsubscribe_itself_during_notification() {
        let notifier = Notifier::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let held = Arc::clone(&slot);
        let sub = notifier.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
            held.lock().take();
        });
        *slot.lock() = Some(sub);

        let slice = Slice::new(0u32, Arc::clone(&notifier));
        slice.transition(|n| n + 1);
        slice.transition(|n| n + 1);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscriber_may_register_another_subscriber() {
        let notifier = Notifier::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let registrar = Arc::clone(&notifier);
        let late_subs: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));
        let held = Arc::clone(&late_subs);
        let seen = Arc::clone(&hits);
        let _sub = notifier.subscribe(move || {
            let count = Arc::clone(&seen);
            let sub = registrar.subscribe(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
            held.lock().push(sub);
        });

        let slice = Slice::new(0u32, Arc::clone(&notifier));
        slice.transition(|n| n + 1);
        slice.transition(|n| n + 1);

        // The subscriber registered on the first notification fires on the
        // second.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn slices_sharing_a_notifier_fan_into_one_subscriber() {
        let notifier = Notifier::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let _sub = notifier.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let a = Slice::new(0u32, Arc::clone(&notifier));
        let b = Slice::new(String::new(), Arc::clone(&notifier));
        a.transition(|n| n + 1);
        b.transition(|_| "settled".to_string());

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
