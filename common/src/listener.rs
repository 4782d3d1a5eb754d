//! In-process change notification. A [ChangeBroadcaster] keeps the registered listeners for a
//! value of type `M` and hands out a [Subscription] per listener. Dropping (or explicitly
//! unsubscribing) the [Subscription] removes the listener.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

/// Callback invoked for every message sent through a [ChangeBroadcaster]
pub type Listener<M> = Rc<dyn Fn(&M)>;

/// Registry of listeners
struct Registry<M> {
    /// Id handed to the next subscriber
    next_id: Cell<u64>,
    /// Active listeners in subscription order
    listeners: RefCell<Vec<(u64, Listener<M>)>>,
}

/// Single-threaded fan-out of change messages to any number of listeners
pub struct ChangeBroadcaster<M> {
    /// Listeners shared by every clone, subscriptions only hold a weak reference
    registry: Rc<Registry<M>>,
}

impl<M> Clone for ChangeBroadcaster<M> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<M: 'static> Default for ChangeBroadcaster<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: 'static> ChangeBroadcaster<M> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a new `listener`. The listener stays registered for as long as the returned
    /// [Subscription] is alive.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&M) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        let listener: Listener<M> = Rc::new(listener);
        self.registry.listeners.borrow_mut().push((id, listener));
        let registry: Weak<Registry<M>> = Rc::downgrade(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.listeners.borrow_mut().retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Send the `message` to every registered listener. Listeners are collected before any is
    /// called so a listener may subscribe or unsubscribe while being notified.
    pub fn send(&self, message: &M) {
        let listeners: Vec<Listener<M>> = self
            .registry
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(message);
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.registry.listeners.borrow().len()
    }
}

/// Handle to a registered listener
pub struct Subscription {
    /// Removes the listener from the registry, taken on first use
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the listener from its broadcaster. Same as dropping the handle.
    pub fn unsubscribe(mut self) {
        self.run_unsubscribe();
    }

    /// Run the removal once, later calls do nothing
    fn run_unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_unsubscribe();
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use super::ChangeBroadcaster;

    #[test]
    fn send_should_reach_every_listener_in_order() {
        let broadcaster = ChangeBroadcaster::<u32>::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&received);
        let second = Rc::clone(&received);
        let _a = broadcaster.subscribe(move |m| first.borrow_mut().push(("a", *m)));
        let _b = broadcaster.subscribe(move |m| second.borrow_mut().push(("b", *m)));

        broadcaster.send(&7);

        assert_eq!(*received.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_should_stop_delivery() {
        let broadcaster = ChangeBroadcaster::<u32>::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        let subscription = broadcaster.subscribe(move |m| sink.borrow_mut().push(*m));

        broadcaster.send(&1);
        subscription.unsubscribe();
        broadcaster.send(&2);

        assert_eq!(*received.borrow(), vec![1]);
        assert_eq!(broadcaster.listener_count(), 0);
    }

    #[test]
    fn drop_should_unsubscribe() {
        let broadcaster = ChangeBroadcaster::<u32>::new();
        {
            let _subscription = broadcaster.subscribe(|_| {});
            assert_eq!(broadcaster.listener_count(), 1);
        }
        assert_eq!(broadcaster.listener_count(), 0);
    }

    #[test]
    fn subscription_should_outlive_broadcaster() {
        let broadcaster = ChangeBroadcaster::<u32>::new();
        let subscription = broadcaster.subscribe(|_| {});
        drop(broadcaster);

        subscription.unsubscribe();
    }
}
