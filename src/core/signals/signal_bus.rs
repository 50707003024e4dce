//=========================================================================
// Signal Bus
//=========================================================================
//
// Listener storage for the signal channels.
//
// Listeners are shared cells so an emission can run from a snapshot of
// the subscriber list while listeners subscribe, unsubscribe or emit
// again through the context they receive.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Channel, Signal};
use crate::core::context::GameContext;

//=== Public API ==========================================================

/// Callback invoked with the emitted signal and the shared game context.
pub type Listener = dyn FnMut(&Signal, &mut GameContext);

/// Returned by `subscribe`; used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type SharedListener = Rc<RefCell<Box<Listener>>>;

struct Subscription {
    id: ListenerId,
    channel: Channel,
    listener: SharedListener,
}

//=== SignalBus ===========================================================

#[derive(Default)]
pub struct SignalBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `listener` on `channel`. Listeners run in subscription order.
    pub fn subscribe<F>(&mut self, channel: Channel, listener: F) -> ListenerId
    where
        F: FnMut(&Signal, &mut GameContext) + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            channel,
            listener: Rc::new(RefCell::new(Box::new(listener))),
        });
        trace!(target: "game", "listener {:?} subscribed to {:?}", id, channel);
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    ///
    /// A listener removed during an emission is not called for the rest
    /// of that emission.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        before != self.subscriptions.len()
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.subscriptions.iter().any(|subscription| subscription.id == id)
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.subscriptions
            .iter()
            .filter(|subscription| subscription.channel == channel)
            .count()
    }

    //--- Emission Support -------------------------------------------------

    /// Listeners of `signal`'s channel in subscription order.
    pub(crate) fn snapshot(&self, signal: &Signal) -> Vec<(ListenerId, SharedListener)> {
        let channel = signal.channel();
        self.subscriptions
            .iter()
            .filter(|subscription| subscription.channel == channel)
            .map(|subscription| (subscription.id, Rc::clone(&subscription.listener)))
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_filters_by_channel_in_order() {
        let mut bus = SignalBus::new();
        let first = bus.subscribe(Channel::Draw, |_, _| {});
        bus.subscribe(Channel::Start, |_, _| {});
        let third = bus.subscribe(Channel::Draw, |_, _| {});

        let ids: Vec<_> = bus.snapshot(&Signal::Draw).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, third]);
        assert_eq!(bus.listener_count(Channel::Start), 1);
    }

    #[test]
    fn unsubscribe_reports_membership() {
        let mut bus = SignalBus::new();
        let id = bus.subscribe(Channel::KeyDown, |_, _| {});
        assert!(bus.is_subscribed(id));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.listener_count(Channel::KeyDown), 0);
    }
}
