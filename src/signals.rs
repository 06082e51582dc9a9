//! Named broadcast channels with typed payloads.
//!
//! A [`Signal`] is a list of slots. Subscribers `connect` a handler and get a
//! [`SubscriptionId`] back; they `disconnect` with that id. `emit` calls every
//! connected slot in connection order on the caller's thread.

use crate::converter::RateTable;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Slot<T> = Box<dyn FnMut(&T)>;

pub struct Signal<T> {
    name: &'static str,
    next_id: u64,
    slots: Vec<(SubscriptionId, Slot<T>)>,
}

impl<T> Signal<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: 0,
            slots: Vec::new(),
        }
    }

    pub fn connect(&mut self, slot: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(slot)));
        debug!(signal = self.name, id = id.0, "slot connected");
        id
    }

    /// Remove a slot. Returns false if the id was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(sid, _)| *sid != id);
        let removed = self.slots.len() != before;
        if removed {
            debug!(signal = self.name, id = id.0, "slot disconnected");
        }
        removed
    }

    pub fn emit(&mut self, payload: &T) {
        debug!(signal = self.name, slots = self.slots.len(), "emit");
        for (_, slot) in self.slots.iter_mut() {
            slot(payload);
        }
    }
}

/// Channels shared by the converter window.
pub struct CommonSignals {
    pub rates_updated: Signal<RateTable>,
    pub clear_all: Signal<()>,
}

impl CommonSignals {
    pub fn new() -> Self {
        Self {
            rates_updated: Signal::new("rates_updated"),
            clear_all: Signal::new("clear_all"),
        }
    }
}

impl Default for CommonSignals {
    fn default() -> Self {
        Self::new()
    }
}
