//! Vote slots and the shared keyed store.
//!
//! A controller built without a registry owns a private [`VoteSlot`], so two
//! cards showing the same target can drift apart until reload. Controllers
//! attached to one [`VoteRegistry`] share a slot per target: same view, same
//! in-flight guard, same subscribers.
mod slot;
pub use slot::*;


use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;

use crate::TargetRef;
use crate::VoteView;

#[derive(Debug, Default)]
pub struct VoteRegistry {
    slots: DashMap<TargetRef, Arc<VoteSlot>>,
}

impl VoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for `target`, creating it from `seed` if absent.
    ///
    /// An existing slot keeps its state; `seed` only matters for the first view.
    pub fn slot(
        &self,
        target: TargetRef,
        seed: VoteView,
    ) -> Arc<VoteSlot> {
        let slot = self
            .slots
            .entry(target)
            .or_insert_with(|| Arc::new(VoteSlot::new(seed)))
            .value()
            .clone();

        let current = slot.view();
        if current != seed {
            debug!(
                "{} already tracked as {:?}, ignoring seed {:?}",
                target, current, seed
            );
        }
        slot
    }

    pub fn get(
        &self,
        target: &TargetRef,
    ) -> Option<Arc<VoteSlot>> {
        self.slots.get(target).map(|s| s.value().clone())
    }

    pub fn view(
        &self,
        target: &TargetRef,
    ) -> Option<VoteView> {
        self.slots.get(target).map(|s| s.view())
    }

    pub fn subscribe(
        &self,
        target: &TargetRef,
    ) -> Option<watch::Receiver<VoteView>> {
        self.slots.get(target).map(|s| s.subscribe())
    }

    /// Drops the slot for `target` once its last view is gone.
    ///
    /// Refuses while a submission is in flight and returns `false`.
    pub fn evict(
        &self,
        target: &TargetRef,
    ) -> bool {
        self.slots
            .remove_if(target, |_, slot| !slot.is_in_flight())
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
