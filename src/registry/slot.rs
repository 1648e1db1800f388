use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::metrics::VOTES_IN_FLIGHT;
use crate::VoteView;

#[derive(Debug, Clone, Copy)]
struct SlotViews {
    /// What the card shows right now, possibly optimistic
    displayed: VoteView,
    /// Last view the remote service agreed with
    confirmed: VoteView,
}

/// Vote state for one target as seen by one or more views.
///
/// Holds the displayed and confirmed views, the single-flight guard and a
/// watch channel that republishes every displayed change.
#[derive(Debug)]
pub struct VoteSlot {
    views: Mutex<SlotViews>,
    in_flight: AtomicBool,
    watch_tx: watch::Sender<VoteView>,
}

impl VoteSlot {
    pub fn new(initial: VoteView) -> Self {
        let (watch_tx, _) = watch::channel(initial);
        Self {
            views: Mutex::new(SlotViews {
                displayed: initial,
                confirmed: initial,
            }),
            in_flight: AtomicBool::new(false),
            watch_tx,
        }
    }

    pub fn view(&self) -> VoteView {
        self.views.lock().displayed
    }

    pub fn confirmed(&self) -> VoteView {
        self.views.lock().confirmed
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn subscribe(&self) -> watch::Receiver<VoteView> {
        self.watch_tx.subscribe()
    }

    /// Claims the single in-flight submission. `None` means another
    /// submission is still waiting on the remote service.
    pub(crate) fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        VOTES_IN_FLIGHT.inc();
        Some(InFlightGuard { slot: self })
    }

    /// Replaces the displayed view only.
    pub(crate) fn show(
        &self,
        view: VoteView,
    ) {
        let mut views = self.views.lock();
        views.displayed = view;
        self.watch_tx.send_replace(view);
    }

    /// Makes `view` both displayed and confirmed.
    pub(crate) fn commit(
        &self,
        view: VoteView,
    ) {
        let mut views = self.views.lock();
        views.displayed = view;
        views.confirmed = view;
        self.watch_tx.send_replace(view);
    }

    /// Moves the confirmed baseline without touching what is displayed.
    pub(crate) fn confirm(
        &self,
        view: VoteView,
    ) {
        self.views.lock().confirmed = view;
    }

    /// Restores the displayed view to the confirmed one and returns it.
    pub(crate) fn revert(&self) -> VoteView {
        let mut views = self.views.lock();
        views.displayed = views.confirmed;
        self.watch_tx.send_replace(views.confirmed);
        views.confirmed
    }
}

/// Releases the in-flight flag on drop, including when the submitting
/// future is dropped mid-call.
pub(crate) struct InFlightGuard<'a> {
    slot: &'a VoteSlot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.in_flight.store(false, Ordering::Release);
        VOTES_IN_FLIGHT.dec();
    }
}
