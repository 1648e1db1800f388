#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;
use tracing::debug;

use super::Notification;
use crate::Tally;
use crate::TargetRef;

/// UI collaborator notified by the vote controller
#[cfg_attr(test, automock)]
pub trait VoteObserver: Send + Sync + 'static {
    /// Called with the new tally after a committed submission
    fn on_tally_changed(
        &self,
        target: TargetRef,
        tally: Tally,
    );

    /// Called once per terminal outcome (never for a dropped busy click)
    fn on_notification(
        &self,
        target: TargetRef,
        notification: Notification,
    );
}

/// Observer for callers that only read the returned outcome
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl VoteObserver for NoopObserver {
    fn on_tally_changed(
        &self,
        _target: TargetRef,
        _tally: Tally,
    ) {
    }

    fn on_notification(
        &self,
        _target: TargetRef,
        _notification: Notification,
    ) {
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteEvent {
    TallyChanged {
        target: TargetRef,
        tally: Tally,
    },
    Notified {
        target: TargetRef,
        notification: Notification,
    },
}

/// Forwards observer callbacks as [`VoteEvent`]s to an async consumer.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<VoteEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<VoteEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(
        &self,
        event: VoteEvent,
    ) {
        if self.tx.send(event).is_err() {
            debug!("vote event receiver dropped");
        }
    }
}

impl VoteObserver for ChannelObserver {
    fn on_tally_changed(
        &self,
        target: TargetRef,
        tally: Tally,
    ) {
        self.forward(VoteEvent::TallyChanged { target, tally });
    }

    fn on_notification(
        &self,
        target: TargetRef,
        notification: Notification,
    ) {
        self.forward(VoteEvent::Notified {
            target,
            notification,
        });
    }
}
