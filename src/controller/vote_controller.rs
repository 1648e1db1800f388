use std::sync::Arc;

use nanoid::nanoid;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::info_span;
use tracing::warn;
use tracing::Instrument;

use super::SubmitOutcome;
use super::VoteControllerBuilder;
use crate::metrics::VOTE_SUBMISSIONS_TOTAL;
use crate::AuthContext;
use crate::FailurePolicy;
use crate::Notification;
use crate::RemoteError;
use crate::RemoteOp;
use crate::SwitchStrategy;
use crate::SyncConfig;
use crate::TargetRef;
use crate::VoteIntent;
use crate::VoteObserver;
use crate::VoteService;
use crate::VoteSlot;
use crate::VoteState;
use crate::VoteView;

/// Keeps one vote control in sync with the remote vote service.
///
/// At most one submission is in flight per slot. Clicks arriving meanwhile
/// return [`SubmitOutcome::Busy`] without touching the view or the network.
pub struct VoteController<S: VoteService, A: AuthContext> {
    pub(super) target: TargetRef,
    pub(super) slot: Arc<VoteSlot>,
    pub(super) service: Arc<S>,
    pub(super) auth: Arc<A>,
    pub(super) observer: Arc<dyn VoteObserver>,
    pub(super) settings: SyncConfig,
}

impl<S: VoteService, A: AuthContext> VoteController<S, A> {
    pub fn builder(
        target: TargetRef,
        service: Arc<S>,
        auth: Arc<A>,
    ) -> VoteControllerBuilder<S, A> {
        VoteControllerBuilder::new(target, service, auth)
    }

    pub fn target(&self) -> TargetRef {
        self.target
    }

    /// What the control displays right now
    pub fn view(&self) -> VoteView {
        self.slot.view()
    }

    /// Last view the remote service agreed with
    pub fn confirmed(&self) -> VoteView {
        self.slot.confirmed()
    }

    pub fn is_in_flight(&self) -> bool {
        self.slot.is_in_flight()
    }

    /// Receives every displayed change, including optimistic ones and rollbacks
    pub fn subscribe(&self) -> watch::Receiver<VoteView> {
        self.slot.subscribe()
    }

    /// Turns a click into a synchronized vote.
    ///
    /// Never fails: every error is folded into the returned outcome and, except
    /// for `Busy`, reported to the observer as one notification.
    pub async fn submit_vote(
        &self,
        intent: VoteIntent,
    ) -> SubmitOutcome {
        let request_id = nanoid!(10);
        let span = info_span!(
            "submit_vote",
            vote_target = %self.target,
            intent = ?intent,
            request_id = %request_id
        );

        let outcome = self.submit(intent).instrument(span).await;

        VOTE_SUBMISSIONS_TOTAL
            .with_label_values(&[self.target.kind.as_str(), outcome.as_str()])
            .inc();
        outcome
    }

    async fn submit(
        &self,
        intent: VoteIntent,
    ) -> SubmitOutcome {
        if !self.auth.is_authenticated() {
            warn!("vote rejected: no session");
            self.observer
                .on_notification(self.target, Notification::login_required());
            return SubmitOutcome::Unauthenticated;
        }

        let Some(guard) = self.slot.try_acquire() else {
            debug!("vote dropped: submission already in flight");
            return SubmitOutcome::Busy;
        };

        let before = self.slot.view();
        let (optimistic, transition) = before.apply(intent);
        self.slot.show(optimistic);
        debug!(
            "optimistic {:?} -> {:?}, tally {} -> {}",
            transition.from, transition.to, before.tally, optimistic.tally
        );

        let result = self.dispatch(transition.remote_op()).await;

        let outcome = match result {
            Ok(()) => {
                self.slot.commit(optimistic);
                info!(
                    "vote committed: state={}, tally={}",
                    optimistic.state.as_str(),
                    optimistic.tally
                );
                SubmitOutcome::Committed {
                    state: optimistic.state,
                    tally: optimistic.tally,
                }
            }
            Err(error) => {
                error!("vote failed ({}): {}", error.kind(), error);
                let shown = match self.settings.failure_policy {
                    FailurePolicy::Rollback => self.slot.revert(),
                    FailurePolicy::KeepOptimistic => self.slot.view(),
                };
                SubmitOutcome::Failed {
                    error,
                    state: shown.state,
                    tally: shown.tally,
                }
            }
        };
        drop(guard);

        self.report(&outcome);
        outcome
    }

    /// Runs the remote side of a transition under the submit timeout.
    async fn dispatch(
        &self,
        op: RemoteOp,
    ) -> std::result::Result<(), RemoteError> {
        let limit = self.settings.submit_timeout();
        match timeout(limit, self.call_remote(op)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("remote {} exceeded {:?}", op.as_str(), limit);
                Err(RemoteError::Timeout(limit))
            }
        }
    }

    async fn call_remote(
        &self,
        op: RemoteOp,
    ) -> std::result::Result<(), RemoteError> {
        debug!("dispatching remote {}", op.as_str());
        match op {
            RemoteOp::Cast(direction) => self.service.cast_vote(self.target, direction).await,
            RemoteOp::Remove => self.service.remove_vote(self.target).await,
            RemoteOp::Replace(direction) => match self.settings.switch_strategy {
                SwitchStrategy::Upsert => self.service.cast_vote(self.target, direction).await,
                SwitchStrategy::RemoveThenCast => {
                    self.service.remove_vote(self.target).await?;

                    // Server now holds no vote; a failing cast rolls back to that.
                    let confirmed = self.slot.confirmed();
                    self.slot.confirm(VoteView::new(
                        VoteState::None,
                        confirmed
                            .tally
                            .saturating_sub(confirmed.state.contribution()),
                    ));

                    self.service.cast_vote(self.target, direction).await
                }
            },
        }
    }

    fn report(
        &self,
        outcome: &SubmitOutcome,
    ) {
        match outcome {
            SubmitOutcome::Committed { state, tally } => {
                self.observer.on_tally_changed(self.target, *tally);
                let notification = match state.direction() {
                    Some(direction) => Notification::vote_recorded(self.target, direction),
                    None => Notification::vote_removed(),
                };
                self.observer.on_notification(self.target, notification);
            }
            SubmitOutcome::Failed { error, .. } => {
                self.observer
                    .on_notification(self.target, Notification::vote_failed(error));
            }
            SubmitOutcome::Unauthenticated | SubmitOutcome::Busy => {}
        }
    }
}
