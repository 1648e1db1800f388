//! Test doubles shared by unit tests.
//!
//! `mockall` mocks answer immediately, which cannot express a remote call that
//! is still pending. [`GatedVoteService`] parks every call until the test opens
//! the gate.
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::RemoteError;
use crate::TargetRef;
use crate::VoteDirection;
use crate::VoteService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteCall {
    Cast(TargetRef, VoteDirection),
    Remove(TargetRef),
}

pub(crate) struct GatedVoteService {
    calls: Mutex<Vec<RemoteCall>>,
    gate: Semaphore,
    result: Mutex<std::result::Result<(), RemoteError>>,
}

impl GatedVoteService {
    pub(crate) fn new(result: std::result::Result<(), RemoteError>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            gate: Semaphore::new(0),
            result: Mutex::new(result),
        }
    }

    /// Lets `n` pending or future calls complete.
    pub(crate) fn release(
        &self,
        n: usize,
    ) {
        self.gate.add_permits(n);
    }

    pub(crate) fn set_result(
        &self,
        result: std::result::Result<(), RemoteError>,
    ) {
        *self.result.lock() = result;
    }

    pub(crate) fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().clone()
    }

    async fn pass(&self) -> std::result::Result<(), RemoteError> {
        self.gate
            .acquire()
            .await
            .expect("gate semaphore is never closed")
            .forget();
        self.result.lock().clone()
    }
}

#[async_trait::async_trait]
impl VoteService for GatedVoteService {
    async fn cast_vote(
        &self,
        target: TargetRef,
        direction: VoteDirection,
    ) -> std::result::Result<(), RemoteError> {
        self.calls.lock().push(RemoteCall::Cast(target, direction));
        self.pass().await
    }

    async fn remove_vote(
        &self,
        target: TargetRef,
    ) -> std::result::Result<(), RemoteError> {
        self.calls.lock().push(RemoteCall::Remove(target));
        self.pass().await
    }
}
