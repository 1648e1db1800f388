//! Vote Sync Controller
//!
//! Wraps the pure state machine with the single-flight policy, dispatches the
//! matching remote call and reports every terminal outcome to the UI:
//! - [`VoteController`] - one per displayed vote control
//! - [`VoteControllerBuilder`] - wiring of service, session, observer and settings
//! - [`SubmitOutcome`] - what a click turned into
//!
//! # Basic Usage
//! ```no_run
//! use std::sync::Arc;
//! use vote_sync::{ApiConfig, Credential, HttpVoteService, Session, TargetRef, VoteController,
//!     VoteIntent, VoteState};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let session = Arc::new(Session::with_credential(Credential::new("token")));
//!     let service = Arc::new(HttpVoteService::new(ApiConfig::default(), session.clone()).unwrap());
//!
//!     let controller = VoteController::builder(TargetRef::question(12), service, session)
//!         .initial(VoteState::None, 10)
//!         .build();
//!
//!     let outcome = controller.submit_vote(VoteIntent::Upvote).await;
//!     println!("{:?}", outcome);
//! }
//! ```
mod builder;
mod vote_controller;
pub use builder::*;
pub use vote_controller::*;


use crate::RemoteError;
use crate::Tally;
use crate::VoteState;

/// Terminal result of one `submit_vote` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Remote service agreed; state and tally are the new baseline
    Committed { state: VoteState, tally: Tally },
    /// No session; no remote call was made
    Unauthenticated,
    /// Another submission for this control is still in flight; click dropped
    Busy,
    /// Remote call failed or timed out. `state` and `tally` are what is
    /// displayed after the failure policy ran.
    Failed {
        error: RemoteError,
        state: VoteState,
        tally: Tally,
    },
}

impl SubmitOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitOutcome::Committed { .. } => "committed",
            SubmitOutcome::Unauthenticated => "unauthenticated",
            SubmitOutcome::Busy => "busy",
            SubmitOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, SubmitOutcome::Committed { .. })
    }
}
