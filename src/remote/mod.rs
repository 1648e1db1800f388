//! Boundary to the authoritative remote vote service.
//!
//! - [`VoteService`] - the two calls the controller needs
//! - [`HttpVoteService`] - REST adapter carrying the session's bearer credential
mod http;
pub use http::*;


use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::RemoteError;
use crate::TargetRef;
use crate::VoteDirection;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait VoteService: Send + Sync + 'static {
    /// Upserts the caller's vote on `target`: any existing vote by this user
    /// on this target is replaced.
    async fn cast_vote(
        &self,
        target: TargetRef,
        direction: VoteDirection,
    ) -> std::result::Result<(), RemoteError>;

    /// Deletes the caller's vote on `target`. Removing an absent vote is not an error.
    async fn remove_vote(
        &self,
        target: TargetRef,
    ) -> std::result::Result<(), RemoteError>;
}
