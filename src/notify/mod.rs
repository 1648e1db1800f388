//! Surface consumed by the UI collaborator: tally callbacks and toast payloads.
mod observer;
pub use observer::*;


use serde::Deserialize;
use serde::Serialize;

use crate::RemoteError;
use crate::TargetKind;
use crate::TargetRef;
use crate::VoteDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Payload for a generic toast/alert surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn vote_recorded(
        target: TargetRef,
        direction: VoteDirection,
    ) -> Self {
        let verb = match direction {
            VoteDirection::Up => "upvoted",
            VoteDirection::Down => "downvoted",
        };
        let noun = match target.kind {
            TargetKind::Question => "question",
            TargetKind::Answer => "answer",
        };
        Self {
            title: "Vote recorded".into(),
            description: format!("You {} this {}.", verb, noun),
            severity: Severity::Info,
        }
    }

    pub fn vote_removed() -> Self {
        Self {
            title: "Vote removed".into(),
            description: "Your vote was removed.".into(),
            severity: Severity::Info,
        }
    }

    pub fn login_required() -> Self {
        Self {
            title: "Login required".into(),
            description: "You need to be signed in to vote.".into(),
            severity: Severity::Error,
        }
    }

    /// Generic message; the classification stays in logs and in the outcome.
    pub fn vote_failed(_error: &RemoteError) -> Self {
        Self {
            title: "Vote failed".into(),
            description: "Your vote could not be recorded. Please try again.".into(),
            severity: Severity::Error,
        }
    }
}
