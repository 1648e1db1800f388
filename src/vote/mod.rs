//! Vote data model and the pure vote state machine.
//!
//! A card (question or answer) displays a [`VoteView`]: the requesting user's
//! [`VoteState`] plus the aggregate [`Tally`]. User clicks arrive as a [`VoteIntent`]
//! and are folded into the view by [`apply_intent`], which performs no I/O.
mod state_machine;
pub use state_machine::*;


use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Displayed aggregate vote count for a target
pub type Tally = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Question,
    Answer,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Question => "question",
            TargetKind::Answer => "answer",
        }
    }
}

/// The question or answer a vote applies to. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: u64,
}

impl TargetRef {
    pub fn question(id: u64) -> Self {
        Self {
            kind: TargetKind::Question,
            id,
        }
    }

    pub fn answer(id: u64) -> Self {
        Self {
            kind: TargetKind::Answer,
            id,
        }
    }

    /// Hydrates a target from card data, where the server hands out
    /// an optional question id and an optional answer id.
    ///
    /// # Errors
    /// [`Error::InvalidTarget`] when both or neither id is present.
    pub fn from_ids(
        question_id: Option<u64>,
        answer_id: Option<u64>,
    ) -> Result<Self> {
        match (question_id, answer_id) {
            (Some(id), None) => Ok(Self::question(id)),
            (None, Some(id)) => Ok(Self::answer(id)),
            _ => Err(Error::InvalidTarget {
                question_id,
                answer_id,
            }),
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}#{}", self.kind.as_str(), self.id)
    }
}

/// Direction of a held or requested vote, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    #[serde(rename = "upvote")]
    Up,
    #[serde(rename = "downvote")]
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "upvote",
            VoteDirection::Down => "downvote",
        }
    }
}

/// The requesting user's current vote on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VoteState {
    #[default]
    None,
    Upvoted,
    Downvoted,
}

impl VoteState {
    /// Held direction, `None` when no vote is held.
    pub fn direction(&self) -> Option<VoteDirection> {
        match self {
            VoteState::None => None,
            VoteState::Upvoted => Some(VoteDirection::Up),
            VoteState::Downvoted => Some(VoteDirection::Down),
        }
    }

    /// This user's contribution to the tally.
    pub fn contribution(&self) -> Tally {
        match self {
            VoteState::None => 0,
            VoteState::Upvoted => 1,
            VoteState::Downvoted => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteState::None => "none",
            VoteState::Upvoted => "upvoted",
            VoteState::Downvoted => "downvoted",
        }
    }
}

impl From<Option<VoteDirection>> for VoteState {
    fn from(direction: Option<VoteDirection>) -> Self {
        match direction {
            None => VoteState::None,
            Some(VoteDirection::Up) => VoteState::Upvoted,
            Some(VoteDirection::Down) => VoteState::Downvoted,
        }
    }
}

impl From<VoteDirection> for VoteState {
    fn from(direction: VoteDirection) -> Self {
        Some(direction).into()
    }
}

/// A user click. There is no "remove" intent: repeating the held
/// intent retracts the vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteIntent {
    Upvote,
    Downvote,
}

impl VoteIntent {
    pub fn direction(&self) -> VoteDirection {
        match self {
            VoteIntent::Upvote => VoteDirection::Up,
            VoteIntent::Downvote => VoteDirection::Down,
        }
    }
}

/// What a vote card displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteView {
    pub state: VoteState,
    pub tally: Tally,
}

impl VoteView {
    pub fn new(
        state: VoteState,
        tally: Tally,
    ) -> Self {
        Self { state, tally }
    }

    /// Folds `intent` into this view in a single step.
    ///
    /// The tally saturates at the `i64` bounds.
    pub fn apply(
        &self,
        intent: VoteIntent,
    ) -> (VoteView, Transition) {
        let transition = apply_intent(self.state, intent);
        let next = VoteView {
            state: transition.to,
            tally: self.tally.saturating_add(transition.delta),
        };
        (next, transition)
    }
}
