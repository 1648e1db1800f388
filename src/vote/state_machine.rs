use super::Tally;
use super::VoteDirection;
use super::VoteIntent;
use super::VoteState;

/// Result of folding one intent into a vote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: VoteState,
    pub to: VoteState,
    /// Signed adjustment to the displayed tally
    pub delta: Tally,
}

/// Remote operation required to make the server agree with a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    /// Nothing held, cast a fresh vote
    Cast(VoteDirection),
    /// Retract the held vote
    Remove,
    /// Held vote flips to the opposite direction
    Replace(VoteDirection),
}

impl RemoteOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteOp::Cast(_) => "cast",
            RemoteOp::Remove => "remove",
            RemoteOp::Replace(_) => "replace",
        }
    }
}

impl Transition {
    pub fn remote_op(&self) -> RemoteOp {
        match (self.from.direction(), self.to.direction()) {
            (None, Some(direction)) => RemoteOp::Cast(direction),
            (Some(_), None) => RemoteOp::Remove,
            (Some(_), Some(direction)) => RemoteOp::Replace(direction),
            // apply_intent never produces None -> None
            (None, None) => RemoteOp::Remove,
        }
    }
}

/// Computes the next vote state and tally delta for `intent`.
///
/// | current   | Upvote           | Downvote          |
/// |-----------|------------------|-------------------|
/// | None      | Upvoted, +1      | Downvoted, -1     |
/// | Upvoted   | None, -1         | Downvoted, -2     |
/// | Downvoted | Upvoted, +2      | None, +1          |
///
/// Repeating the held intent retracts the vote. Switching to the opposite
/// intent cancels the old contribution and applies the new one in one delta.
pub fn apply_intent(
    current: VoteState,
    intent: VoteIntent,
) -> Transition {
    let requested = intent.direction();
    let next = if current.direction() == Some(requested) {
        VoteState::None
    } else {
        VoteState::from(requested)
    };

    Transition {
        from: current,
        to: next,
        delta: next.contribution() - current.contribution(),
    }
}
