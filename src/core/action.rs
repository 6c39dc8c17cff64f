//! Action history.
//!
//! Every accepted action is appended to the snapshot's history as an
//! `ActionRecord`. The history is enough to replay a game given the same
//! dice stream, and lets the hosting layer audit who did what.

use serde::{Deserialize, Serialize};

use super::piece::PieceId;
use super::player::PlayerId;

/// An accepted player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Action {
    /// The die was rolled and showed `value`.
    Roll { value: u8 },
    /// `piece` was moved by `dice` steps.
    Move { piece: PieceId, dice: u8 },
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
