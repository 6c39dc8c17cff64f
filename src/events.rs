//! Point-award events.
//!
//! The engine never touches point balances. Instead `apply_move` returns the
//! awards it earned, in the order they happened, and the hosting layer
//! forwards them to the points subsystem.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::UserId;

/// What earned the points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AwardKind {
    /// Sent an opposing piece back home.
    Capture,
    /// Won the game.
    GameWin,
}

/// A point award for the external points subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointAward {
    #[serde(rename = "type")]
    pub kind: AwardKind,
    #[serde(rename = "playerId")]
    pub user: UserId,
    pub amount: u32,
}

impl PointAward {
    /// Award for a capture.
    pub fn capture(user: UserId, amount: u32) -> Self {
        Self {
            kind: AwardKind::Capture,
            user,
            amount,
        }
    }

    /// Award for winning the game.
    pub fn game_win(user: UserId, amount: u32) -> Self {
        Self {
            kind: AwardKind::GameWin,
            user,
            amount,
        }
    }
}

/// Ordered awards produced by one action. Rarely more than two.
pub type Events = SmallVec<[PointAward; 2]>;
