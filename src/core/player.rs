//! Player identification and seating.
//!
//! ## PlayerId
//!
//! Seat index in turn order. The first player to act is `PlayerId(0)`.
//!
//! ## UserId
//!
//! Opaque identifier of the application user who owns a seat. Actions are
//! submitted by users, and point awards are addressed to users.
//!
//! ## Color
//!
//! Each seat plays one of four colors. A color fixes the piece's entry cell
//! and its private safe lane on the board.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::piece::GamePiece;

/// Seat index in turn order (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use ki_nevet::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Identifier of the application user behind a seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Piece color. Also determines where on the ring a seat starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// All colors, in board order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Board quadrant of this color (0-3), used to place its entry cell.
    #[must_use]
    pub const fn quadrant(self) -> u16 {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// A seated player and the pieces they exclusively own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayer {
    /// Owning application user.
    pub user: UserId,

    /// Display name used in event messages.
    pub name: String,

    /// Fixed color, unique within a game.
    pub color: Color,

    /// Owned pieces. Never shared with another player.
    pub pieces: Vector<GamePiece>,
}

impl GamePlayer {
    /// Number of pieces that have reached the terminal marker.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_finished()).count()
    }

    /// Whether every piece has completed its safe lane.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        !self.pieces.is_empty() && self.pieces.iter().all(GamePiece::is_finished)
    }

    /// Index of a piece within this player's piece list.
    pub(crate) fn slot_of(&self, piece: super::PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == piece)
    }
}
