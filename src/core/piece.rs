//! Pieces and their positions.
//!
//! A piece is always in exactly one of four places:
//! - `Home`: not yet entered (the yard)
//! - `Ring(cell)`: on the shared circular track
//! - `Lane(cell)`: inside its owner's private safe lane
//! - `Finished`: completed the safe lane (terminal marker)
//!
//! `PieceState` is derived from `Position` and never stored, so the two
//! cannot drift apart.

use serde::{Deserialize, Serialize};

/// Piece identifier, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u16);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a piece currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "cell")]
pub enum Position {
    /// Not yet on the board.
    Home,
    /// Absolute ring cell, `0..ring_length`.
    Ring(u16),
    /// Cell of the owner's safe lane, `0..lane_length`.
    Lane(u16),
    /// Safe lane fully traversed. Never moves again.
    Finished,
}

impl Position {
    /// Piece state implied by this position.
    #[must_use]
    pub const fn state(self) -> PieceState {
        match self {
            Position::Home => PieceState::Home,
            Position::Ring(_) => PieceState::Active,
            Position::Lane(_) | Position::Finished => PieceState::Safe,
        }
    }

    /// Ring cell, if the piece is on the shared ring.
    #[must_use]
    pub const fn ring_cell(self) -> Option<u16> {
        match self {
            Position::Ring(cell) => Some(cell),
            _ => None,
        }
    }
}

/// Coarse piece state as shown to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceState {
    Home,
    Active,
    Safe,
}

/// A single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamePiece {
    pub id: PieceId,
    pub position: Position,
}

impl GamePiece {
    /// Create a piece waiting at home.
    #[must_use]
    pub const fn at_home(id: PieceId) -> Self {
        Self {
            id,
            position: Position::Home,
        }
    }

    /// Derived state (home / active / safe).
    #[must_use]
    pub const fn state(&self) -> PieceState {
        self.position.state()
    }

    /// Whether the piece reached the terminal marker.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position == Position::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_follows_position() {
        assert_eq!(Position::Home.state(), PieceState::Home);
        assert_eq!(Position::Ring(0).state(), PieceState::Active);
        assert_eq!(Position::Ring(51).state(), PieceState::Active);
        assert_eq!(Position::Lane(0).state(), PieceState::Safe);
        assert_eq!(Position::Finished.state(), PieceState::Safe);
    }

    #[test]
    fn test_ring_cell() {
        assert_eq!(Position::Ring(17).ring_cell(), Some(17));
        assert_eq!(Position::Lane(2).ring_cell(), None);
        assert_eq!(Position::Home.ring_cell(), None);
    }

    #[test]
    fn test_piece_at_home() {
        let piece = GamePiece::at_home(PieceId::new(3));
        assert_eq!(piece.state(), PieceState::Home);
        assert!(!piece.is_finished());
        assert_eq!(format!("{}", piece.id), "#3");
    }

    #[test]
    fn test_position_serialization() {
        let json = serde_json::to_string(&Position::Ring(10)).unwrap();
        assert_eq!(json, r#"{"kind":"ring","cell":10}"#);

        let home: Position = serde_json::from_str(r#"{"kind":"home"}"#).unwrap();
        assert_eq!(home, Position::Home);
    }
}
