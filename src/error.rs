//! Error types.
//!
//! `GameError` covers rejected player actions. Every rejection leaves the
//! submitted snapshot untouched, so the hosting layer can report the error
//! and wait for a corrected action.
//!
//! `ConfigError` covers invalid setup: bad board dimensions, bad seating,
//! or a placement outside the board.

use thiserror::Error;

use crate::core::{Color, PieceId, PlayerId, Position, UserId};

/// The kind of action a player was expected to submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Roll,
    Move,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Roll => f.write_str("roll"),
            ActionKind::Move => f.write_str("move"),
        }
    }
}

/// Why a move was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("the piece belongs to another player")]
    NotOwned,
    #[error("a piece can only leave home on a 6")]
    NeedsSix,
    #[error("the roll overshoots the end of the safe lane")]
    Overshoot,
    #[error("the target cell is blockaded")]
    Blockade,
    #[error("the piece already reached home")]
    AlreadyFinished,
    #[error("{0} is not a die face")]
    NotADieFace(u8),
}

/// A rejected player action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: UserId, actual: UserId },

    #[error("illegal move for piece {piece}: {reason}")]
    IllegalMove { piece: PieceId, reason: MoveRejection },

    #[error("the game is already finished")]
    GameAlreadyFinished,

    #[error("unknown piece {0}")]
    InvalidPiece(PieceId),

    #[error("expected a {expected} action")]
    WrongPhase { expected: ActionKind },
}

/// Invalid game setup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{count} players requested, a game needs {min} to {max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("ring length {ring_length} does not split into {quadrants} quadrants")]
    RingLength { ring_length: u16, quadrants: u16 },

    #[error("safe lanes need at least one cell")]
    EmptyLane,

    #[error("players need at least one piece")]
    NoPieces,

    #[error("the consecutive-six limit must be at least 1")]
    SixLimit,

    #[error("color {0} is taken by more than one player")]
    DuplicateColor(Color),

    #[error("user {0} is seated more than once")]
    DuplicateUser(UserId),

    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("position {0:?} is not on this board")]
    PositionOutOfRange(Position),

    #[error("board {ring_length}/{lane_length}/{pieces_per_player} is too large")]
    BoardTooLarge {
        ring_length: u16,
        lane_length: u16,
        pieces_per_player: u16,
    },

    #[error("current player index {index} is out of range for {players} players")]
    CurrentPlayer { index: usize, players: usize },

    #[error("user {user} has {count} pieces")]
    PieceCount { user: UserId, count: usize },

    #[error("{0} is not a die face")]
    DieFace(u8),

    #[error("status and winner disagree")]
    Outcome,
}
