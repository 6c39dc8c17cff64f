//! # ki-nevet
//!
//! Rules engine for "Ki nevet a végén?", the Hungarian race game of the
//! Ludo family.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: Every operation takes a `GameState`
//!    by reference and returns a new one. A rejected action returns an
//!    error and the caller keeps the snapshot it had.
//!
//! 2. **Injected Dice**: Randomness comes from a `DiceSource`. Production
//!    code uses the seeded `GameRng`; tests script exact faces with
//!    `ScriptedDice`.
//!
//! 3. **Configuration Over Convention**: Board size, pieces per player and
//!    house rules live in `GameConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Player and history vectors use `im-rs`,
//!   so cloning a snapshot is cheap.
//!
//! - **Derived Piece State**: A piece stores only its `Position`; whether it
//!   is at home, active or safe follows from that.
//!
//! ## Modules
//!
//! - `core`: Players, pieces, state, actions, dice, configuration
//! - `board`: Ring and lane topology, position arithmetic
//! - `rules`: Dice resolution, movement, turn order, win detection, `Engine`
//! - `events`: Point awards emitted to the hosting layer
//! - `error`: Rejection reasons

pub mod board;
pub mod core;
pub mod error;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, BoardConfig, Color, DiceSource, GameBuilder, GameConfig, GamePiece,
    GamePlayer, GameRng, GameRngState, GameState, GameStatus, HouseRules, PieceId, PieceState,
    PlayerId, Position, ScriptedDice, TurnPhase, UserId,
};

pub use crate::board::Board;

pub use crate::error::{ActionKind, ConfigError, GameError, MoveRejection};

pub use crate::events::{AwardKind, Events, PointAward};

pub use crate::rules::{Engine, LegalMoves, MoveKind, MoveOutcome};
