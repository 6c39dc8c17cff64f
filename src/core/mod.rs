//! Core engine types: players, pieces, configuration, dice sources,
//! actions and the game state snapshot.
//!
//! Everything here is plain data. The rules that move pieces and pass turns
//! live in `rules`.

pub mod action;
pub mod builder;
pub mod config;
pub mod piece;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use builder::GameBuilder;
pub use config::{BoardConfig, GameConfig, HouseRules, MAX_PLAYERS, MIN_PLAYERS};
pub use piece::{GamePiece, PieceId, PieceState, Position};
pub use player::{Color, GamePlayer, PlayerId, UserId};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice, DIE_FACES};
pub use state::{GameState, GameStatus, TurnPhase};
