//! Game creation.

use im::Vector;
use rustc_hash::FxHashSet;

use super::config::GameConfig;
use super::piece::{GamePiece, PieceId};
use super::player::{Color, GamePlayer, UserId};
use super::state::GameState;
use crate::error::ConfigError;

struct Seat {
    user: UserId,
    name: String,
    color: Color,
}

/// Builder for the initial `GameState`.
///
/// Players act in the order they are added. Piece ids are allocated per
/// seat: seat `s` owns ids `s * pieces_per_player ..`.
///
/// ```
/// use ki_nevet::core::{Color, GameBuilder};
///
/// let state = GameBuilder::new("game-1")
///     .player("u1", "Anna", Color::Red)
///     .player("u2", "Béla", Color::Green)
///     .build()
///     .unwrap();
///
/// assert_eq!(state.player_count(), 2);
/// ```
pub struct GameBuilder {
    id: String,
    config: GameConfig,
    seats: Vec<Seat>,
}

impl GameBuilder {
    /// Start building a game with the default configuration.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config: GameConfig::default(),
            seats: Vec::new(),
        }
    }

    /// Use a custom configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat a player. Turn order follows call order.
    #[must_use]
    pub fn player(
        mut self,
        user: impl Into<UserId>,
        name: impl Into<String>,
        color: Color,
    ) -> Self {
        self.seats.push(Seat {
            user: user.into(),
            name: name.into(),
            color,
        });
        self
    }

    /// Validate the seating and create the initial snapshot.
    pub fn build(self) -> Result<GameState, ConfigError> {
        self.config.validate(self.seats.len())?;

        let mut colors = FxHashSet::default();
        let mut users = FxHashSet::default();
        for seat in &self.seats {
            if !colors.insert(seat.color) {
                return Err(ConfigError::DuplicateColor(seat.color));
            }
            if !users.insert(seat.user.clone()) {
                return Err(ConfigError::DuplicateUser(seat.user.clone()));
            }
        }

        let per_player = self.config.board.pieces_per_player;
        let players: Vector<GamePlayer> = self
            .seats
            .into_iter()
            .enumerate()
            .map(|(seat_index, seat)| {
                let first = seat_index as u16 * per_player;
                GamePlayer {
                    user: seat.user,
                    name: seat.name,
                    color: seat.color,
                    pieces: (first..first + per_player)
                        .map(|id| GamePiece::at_home(PieceId::new(id)))
                        .collect(),
                }
            })
            .collect();

        Ok(GameState::new(self.id, self.config, players))
    }
}
