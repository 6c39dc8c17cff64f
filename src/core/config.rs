//! Game configuration types.
//!
//! Games are configured at creation by providing:
//! - `BoardConfig`: ring length, safe lane length, pieces per player
//! - `HouseRules`: bonus rolls, the consecutive-six limit, blockades,
//!   safe entry cells, point amounts
//! - `GameConfig`: combines both
//!
//! The defaults are the classic 52-cell board with 4 pieces per player.

use serde::{Deserialize, Serialize};

use super::player::Color;
use crate::error::ConfigError;

/// Fewest players that can start a game.
pub const MIN_PLAYERS: usize = 2;

/// Most players that can start a game (one per color).
pub const MAX_PLAYERS: usize = Color::ALL.len();

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Cells on the shared ring. Must split evenly into one quadrant per color.
    pub ring_length: u16,

    /// Cells in each private safe lane, not counting the terminal marker.
    pub lane_length: u16,

    /// Pieces owned by each player.
    pub pieces_per_player: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            ring_length: 52,
            lane_length: 5,
            pieces_per_player: 4,
        }
    }
}

impl BoardConfig {
    /// Set the ring length.
    #[must_use]
    pub fn with_ring_length(mut self, ring_length: u16) -> Self {
        self.ring_length = ring_length;
        self
    }

    /// Set the safe lane length.
    #[must_use]
    pub fn with_lane_length(mut self, lane_length: u16) -> Self {
        self.lane_length = lane_length;
        self
    }

    /// Set the number of pieces per player.
    #[must_use]
    pub fn with_pieces_per_player(mut self, pieces: u16) -> Self {
        self.pieces_per_player = pieces;
        self
    }

    /// Check the board can be laid out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let quadrants = Color::ALL.len() as u16;
        if self.ring_length == 0 || self.ring_length % quadrants != 0 {
            return Err(ConfigError::RingLength {
                ring_length: self.ring_length,
                quadrants,
            });
        }
        if self.lane_length == 0 {
            return Err(ConfigError::EmptyLane);
        }
        if self.pieces_per_player == 0 {
            return Err(ConfigError::NoPieces);
        }

        // Progress runs up to ring + lane, piece ids up to seats * pieces
        let progress_fits = self.ring_length.checked_add(self.lane_length).is_some();
        let ids_fit = self.pieces_per_player.checked_mul(MAX_PLAYERS as u16).is_some();
        if !progress_fits || !ids_fit {
            return Err(ConfigError::BoardTooLarge {
                ring_length: self.ring_length,
                lane_length: self.lane_length,
                pieces_per_player: self.pieces_per_player,
            });
        }
        Ok(())
    }
}

/// Rule variants of this game family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRules {
    /// Rolling a 6 grants another roll after the move.
    pub bonus_roll_on_six: bool,

    /// Rolling this many 6s in a row forfeits the turn. `None` disables the limit.
    pub max_consecutive_sixes: Option<u8>,

    /// Entry cells are havens: nobody is captured there.
    pub entry_cells_are_safe: bool,

    /// Two or more same-color pieces on a ring cell block opponents from landing.
    pub blockades: bool,

    /// Players with every piece finished are skipped on handoff.
    pub skip_finished_players: bool,

    /// Points awarded to the mover for each capture.
    pub capture_points: u32,

    /// Points awarded to the winner.
    pub win_points: u32,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            bonus_roll_on_six: true,
            max_consecutive_sixes: Some(3),
            entry_cells_are_safe: true,
            blockades: true,
            skip_finished_players: true,
            capture_points: 5,
            win_points: 50,
        }
    }
}

impl HouseRules {
    /// Enable or disable the bonus roll after a 6.
    #[must_use]
    pub fn with_bonus_roll(mut self, enabled: bool) -> Self {
        self.bonus_roll_on_six = enabled;
        self
    }

    /// Set the consecutive-six limit.
    #[must_use]
    pub fn with_max_consecutive_sixes(mut self, limit: Option<u8>) -> Self {
        self.max_consecutive_sixes = limit;
        self
    }

    /// Enable or disable capture immunity on entry cells.
    #[must_use]
    pub fn with_safe_entry_cells(mut self, enabled: bool) -> Self {
        self.entry_cells_are_safe = enabled;
        self
    }

    /// Enable or disable blockades.
    #[must_use]
    pub fn with_blockades(mut self, enabled: bool) -> Self {
        self.blockades = enabled;
        self
    }

    /// Set point amounts for captures and wins.
    #[must_use]
    pub fn with_points(mut self, capture: u32, win: u32) -> Self {
        self.capture_points = capture;
        self.win_points = win;
        self
    }

    /// Check the rule values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_consecutive_sixes == Some(0) {
            return Err(ConfigError::SixLimit);
        }
        Ok(())
    }
}

/// Complete game configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub rules: HouseRules,
}

impl GameConfig {
    /// Create a configuration from its parts.
    #[must_use]
    pub fn new(board: BoardConfig, rules: HouseRules) -> Self {
        Self { board, rules }
    }

    /// Replace the board configuration.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Replace the house rules.
    #[must_use]
    pub fn with_rules(mut self, rules: HouseRules) -> Self {
        self.rules = rules;
        self
    }

    /// Validate the configuration for a given number of players.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount {
                count: player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        self.board.validate()?;
        self.rules.validate()
    }
}
