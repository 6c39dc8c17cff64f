//! Game state snapshots.
//!
//! `GameState` is the aggregate root: seating, pieces, whose turn it is,
//! the last roll, and the outcome. The engine never mutates a snapshot it
//! was handed. Each accepted action clones the snapshot (O(1) thanks to
//! `im` persistent vectors), edits the clone and returns it.
//!
//! ## Invariants
//!
//! - `current_player_index` is a valid seat while the game is playing, and
//!   frozen once it is finished.
//! - `winner` is set exactly when `status` is `Finished`.
//! - `dice_value` is `None` before the first roll of a turn.
//! - A piece's state is derived from its position (see `Position::state`).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::piece::{GamePiece, PieceId, Position};
use super::player::{GamePlayer, PlayerId, UserId};
use super::rng::DIE_FACES;
use crate::board::Board;
use crate::error::ConfigError;

/// Whether the game is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Finished,
}

/// Observable turn phase of the current player.
///
/// A turn ends in a transient `TurnComplete` step that is resolved inside
/// the action that produced it, so snapshots only ever show these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum TurnPhase {
    /// The current player must roll.
    AwaitingRoll,
    /// The current player rolled `dice` and must pick a piece.
    AwaitingMove { dice: u8 },
}

/// Complete game snapshot.
///
/// Deserializing runs `GameState::validate`, so a snapshot read back from
/// storage satisfies the same invariants as one built by `GameBuilder`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRepr")]
pub struct GameState {
    id: String,
    config: GameConfig,
    players: Vector<GamePlayer>,
    current_player_index: usize,
    dice_value: Option<u8>,
    consecutive_sixes: u8,
    phase: TurnPhase,
    status: GameStatus,
    message: String,
    winner: Option<UserId>,
    turn_number: u32,
    action_sequence: u32,
    version: u64,
    history: Vector<ActionRecord>,
}

/// Serialized shape of `GameState`, checked before it becomes one.
#[derive(Deserialize)]
struct SnapshotRepr {
    id: String,
    config: GameConfig,
    players: Vector<GamePlayer>,
    current_player_index: usize,
    dice_value: Option<u8>,
    consecutive_sixes: u8,
    phase: TurnPhase,
    status: GameStatus,
    message: String,
    winner: Option<UserId>,
    turn_number: u32,
    action_sequence: u32,
    version: u64,
    history: Vector<ActionRecord>,
}

impl TryFrom<SnapshotRepr> for GameState {
    type Error = ConfigError;

    fn try_from(raw: SnapshotRepr) -> Result<Self, Self::Error> {
        let state = Self {
            id: raw.id,
            config: raw.config,
            players: raw.players,
            current_player_index: raw.current_player_index,
            dice_value: raw.dice_value,
            consecutive_sixes: raw.consecutive_sixes,
            phase: raw.phase,
            status: raw.status,
            message: raw.message,
            winner: raw.winner,
            turn_number: raw.turn_number,
            action_sequence: raw.action_sequence,
            version: raw.version,
            history: raw.history,
        };
        state.validate()?;
        Ok(state)
    }
}

impl GameState {
    /// Create the initial snapshot. Seating is validated by `GameBuilder`.
    pub(crate) fn new(id: String, config: GameConfig, players: Vector<GamePlayer>) -> Self {
        let message = match players.front() {
            Some(first) => format!("The game has started. {} rolls first.", first.name),
            None => "The game has started.".to_string(),
        };
        Self {
            id,
            config,
            players,
            current_player_index: 0,
            dice_value: None,
            consecutive_sixes: 0,
            phase: TurnPhase::AwaitingRoll,
            status: GameStatus::Playing,
            message,
            winner: None,
            turn_number: 1,
            action_sequence: 0,
            version: 0,
            history: Vector::new(),
        }
    }

    // === Identity & configuration ===

    /// Game identifier assigned by the hosting layer.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Configuration this game was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board topology for this game.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::new(&self.config.board)
    }

    // === Players ===

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<GamePlayer> {
        &self.players
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by seat.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&GamePlayer> {
        self.players.get(player.index())
    }

    /// Seat of a user, if they are playing.
    #[must_use]
    pub fn seat_of(&self, user: &UserId) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| &p.user == user)
            .map(|i| PlayerId::new(i as u8))
    }

    /// Seat index of the current player.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Seat of the current player.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        PlayerId::new(self.current_player_index as u8)
    }

    /// The current player.
    #[must_use]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.current_player_index]
    }

    // === Pieces ===

    /// Look up a piece and its owner.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<(PlayerId, GamePiece)> {
        self.pieces().find(|(_, piece)| piece.id == id)
    }

    /// Iterate over every piece with its owner.
    pub fn pieces(&self) -> impl Iterator<Item = (PlayerId, GamePiece)> + '_ {
        self.players.iter().enumerate().flat_map(|(i, player)| {
            player
                .pieces
                .iter()
                .map(move |piece| (PlayerId::new(i as u8), *piece))
        })
    }

    // === Turn ===

    /// Last roll of the current turn, `None` before the first roll.
    #[must_use]
    pub fn dice_value(&self) -> Option<u8> {
        self.dice_value
    }

    /// 6s rolled in a row during the current turn.
    #[must_use]
    pub fn consecutive_sixes(&self) -> u8 {
        self.consecutive_sixes
    }

    /// Current turn phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Turn counter, starting at 1 and incremented on every handoff.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    // === Outcome ===

    /// Game status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Winning user, set once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<&UserId> {
        self.winner.as_ref()
    }

    /// Description of the last event, for display.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    // === Bookkeeping ===

    /// Snapshot version, incremented on every accepted action.
    ///
    /// The hosting layer compares it to reject actions aimed at a stale
    /// snapshot.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Setup ===

    /// Return a snapshot with `piece` relocated to `position`.
    ///
    /// Intended for restoring saved games and preparing positions. The
    /// position must exist on this board.
    pub fn with_piece_at(&self, piece: PieceId, position: Position) -> Result<Self, ConfigError> {
        let board = self.board();
        if !board.contains(position) {
            return Err(ConfigError::PositionOutOfRange(position));
        }
        let (owner, _) = self.piece(piece).ok_or(ConfigError::UnknownPiece(piece))?;
        let slot = self.players[owner.index()]
            .slot_of(piece)
            .ok_or(ConfigError::UnknownPiece(piece))?;

        let mut next = self.clone();
        next.set_position(owner, slot, position);
        Ok(next)
    }

    /// Return a snapshot where `player` is about to roll.
    pub fn with_current_player(&self, player: PlayerId) -> Result<Self, ConfigError> {
        if player.index() >= self.players.len() {
            return Err(ConfigError::UnknownPlayer(player));
        }
        let mut next = self.clone();
        next.current_player_index = player.index();
        next.phase = TurnPhase::AwaitingRoll;
        next.dice_value = None;
        next.consecutive_sixes = 0;
        Ok(next)
    }

    /// Check the snapshot invariants.
    ///
    /// Snapshots produced by the engine always pass. This guards snapshots
    /// that come back from outside, and runs on every deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate(self.players.len())?;
        if self.current_player_index >= self.players.len() {
            return Err(ConfigError::CurrentPlayer {
                index: self.current_player_index,
                players: self.players.len(),
            });
        }

        let board = self.board();
        let per_player = usize::from(self.config.board.pieces_per_player);
        for player in &self.players {
            if player.pieces.len() != per_player {
                return Err(ConfigError::PieceCount {
                    user: player.user.clone(),
                    count: player.pieces.len(),
                });
            }
            if let Some(piece) = player.pieces.iter().find(|p| !board.contains(p.position)) {
                return Err(ConfigError::PositionOutOfRange(piece.position));
            }
        }

        if let TurnPhase::AwaitingMove { dice } = self.phase {
            if !(1..=DIE_FACES).contains(&dice) {
                return Err(ConfigError::DieFace(dice));
            }
        }
        let winner_seated = match &self.winner {
            Some(user) => self.seat_of(user).is_some(),
            None => true,
        };
        if self.is_finished() != self.winner.is_some() || !winner_seated {
            return Err(ConfigError::Outcome);
        }
        Ok(())
    }

    // === Engine-side edits (applied to a fresh clone only) ===

    pub(crate) fn set_position(&mut self, owner: PlayerId, slot: usize, position: Position) {
        if let Some(player) = self.players.get_mut(owner.index()) {
            if let Some(piece) = player.pieces.get_mut(slot) {
                piece.position = position;
            }
        }
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_roll(&mut self, value: u8, consecutive_sixes: u8) {
        self.dice_value = Some(value);
        self.consecutive_sixes = consecutive_sixes;
    }

    /// Pass the turn to `next`, clearing per-turn state.
    pub(crate) fn hand_over(&mut self, next: PlayerId) {
        self.current_player_index = next.index();
        self.phase = TurnPhase::AwaitingRoll;
        self.dice_value = None;
        self.consecutive_sixes = 0;
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// End the game. The current player index is left as it is.
    pub(crate) fn finish(&mut self, winner: PlayerId) {
        self.status = GameStatus::Finished;
        self.winner = self.players.get(winner.index()).map(|p| p.user.clone());
        self.phase = TurnPhase::AwaitingRoll;
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, GameBuilder, PieceState};

    fn two_player_game() -> GameState {
        GameBuilder::new("g1")
            .player("anna", "Anna", Color::Red)
            .player("bela", "Béla", Color::Blue)
            .build()
            .unwrap()
    }

    #[test]
    fn test_initial_snapshot() {
        let state = two_player_game();

        assert_eq!(state.id(), "g1");
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_player_index(), 0);
        assert_eq!(state.dice_value(), None);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(state.winner(), None);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.version(), 0);
        assert!(state.history().is_empty());
        assert!(state.pieces().all(|(_, p)| p.state() == PieceState::Home));
        assert_eq!(state.message(), "The game has started. Anna rolls first.");
    }

    #[test]
    fn test_piece_lookup() {
        let state = two_player_game();

        let (owner, piece) = state.piece(PieceId::new(5)).unwrap();
        assert_eq!(owner, PlayerId::new(1));
        assert_eq!(piece.position, Position::Home);
        assert!(state.piece(PieceId::new(99)).is_none());
        assert_eq!(state.pieces().count(), 8);
    }

    #[test]
    fn test_seat_of() {
        let state = two_player_game();
        assert_eq!(state.seat_of(&UserId::new("bela")), Some(PlayerId::new(1)));
        assert_eq!(state.seat_of(&UserId::new("cili")), None);
    }

    #[test]
    fn test_with_piece_at_leaves_original_untouched() {
        let state = two_player_game();
        let moved = state.with_piece_at(PieceId::new(0), Position::Ring(10)).unwrap();

        assert_eq!(moved.piece(PieceId::new(0)).unwrap().1.position, Position::Ring(10));
        assert_eq!(state.piece(PieceId::new(0)).unwrap().1.position, Position::Home);
    }

    #[test]
    fn test_with_piece_at_rejects_bad_input() {
        let state = two_player_game();

        assert_eq!(
            state.with_piece_at(PieceId::new(0), Position::Ring(52)),
            Err(ConfigError::PositionOutOfRange(Position::Ring(52)))
        );
        assert_eq!(
            state.with_piece_at(PieceId::new(0), Position::Lane(5)),
            Err(ConfigError::PositionOutOfRange(Position::Lane(5)))
        );
        assert_eq!(
            state.with_piece_at(PieceId::new(42), Position::Ring(1)),
            Err(ConfigError::UnknownPiece(PieceId::new(42)))
        );
    }

    #[test]
    fn test_with_current_player() {
        let state = two_player_game();
        let next = state.with_current_player(PlayerId::new(1)).unwrap();
        assert_eq!(next.current_player().name, "Béla");

        assert_eq!(
            state.with_current_player(PlayerId::new(2)),
            Err(ConfigError::UnknownPlayer(PlayerId::new(2)))
        );
    }

    #[test]
    fn test_hand_over_resets_turn_state() {
        let mut state = two_player_game();
        state.set_roll(6, 2);
        state.set_phase(TurnPhase::AwaitingMove { dice: 6 });
        state.record(PlayerId::new(0), Action::Roll { value: 6 });

        state.hand_over(PlayerId::new(1));

        assert_eq!(state.current_player_index(), 1);
        assert_eq!(state.dice_value(), None);
        assert_eq!(state.consecutive_sixes(), 0);
        assert_eq!(state.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_finish_freezes_index() {
        let mut state = two_player_game();
        state.finish(PlayerId::new(0));

        assert!(state.is_finished());
        assert_eq!(state.winner(), Some(&UserId::new("anna")));
        assert_eq!(state.current_player_index(), 0);
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let state = two_player_game()
            .with_piece_at(PieceId::new(1), Position::Lane(2))
            .unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, restored);
    }

    #[test]
    fn test_deserialize_rejects_broken_snapshot() {
        let json = serde_json::to_value(two_player_game()).unwrap();

        let mut bad_seat = json.clone();
        bad_seat["current_player_index"] = serde_json::json!(7);
        let err = serde_json::from_value::<GameState>(bad_seat).unwrap_err();
        assert!(err.to_string().contains("current player index 7"));

        let mut bad_lane = json.clone();
        bad_lane["players"][0]["pieces"][0]["position"] =
            serde_json::json!({ "kind": "lane", "cell": 9 });
        assert!(serde_json::from_value::<GameState>(bad_lane).is_err());

        let mut no_winner = json.clone();
        no_winner["status"] = serde_json::json!("finished");
        assert!(serde_json::from_value::<GameState>(no_winner).is_err());

        let mut bad_die = json;
        bad_die["phase"] = serde_json::json!({ "phase": "awaiting_move", "dice": 0 });
        assert!(serde_json::from_value::<GameState>(bad_die).is_err());
    }

    #[test]
    fn test_validate_accepts_engine_snapshots() {
        let mut state = two_player_game();
        assert_eq!(state.validate(), Ok(()));

        state.finish(PlayerId::new(1));
        assert_eq!(state.validate(), Ok(()));

        state.current_player_index = 2;
        assert_eq!(
            state.validate(),
            Err(ConfigError::CurrentPlayer { index: 2, players: 2 })
        );
    }
}
