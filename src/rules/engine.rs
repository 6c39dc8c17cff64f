//! The engine facade used by the hosting layer.
//!
//! Two operations are exposed: `roll` and `apply_move`. Each takes a
//! snapshot and the acting user, and either returns the next snapshot or a
//! `GameError` with the input left as it was.
//!
//! ## Example
//!
//! ```
//! use ki_nevet::core::{Color, GameBuilder, ScriptedDice, TurnPhase, UserId};
//! use ki_nevet::rules::Engine;
//!
//! let state = GameBuilder::new("g")
//!     .player("anna", "Anna", Color::Red)
//!     .player("bela", "Béla", Color::Blue)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = Engine::new(ScriptedDice::new([6]));
//! let anna = UserId::new("anna");
//!
//! let (state, dice) = engine.roll(&state, &anna).unwrap();
//! assert_eq!(dice, 6);
//! assert_eq!(state.phase(), TurnPhase::AwaitingMove { dice: 6 });
//!
//! let piece = engine.legal_moves(&state)[0];
//! let (state, events) = engine.apply_move(&state, &anna, piece).unwrap();
//! assert!(events.is_empty());
//! assert_eq!(state.current_player_index(), 0); // bonus roll after a 6
//! ```

use tracing::{debug, info};

use super::dice::DiceResolver;
use super::movement::{self, LegalMoves};
use super::{turn, win};
use crate::core::{
    Action, DiceSource, GameRng, GameState, PieceId, PlayerId, TurnPhase, UserId, DIE_FACES,
};
use crate::error::{ActionKind, GameError};
use crate::events::Events;

/// Game engine bound to a dice source.
///
/// The engine holds no game state of its own; any number of games can be
/// driven through one engine, one action at a time.
#[derive(Clone, Debug)]
pub struct Engine<D = GameRng> {
    dice: D,
}

impl Engine<GameRng> {
    /// Engine with a deterministic dice stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    /// Engine with dice seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl<D: DiceSource> Engine<D> {
    /// Create an engine rolling with `dice`.
    pub fn new(dice: D) -> Self {
        Self { dice }
    }

    /// The dice source.
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Take back the dice source.
    pub fn into_dice(self) -> D {
        self.dice
    }

    /// Roll for the current player.
    ///
    /// Returns the next snapshot and the face rolled. The snapshot is
    /// `AwaitingMove` when a move is possible. Otherwise the turn is already
    /// handed over: after a third consecutive 6, or when no piece can move.
    pub fn roll(
        &mut self,
        state: &GameState,
        actor: &UserId,
    ) -> Result<(GameState, u8), GameError> {
        let player = authorize(state, actor)?;
        if let TurnPhase::AwaitingMove { .. } = state.phase() {
            return Err(GameError::WrongPhase {
                expected: ActionKind::Move,
            });
        }

        let resolver = DiceResolver::new(&state.config().rules);
        let roll = resolver.roll(&mut self.dice, state.consecutive_sixes());
        let name = &state.current_player().name;
        debug!(
            game = state.id(),
            %player,
            value = roll.value,
            sixes = roll.sixes_in_a_row,
            "dice rolled"
        );

        let mut next = state.clone();
        next.record(player, Action::Roll { value: roll.value });
        next.set_roll(roll.value, roll.sixes_in_a_row);

        if roll.forfeits {
            info!(
                game = state.id(),
                %player,
                sixes = roll.sixes_in_a_row,
                "turn forfeited on consecutive sixes"
            );
            next.set_message(format!(
                "{} rolled {} 6s in a row and forfeits the turn.",
                name, roll.sixes_in_a_row
            ));
            turn::complete_turn(&mut next);
        } else if movement::legal_moves(&next, player, roll.value).is_empty() {
            info!(game = state.id(), %player, value = roll.value, "no legal move");
            next.set_message(format!("{} rolled a {}: no legal move.", name, roll.value));
            turn::complete_turn(&mut next);
        } else {
            next.set_message(format!("{} rolled a {}.", name, roll.value));
            next.set_phase(TurnPhase::AwaitingMove { dice: roll.value });
        }

        next.bump_version();
        Ok((next, roll.value))
    }

    /// Move one of the current player's pieces by the pending roll.
    ///
    /// Returns the next snapshot and the point awards earned, in order:
    /// a capture award first, then a game-win award if the move ended the
    /// game.
    pub fn apply_move(
        &self,
        state: &GameState,
        actor: &UserId,
        piece: PieceId,
    ) -> Result<(GameState, Events), GameError> {
        let player = authorize(state, actor)?;
        let TurnPhase::AwaitingMove { dice } = state.phase() else {
            return Err(GameError::WrongPhase {
                expected: ActionKind::Roll,
            });
        };

        let outcome = movement::apply_move(state, player, piece, dice)?;
        let mut next = outcome.state;
        let mut events = outcome.events;
        next.record(player, Action::Move { piece, dice });

        if let Some(victory) = win::check_win(&next, player) {
            let mut finished = victory.state;
            finished.bump_version();
            events.push(victory.award);
            return Ok((finished, events));
        }

        if dice == DIE_FACES && state.config().rules.bonus_roll_on_six {
            let name = &state.current_player().name;
            let message = format!("{} {} rolls again.", next.message(), name);
            next.set_message(message);
            turn::grant_bonus(&mut next);
        } else {
            turn::complete_turn(&mut next);
        }

        next.bump_version();
        Ok((next, events))
    }

    /// Pieces the current player may move with the pending roll.
    ///
    /// Empty unless the game is waiting for a move.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> LegalMoves {
        match state.phase() {
            TurnPhase::AwaitingMove { dice } if !state.is_finished() => {
                movement::legal_moves(state, state.current_player_id(), dice)
            }
            _ => LegalMoves::new(),
        }
    }

    /// Winner of a finished game.
    #[must_use]
    pub fn result<'a>(&self, state: &'a GameState) -> Option<&'a UserId> {
        state.winner()
    }
}

/// Check the game is running and `actor` holds the current seat.
fn authorize(state: &GameState, actor: &UserId) -> Result<PlayerId, GameError> {
    if state.is_finished() {
        return Err(GameError::GameAlreadyFinished);
    }
    let current = state.current_player();
    if &current.user != actor {
        return Err(GameError::NotYourTurn {
            expected: current.user.clone(),
            actual: actor.clone(),
        });
    }
    Ok(state.current_player_id())
}
