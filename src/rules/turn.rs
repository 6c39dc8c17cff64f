//! Turn coordination.
//!
//! ```text
//!                 roll, no legal move / third 6
//!   AwaitingRoll ─────────────────────────────────┐
//!       │  ▲                                       ▼
//!  roll │  │ moved after a 6              TurnComplete ──► AwaitingRoll(next)
//!       ▼  │                                       ▲
//!   AwaitingMove ──────────────────────────────────┘
//!                 moved, no bonus
//! ```
//!
//! `TurnComplete` is resolved immediately by `complete_turn`, which picks
//! the next seat in turn order.

use tracing::debug;

use crate::core::{GameState, PlayerId, TurnPhase};

/// Seat that plays after the current one.
///
/// Walks forward cyclically from the current seat. When the
/// `skip_finished_players` rule is on, seats whose pieces have all
/// finished are passed over. If every other seat is skipped, the current
/// seat keeps the turn.
#[must_use]
pub fn next_player(state: &GameState) -> PlayerId {
    let count = state.player_count();
    let current = state.current_player_index();
    let skip_finished = state.config().rules.skip_finished_players;

    (1..=count)
        .map(|step| (current + step) % count)
        .find(|&index| !skip_finished || !state.players()[index].all_finished())
        .map_or(PlayerId::new(current as u8), |index| PlayerId::new(index as u8))
}

/// End the current turn and hand the dice to the next seat.
pub(crate) fn complete_turn(state: &mut GameState) {
    let next = next_player(state);
    debug!(
        game = state.id(),
        from = state.current_player_index(),
        to = next.index(),
        "turn handed over"
    );
    state.hand_over(next);
}

/// Let the current player roll again, keeping the six count.
pub(crate) fn grant_bonus(state: &mut GameState) {
    state.set_phase(TurnPhase::AwaitingRoll);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, GameBuilder, GameConfig, HouseRules, PieceId, Position};

    fn three_players(rules: HouseRules) -> GameState {
        GameBuilder::new("g")
            .config(GameConfig::default().with_rules(rules))
            .player("a", "A", Color::Red)
            .player("b", "B", Color::Blue)
            .player("c", "C", Color::Green)
            .build()
            .unwrap()
    }

    fn finish_all(state: GameState, seat: u16) -> GameState {
        (seat * 4..seat * 4 + 4).fold(state, |s, id| {
            s.with_piece_at(PieceId::new(id), Position::Finished).unwrap()
        })
    }

    #[test]
    fn test_cycles_in_order() {
        let mut state = three_players(HouseRules::default());

        assert_eq!(next_player(&state), PlayerId::new(1));
        complete_turn(&mut state);
        assert_eq!(state.current_player_index(), 1);
        complete_turn(&mut state);
        assert_eq!(state.current_player_index(), 2);
        complete_turn(&mut state);
        assert_eq!(state.current_player_index(), 0);
        assert_eq!(state.turn_number(), 4);
    }

    #[test]
    fn test_skips_finished_player() {
        let state = finish_all(three_players(HouseRules::default()), 1);
        assert_eq!(next_player(&state), PlayerId::new(2));
    }

    #[test]
    fn test_no_skip_when_disabled() {
        let mut rules = HouseRules::default();
        rules.skip_finished_players = false;
        let state = finish_all(three_players(rules), 1);
        assert_eq!(next_player(&state), PlayerId::new(1));
    }

    #[test]
    fn test_everyone_else_finished_keeps_turn() {
        let state = finish_all(finish_all(three_players(HouseRules::default()), 1), 2);
        assert_eq!(next_player(&state), PlayerId::new(0));
    }

    #[test]
    fn test_bonus_keeps_player() {
        let mut state = three_players(HouseRules::default());
        state.set_roll(6, 1);
        state.set_phase(TurnPhase::AwaitingMove { dice: 6 });

        grant_bonus(&mut state);

        assert_eq!(state.current_player_index(), 0);
        assert_eq!(state.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(state.consecutive_sixes(), 1);
        assert_eq!(state.turn_number(), 1);
    }
}
