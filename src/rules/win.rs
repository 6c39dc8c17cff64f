//! Win detection.

use tracing::info;

use crate::core::{GameState, PlayerId};
use crate::events::PointAward;

/// A finished game and the award for its winner.
#[derive(Clone, Debug)]
pub struct Victory {
    pub state: GameState,
    pub winner: PlayerId,
    pub award: PointAward,
}

/// Whether every piece of `player` has reached the terminal marker.
#[must_use]
pub fn has_won(state: &GameState, player: PlayerId) -> bool {
    state.player(player).is_some_and(|p| p.all_finished())
}

/// Finish the game if `mover` just brought their last piece home.
///
/// Only the seat that made the move is evaluated. A seat whose pieces were
/// all finished before the move does not win through someone else's action.
/// Returns `None` when the mover has not won or the game is already over.
/// The returned snapshot keeps the current player index as it was.
#[must_use]
pub fn check_win(state: &GameState, mover: PlayerId) -> Option<Victory> {
    if state.is_finished() || !has_won(state, mover) {
        return None;
    }
    let player = state.player(mover)?;

    let mut next = state.clone();
    next.finish(mover);
    next.set_message(format!("{} won the game!", player.name));

    info!(game = state.id(), winner = %mover, user = %player.user, "game won");

    Some(Victory {
        state: next,
        winner: mover,
        award: PointAward::game_win(player.user.clone(), state.config().rules.win_points),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, GameBuilder, GameStatus, PieceId, Position, UserId};
    use crate::events::AwardKind;

    fn game() -> GameState {
        GameBuilder::new("g")
            .player("anna", "Anna", Color::Red)
            .player("bela", "Béla", Color::Blue)
            .build()
            .unwrap()
    }

    fn with(state: GameState, placements: &[(u16, Position)]) -> GameState {
        placements.iter().fold(state, |s, &(id, pos)| {
            s.with_piece_at(PieceId::new(id), pos).unwrap()
        })
    }

    #[test]
    fn test_no_winner_at_start() {
        assert!(check_win(&game(), PlayerId::new(0)).is_none());
    }

    #[test]
    fn test_pieces_in_lane_do_not_win() {
        let state = with(
            game(),
            &[
                (4, Position::Finished),
                (5, Position::Finished),
                (6, Position::Finished),
                (7, Position::Lane(4)),
            ],
        );
        assert!(check_win(&state, PlayerId::new(1)).is_none());
    }

    #[test]
    fn test_all_finished_wins() {
        let state = with(
            game(),
            &[
                (4, Position::Finished),
                (5, Position::Finished),
                (6, Position::Finished),
                (7, Position::Finished),
            ],
        );

        assert!(check_win(&state, PlayerId::new(0)).is_none());

        let victory = check_win(&state, PlayerId::new(1)).unwrap();
        assert_eq!(victory.winner, PlayerId::new(1));
        assert_eq!(victory.state.status(), GameStatus::Finished);
        assert_eq!(victory.state.winner(), Some(&UserId::new("bela")));
        assert_eq!(victory.state.current_player_index(), state.current_player_index());
        assert_eq!(victory.state.message(), "Béla won the game!");
        assert_eq!(victory.award.kind, AwardKind::GameWin);
        assert_eq!(victory.award.amount, 50);

        // Already finished: nothing more to evaluate
        assert!(check_win(&victory.state, PlayerId::new(1)).is_none());
    }

    #[test]
    fn test_unknown_seat_never_wins() {
        assert!(!has_won(&game(), PlayerId::new(3)));
        assert!(check_win(&game(), PlayerId::new(3)).is_none());
    }
}
