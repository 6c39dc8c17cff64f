//! Player-count verification tests.
//!
//! These tests verify that the engine has no hidden 2-player assumptions
//! and plays out complete games for every supported table size.

use ki_nevet::core::{
    Color, GameBuilder, GameConfig, GameRng, GameState, HouseRules, PieceId, PlayerId, Position,
    TurnPhase, MAX_PLAYERS, MIN_PLAYERS,
};
use ki_nevet::error::ConfigError;
use ki_nevet::events::{AwardKind, PointAward};
use ki_nevet::rules::Engine;

const NAMES: [&str; 4] = ["anna", "bela", "cili", "dani"];

fn table(player_count: usize, config: GameConfig) -> Result<GameState, ConfigError> {
    NAMES
        .iter()
        .zip(Color::ALL)
        .take(player_count)
        .fold(GameBuilder::new("table").config(config), |b, (&name, color)| {
            b.player(name, name.to_uppercase(), color)
        })
        .build()
}

/// Play until someone wins, always moving the first legal piece.
fn play_out(
    mut engine: Engine<GameRng>,
    mut state: GameState,
    max_actions: usize,
) -> (GameState, Vec<PointAward>) {
    let mut awards = Vec::new();
    for _ in 0..max_actions {
        if state.is_finished() {
            break;
        }
        let actor = state.current_player().user.clone();
        state = match state.phase() {
            TurnPhase::AwaitingRoll => engine.roll(&state, &actor).unwrap().0,
            TurnPhase::AwaitingMove { .. } => {
                let piece = engine.legal_moves(&state)[0];
                let (next, events) = engine.apply_move(&state, &actor, piece).unwrap();
                awards.extend(events);
                next
            }
        };
    }
    (state, awards)
}

#[test]
fn test_supported_player_counts() {
    for player_count in MIN_PLAYERS..=MAX_PLAYERS {
        let state = table(player_count, GameConfig::default()).unwrap();
        assert_eq!(state.player_count(), player_count);

        for player in PlayerId::all(player_count) {
            let seat = state.player(player).unwrap();
            assert_eq!(seat.color, Color::ALL[player.index()]);
            assert_eq!(seat.pieces.len(), 4);
            assert_eq!(seat.pieces[0].id, PieceId::new(player.0 as u16 * 4));
        }
    }
}

#[test]
fn test_unsupported_player_counts() {
    assert!(matches!(
        table(1, GameConfig::default()),
        Err(ConfigError::PlayerCount { count: 1, .. })
    ));
}

#[test]
fn test_turn_order_wraps_for_every_table() {
    for player_count in MIN_PLAYERS..=MAX_PLAYERS {
        let rules = HouseRules::default().with_bonus_roll(false);
        let mut state = table(player_count, GameConfig::default().with_rules(rules)).unwrap();
        let mut engine = Engine::seeded(7);

        let mut seen = Vec::new();
        while seen.len() <= player_count {
            if state.phase() == TurnPhase::AwaitingRoll {
                seen.push(state.current_player_index());
            }
            let actor = state.current_player().user.clone();
            state = match state.phase() {
                TurnPhase::AwaitingRoll => engine.roll(&state, &actor).unwrap().0,
                TurnPhase::AwaitingMove { .. } => {
                    let piece = engine.legal_moves(&state)[0];
                    engine.apply_move(&state, &actor, piece).unwrap().0
                }
            };
        }

        let expected: Vec<usize> = (0..=player_count).map(|i| i % player_count).collect();
        assert_eq!(seen, expected, "{} players", player_count);
    }
}

#[test]
fn test_full_games_reach_a_winner() {
    for player_count in MIN_PLAYERS..=MAX_PLAYERS {
        for seed in 0..5 {
            let state = table(player_count, GameConfig::default()).unwrap();
            let (done, awards) = play_out(Engine::seeded(seed), state, 20_000);

            assert!(done.is_finished(), "{} players, seed {} did not finish", player_count, seed);
            let winner = done.winner().unwrap().clone();
            let seat = done.seat_of(&winner).unwrap();
            let pieces = &done.player(seat).unwrap().pieces;
            assert!(pieces.iter().all(|p| p.position == Position::Finished));

            let last = awards.last().unwrap();
            assert_eq!(last.kind, AwardKind::GameWin);
            assert_eq!(last.user, winner);
            assert_eq!(awards.iter().filter(|a| a.kind == AwardKind::GameWin).count(), 1);
            assert!(awards
                .iter()
                .filter(|a| a.kind == AwardKind::Capture)
                .all(|a| a.amount == 5));
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let state = table(4, GameConfig::default()).unwrap();
    let (a, _) = play_out(Engine::seeded(99), state.clone(), 500);
    let (b, _) = play_out(Engine::seeded(99), state, 500);

    assert_eq!(a, b);
    assert_eq!(a.history(), b.history());
}
