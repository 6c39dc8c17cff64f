//! Game rules.
//!
//! - `dice`: bonus rolls and the consecutive-six limit
//! - `movement`: legal moves, destinations, captures
//! - `turn`: who plays next
//! - `win`: end-of-game detection
//! - `engine`: the `roll` / `apply_move` facade tying the above together
//!
//! Every operation takes a snapshot by reference and returns a new one.

pub mod dice;
pub mod engine;
pub mod movement;
pub mod turn;
pub mod win;

pub use dice::{DiceResolver, RollResolution};
pub use engine::Engine;
pub use movement::{apply_move, destination, legal_moves, LegalMoves, MoveKind, MoveOutcome};
pub use turn::next_player;
pub use win::{check_win, has_won, Victory};
