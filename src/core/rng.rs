//! Dice sources.
//!
//! The engine never reaches for a global generator. It rolls through the
//! `DiceSource` trait, which has two implementations here:
//!
//! - `GameRng`: seeded ChaCha8 stream. Deterministic for a given seed, or
//!   seeded from OS entropy in production. Its position can be saved and
//!   restored through `GameRngState`.
//! - `ScriptedDice`: replays a fixed sequence of faces (tests, replays).
//!
//! ```
//! use ki_nevet::core::{DiceSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// Source of die rolls.
///
/// Implementations must return a value in `1..=DIE_FACES`.
pub trait DiceSource {
    /// Roll one die.
    fn roll_die(&mut self) -> u8;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// Deterministic RNG for dice.
///
/// Uses ChaCha8 for speed while keeping high quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The chosen seed is still recorded, so the stream can be checkpointed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position, so saving is O(1) regardless of how
/// many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of die faces, wrapping around at the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Create a scripted die.
    ///
    /// # Panics
    ///
    /// Panics if `faces` is empty or contains a value outside `1..=6`.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: Vec<u8> = faces.into_iter().collect();
        assert!(!faces.is_empty(), "Scripted dice need at least one face");
        assert!(
            faces.iter().all(|f| (1..=DIE_FACES).contains(f)),
            "Die faces must be in 1..=6"
        );
        Self { faces, next: 0 }
    }

    /// Number of rolls made so far.
    #[must_use]
    pub fn rolls_made(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}
