//! Dice resolution: bonus rolls and the consecutive-six limit.

use crate::core::{DiceSource, HouseRules, DIE_FACES};

/// A roll together with what it means for the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollResolution {
    /// Face shown, `1..=6`.
    pub value: u8,
    /// 6s rolled in a row in this turn, including this roll.
    pub sixes_in_a_row: u8,
    /// The player may roll again after moving.
    pub grants_bonus: bool,
    /// The turn is forfeited without a move.
    pub forfeits: bool,
}

/// Applies the house rules to raw die values.
#[derive(Clone, Copy, Debug)]
pub struct DiceResolver {
    bonus_on_six: bool,
    six_limit: Option<u8>,
}

impl DiceResolver {
    /// Create a resolver for the given rules.
    #[must_use]
    pub fn new(rules: &HouseRules) -> Self {
        Self {
            bonus_on_six: rules.bonus_roll_on_six,
            six_limit: rules.max_consecutive_sixes,
        }
    }

    /// Roll `dice` and resolve the result.
    pub fn roll<D: DiceSource + ?Sized>(&self, dice: &mut D, sixes_so_far: u8) -> RollResolution {
        self.resolve(dice.roll_die(), sixes_so_far)
    }

    /// Resolve a die value given how many 6s preceded it in this turn.
    #[must_use]
    pub fn resolve(&self, value: u8, sixes_so_far: u8) -> RollResolution {
        debug_assert!((1..=DIE_FACES).contains(&value), "die value {} out of range", value);

        if value != DIE_FACES {
            return RollResolution {
                value,
                sixes_in_a_row: 0,
                grants_bonus: false,
                forfeits: false,
            };
        }

        let sixes_in_a_row = sixes_so_far.saturating_add(1);
        let forfeits = self.six_limit.is_some_and(|limit| sixes_in_a_row >= limit);
        RollResolution {
            value,
            sixes_in_a_row,
            grants_bonus: self.bonus_on_six && !forfeits,
            forfeits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDice;

    fn resolver() -> DiceResolver {
        DiceResolver::new(&HouseRules::default())
    }

    #[test]
    fn test_plain_roll() {
        let roll = resolver().resolve(4, 0);
        assert_eq!(roll.sixes_in_a_row, 0);
        assert!(!roll.grants_bonus);
        assert!(!roll.forfeits);
    }

    #[test]
    fn test_six_grants_bonus() {
        let roll = resolver().resolve(6, 0);
        assert_eq!(roll.sixes_in_a_row, 1);
        assert!(roll.grants_bonus);
        assert!(!roll.forfeits);

        let roll = resolver().resolve(6, 1);
        assert_eq!(roll.sixes_in_a_row, 2);
        assert!(roll.grants_bonus);
    }

    #[test]
    fn test_third_six_forfeits() {
        let roll = resolver().resolve(6, 2);
        assert_eq!(roll.sixes_in_a_row, 3);
        assert!(roll.forfeits);
        assert!(!roll.grants_bonus);
    }

    #[test]
    fn test_non_six_resets_count() {
        let roll = resolver().resolve(5, 2);
        assert_eq!(roll.sixes_in_a_row, 0);
        assert!(!roll.forfeits);
    }

    #[test]
    fn test_unlimited_sixes() {
        let rules = HouseRules::default().with_max_consecutive_sixes(None);
        let roll = DiceResolver::new(&rules).resolve(6, 10);
        assert!(!roll.forfeits);
        assert!(roll.grants_bonus);
    }

    #[test]
    fn test_bonus_disabled() {
        let rules = HouseRules::default().with_bonus_roll(false);
        let roll = DiceResolver::new(&rules).resolve(6, 0);
        assert!(!roll.grants_bonus);
        assert_eq!(roll.sixes_in_a_row, 1);
    }

    #[test]
    fn test_roll_from_source() {
        let mut dice = ScriptedDice::new([6, 6, 6]);
        let resolver = resolver();

        let first = resolver.roll(&mut dice, 0);
        let second = resolver.roll(&mut dice, first.sixes_in_a_row);
        let third = resolver.roll(&mut dice, second.sixes_in_a_row);

        assert!(!first.forfeits && !second.forfeits);
        assert!(third.forfeits);
    }
}
