//! XP accrual and level-up transitions.
//!
//! Pure functions over a [`Character`]; the session wraps them with
//! persistence and presentation.

use crate::game::character::Character;

/// Threshold multiplier applied on every level gained (floored).
pub const XP_GROWTH: f64 = 1.5;

/// What a single XP award did to the character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XpOutcome {
    pub gained: u32,
    /// Every level reached, in order. Empty if no threshold was crossed.
    pub levels: Vec<u32>,
}

impl XpOutcome {
    pub fn leveled_up(&self) -> bool {
        !self.levels.is_empty()
    }
}

/// Next threshold after `current`: `floor(current * 1.5)`, never below 1.
pub fn next_threshold(current: u32) -> u32 {
    let grown = (f64::from(current) * XP_GROWTH).floor();
    if grown >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (grown as u32).max(1)
    }
}

/// Add `amount` XP and apply every level-up it pays for.
///
/// Afterwards `0 <= xp < xp_to_next` holds. A large award may cross several
/// thresholds at once; each one bumps the level and every stat by one.
pub fn apply_xp(character: &mut Character, amount: u32) -> XpOutcome {
    let mut outcome = XpOutcome {
        gained: amount,
        levels: Vec::new(),
    };
    if amount == 0 {
        return outcome;
    }

    // Older records may carry a zero threshold; treat it as a fresh one.
    if character.xp_to_next == 0 {
        character.xp_to_next = crate::game::character::STARTING_XP_TO_NEXT;
    }

    character.xp = character.xp.saturating_add(amount);
    while character.xp >= character.xp_to_next {
        character.xp -= character.xp_to_next;
        character.level = character.level.saturating_add(1);
        character.xp_to_next = next_threshold(character.xp_to_next);
        character.stats.increment_all();
        outcome.levels.push(character.level);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::character::Stats;

    #[test]
    fn threshold_chain() {
        assert_eq!(next_threshold(100), 150);
        assert_eq!(next_threshold(150), 225);
        assert_eq!(next_threshold(225), 337);
        assert_eq!(next_threshold(1), 1);
    }

    #[test]
    fn exactly_one_level() {
        let mut c = Character::default();
        let out = apply_xp(&mut c, 100);
        assert_eq!(out.levels, vec![2]);
        assert_eq!(c.level, 2);
        assert_eq!(c.xp, 0);
        assert_eq!(c.xp_to_next, 150);
        let base = Stats::default();
        assert_eq!(c.stats.int, base.int + 1);
        assert_eq!(c.stats.focus, base.focus + 1);
        assert_eq!(c.stats.memory, base.memory + 1);
        assert_eq!(c.stats.stealth, base.stealth + 1);
        assert_eq!(c.stats.reputation, base.reputation + 1);
    }

    #[test]
    fn partial_award_does_not_level() {
        let mut c = Character::default();
        let out = apply_xp(&mut c, 99);
        assert!(!out.leveled_up());
        assert_eq!(c.level, 1);
        assert_eq!(c.xp, 99);
    }

    #[test]
    fn two_thresholds_in_one_award() {
        // 100 + 150 consumed, 125 left over against 225.
        let mut c = Character::default();
        let out = apply_xp(&mut c, 375);
        assert_eq!(out.levels, vec![2, 3]);
        assert_eq!(c.level, 3);
        assert_eq!(c.xp, 125);
        assert_eq!(c.xp_to_next, 225);
    }

    #[test]
    fn three_thresholds_in_one_award() {
        let mut c = Character::default();
        let out = apply_xp(&mut c, 475);
        assert_eq!(out.levels, vec![2, 3, 4]);
        assert_eq!(c.level, 4);
        assert_eq!(c.xp, 0);
        assert_eq!(c.xp_to_next, 337);
        assert_eq!(c.stats.int, Stats::default().int + 3);
    }

    #[test]
    fn zero_is_a_no_op() {
        let mut c = Character::default();
        let out = apply_xp(&mut c, 0);
        assert_eq!(out, XpOutcome::default());
        assert_eq!(c, Character::default());
    }

    #[test]
    fn xp_stays_below_threshold_for_a_range_of_awards() {
        for amount in (0..5_000).step_by(37) {
            let mut c = Character::default();
            let mut thresholds = 0;
            let mut remaining = amount;
            let mut need = 100;
            while remaining >= need {
                remaining -= need;
                need = next_threshold(need);
                thresholds += 1;
            }
            apply_xp(&mut c, amount);
            assert!(c.xp < c.xp_to_next, "amount {amount}");
            assert_eq!(c.level, 1 + thresholds, "amount {amount}");
        }
    }

    #[test]
    fn repeated_awards_accumulate() {
        let mut c = Character::default();
        apply_xp(&mut c, 60);
        apply_xp(&mut c, 60);
        assert_eq!(c.level, 2);
        assert_eq!(c.xp, 20);
    }

    #[test]
    fn zero_threshold_record_is_repaired() {
        let mut c = Character {
            xp_to_next: 0,
            ..Character::default()
        };
        apply_xp(&mut c, 10);
        assert_eq!(c.xp_to_next, 100);
        assert_eq!(c.xp, 10);
    }

    #[test]
    fn maxed_out_record_saturates() {
        let mut c = Character {
            level: u32::MAX,
            stats: Stats {
                int: i32::MAX,
                ..Stats::default()
            },
            ..Character::default()
        };
        let out = apply_xp(&mut c, 100);
        assert_eq!(out.levels, vec![u32::MAX]);
        assert_eq!(c.level, u32::MAX);
        assert_eq!(c.stats.int, i32::MAX);
        assert_eq!(c.stats.focus, Stats::default().focus + 1);
        assert_eq!(c.xp, 0);
    }
}
