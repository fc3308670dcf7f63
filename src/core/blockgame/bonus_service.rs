// Bonus rolls for the block-mining mini game.
//
// Each counted message gives users with a pickaxe one roll. A single draw
// decides both tiers: the extra band sits inside the simple band, so an
// extra bonus is strictly rarer than a simple one.

use rand::Rng;

use crate::core::profiles::UserProfile;

/// Chance per message of dropping any bonus at all.
pub const DEFAULT_DROP_RATE: f64 = 0.013;
/// Chance per message of the drop being an extra bonus.
pub const DEFAULT_EXTRA_RATE: f64 = 0.0034;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Simple,
    Extra,
}

pub struct BonusGame {
    drop_rate: f64,
    extra_rate: f64,
}

impl Default for BonusGame {
    fn default() -> Self {
        Self {
            drop_rate: DEFAULT_DROP_RATE,
            extra_rate: DEFAULT_EXTRA_RATE,
        }
    }
}

impl BonusGame {
    pub fn new(drop_rate: f64, extra_rate: f64) -> Self {
        Self {
            drop_rate,
            extra_rate,
        }
    }

    /// Roll once for a message, updating the profile's bonus counters on a
    /// drop. Users without a pickaxe never roll.
    pub fn roll(&self, profile: &mut UserProfile, rng: &mut impl Rng) -> Option<BonusKind> {
        if profile.blockgame.picklevel == 0 {
            return None;
        }

        let bonus = self.classify(rng.gen::<f64>());
        match bonus {
            Some(BonusKind::Extra) => profile.blockgame.bonuses.extra += 1,
            Some(BonusKind::Simple) => profile.blockgame.bonuses.simple += 1,
            None => {}
        }
        bonus
    }

    /// Convenience wrapper for callers without their own RNG.
    pub fn roll_for_message(&self, profile: &mut UserProfile) -> Option<BonusKind> {
        self.roll(profile, &mut rand::thread_rng())
    }

    /// Map a draw in [0, 1) onto a bonus tier. Pure, so the boundary
    /// behavior is testable without seeding an RNG.
    fn classify(&self, draw: f64) -> Option<BonusKind> {
        if draw <= self.extra_rate {
            Some(BonusKind::Extra)
        } else if draw <= self.drop_rate {
            Some(BonusKind::Simple)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_bands() {
        let game = BonusGame::default();
        assert_eq!(game.classify(0.001), Some(BonusKind::Extra));
        assert_eq!(game.classify(DEFAULT_EXTRA_RATE), Some(BonusKind::Extra));
        assert_eq!(game.classify(0.01), Some(BonusKind::Simple));
        assert_eq!(game.classify(DEFAULT_DROP_RATE), Some(BonusKind::Simple));
        assert_eq!(game.classify(0.5), None);
    }

    #[test]
    fn no_pickaxe_means_no_roll() {
        let game = BonusGame::new(1.0, 1.0); // would always drop
        let mut profile = UserProfile::new("miner");

        assert_eq!(game.roll_for_message(&mut profile), None);
        assert_eq!(profile.blockgame.bonuses.simple, 0);
        assert_eq!(profile.blockgame.bonuses.extra, 0);
    }

    #[test]
    fn guaranteed_drop_updates_counters() {
        let mut profile = UserProfile::new("miner");
        profile.blockgame.picklevel = 1;

        let always_extra = BonusGame::new(1.0, 1.0);
        assert_eq!(
            always_extra.roll_for_message(&mut profile),
            Some(BonusKind::Extra)
        );
        assert_eq!(profile.blockgame.bonuses.extra, 1);

        let always_simple = BonusGame::new(1.0, 0.0);
        assert_eq!(
            always_simple.roll_for_message(&mut profile),
            Some(BonusKind::Simple)
        );
        assert_eq!(profile.blockgame.bonuses.simple, 1);
    }

    #[test]
    fn drop_rate_is_roughly_honored() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let game = BonusGame::default();
        let mut profile = UserProfile::new("miner");
        profile.blockgame.picklevel = 1;
        let mut rng = StdRng::seed_from_u64(42);

        let rolls = 100_000;
        for _ in 0..rolls {
            game.roll(&mut profile, &mut rng);
        }

        let drops = profile.blockgame.bonuses.simple + profile.blockgame.bonuses.extra;
        let expected = (rolls as f64 * DEFAULT_DROP_RATE) as u64;
        // Seeded run, so the band just guards against broken thresholds
        assert!(drops > expected / 2 && drops < expected * 2, "drops={drops}");
        assert!(profile.blockgame.bonuses.extra < profile.blockgame.bonuses.simple);
    }
}
