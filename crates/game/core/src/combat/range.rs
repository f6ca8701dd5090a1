use crate::config::CombatConfig;

/// Distance band used to pick a weapon's accuracy modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeBucket {
    Near,
    Mid,
    Far,
}

impl RangeBucket {
    pub fn classify(distance: f32, config: &CombatConfig) -> Self {
        if distance <= config.near_range {
            RangeBucket::Near
        } else if distance <= config.mid_range {
            RangeBucket::Mid
        } else {
            RangeBucket::Far
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_inclusive_upper_bounds() {
        let config = CombatConfig::default();
        assert_eq!(RangeBucket::classify(0.0, &config), RangeBucket::Near);
        assert_eq!(RangeBucket::classify(config.near_range, &config), RangeBucket::Near);
        assert_eq!(RangeBucket::classify(config.near_range + 1.0, &config), RangeBucket::Mid);
        assert_eq!(RangeBucket::classify(config.mid_range + 1.0, &config), RangeBucket::Far);
    }
}
