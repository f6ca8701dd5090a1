//! Weapon catalogue supplied by the economy collaborator.

use crate::combat::{BodyLocation, RangeBucket};
use crate::error::{CoreError, CoreResult};

/// Damage dealt per body location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationDamage {
    pub head: u32,
    pub body: u32,
    pub limbs: u32,
}

impl LocationDamage {
    pub fn at(&self, location: BodyLocation) -> u32 {
        match location {
            BodyLocation::Head => self.head,
            BodyLocation::Body => self.body,
            BodyLocation::Limbs => self.limbs,
        }
    }
}

/// Accuracy multiplier per range bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeAccuracy {
    pub near: f32,
    pub mid: f32,
    pub far: f32,
}

impl RangeAccuracy {
    pub fn at(&self, bucket: RangeBucket) -> f32 {
        match bucket {
            RangeBucket::Near => self.near,
            RangeBucket::Mid => self.mid,
            RangeBucket::Far => self.far,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub cost: u32,
    pub damage: LocationDamage,
    pub accuracy: RangeAccuracy,
    /// Minimum time between two shots.
    pub fire_interval_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponCatalogue {
    weapons: Vec<Weapon>,
    default: String,
}

impl WeaponCatalogue {
    /// Builds a catalogue; `default` must name one of `weapons`.
    pub fn new(weapons: Vec<Weapon>, default: impl Into<String>) -> CoreResult<Self> {
        let default = default.into();
        if !weapons.iter().any(|weapon| weapon.name == default) {
            return Err(CoreError::MissingDefaultWeapon(default));
        }
        Ok(Self { weapons, default })
    }

    pub fn get(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|weapon| weapon.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn default_weapon(&self) -> &Weapon {
        // Checked in `new`.
        self.get(&self.default).unwrap_or(&self.weapons[0])
    }

    /// Looks up `name`, falling back to the default weapon.
    pub fn resolve(&self, name: &str) -> &Weapon {
        self.get(name).unwrap_or_else(|| self.default_weapon())
    }

    /// The most expensive weapon whose cost does not exceed `credits`.
    pub fn best_affordable(&self, credits: u32) -> Option<&Weapon> {
        self.weapons
            .iter()
            .filter(|weapon| weapon.cost <= credits)
            .fold(None, |best: Option<&Weapon>, weapon| match best {
                Some(current) if current.cost >= weapon.cost => Some(current),
                _ => Some(weapon),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }
}
