//! Heaven-Earth plate (天地盘).
//!
//! The earth plate is the canonical branch order. The heaven plate is the
//! same ring turned so the Moon General sits over 子, and the guardian
//! sequence walks from the Noble in the direction the Noble's seat dictates.

use serde::{Deserialize, Serialize};

use crate::model::{Branch, Stem};
use crate::{Error, Result};

// ============================================================================
// Guardians (十二天将)
// ============================================================================

/// The twelve heavenly guardians, in sequence order starting at the Noble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guardian {
    Noble, Serpent, Sparrow, Harmony, Hook, Dragon,
    Void, Tiger, Constancy, Warrior, Moon, Empress,
}

impl Guardian {
    pub const ALL: [Guardian; 12] = [
        Guardian::Noble, Guardian::Serpent, Guardian::Sparrow, Guardian::Harmony,
        Guardian::Hook, Guardian::Dragon, Guardian::Void, Guardian::Tiger,
        Guardian::Constancy, Guardian::Warrior, Guardian::Moon, Guardian::Empress,
    ];

    pub fn hanzi(self) -> &'static str {
        match self {
            Guardian::Noble => "贵人",
            Guardian::Serpent => "螣蛇",
            Guardian::Sparrow => "朱雀",
            Guardian::Harmony => "六合",
            Guardian::Hook => "勾陈",
            Guardian::Dragon => "青龙",
            Guardian::Void => "天空",
            Guardian::Tiger => "白虎",
            Guardian::Constancy => "太常",
            Guardian::Warrior => "玄武",
            Guardian::Moon => "太阴",
            Guardian::Empress => "天后",
        }
    }
}

impl std::fmt::Display for Guardian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

// ============================================================================
// Plate
// ============================================================================

/// Rotation direction of the guardian sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Nobles seated on 亥 through 辰 run clockwise, the rest counter-clockwise.
    pub fn for_noble(noble: Branch) -> Self {
        if noble.index() <= Branch::Chen.index() || noble == Branch::Hai {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }

    fn step(self) -> i32 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => -1,
        }
    }
}

/// The two rotating plates plus the guardian ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlateRepr", into = "PlateRepr")]
pub struct HeavenEarthPlate {
    moon_general: Branch,
    noble: Branch,
    rotation: Rotation,
    heaven: [Branch; 12],
    guardians: [Branch; 12],
}

/// Wire form. Both rings are written out for readers, and must match the
/// rings rebuilt from the two seeds on the way back in.
#[derive(Serialize, Deserialize)]
struct PlateRepr {
    moon_general: Branch,
    noble: Branch,
    rotation: Rotation,
    heaven: [Branch; 12],
    guardians: [Branch; 12],
}

impl TryFrom<PlateRepr> for HeavenEarthPlate {
    type Error = Error;

    fn try_from(repr: PlateRepr) -> Result<Self> {
        let is_noble = Stem::ALL.iter().any(|s| {
            let (day, night) = s.nobles();
            repr.noble == day || repr.noble == night
        });
        if !is_noble {
            return Err(Error::InvalidChart(format!("{} is no stem's Noble", repr.noble)));
        }

        let plate = Self::seeded(repr.moon_general, repr.noble);
        if plate.rotation != repr.rotation {
            return Err(Error::InvalidChart(format!(
                "Noble on {} turns {:?}, got {:?}",
                plate.noble, plate.rotation, repr.rotation
            )));
        }
        if plate.heaven != repr.heaven {
            return Err(Error::InvalidChart(format!(
                "heaven plate does not start at Moon General {}",
                plate.moon_general
            )));
        }
        if plate.guardians != repr.guardians {
            return Err(Error::InvalidChart(format!(
                "guardian ring does not start at Noble {}",
                plate.noble
            )));
        }
        Ok(plate)
    }
}

impl From<HeavenEarthPlate> for PlateRepr {
    fn from(p: HeavenEarthPlate) -> Self {
        PlateRepr {
            moon_general: p.moon_general,
            noble: p.noble,
            rotation: p.rotation,
            heaven: p.heaven,
            guardians: p.guardians,
        }
    }
}

impl HeavenEarthPlate {
    /// Build the plate for a Moon General, day stem and day/night flag.
    pub fn new(moon_general: Branch, day_stem: Stem, is_day: bool) -> Self {
        let plate = Self::seeded(moon_general, day_stem.noble(is_day));
        tracing::trace!(%moon_general, noble = %plate.noble, rotation = ?plate.rotation, "plate built");
        plate
    }

    fn seeded(moon_general: Branch, noble: Branch) -> Self {
        let rotation = Rotation::for_noble(noble);
        let heaven = std::array::from_fn(|i| moon_general + i as i32);
        let guardians = std::array::from_fn(|i| noble + i as i32 * rotation.step());
        Self { moon_general, noble, rotation, heaven, guardians }
    }

    /// Earth plate: the branches in canonical order.
    pub fn earth(&self) -> [Branch; 12] {
        Branch::ALL
    }

    /// Heaven plate: `heaven()[i]` sits above earth position `i`.
    pub fn heaven(&self) -> &[Branch; 12] {
        &self.heaven
    }

    /// Guardian sequence: `guardians()[i]` is where `Guardian::ALL[i]` sits.
    pub fn guardians(&self) -> &[Branch; 12] {
        &self.guardians
    }

    pub fn moon_general(&self) -> Branch {
        self.moon_general
    }

    pub fn noble(&self) -> Branch {
        self.noble
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Go up one level: the heaven branch stacked above an earth position.
    pub fn ascend(&self, branch: Branch) -> Branch {
        self.heaven[branch.index()]
    }

    /// Guardian seated on an earth position.
    pub fn guardian_at(&self, branch: Branch) -> Guardian {
        let step = self.noble.distance_to(branch);
        let seq = match self.rotation {
            Rotation::Clockwise => step,
            Rotation::CounterClockwise => (12 - step) % 12,
        };
        Guardian::ALL[seq]
    }

    /// Every branch sits over itself (伏吟).
    pub fn is_identity(&self) -> bool {
        Branch::ALL.iter().all(|&b| self.ascend(b) == b)
    }

    /// Every branch sits over its opposite (返吟).
    pub fn is_opposition(&self) -> bool {
        Branch::ALL.iter().all(|&b| self.ascend(b) == b.opposite())
    }
}

impl std::ops::Index<Branch> for HeavenEarthPlate {
    type Output = Branch;

    fn index(&self, branch: Branch) -> &Branch {
        &self.heaven[branch.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_bijection(ring: &[Branch; 12]) -> bool {
        let mut seen = [false; 12];
        for b in ring {
            seen[b.index()] = true;
        }
        seen.iter().all(|&s| s)
    }

    #[test]
    fn test_heaven_starts_at_moon_general() {
        let plate = HeavenEarthPlate::new(Branch::Hai, Stem::Jia, true);
        assert_eq!(plate.ascend(Branch::Zi), Branch::Hai);
        assert_eq!(plate.ascend(Branch::Chou), Branch::Zi);
        assert_eq!(plate.ascend(Branch::Yin), Branch::Chou);
        assert_eq!(plate[Branch::Hai], Branch::Xu);
        assert!(is_bijection(plate.heaven()));
    }

    #[test]
    fn test_guardian_direction() {
        // Jia by day: Noble on Chou, clockwise.
        let plate = HeavenEarthPlate::new(Branch::Hai, Stem::Jia, true);
        assert_eq!(plate.noble(), Branch::Chou);
        assert_eq!(plate.rotation(), Rotation::Clockwise);
        assert_eq!(plate.guardians()[1], Branch::Yin);

        // Jia by night: Noble on Wei, counter-clockwise.
        let plate = HeavenEarthPlate::new(Branch::Hai, Stem::Jia, false);
        assert_eq!(plate.noble(), Branch::Wei);
        assert_eq!(plate.rotation(), Rotation::CounterClockwise);
        assert_eq!(plate.guardians()[1], Branch::Wu);
        assert!(is_bijection(plate.guardians()));
    }

    #[test]
    fn test_rotation_boundaries() {
        assert_eq!(Rotation::for_noble(Branch::Hai), Rotation::Clockwise);
        assert_eq!(Rotation::for_noble(Branch::Chen), Rotation::Clockwise);
        assert_eq!(Rotation::for_noble(Branch::Si), Rotation::CounterClockwise);
        assert_eq!(Rotation::for_noble(Branch::Xu), Rotation::CounterClockwise);
    }

    #[test]
    fn test_guardian_at_inverts_sequence() {
        for stem in Stem::ALL {
            for is_day in [true, false] {
                let plate = HeavenEarthPlate::new(Branch::Mao, stem, is_day);
                for (i, &seat) in plate.guardians().iter().enumerate() {
                    assert_eq!(plate.guardian_at(seat), Guardian::ALL[i]);
                }
            }
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let plate = HeavenEarthPlate::new(Branch::Hai, Stem::Jia, true);
        let json = serde_json::to_string(&plate).unwrap();
        let back: HeavenEarthPlate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plate);
    }

    #[test]
    fn test_serde_rejects_foreign_rings() {
        let plate = HeavenEarthPlate::new(Branch::Hai, Stem::Jia, true);
        let mut value = serde_json::to_value(&plate).unwrap();
        value["heaven"] = serde_json::to_value([Branch::Zi; 12]).unwrap();
        let err = serde_json::from_value::<HeavenEarthPlate>(value).unwrap_err();
        assert!(err.to_string().contains("heaven plate"), "{err}");

        let mut value = serde_json::to_value(&plate).unwrap();
        value["guardians"][1] = serde_json::json!("Zi");
        assert!(serde_json::from_value::<HeavenEarthPlate>(value).is_err());

        let mut value = serde_json::to_value(&plate).unwrap();
        value["rotation"] = serde_json::json!("CounterClockwise");
        assert!(serde_json::from_value::<HeavenEarthPlate>(value).is_err());
    }

    #[test]
    fn test_serde_rejects_unseated_noble() {
        // No stem seats its Noble on 辰 or 戌.
        let plate = HeavenEarthPlate::seeded(Branch::Hai, Branch::Chen);
        let json = serde_json::to_string(&plate).unwrap();
        assert!(serde_json::from_str::<HeavenEarthPlate>(&json).is_err());
    }

    #[test]
    fn test_identity_and_opposition() {
        assert!(HeavenEarthPlate::new(Branch::Zi, Stem::Yi, true).is_identity());
        assert!(HeavenEarthPlate::new(Branch::Wu, Stem::Yi, true).is_opposition());
        let plain = HeavenEarthPlate::new(Branch::Chen, Stem::Yi, true);
        assert!(!plain.is_identity());
        assert!(!plain.is_opposition());
    }
}
