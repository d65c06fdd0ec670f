//! Sexagenary pillar (干支): a stem paired with a branch of equal polarity.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Branch, Stem};
use crate::{Error, Result};

/// `NaiveDate::num_days_from_ce` of 1949-10-01, a 甲子 day.
const JIAZI_ANCHOR_DAYS_FROM_CE: i32 = 711766;

/// The five day pillars whose branch is the stem's own palace (八专日).
pub const EIGHT_TRANSMISSION_DAYS: [Pillar; 5] = [
    Pillar { stem: Stem::Jia, branch: Branch::Yin },
    Pillar { stem: Stem::Ding, branch: Branch::Wei },
    Pillar { stem: Stem::Ji, branch: Branch::Wei },
    Pillar { stem: Stem::Geng, branch: Branch::Shen },
    Pillar { stem: Stem::Gui, branch: Branch::Chou },
];

/// One of the sixty stem/branch combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PillarRepr", into = "PillarRepr")]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

#[derive(Serialize, Deserialize)]
struct PillarRepr {
    stem: Stem,
    branch: Branch,
}

impl TryFrom<PillarRepr> for Pillar {
    type Error = Error;

    fn try_from(repr: PillarRepr) -> Result<Self> {
        Pillar::new(repr.stem, repr.branch)
    }
}

impl From<Pillar> for PillarRepr {
    fn from(p: Pillar) -> Self {
        PillarRepr { stem: p.stem, branch: p.branch }
    }
}

impl Pillar {
    /// Pair a stem with a branch. Mixed polarity has no place in the cycle.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self> {
        if stem.polarity() != branch.polarity() {
            return Err(Error::InputFormat {
                input: format!("{stem}{branch}"),
                expected: "sexagenary pillar (stem and branch of equal polarity)",
            });
        }
        Ok(Self { stem, branch })
    }

    /// Pillar at a position in the sixty-cycle (0 = 甲子, wraps mod 60).
    pub fn from_index(index: usize) -> Self {
        let index = index % 60;
        Self {
            stem: Stem::from_index(index),
            branch: Branch::from_index(index),
        }
    }

    /// Position in the sixty-cycle.
    pub fn index(self) -> usize {
        // The unique n < 60 with n ≡ stem (mod 10) and n ≡ branch (mod 12).
        (0..6)
            .map(|k| self.stem.index() + 10 * k)
            .find(|n| n % 12 == self.branch.index())
            .unwrap_or_default()
    }

    /// Sexagenary day for a Gregorian date.
    pub fn for_date(date: NaiveDate) -> Self {
        let days = date.num_days_from_ce() - JIAZI_ANCHOR_DAYS_FROM_CE;
        Self::from_index(days.rem_euclid(60) as usize)
    }

    pub fn stem(self) -> Stem {
        self.stem
    }

    pub fn branch(self) -> Branch {
        self.branch
    }

    /// Day pillars on which the eight-special rule governs (八专日).
    pub fn is_eight_transmission_day(self) -> bool {
        EIGHT_TRANSMISSION_DAYS.contains(&self)
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for Pillar {
    type Err = Error;

    /// Accepts `甲子`, `Jia Zi`, `jia-zi` or `JiaZi`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || Error::InputFormat {
            input: s.to_string(),
            expected: "sexagenary pillar",
        };

        if let Some((a, b)) = s.split_once(|c: char| c.is_whitespace() || c == '-') {
            return Pillar::new(a.parse()?, b.parse()?);
        }

        let mut chars = s.chars();
        if let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) {
            if !first.is_ascii() {
                let stem = first.to_string().parse()?;
                let branch = second.to_string().parse()?;
                return Pillar::new(stem, branch);
            }
        }

        // Concatenated pinyin: try every stem spelling as a prefix.
        for stem in Stem::ALL {
            let name = stem.pinyin();
            if s.len() > name.len()
                && s.is_char_boundary(name.len())
                && s[..name.len()].eq_ignore_ascii_case(name)
            {
                if let Ok(branch) = s[name.len()..].parse::<Branch>() {
                    return Pillar::new(stem, branch);
                }
            }
        }
        Err(bad())
    }
}
