//! Earthly branches (地支), the mod-12 cycle and plate positions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Element, Polarity, Stem};
use crate::{Error, Result};

/// One of the twelve earthly branches. The discriminant is the plate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Branch {
    Zi, Chou, Yin, Mao, Chen, Si, Wu, Wei, Shen, You, Xu, Hai,
}

const HANZI: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];
const PINYIN: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

/// Punishment (刑) partner of each branch, indexed by position.
const CONFLICT: [Branch; 12] = [
    Branch::Mao,  // Zi
    Branch::Xu,   // Chou
    Branch::Si,   // Yin
    Branch::Zi,   // Mao
    Branch::Chen, // Chen
    Branch::Shen, // Si
    Branch::Wu,   // Wu
    Branch::Chou, // Wei
    Branch::Yin,  // Shen
    Branch::You,  // You
    Branch::Wei,  // Xu
    Branch::Si,   // Hai
];

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi, Branch::Chou, Branch::Yin, Branch::Mao, Branch::Chen, Branch::Si,
        Branch::Wu, Branch::Wei, Branch::Shen, Branch::You, Branch::Xu, Branch::Hai,
    ];

    /// Branch at a cyclic index (wraps mod 12).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Step forward `n` positions (negative steps go backwards).
    pub fn offset(self, n: i32) -> Self {
        Self::from_index((self as i32 + n).rem_euclid(12) as usize)
    }

    pub fn succ(self) -> Self {
        self.offset(1)
    }

    pub fn pred(self) -> Self {
        self.offset(-1)
    }

    /// Forward distance from `self` to `other`, in `0..12`.
    pub fn distance_to(self, other: Branch) -> usize {
        (other as usize + 12 - self as usize) % 12
    }

    /// The branch six positions away (冲).
    pub fn opposite(self) -> Self {
        self.offset(6)
    }

    pub fn opposes(self, other: Branch) -> bool {
        self.distance_to(other) == 6
    }

    /// Punishment partner. Chen, Wu and You punish themselves.
    pub fn conflict_partner(self) -> Branch {
        CONFLICT[self as usize]
    }

    pub fn conflicts(self, other: Branch) -> bool {
        self.conflict_partner() == other
    }

    pub fn is_self_conflict(self) -> bool {
        self.conflict_partner() == self
    }

    pub fn element(self) -> Element {
        match self {
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Zi | Branch::Hai => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        Polarity::of_index(self as u8)
    }

    pub fn is_yang(self) -> bool {
        self.polarity().is_yang()
    }

    /// Meng (孟): Yin, Si, Shen, Hai.
    pub fn is_meng(self) -> bool {
        self as usize % 3 == 2
    }

    /// Zhong (仲): Zi, Mao, Wu, You.
    pub fn is_zhong(self) -> bool {
        self as usize % 3 == 0
    }

    /// Stems lodged on this position through the palace table.
    pub fn hidden_stems(self) -> &'static [Stem] {
        match self {
            Branch::Yin => &[Stem::Jia],
            Branch::Chen => &[Stem::Yi],
            Branch::Si => &[Stem::Bing, Stem::Wu],
            Branch::Wei => &[Stem::Ding, Stem::Ji],
            Branch::Shen => &[Stem::Geng],
            Branch::Xu => &[Stem::Xin],
            Branch::Hai => &[Stem::Ren],
            Branch::Chou => &[Stem::Gui],
            Branch::Zi | Branch::Mao | Branch::Wu | Branch::You => &[],
        }
    }

    /// Time-period branch for a 24-hour clock hour: `((hour + 1) / 2) mod 12`.
    pub fn from_hour(hour: u32) -> Self {
        Self::from_index(((hour as usize + 1) / 2) % 12)
    }

    /// Moon General (月将) for a lunar month 1–12.
    pub fn moon_general(lunar_month: u8) -> Result<Self> {
        if !(1..=12).contains(&lunar_month) {
            return Err(Error::InputFormat {
                input: lunar_month.to_string(),
                expected: "lunar month 1-12",
            });
        }
        Ok(Branch::Hai.offset(1 - lunar_month as i32))
    }

    pub fn hanzi(self) -> &'static str {
        HANZI[self as usize]
    }

    pub fn pinyin(self) -> &'static str {
        PINYIN[self as usize]
    }
}

impl std::ops::Add<i32> for Branch {
    type Output = Branch;

    fn add(self, n: i32) -> Branch {
        self.offset(n)
    }
}

impl std::ops::Sub<i32> for Branch {
    type Output = Branch;

    fn sub(self, n: i32) -> Branch {
        self.offset(-n)
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl FromStr for Branch {
    type Err = Error;

    /// Accepts the hanzi (`子`) or case-insensitive pinyin (`zi`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.hanzi() == s || b.pinyin().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InputFormat {
                input: s.to_string(),
                expected: "earthly branch",
            })
    }
}
