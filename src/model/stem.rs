//! Heavenly stems (天干), the mod-10 cycle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Branch, Element, Polarity};
use crate::{Error, Result};

/// One of the ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stem {
    Jia, Yi, Bing, Ding, Wu, Ji, Geng, Xin, Ren, Gui,
}

const HANZI: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const PINYIN: [&str; 10] = ["Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui"];

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia, Stem::Yi, Stem::Bing, Stem::Ding, Stem::Wu,
        Stem::Ji, Stem::Geng, Stem::Xin, Stem::Ren, Stem::Gui,
    ];

    /// Stem at a cyclic index (wraps mod 10).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 10]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Step forward `n` positions (negative steps go backwards).
    pub fn offset(self, n: i32) -> Self {
        Self::from_index((self as i32 + n).rem_euclid(10) as usize)
    }

    pub fn succ(self) -> Self {
        self.offset(1)
    }

    pub fn pred(self) -> Self {
        self.offset(-1)
    }

    pub fn element(self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        Polarity::of_index(self as u8)
    }

    pub fn is_yang(self) -> bool {
        self.polarity().is_yang()
    }

    pub fn same_polarity(self, other: Stem) -> bool {
        self.polarity() == other.polarity()
    }

    /// Palace (寄宫): the earth position a stem lodges on.
    pub fn palace(self) -> Branch {
        match self {
            Stem::Jia => Branch::Yin,
            Stem::Yi => Branch::Chen,
            Stem::Bing | Stem::Wu => Branch::Si,
            Stem::Ding | Stem::Ji => Branch::Wei,
            Stem::Geng => Branch::Shen,
            Stem::Xin => Branch::Xu,
            Stem::Ren => Branch::Hai,
            Stem::Gui => Branch::Chou,
        }
    }

    /// Day and night Noble (贵人) branches for this day stem.
    pub fn nobles(self) -> (Branch, Branch) {
        match self {
            Stem::Jia | Stem::Wu | Stem::Geng => (Branch::Chou, Branch::Wei),
            Stem::Yi | Stem::Ji => (Branch::Zi, Branch::Shen),
            Stem::Bing | Stem::Ding => (Branch::Hai, Branch::You),
            Stem::Ren | Stem::Gui => (Branch::Si, Branch::Mao),
            Stem::Xin => (Branch::Wu, Branch::Yin),
        }
    }

    pub fn noble(self, is_day: bool) -> Branch {
        let (day, night) = self.nobles();
        if is_day { day } else { night }
    }

    pub fn hanzi(self) -> &'static str {
        HANZI[self as usize]
    }

    pub fn pinyin(self) -> &'static str {
        PINYIN[self as usize]
    }
}

impl std::ops::Add<i32> for Stem {
    type Output = Stem;

    fn add(self, n: i32) -> Stem {
        self.offset(n)
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

impl FromStr for Stem {
    type Err = Error;

    /// Accepts the hanzi (`甲`) or case-insensitive pinyin (`jia`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|stem| stem.hanzi() == s || stem.pinyin().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InputFormat {
                input: s.to_string(),
                expected: "heavenly stem",
            })
    }
}
