//! Five elements and yin/yang polarity.

use serde::{Deserialize, Serialize};

/// Five-element class. Discriminants follow the classical 1–5 numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood = 1,
    Fire = 2,
    Earth = 3,
    Metal = 4,
    Water = 5,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood, Element::Fire, Element::Earth, Element::Metal, Element::Water,
    ];

    /// Numeric class 1–5.
    pub fn class(self) -> u8 {
        self as u8
    }

    /// Productive cycle: wood → fire → earth → metal → water → wood.
    pub fn generates(self, other: Element) -> bool {
        other.class() == self.class() % 5 + 1
    }

    /// Destructive cycle: wood → earth → water → fire → metal → wood.
    pub fn overcomes(self, other: Element) -> bool {
        other.class() == (self.class() + 1) % 5 + 1
    }

    pub fn hanzi(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `generate(x, y)` over raw 1–5 classes. Out-of-range classes never relate.
pub fn generate(x: u8, y: u8) -> bool {
    (1..=5).contains(&x) && (1..=5).contains(&y) && y == x % 5 + 1
}

/// `overcome(x, y)` over raw 1–5 classes. Out-of-range classes never relate.
pub fn overcome(x: u8, y: u8) -> bool {
    (1..=5).contains(&x) && (1..=5).contains(&y) && y == (x + 1) % 5 + 1
}

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Even cyclic indices are yang.
    pub(crate) fn of_index(index: u8) -> Self {
        if index % 2 == 0 { Polarity::Yang } else { Polarity::Yin }
    }

    pub fn is_yang(self) -> bool {
        self == Polarity::Yang
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overcome_cycle() {
        assert!(Element::Wood.overcomes(Element::Earth));
        assert!(Element::Earth.overcomes(Element::Water));
        assert!(Element::Water.overcomes(Element::Fire));
        assert!(Element::Fire.overcomes(Element::Metal));
        assert!(Element::Metal.overcomes(Element::Wood));
        assert!(!Element::Wood.overcomes(Element::Fire));
    }

    #[test]
    fn test_generate_cycle() {
        assert!(Element::Wood.generates(Element::Fire));
        assert!(Element::Water.generates(Element::Wood));
        assert!(!Element::Fire.generates(Element::Wood));
    }

    #[test]
    fn test_overcome_antisymmetric_and_irreflexive() {
        for a in Element::ALL {
            assert!(!a.overcomes(a));
            for b in Element::ALL {
                assert!(!(a.overcomes(b) && b.overcomes(a)), "{a} and {b}");
            }
        }
    }

    #[test]
    fn test_raw_class_relations_match_enum() {
        for a in Element::ALL {
            for b in Element::ALL {
                assert_eq!(overcome(a.class(), b.class()), a.overcomes(b));
                assert_eq!(generate(a.class(), b.class()), a.generates(b));
            }
        }
        assert!(!overcome(0, 2));
        assert!(!generate(5, 6));
    }
}
