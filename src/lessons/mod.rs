//! Four Lessons (四课).
//!
//! Two lessons climb from the day stem, two from the day branch. Each climb
//! is one `ascend` on the plate, so a lesson is a lower symbol with the
//! branch found above its seat.

use serde::{Deserialize, Serialize};

use crate::model::{Branch, Element, Pillar, Polarity, Stem};
use crate::plate::HeavenEarthPlate;
use crate::{Error, Result};

/// The lower symbol of a lesson: the day stem for the first lesson, a
/// branch for the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lower {
    Stem(Stem),
    Branch(Branch),
}

impl Lower {
    pub fn element(self) -> Element {
        match self {
            Lower::Stem(s) => s.element(),
            Lower::Branch(b) => b.element(),
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            Lower::Stem(s) => s.polarity(),
            Lower::Branch(b) => b.polarity(),
        }
    }

    pub fn is_yang(self) -> bool {
        self.polarity().is_yang()
    }

    /// The earth position this symbol stands on. A stem stands on its palace.
    pub fn seat(self) -> Branch {
        match self {
            Lower::Stem(s) => s.palace(),
            Lower::Branch(b) => b,
        }
    }
}

impl std::fmt::Display for Lower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lower::Stem(s) => std::fmt::Display::fmt(s, f),
            Lower::Branch(b) => std::fmt::Display::fmt(b, f),
        }
    }
}

/// A lower symbol with the heaven branch above its seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonPair {
    pub lower: Lower,
    pub upper: Branch,
}

impl LessonPair {
    /// Place a lower symbol on the plate.
    pub fn on(plate: &HeavenEarthPlate, lower: Lower) -> Self {
        Self { lower, upper: plate.ascend(lower.seat()) }
    }

    pub fn seat(&self) -> Branch {
        self.lower.seat()
    }

    /// Upper overcomes lower (贼).
    pub fn is_thief(&self) -> bool {
        self.upper.element().overcomes(self.lower.element())
    }

    /// Lower overcomes upper (克).
    pub fn is_conqueror(&self) -> bool {
        self.lower.element().overcomes(self.upper.element())
    }
}

impl std::fmt::Display for LessonPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.upper, self.lower)
    }
}

/// The four lessons of a day on a plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LessonsRepr", into = "LessonsRepr")]
pub struct FourLessons {
    day: Pillar,
    lessons: [LessonPair; 4],
}

#[derive(Serialize, Deserialize)]
struct LessonsRepr {
    day: Pillar,
    lessons: [LessonPair; 4],
}

impl TryFrom<LessonsRepr> for FourLessons {
    type Error = Error;

    /// Without the plate only the chaining can be checked: each lesson's
    /// lower symbol is fixed by the day or by the lesson before it, and one
    /// seat never carries two different uppers.
    fn try_from(repr: LessonsRepr) -> Result<Self> {
        let [first, _, third, _] = repr.lessons;
        let expected = [
            Lower::Stem(repr.day.stem()),
            Lower::Branch(first.upper),
            Lower::Branch(repr.day.branch()),
            Lower::Branch(third.upper),
        ];
        for (n, (lesson, lower)) in repr.lessons.iter().zip(expected).enumerate() {
            if lesson.lower != lower {
                return Err(Error::InvalidChart(format!(
                    "lesson {} stands on {}, expected {lower} for day {}",
                    n + 1,
                    lesson.lower,
                    repr.day
                )));
            }
        }
        for a in &repr.lessons {
            if repr.lessons.iter().any(|b| a.seat() == b.seat() && a.upper != b.upper) {
                return Err(Error::InvalidChart(format!(
                    "seat {} carries two different uppers",
                    a.seat()
                )));
            }
        }
        Ok(Self { day: repr.day, lessons: repr.lessons })
    }
}

impl From<FourLessons> for LessonsRepr {
    fn from(l: FourLessons) -> Self {
        LessonsRepr { day: l.day, lessons: l.lessons }
    }
}

impl FourLessons {
    pub fn assemble(plate: &HeavenEarthPlate, day: Pillar) -> Self {
        let first = LessonPair::on(plate, Lower::Stem(day.stem()));
        let second = LessonPair::on(plate, Lower::Branch(first.upper));
        let third = LessonPair::on(plate, Lower::Branch(day.branch()));
        let fourth = LessonPair::on(plate, Lower::Branch(third.upper));
        Self { day, lessons: [first, second, third, fourth] }
    }

    pub fn day(&self) -> Pillar {
        self.day
    }

    pub fn all(&self) -> &[LessonPair; 4] {
        &self.lessons
    }

    pub fn first(&self) -> &LessonPair {
        &self.lessons[0]
    }

    pub fn second(&self) -> &LessonPair {
        &self.lessons[1]
    }

    pub fn third(&self) -> &LessonPair {
        &self.lessons[2]
    }

    pub fn fourth(&self) -> &LessonPair {
        &self.lessons[3]
    }

    /// 干阳神: the branch above the day stem.
    pub fn stem_yang_god(&self) -> Branch {
        self.lessons[0].upper
    }

    /// 支阳神: the branch above the day branch.
    pub fn branch_yang_god(&self) -> Branch {
        self.lessons[2].upper
    }

    /// Whether the day (and so the first lesson) is yang.
    pub fn is_yang_day(&self) -> bool {
        self.lessons[0].lower.is_yang()
    }

    /// Lessons with repeats removed, keyed on seat, first occurrence kept.
    pub fn distinct(&self) -> Vec<LessonPair> {
        dedup_by_seat(self.lessons.iter().copied())
    }
}

/// Drop lessons whose seat was already seen.
pub(crate) fn dedup_by_seat(lessons: impl IntoIterator<Item = LessonPair>) -> Vec<LessonPair> {
    let mut out: Vec<LessonPair> = Vec::with_capacity(4);
    for lesson in lessons {
        if !out.iter().any(|l| l.seat() == lesson.seat()) {
            out.push(lesson);
        }
    }
    out
}
