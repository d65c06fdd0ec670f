//! # Three Transmissions (三传)
//!
//! The resolver runs a fixed cascade over the plate and the four lessons.
//! Each method either resolves the three branches or reports itself
//! inapplicable, and control moves to the next one:
//!
//! ```text
//!   heaven == earth ──► Static-Chant                         (exits)
//!   heaven == opposite ──► Reverse-Chant ─► Thief-Conqueror  (exits)
//!   otherwise:
//!     Thief-Conqueror ─► Remote-Overcome ─► Ang-Star
//!                     ─► Special-Responsibility ─► Eight-Special
//!
//!   Thief-Conqueror / Remote-Overcome with several candidates
//!     ─► Comparison-Use ─► Harm-Involved (always resolves)
//! ```
//!
//! Inapplicability is a [`Resolution`] variant, not an error. Only running
//! off the end of the cascade is fatal (`Error::Undetermined`).

mod cascade;
mod chant;
pub mod pattern;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::lessons::{FourLessons, LessonPair};
use crate::model::Branch;
use crate::plate::HeavenEarthPlate;
use crate::{Error, Result};

pub use pattern::{ChantDay, Method, Pattern};

/// Outcome of a single cascade method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resolved { branches: [Branch; 3], pattern: Pattern },
    NotApplicable,
}

/// Whether a candidate lesson was picked for being struck from above or
/// for striking upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strike {
    /// The candidate's lower symbol is overcome.
    Thief,
    /// The candidate's lower symbol does the overcoming.
    Conqueror,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub lesson: LessonPair,
    pub strike: Strike,
}

/// Initial, middle and final transmissions with the patterns that named them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransmissionsRepr", into = "TransmissionsRepr")]
pub struct ThreeTransmissions {
    initial: Branch,
    middle: Branch,
    last: Branch,
    /// The label that settled the cascade, also the last of `patterns`.
    pattern: Pattern,
    patterns: SmallVec<[Pattern; 2]>,
    trace: SmallVec<[Method; 8]>,
}

#[derive(Serialize, Deserialize)]
struct TransmissionsRepr {
    initial: Branch,
    middle: Branch,
    last: Branch,
    patterns: SmallVec<[Pattern; 2]>,
    trace: SmallVec<[Method; 8]>,
}

impl TryFrom<TransmissionsRepr> for ThreeTransmissions {
    type Error = Error;

    fn try_from(repr: TransmissionsRepr) -> Result<Self> {
        let Some(&pattern) = repr.patterns.last() else {
            return Err(Error::InvalidChart("transmissions carry no pattern".to_string()));
        };
        if let Some(p) = repr.patterns.iter().find(|p| !repr.trace.contains(&p.family())) {
            return Err(Error::InvalidChart(format!(
                "pattern {p} without {} in the trace",
                p.family()
            )));
        }
        Ok(Self {
            initial: repr.initial,
            middle: repr.middle,
            last: repr.last,
            pattern,
            patterns: repr.patterns,
            trace: repr.trace,
        })
    }
}

impl From<ThreeTransmissions> for TransmissionsRepr {
    fn from(t: ThreeTransmissions) -> Self {
        TransmissionsRepr {
            initial: t.initial,
            middle: t.middle,
            last: t.last,
            patterns: t.patterns,
            trace: t.trace,
        }
    }
}

impl ThreeTransmissions {
    /// Run the cascade.
    pub fn resolve(plate: &HeavenEarthPlate, lessons: &FourLessons) -> Result<Self> {
        let mut resolver = Resolver::new(plate, lessons);
        // Each entry point names the method it ends on if nothing applies.
        let (resolution, stage) = if plate.is_identity() {
            (resolver.static_chant(), Method::StaticChant)
        } else if plate.is_opposition() {
            (resolver.reverse_chant(), Method::ReverseChant)
        } else {
            (resolver.normal_path(), Method::EightSpecial)
        };
        Self::settle(resolver, resolution, stage)
    }

    fn settle(mut resolver: Resolver<'_>, resolution: Resolution, stage: Method) -> Result<Self> {
        let day = resolver.lessons.day();
        match resolution {
            Resolution::Resolved { branches: [initial, middle, last], pattern } => {
                resolver.patterns.push(pattern);
                tracing::debug!(
                    %day,
                    %initial, %middle, %last,
                    pattern = %pattern,
                    "three transmissions resolved"
                );
                Ok(Self {
                    initial,
                    middle,
                    last,
                    pattern,
                    patterns: resolver.patterns,
                    trace: resolver.trace,
                })
            }
            Resolution::NotApplicable => {
                tracing::warn!(%day, %stage, "every method exhausted");
                Err(Error::Undetermined { stage })
            }
        }
    }

    /// 初传
    pub fn initial(&self) -> Branch {
        self.initial
    }

    /// 中传
    pub fn middle(&self) -> Branch {
        self.middle
    }

    /// 末传
    pub fn last(&self) -> Branch {
        self.last
    }

    pub fn branches(&self) -> [Branch; 3] {
        [self.initial, self.middle, self.last]
    }

    /// Pattern labels in the order they were earned.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// The pattern that settled the transmissions.
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Methods evaluated, in order, including the inapplicable ones.
    pub fn trace(&self) -> &[Method] {
        &self.trace
    }
}

// ============================================================================
// Resolver state
// ============================================================================

/// Working state for one resolution. Lives for a single `resolve` call.
pub(crate) struct Resolver<'a> {
    plate: &'a HeavenEarthPlate,
    lessons: &'a FourLessons,
    /// Labels earned by methods that delegated onward.
    patterns: SmallVec<[Pattern; 2]>,
    trace: SmallVec<[Method; 8]>,
}

impl<'a> Resolver<'a> {
    fn new(plate: &'a HeavenEarthPlate, lessons: &'a FourLessons) -> Self {
        Self {
            plate,
            lessons,
            patterns: SmallVec::new(),
            trace: SmallVec::new(),
        }
    }

    fn enter(&mut self, method: Method) {
        tracing::trace!(%method, "evaluating");
        self.trace.push(method);
    }

    fn inapplicable(&self, method: Method, reason: &'static str) -> Resolution {
        tracing::debug!(%method, reason, "method inapplicable");
        Resolution::NotApplicable
    }

    fn ascend(&self, branch: Branch) -> Branch {
        self.plate.ascend(branch)
    }

    /// Initial plus two ascents.
    fn chain(&self, initial: Branch) -> [Branch; 3] {
        let middle = self.ascend(initial);
        [initial, middle, self.ascend(middle)]
    }

    fn chained(&self, initial: Branch, pattern: Pattern) -> Resolution {
        Resolution::Resolved { branches: self.chain(initial), pattern }
    }
}
