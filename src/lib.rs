//! # liuren-rs — Da Liu Ren chart engine
//!
//! Computes a Da Liu Ren (大六壬) divination chart from a calendar moment:
//! the Heaven-Earth plate, the Four Lessons and the Three Transmissions,
//! each with the pattern that produced it.
//!
//! ## Design Principles
//!
//! 1. **Pure tables**: every cyclic lookup is a `const` table or modular
//!    arithmetic on a closed enum; nothing is allocated per lookup
//! 2. **Calendar is a seam**: lunar conversion lives behind [`CalendarSource`]
//! 3. **Inapplicable is not an error**: cascade methods return a
//!    [`Resolution`], only an exhausted cascade becomes [`Error::Undetermined`]
//!
//! ## Quick Start
//!
//! ```rust
//! use liuren::{CalendarDate, Chart, ChartConfig, Pillar};
//!
//! # fn example() -> liuren::Result<()> {
//! let date = CalendarDate {
//!     day: "甲子".parse()?,
//!     lunar_month: 1,
//!     year: "甲辰".parse()?,
//! };
//! let chart = Chart::compute(&date, 10, &ChartConfig::default())?;
//!
//! println!("{} {}", chart.transmissions().initial(), chart.pattern());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod plate;
pub mod lessons;
pub mod transmission;
pub mod calendar;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Branch, Element, Pillar, Polarity, Stem, EIGHT_TRANSMISSION_DAYS};
pub use plate::{Guardian, HeavenEarthPlate, Rotation};
pub use lessons::{FourLessons, LessonPair, Lower};
pub use transmission::{ChantDay, Method, Pattern, Resolution, ThreeTransmissions};
pub use calendar::{CalendarDate, CalendarSource, FixedCalendar};
pub use config::ChartConfig;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

// ============================================================================
// Top-level Chart handle
// ============================================================================

/// A fully computed chart. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChartRepr", into = "ChartRepr")]
pub struct Chart {
    year: Pillar,
    day: Pillar,
    lunar_month: u8,
    hour: Branch,
    is_day: bool,
    plate: HeavenEarthPlate,
    lessons: FourLessons,
    transmissions: ThreeTransmissions,
}

#[derive(Serialize, Deserialize)]
struct ChartRepr {
    year: Pillar,
    day: Pillar,
    lunar_month: u8,
    hour: Branch,
    is_day: bool,
    plate: HeavenEarthPlate,
    lessons: FourLessons,
    transmissions: ThreeTransmissions,
}

impl TryFrom<ChartRepr> for Chart {
    type Error = Error;

    /// Each part is valid on its own by now; check that they belong together.
    /// The hour and Moon General are not checked, since the config that
    /// chose them is not part of the chart.
    fn try_from(repr: ChartRepr) -> Result<Self> {
        if !(1..=12).contains(&repr.lunar_month) {
            return Err(Error::InvalidChart(format!("lunar month {}", repr.lunar_month)));
        }
        let noble = repr.day.stem().noble(repr.is_day);
        if repr.plate.noble() != noble {
            return Err(Error::InvalidChart(format!(
                "Noble {} does not belong to {} by {}",
                repr.plate.noble(),
                repr.day,
                if repr.is_day { "day" } else { "night" }
            )));
        }
        if FourLessons::assemble(&repr.plate, repr.day) != repr.lessons {
            return Err(Error::InvalidChart(format!("lessons do not sit on the plate for {}", repr.day)));
        }
        if ThreeTransmissions::resolve(&repr.plate, &repr.lessons)? != repr.transmissions {
            return Err(Error::InvalidChart("transmissions do not follow from the lessons".to_string()));
        }
        Ok(Self {
            year: repr.year,
            day: repr.day,
            lunar_month: repr.lunar_month,
            hour: repr.hour,
            is_day: repr.is_day,
            plate: repr.plate,
            lessons: repr.lessons,
            transmissions: repr.transmissions,
        })
    }
}

impl From<Chart> for ChartRepr {
    fn from(c: Chart) -> Self {
        ChartRepr {
            year: c.year,
            day: c.day,
            lunar_month: c.lunar_month,
            hour: c.hour,
            is_day: c.is_day,
            plate: c.plate,
            lessons: c.lessons,
            transmissions: c.transmissions,
        }
    }
}

impl Chart {
    /// Build a chart from a resolved calendar date and a clock hour (0–23).
    pub fn compute(date: &CalendarDate, hour: u32, config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        if hour > 23 {
            return Err(Error::InputFormat {
                input: hour.to_string(),
                expected: "hour 0-23",
            });
        }

        let month_general = Branch::moon_general(date.lunar_month)?;
        let moon_general = config.moon_general.unwrap_or(month_general);
        let hour_branch = Branch::from_hour(hour);
        let is_day = config.is_daytime(hour_branch);

        let plate = HeavenEarthPlate::new(moon_general, date.day.stem(), is_day);
        let lessons = FourLessons::assemble(&plate, date.day);
        let transmissions = ThreeTransmissions::resolve(&plate, &lessons)?;

        tracing::debug!(
            day = %date.day,
            month = date.lunar_month,
            hour = %hour_branch,
            %moon_general,
            is_day,
            "chart computed"
        );

        Ok(Self {
            year: date.year,
            day: date.day,
            lunar_month: date.lunar_month,
            hour: hour_branch,
            is_day,
            plate,
            lessons,
            transmissions,
        })
    }

    /// Ask a calendar for the date, then compute.
    pub fn at<C>(calendar: &C, at: NaiveDateTime, config: &ChartConfig) -> Result<Self>
    where
        C: CalendarSource + ?Sized,
    {
        let date = calendar.resolve(at)?;
        Self::compute(&date, at.hour(), config)
    }

    pub fn year(&self) -> Pillar {
        self.year
    }

    pub fn day(&self) -> Pillar {
        self.day
    }

    pub fn lunar_month(&self) -> u8 {
        self.lunar_month
    }

    /// The hour's branch (时支).
    pub fn hour(&self) -> Branch {
        self.hour
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn plate(&self) -> &HeavenEarthPlate {
        &self.plate
    }

    pub fn earth(&self) -> [Branch; 12] {
        self.plate.earth()
    }

    pub fn heaven(&self) -> &[Branch; 12] {
        self.plate.heaven()
    }

    pub fn guardians(&self) -> &[Branch; 12] {
        self.plate.guardians()
    }

    pub fn lessons(&self) -> &FourLessons {
        &self.lessons
    }

    pub fn transmissions(&self) -> &ThreeTransmissions {
        &self.transmissions
    }

    /// Shorthand for the settling pattern of the transmissions.
    pub fn pattern(&self) -> Pattern {
        self.transmissions.pattern()
    }

    /// Serialize the whole chart.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input format error: expected {expected}, got {input:?}")]
    InputFormat { input: String, expected: &'static str },

    #[error("Three transmissions undetermined after {stage}")]
    Undetermined { stage: Method },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid chart data: {0}")]
    InvalidChart(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
