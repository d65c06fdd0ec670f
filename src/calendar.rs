//! Calendar seam.
//!
//! Lunar conversion (solar terms, lunar months, the year pillar) is not done
//! here. A [`CalendarSource`] supplies it; the chart only needs the day
//! pillar, the lunar month and the clock hour.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::Pillar;
use crate::{Error, Result};

/// What a calendar collaborator hands the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub day: Pillar,
    /// Lunar month 1–12.
    pub lunar_month: u8,
    pub year: Pillar,
}

/// Converts a civil moment to its sexagenary date.
pub trait CalendarSource {
    fn resolve(&self, at: NaiveDateTime) -> Result<CalendarDate>;
}

/// A calendar with the month and year fixed up front.
///
/// The day pillar is taken as given when set, otherwise counted from the
/// Gregorian date of the moment being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCalendar {
    lunar_month: u8,
    year: Pillar,
    day: Option<Pillar>,
}

impl FixedCalendar {
    pub fn new(lunar_month: u8, year: Pillar) -> Result<Self> {
        if !(1..=12).contains(&lunar_month) {
            return Err(Error::InputFormat {
                input: lunar_month.to_string(),
                expected: "lunar month 1-12",
            });
        }
        Ok(Self { lunar_month, year, day: None })
    }

    /// Pin the day pillar instead of counting it.
    pub fn with_day(mut self, day: Pillar) -> Self {
        self.day = Some(day);
        self
    }

    fn day_for(&self, date: NaiveDate) -> Pillar {
        self.day.unwrap_or_else(|| Pillar::for_date(date))
    }
}

impl CalendarSource for FixedCalendar {
    fn resolve(&self, at: NaiveDateTime) -> Result<CalendarDate> {
        Ok(CalendarDate {
            day: self.day_for(at.date()),
            lunar_month: self.lunar_month,
            year: self.year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn moment(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, 0, 0).unwrap())
    }

    #[test]
    fn test_fixed_calendar_counts_the_day() {
        let cal = FixedCalendar::new(8, "己丑".parse().unwrap()).unwrap();
        let date = cal.resolve(moment(1949, 10, 1, 9)).unwrap();
        assert_eq!(date.day.to_string(), "甲子");
        assert_eq!(date.lunar_month, 8);
        assert_eq!(date.year.to_string(), "己丑");

        let next = cal.resolve(moment(1949, 10, 2, 9)).unwrap();
        assert_eq!(next.day.to_string(), "乙丑");
    }

    #[test]
    fn test_fixed_calendar_pinned_day() {
        let cal = FixedCalendar::new(1, "甲辰".parse().unwrap())
            .unwrap()
            .with_day("丙寅".parse().unwrap());
        let a = cal.resolve(moment(2024, 2, 10, 0)).unwrap();
        let b = cal.resolve(moment(1999, 7, 4, 23)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.day.to_string(), "丙寅");
    }

    #[test]
    fn test_fixed_calendar_rejects_month() {
        assert!(FixedCalendar::new(0, Pillar::from_index(0)).is_err());
        assert!(FixedCalendar::new(13, Pillar::from_index(0)).is_err());
    }
}
