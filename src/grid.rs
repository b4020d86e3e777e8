//! Contribution graph coordinates.
//!
//! The graph is 53 columns of 7 days. Column 52 is the week that contains the
//! reference date, column 0 the week 52 weeks before it. Row 0 is the first
//! day of a week as given by [`WeekStart`], so a cell lands in the same place
//! the hosting platform draws it.

use crate::error::{ArtError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const GRID_WEEKS: u32 = 53;
pub const DAYS_PER_WEEK: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Days between the start of the week and `date`.
    pub fn offset_of(self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    week: u32,
    day: u32,
}

impl GridCoordinate {
    pub fn new(week: u32, day: u32) -> Result<Self> {
        if week >= GRID_WEEKS {
            return Err(ArtError::Validation(format!(
                "week {week} is outside the graph (0-{})",
                GRID_WEEKS - 1
            )));
        }
        if day >= DAYS_PER_WEEK {
            return Err(ArtError::Validation(format!(
                "day {day} is outside the graph (0-{})",
                DAYS_PER_WEEK - 1
            )));
        }
        Ok(Self { week, day })
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

/// Maps a cell to a date, clamping anything after `reference` to `reference`.
pub fn map_to_date(coord: GridCoordinate, reference: NaiveDate, week_start: WeekStart) -> NaiveDate {
    CoordinateMapper::new(reference, week_start).map_to_date(coord)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    reference: NaiveDate,
    week_start: WeekStart,
}

impl CoordinateMapper {
    pub fn new(reference: NaiveDate, week_start: WeekStart) -> Self {
        Self { reference, week_start }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// First day of column 0.
    pub fn origin(&self) -> NaiveDate {
        let into_week = self.week_start.offset_of(self.reference) as i64;
        self.reference - Duration::days(into_week) - Duration::weeks((GRID_WEEKS - 1) as i64)
    }

    pub fn unclamped(&self, coord: GridCoordinate) -> NaiveDate {
        self.origin() + Duration::days((coord.week * DAYS_PER_WEEK + coord.day) as i64)
    }

    pub fn map_to_date(&self, coord: GridCoordinate) -> NaiveDate {
        self.unclamped(coord).min(self.reference)
    }

    /// Like [`Self::map_to_date`] but refuses cells after the reference date.
    pub fn target_date(&self, coord: GridCoordinate) -> Result<NaiveDate> {
        let date = self.unclamped(coord);
        if date > self.reference {
            return Err(ArtError::FutureDate {
                date,
                reference: self.reference,
            });
        }
        Ok(date)
    }

    pub fn coordinate_of(&self, date: NaiveDate) -> Option<GridCoordinate> {
        if date > self.reference {
            return None;
        }
        let days = (date - self.origin()).num_days();
        if days < 0 {
            return None;
        }
        let days = u32::try_from(days).ok()?;
        GridCoordinate::new(days / DAYS_PER_WEEK, days % DAYS_PER_WEEK).ok()
    }
}
