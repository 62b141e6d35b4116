//! Inclusive calendar date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

/// `[start, end]` with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if start > end {
            return Err(BookingError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole days between start and end; a same-day range has zero nights
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Inclusive overlap: `self.start <= other.end && self.end >= other.start`.
    /// Ranges sharing a single boundary day overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}
