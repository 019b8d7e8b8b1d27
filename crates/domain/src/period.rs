// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Target periods.
//!
//! A period is a calendar month. It is always passed in explicitly; nothing
//! in this crate reads the system clock.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Earliest supported year.
pub const MIN_YEAR: i32 = 2000;
/// Latest supported year.
pub const MAX_YEAR: i32 = 2100;

/// A (month, year) target period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    // Field order gives chronological `Ord`.
    year: i32,
    month: u8,
}

impl Period {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not 1-12 or the year is out of range.
    pub fn new(month: u8, year: i32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DomainError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the period immediately before this one.
    ///
    /// January rolls back to December of the previous year. The first
    /// supported period has no predecessor.
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        if self.month > 1 {
            return Some(Self {
                year: self.year,
                month: self.month - 1,
            });
        }
        if self.year <= MIN_YEAR {
            return None;
        }
        Some(Self {
            year: self.year - 1,
            month: 12,
        })
    }

    /// Computes the business period containing `now` in the given time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be represented or falls outside
    /// the supported year range.
    pub fn current_in(now: OffsetDateTime, tz: Tz) -> Result<Self, DomainError> {
        let utc: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond())
            .ok_or_else(|| DomainError::TimestampConversion {
                reason: format!("instant {now} is out of range"),
            })?;
        let local = utc.with_timezone(&tz);
        let month: u8 =
            u8::try_from(local.month()).map_err(|e| DomainError::TimestampConversion {
                reason: e.to_string(),
            })?;
        Self::new(month, local.year())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
