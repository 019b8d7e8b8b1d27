// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vast_domain::{DomainError, Period};

/// Errors raised by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Reading from the store failed. Carries the store's message.
    FetchFailed { message: String },
    /// Writing to the store failed. Carries the store's message.
    WriteFailed { message: String },
    /// The previous period holds nothing worth copying.
    CopyForwardRefused { previous: Period, message: String },
    /// The period is the first supported one, so nothing precedes it.
    NoPreviousPeriod { period: Period },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::FetchFailed { message } => write!(f, "Gagal memuat data: {message}"),
            Self::WriteFailed { message } => write!(f, "Gagal menyimpan target: {message}"),
            Self::CopyForwardRefused { message, .. } => write!(f, "{message}"),
            Self::NoPreviousPeriod { period } => {
                write!(f, "Tidak ada periode sebelum {period}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

pub fn fetch_failed(err: crate::store::StoreError) -> CoreError {
    CoreError::FetchFailed {
        message: err.to_string(),
    }
}

pub fn write_failed(err: crate::store::StoreError) -> CoreError {
    CoreError::WriteFailed {
        message: err.to_string(),
    }
}
