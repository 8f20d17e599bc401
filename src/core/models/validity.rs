use std::fmt;

use chrono::TimeDelta;

use crate::core::errors::{DevcaError, Result};

const SECONDS_PER_DAY: u32 = 86_400;
/// Roughly ten thousand years; keeps the padded day count in range.
const MAX_DAYS: u32 = 3_650_000;

/// How long an issued certificate stays valid, measured from "now".
///
/// Always normalized so that `seconds < 86400`; the represented span is
/// `days * 86400 + seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    days: u32,
    seconds: u32,
}

impl Validity {
    /// Build a validity, carrying whole days out of `seconds`.
    ///
    /// A zero total is rejected: keytool would issue a certificate that is
    /// expired on arrival.
    pub fn new(days: u32, seconds: u32) -> Result<Self> {
        let days = days
            .checked_add(seconds / SECONDS_PER_DAY)
            .ok_or_else(|| DevcaError::InvalidValidity {
                detail: format!("{days} days plus {seconds} seconds overflows"),
            })?;
        let seconds = seconds % SECONDS_PER_DAY;

        if days > MAX_DAYS {
            return Err(DevcaError::InvalidValidity {
                detail: format!("{days} days is more than the maximum of {MAX_DAYS}"),
            });
        }
        if days == 0 && seconds == 0 {
            return Err(DevcaError::InvalidValidity {
                detail: "the total duration is zero".into(),
            });
        }

        Ok(Self { days, seconds })
    }

    /// Whole days only.
    #[cfg(test)]
    pub fn days(days: u32) -> Result<Self> {
        Self::new(days, 0)
    }

    /// Build a validity from a signed duration. Sub-second parts are dropped.
    pub fn from_duration(duration: TimeDelta) -> Result<Self> {
        let total = duration.num_seconds();
        if total < 0 {
            return Err(DevcaError::InvalidValidity {
                detail: format!("negative duration ({total} seconds)"),
            });
        }

        let days = u32::try_from(total / i64::from(SECONDS_PER_DAY)).map_err(|_| {
            DevcaError::InvalidValidity {
                detail: format!("{total} seconds is too long"),
            }
        })?;
        // Remainder is in [0, 86400) so the cast is lossless.
        let seconds = (total % i64::from(SECONDS_PER_DAY)) as u32;

        Self::new(days, seconds)
    }

    /// Total span in seconds.
    #[cfg(test)]
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.days) * u64::from(SECONDS_PER_DAY) + u64::from(self.seconds)
    }

    /// Translate into the `-startdate` / `-validity` pair keytool understands.
    ///
    /// keytool only counts whole days, so a request with a seconds part is
    /// padded to the next day and the start date is pulled back until the
    /// remaining span is exact to the second.
    pub fn window(&self) -> ValidityWindow {
        if self.seconds == 0 {
            return ValidityWindow {
                start_offset: None,
                validity_days: self.days,
            };
        }

        // Zero-based: `seconds` is in [1, 86399] here.
        let s = self.seconds - 1;
        ValidityWindow {
            start_offset: Some(StartOffset {
                hours: 23 - s / 3600,
                minutes: 59 - (s % 3600) / 60,
                seconds: 59 - s % 60,
            }),
            validity_days: self.days + 1,
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.days, self.seconds) {
            (d, 0) => write!(f, "{d} day(s)"),
            (0, s) => write!(f, "{s} second(s)"),
            (d, s) => write!(f, "{d} day(s) {s} second(s)"),
        }
    }
}

/// Backward shift of a certificate's start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOffset {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl StartOffset {
    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// keytool `-startdate` syntax, always pointing into the past.
impl fmt::Display for StartOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}H-{}M-{}S", self.hours, self.minutes, self.seconds)
    }
}

/// Toolkit-ready form of a `Validity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub start_offset: Option<StartOffset>,
    pub validity_days: u32,
}

impl ValidityWindow {
    /// Seconds from "now" until the certificate expires.
    pub fn effective_seconds(&self) -> i64 {
        let back = self.start_offset.map_or(0, |o| i64::from(o.total_seconds()));
        i64::from(self.validity_days) * i64::from(SECONDS_PER_DAY) - back
    }
}
