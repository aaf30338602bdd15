// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runtime configuration for the scheduling service.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Duration;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A value that must be positive was zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },
    /// A value was above its ceiling.
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u64 },
}

/// Longest a toast may stay visible, in seconds.
pub const MAX_TOAST_TTL_SECS: u64 = 3600;

/// Tunables for notification retention and coverage scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Notifications retained per recipient.
    pub notification_limit: usize,
    /// How long a toast stays visible, in seconds.
    pub toast_ttl_secs: u64,
    /// How far ahead of a shift's start a coverage alert is raised, in hours.
    pub coverage_threshold_hours: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            notification_limit: 50,
            toast_ttl_secs: 6,
            coverage_threshold_hours: 12,
        }
    }
}

impl SchedulerConfig {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MustBePositive` for the first zero value, or
    /// `ConfigError::TooLarge` if the toast lifetime exceeds
    /// [`MAX_TOAST_TTL_SECS`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_limit == 0 {
            return Err(ConfigError::MustBePositive {
                field: "notification_limit",
            });
        }
        if self.toast_ttl_secs == 0 {
            return Err(ConfigError::MustBePositive {
                field: "toast_ttl_secs",
            });
        }
        if self.toast_ttl_secs > MAX_TOAST_TTL_SECS {
            return Err(ConfigError::TooLarge {
                field: "toast_ttl_secs",
                max: MAX_TOAST_TTL_SECS,
            });
        }
        if self.coverage_threshold_hours == 0 {
            return Err(ConfigError::MustBePositive {
                field: "coverage_threshold_hours",
            });
        }
        Ok(())
    }

    /// Returns the toast lifetime.
    #[must_use]
    pub fn toast_ttl(&self) -> Duration {
        Duration::seconds(i64::try_from(self.toast_ttl_secs).unwrap_or(i64::MAX))
    }

    /// Returns the coverage look-ahead.
    #[must_use]
    pub fn coverage_threshold(&self) -> Duration {
        Duration::hours(i64::from(self.coverage_threshold_hours))
    }
}
