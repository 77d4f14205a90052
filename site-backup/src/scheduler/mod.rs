//! Weekly scheduling for the site backup run
//!
//! The backup fires once per week at a fixed weekday and time of day. A
//! single polling loop ([`BackupScheduler`]) re-checks the clock at a fixed
//! interval and runs the job inline when the slot is due, so two runs can
//! never overlap.
//!
//! # Configuration
//!
//! ```toml
//! [schedule]
//! weekday = "saturday"
//! time = "22:00"
//! poll_interval_seconds = 30
//! timezone = "Europe/Berlin"  # optional, host local time otherwise
//! ```

pub mod operations;
pub use operations::BackupScheduler;

use chrono::{DateTime, Datelike, Days, Local, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

use crate::config::ScheduleConfig;
use crate::constants::schedule::MAX_WEEKS_LOOKAHEAD;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Zone the weekly slot is evaluated in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotZone {
    Local,
    Named(Tz),
}

/// A fixed weekday + time-of-day slot, repeating every seven days
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySchedule {
    pub weekday: Weekday,
    pub time: NaiveTime,
    pub zone: SlotZone,
}

impl WeeklySchedule {
    pub fn new(weekday: Weekday, time: NaiveTime, zone: SlotZone) -> Self {
        Self {
            weekday,
            time,
            zone,
        }
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ConfigError> {
        let weekday = config
            .weekday
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "schedule.weekday".to_string(),
                reason: format!("'{}' is not a day of the week", config.weekday),
            })?;

        let time = parse_time_of_day(config.time.trim()).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "schedule.time".to_string(),
                reason: format!("'{}' is not HH:MM or HH:MM:SS", config.time),
            }
        })?;

        let zone = match config.timezone.as_deref().map(str::trim) {
            None | Some("") => SlotZone::Local,
            Some(name) => {
                let tz = name.parse::<Tz>().map_err(|e| ConfigError::InvalidValue {
                    field: "schedule.timezone".to_string(),
                    reason: e.to_string(),
                })?;
                SlotZone::Named(tz)
            }
        };

        Ok(Self::new(weekday, time, zone))
    }

    /// First slot strictly after `after`. `None` only if no valid local time
    /// exists within the lookahead window.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.zone {
            SlotZone::Local => next_slot_in(&Local, after, self.weekday, self.time),
            SlotZone::Named(tz) => next_slot_in(&tz, after, self.weekday, self.time),
        }
    }
}

impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zone = match self.zone {
            SlotZone::Local => "local time".to_string(),
            SlotZone::Named(tz) => tz.name().to_string(),
        };
        write!(
            f,
            "every {:?} at {} ({})",
            self.weekday,
            self.time.format("%H:%M"),
            zone
        )
    }
}

fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn next_slot_in<Z: TimeZone>(
    zone: &Z,
    after: DateTime<Utc>,
    weekday: Weekday,
    time: NaiveTime,
) -> Option<DateTime<Utc>> {
    let start = after.with_timezone(zone).date_naive();

    for offset in 0..=(7 * MAX_WEEKS_LOOKAHEAD) {
        let date = start.checked_add_days(Days::new(offset))?;
        if date.weekday() != weekday {
            continue;
        }

        // A slot inside a DST gap has no local instant; skip to the next week
        if let Some(candidate) = zone.from_local_datetime(&date.and_time(time)).earliest() {
            let candidate = candidate.with_timezone(&Utc);
            if candidate > after {
                return Some(candidate);
            }
        }
    }

    None
}
