use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::Error;

/// A wall-clock time of day at which the daily job fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTime(NaiveTime);

impl DailyTime {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// First occurrence strictly after `now`.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.0);
        if today > now {
            today
        } else {
            today + TimeDelta::days(1)
        }
    }

    /// Time left until the next occurrence.
    pub fn until_next(&self, now: NaiveDateTime) -> Duration {
        (self.next_after(now) - now)
            .to_std()
            // arch-lint: allow(no-silent-result-drop) reason="next_after is always ahead of now, the delta cannot be negative"
            .unwrap_or(Duration::ZERO)
    }
}

/// Next-run bookkeeping for a daily job driven by a wall clock that can jump
/// (DST changes, NTP steps, host suspend).
///
/// Callers sleep at most `max` between checks and re-read the clock after
/// every wake, so the job fires when the local clock reaches the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    at: DailyTime,
    next_run: Option<NaiveDateTime>,
}

impl DailySchedule {
    /// With `run_on_start` the first run is due immediately.
    pub fn new(at: DailyTime, now: NaiveDateTime, run_on_start: bool) -> Self {
        let next_run = (!run_on_start).then(|| at.next_after(now));
        Self { at, next_run }
    }

    /// `None` while the start-up run is still pending.
    pub fn next_run(&self) -> Option<NaiveDateTime> {
        self.next_run
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.next_run.is_none_or(|next| now >= next)
    }

    /// Mark the pending run as done and return the following one.
    pub fn advance(&mut self, now: NaiveDateTime) -> NaiveDateTime {
        let next = self.at.next_after(now);
        self.next_run = Some(next);
        next
    }

    /// How long to sleep before looking at the clock again, capped at `max`.
    pub fn sleep_for(&self, now: NaiveDateTime, max: Duration) -> Duration {
        match self.next_run {
            None => Duration::ZERO,
            Some(next) => (next - now)
                .to_std()
                // arch-lint: allow(no-silent-result-drop) reason="a target in the past means the run is already due"
                .unwrap_or(Duration::ZERO)
                .min(max),
        }
    }
}

impl FromStr for DailyTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self)
            .map_err(|_| Error::InvalidScheduleTime {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for DailyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}
