// File: site-backup/src/scheduler/operations.rs
use chrono::{DateTime, Local, Utc};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

use super::{SchedulerState, WeeklySchedule};

/// Polling loop that fires the backup job once per weekly slot
pub struct BackupScheduler {
    schedule: WeeklySchedule,
    poll_interval: Duration,
    next_due: Option<DateTime<Utc>>,
    state: SchedulerState,
    completed_runs: u64,
}

impl BackupScheduler {
    pub fn new(schedule: WeeklySchedule, poll_interval: Duration) -> Self {
        Self::starting_at(schedule, poll_interval, Utc::now())
    }

    /// Scheduler whose first slot is the next one after `now`
    pub fn starting_at(
        schedule: WeeklySchedule,
        poll_interval: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        let next_due = schedule.next_after(now);
        Self {
            schedule,
            poll_interval,
            next_due,
            state: SchedulerState::Idle,
            completed_runs: 0,
        }
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.next_due
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn completed_runs(&self) -> u64 {
        self.completed_runs
    }

    /// Run the job if its slot has been reached at `now`.
    ///
    /// Returns whether the job ran. The following slot is computed from the
    /// moment the job finished, so a long run never fires twice for one slot.
    pub async fn run_pending<F, Fut>(&mut self, now: DateTime<Utc>, job: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let due = match self.next_due {
            Some(due) => due,
            None => {
                self.next_due = self.schedule.next_after(now);
                if self.next_due.is_none() {
                    error!("No valid slot found for schedule {}", self.schedule);
                }
                return false;
            }
        };

        if now < due {
            return false;
        }

        self.state = SchedulerState::Running;
        info!(
            "Scheduled backup due at {} starting",
            due.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );

        let started = Instant::now();
        job().await;
        let elapsed = started.elapsed();

        self.state = SchedulerState::Idle;
        self.completed_runs += 1;

        let finished = now
            + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero());
        self.next_due = self.schedule.next_after(finished);

        match self.next_due {
            Some(next) => info!(
                "Scheduled backup finished in {}s, next run at {}",
                elapsed.as_secs(),
                next.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            None => error!("No valid slot found for schedule {}", self.schedule),
        }

        true
    }

    /// Poll forever, running `job` whenever its weekly slot comes due
    #[instrument(skip_all)]
    pub async fn run<F, Fut>(mut self, mut job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        match self.next_due {
            Some(next) => info!(
                "Backup scheduler started ({}), polling every {}s, first run at {}",
                self.schedule,
                self.poll_interval.as_secs(),
                next.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            None => error!("Backup scheduler started but {} has no valid slot", self.schedule),
        }

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if !self.run_pending(Utc::now(), &mut job).await {
                debug!("No backup due, next check in {}s", self.poll_interval.as_secs());
            }
        }
    }
}
