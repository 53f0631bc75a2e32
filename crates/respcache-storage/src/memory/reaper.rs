//! Background sweep of stale entries
//!
//! The memory repository has no native expiry, so a reaper task removes
//! entries whose expiration has passed. The remote repository relies on the
//! store's own TTL and never gets one.

use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use super::repository::MemoryRepository;

/// Shortest period a reaper runs at; shorter requests are raised to it
pub const MIN_REAP_PERIOD: Duration = Duration::from_millis(1);

/// Periodic sweeper bound to one [`MemoryRepository`]
///
/// The first sweep runs one period after the reaper starts. Dropping the
/// reaper shuts it down.
pub struct Reaper {
    repository: MemoryRepository,
    period: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Reaper {
    /// Start sweeping `repository` every `period`
    ///
    /// Must be called from within a Tokio runtime. A `period` below
    /// [`MIN_REAP_PERIOD`] is raised to it.
    pub fn spawn(repository: MemoryRepository, period: Duration) -> Self {
        let period = period.max(MIN_REAP_PERIOD);
        let target = repository.clone();
        let handle = spawn_periodic(period, move || target.remove_expired(SystemTime::now()));

        info!(
            target: "respcache",
            period_secs = period.as_secs_f64(),
            "started stale entry reaper"
        );

        Self {
            repository,
            period,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Run one sweep now, outside the schedule
    ///
    /// Returns the number of entries removed.
    pub fn sweep_now(&self) -> usize {
        self.repository.remove_expired(SystemTime::now())
    }

    /// Period between sweeps
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the periodic task is still scheduled
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the periodic task
    ///
    /// A sweep already in progress runs to completion; no sweep starts after
    /// this returns. Calling it again is a no-op.
    pub fn shutdown(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
            info!(target: "respcache", "stopped stale entry reaper");
        }
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Reaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reaper")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Spawn a task calling `sweep` every `period`, first call after one period
///
/// A panic inside `sweep` is logged and the schedule continues. The sweep is
/// synchronous, so aborting the task can only take effect between sweeps.
fn spawn_periodic<F>(period: Duration, sweep: F) -> JoinHandle<()>
where
    F: Fn() -> usize + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match panic::catch_unwind(AssertUnwindSafe(&sweep)) {
                Ok(0) => debug!(target: "respcache", "reaper sweep: no expired entries"),
                Ok(removed) => {
                    info!(target: "respcache", removed, "reaper sweep removed expired entries")
                }
                Err(_) => error!(target: "respcache", "reaper sweep panicked; keeping schedule"),
            }
        }
    })
}
