use dash_core::{DashError, FetchFailed, LinkStatus, Result, Snapshot};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Whether periodic sampling is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Stopped,
    Running,
}

/// What became of a fetch result handed to [`SamplingLoop::deliver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Route this snapshot to the series and readouts.
    Applied(Snapshot),
    /// The fetch failed; nothing is to be touched.
    Failed,
    /// Arrived while stopped; dropped.
    Ignored,
}

/// Timer-driven sampling state.
///
/// Owns no timer itself: the host subscribes to a periodic tick of
/// [`SamplingLoop::tick_period`] while the loop is running and issues one
/// fetch per tick.  Results may arrive in any order; each one is applied
/// as it lands.
#[derive(Debug, Clone)]
pub struct SamplingLoop {
    interval: Duration,
    phase:    Phase,
    status:   LinkStatus,
    samples:  u64,
}

impl SamplingLoop {
    /// A stopped loop with the given period in seconds.
    pub fn new(interval_secs: f64) -> Result<Self> {
        Ok(Self {
            interval: checked_interval(interval_secs)?,
            phase:    Phase::Stopped,
            status:   LinkStatus::Pending,
            samples:  0,
        })
    }

    /// Enter the running phase.  Returns `true` on the transition, in which
    /// case the caller issues one immediate fetch.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Running {
            return false;
        }
        self.phase = Phase::Running;
        info!("sampling every {:.1}s", self.interval.as_secs_f64());
        true
    }

    /// Stop ticking.  Fetches already in flight are dropped on arrival.
    pub fn stop(&mut self) -> bool {
        if self.phase == Phase::Stopped {
            return false;
        }
        self.phase = Phase::Stopped;
        info!("sampling stopped");
        true
    }

    /// Restart with a new period.  Invalid periods leave the loop as it was.
    pub fn set_interval(&mut self, secs: f64) -> Result<()> {
        let interval = checked_interval(secs)?;
        self.stop();
        self.interval = interval;
        self.start();
        Ok(())
    }

    /// Change the period without touching the phase.  A stopped loop stays
    /// stopped and picks the new period up on its next start.
    pub fn set_period(&mut self, secs: f64) -> Result<()> {
        self.interval = checked_interval(secs)?;
        Ok(())
    }

    /// Account for one finished fetch.
    pub fn deliver(&mut self, result: std::result::Result<Snapshot, FetchFailed>) -> Delivery {
        if self.phase == Phase::Stopped {
            debug!("dropping fetch result that landed after stop");
            return Delivery::Ignored;
        }

        match result {
            Ok(snapshot) => {
                self.status = LinkStatus::Connected;
                self.samples += 1;
                Delivery::Applied(snapshot)
            }
            Err(e) => {
                warn!("{e}");
                self.status = LinkStatus::Disconnected(e.message);
                Delivery::Failed
            }
        }
    }

    /// Period to subscribe to, or `None` while stopped.
    pub fn tick_period(&self) -> Option<Duration> {
        (self.phase == Phase::Running).then_some(self.interval)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn status(&self) -> &LinkStatus {
        &self.status
    }

    /// Successful samples applied since startup.
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl Default for SamplingLoop {
    /// Stopped, sampling once per second.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            phase:    Phase::Stopped,
            status:   LinkStatus::Pending,
            samples:  0,
        }
    }
}

fn checked_interval(secs: f64) -> Result<Duration> {
    let invalid = || {
        DashError::Configuration(format!(
            "sampling interval must be a positive number of seconds, got {secs}"
        ))
    };
    if secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}
