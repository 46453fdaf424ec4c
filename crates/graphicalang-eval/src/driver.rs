//! The driving loop: pulls snapshots, hands them to a renderer and paces
//! them in real time.
//!
//! Cancellation is cooperative. The [`CancelToken`] is checked between
//! snapshot requests, never inside the [`Runner`](crate::Runner), so a
//! statement that is already being computed finishes before the loop stops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::snapshot::RunningState;

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clears the flag so the token can guard another run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Consumer of snapshots, e.g. a sprite view or a variable table.
pub trait Renderer {
    fn render(&mut self, state: &RunningState);

    /// Called once after the last snapshot of a drive.
    fn finish(&mut self, _outcome: &DriveOutcome) {}
}

/// Waits between snapshots.
pub trait Pacer {
    /// Blocks for up to `duration`. Implementations may return early once
    /// `cancel` is set.
    fn pause(&mut self, duration: Duration, cancel: &CancelToken);
}

/// Sleeps the current thread, waking every `slice` to check for
/// cancellation.
#[derive(Debug, Clone)]
pub struct SleepPacer {
    pub slice: Duration,
}

impl Default for SleepPacer {
    fn default() -> Self {
        SleepPacer {
            slice: Duration::from_millis(50),
        }
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self, duration: Duration, cancel: &CancelToken) {
        // `None` means the deadline is beyond what Instant can represent.
        let deadline = Instant::now().checked_add(duration);
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let remaining = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }
                    deadline - now
                }
                None => self.slice,
            };
            thread::sleep(remaining.min(self.slice));
        }
    }
}

/// Pacer that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _duration: Duration, _cancel: &CancelToken) {}
}

/// Configuration for the driving loop.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Wall-clock length of one `sleep` unit. Default: 1 ms.
    pub time_unit: Duration,
    /// Stop after rendering this many snapshots. Default: no limit.
    pub max_steps: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            time_unit: Duration::from_millis(1),
            max_steps: None,
        }
    }
}

/// How a drive ended, with the number of snapshots rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The snapshot sequence ran out.
    Completed { rendered: u64 },
    /// The cancel token was set.
    Cancelled { rendered: u64 },
    /// `max_steps` snapshots were rendered.
    StepLimitReached { rendered: u64 },
}

impl DriveOutcome {
    pub fn rendered(&self) -> u64 {
        match self {
            DriveOutcome::Completed { rendered }
            | DriveOutcome::Cancelled { rendered }
            | DriveOutcome::StepLimitReached { rendered } => *rendered,
        }
    }
}

/// Converts a snapshot's declared duration into a wall-clock wait.
///
/// Absent, negative and NaN durations wait zero. Durations too large to
/// represent saturate.
pub fn pause_for(duration: Option<f64>, time_unit: Duration) -> Duration {
    let units = duration.unwrap_or(0.0);
    if units.is_nan() || units <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(time_unit.as_secs_f64() * units).unwrap_or(Duration::MAX)
}

/// The driving loop.
pub struct Driver {
    config: DriverConfig,
    cancel: CancelToken,
}

impl Driver {
    pub fn new(config: DriverConfig, cancel: CancelToken) -> Self {
        Driver { config, cancel }
    }

    /// A handle that stops this driver from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Pulls snapshots until the sequence ends, the token is cancelled or
    /// the step limit is hit.
    pub fn drive<I, R, P>(&self, snapshots: I, renderer: &mut R, pacer: &mut P) -> DriveOutcome
    where
        I: IntoIterator<Item = RunningState>,
        R: Renderer + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut snapshots = snapshots.into_iter();
        let mut rendered = 0u64;

        let outcome = loop {
            if self.cancel.is_cancelled() {
                break DriveOutcome::Cancelled { rendered };
            }
            if let Some(max) = self.config.max_steps {
                if rendered >= max {
                    break DriveOutcome::StepLimitReached { rendered };
                }
            }

            let state = match snapshots.next() {
                Some(state) => state,
                None => break DriveOutcome::Completed { rendered },
            };

            tracing::trace!(stat = %state.current_stat, duration = ?state.duration, "snapshot");
            renderer.render(&state);
            rendered += 1;

            let wait = pause_for(state.duration, self.config.time_unit);
            if !wait.is_zero() {
                pacer.pause(wait, &self.cancel);
            }
        };

        tracing::info!(?outcome, "drive finished");
        renderer.finish(&outcome);
        outcome
    }
}
