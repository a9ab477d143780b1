//! Time-scrub animation: drives the time cursor from a start to an end
//! value over a real duration.
//!
//! The animator owns no clock and schedules nothing itself. The host's
//! frame-pacing primitive calls [`Animator::step`] with monotonic timestamps
//! (any fixed origin) and applies the returned time to the universe,
//! rescheduling while the step asks for it. This keeps the whole run
//! deterministic under test: feed synthetic timestamps, get exact times
//! back.

use std::time::Duration;

/// One scheduled progression step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The time value to apply to the universe.
    pub time: f64,
    /// Whether the host should schedule another step. `false` exactly once,
    /// on the final step that lands on the end value.
    pub reschedule: bool,
}

/// Scrubs time linearly from `start` to `end` over `duration` of wall-clock
/// time, then halts.
///
/// At most one run is in flight: [`Animator::begin`] supersedes any earlier
/// run, and [`Animator::cancel`] is unconditionally safe, scheduled step or
/// not.
#[derive(Debug, Clone)]
pub struct Animator {
    start: f64,
    end: f64,
    duration: Duration,
    run: Option<Run>,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    /// Timestamp of the first step; elapsed time is measured from here.
    origin: Option<Duration>,
}

impl Default for Animator {
    /// The classic scrub: t = −4 to t = +4 over thirty seconds.
    fn default() -> Self {
        Self::new(-4.0, 4.0, Duration::from_secs(30))
    }
}

impl Animator {
    pub fn new(start: f64, end: f64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
            run: None,
        }
    }

    /// Starts a run, superseding any in-flight one, and returns the initial
    /// time value (`start`) for the host to apply. The elapsed-time origin
    /// is taken from the first subsequent [`Animator::step`] call.
    pub fn begin(&mut self) -> f64 {
        self.run = Some(Run { origin: None });
        self.start
    }

    /// Advances the run given the current monotonic timestamp.
    ///
    /// Returns `None` when no run is in flight (never begun, cancelled, or
    /// already finished). Otherwise linearly interpolates by
    /// `elapsed / duration`, clamped to `[0, 1]`; at full progress the run
    /// ends with `time = end` and `reschedule = false`.
    pub fn step(&mut self, now: Duration) -> Option<Step> {
        let run = self.run.as_mut()?;
        let origin = *run.origin.get_or_insert(now);
        let elapsed = now.saturating_sub(origin);

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };

        if progress >= 1.0 {
            self.run = None;
            return Some(Step {
                time: self.end,
                reschedule: false,
            });
        }

        Some(Step {
            time: self.start + (self.end - self.start) * progress,
            reschedule: true,
        })
    }

    /// Unschedules any in-flight run. Idempotent; safe when nothing is
    /// scheduled.
    pub fn cancel(&mut self) {
        self.run = None;
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }
}
