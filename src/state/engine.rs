//! Countdown state machine
//!
//! `TimerEngine` is synchronous and owns no scheduling. Whoever drives it
//! calls [`TimerEngine::start`] to obtain a countdown ticket and then
//! [`TimerEngine::tick`] once per second with that ticket. Pausing or
//! resetting retires the ticket, so ticks from a cancelled countdown are
//! ignored.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    Direction, IntervalConfig, IntervalType, Phase, Remaining, Status, TimerSnapshot, TimerState,
};
use crate::{
    services::{cue::report_cue, CueSignals},
    utils::format_time,
};

/// Result of a tick that belonged to the active countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Remaining time went down by one second
    Counted,
    /// The phase elapsed and the timer switched to the contained phase
    PhaseSwitched(Phase),
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    ticket: u64,
    minutes: u32,
    seconds: u32,
}

/// Session/break countdown with its interval configuration
#[derive(Debug)]
pub struct TimerEngine {
    config: IntervalConfig,
    timer: TimerState,
    countdown: Option<Countdown>,
    last_ticket: u64,
    cues: Arc<dyn CueSignals>,
}

impl TimerEngine {
    /// Create an idle engine with default intervals
    pub fn new(cues: Arc<dyn CueSignals>) -> Self {
        let config = IntervalConfig::new();
        Self {
            timer: TimerState::new(&config),
            config,
            countdown: None,
            last_ticket: 0,
            cues,
        }
    }

    pub fn config(&self) -> &IntervalConfig {
        &self.config
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    /// Cue backend shared with the engine
    pub fn cues(&self) -> Arc<dyn CueSignals> {
        Arc::clone(&self.cues)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(&self.timer, &self.config)
    }

    /// Ticket of the countdown currently running, if any
    pub fn active_ticket(&self) -> Option<u64> {
        self.countdown.map(|countdown| countdown.ticket)
    }

    /// Move an interval length by one minute.
    ///
    /// Returns `false` when the new length would leave [1, 60]; nothing
    /// changes in that case. A session change made while the timer is idle
    /// is reflected in the display immediately.
    pub fn adjust(&mut self, interval: IntervalType, direction: Direction) -> bool {
        let Some(minutes) = self.config.adjust(interval, direction) else {
            debug!("Ignoring {} {}: length would leave bounds", interval, direction);
            return false;
        };

        info!("{} length set to {} minutes", interval, minutes);
        if interval == IntervalType::Session && self.timer.is_idle() {
            self.timer.display = format_time(minutes, 0);
        }
        true
    }

    /// Begin counting down from the resume point.
    ///
    /// Returns the ticket the caller must pass to [`tick`](Self::tick), or
    /// `None` if a countdown is already running.
    pub fn start(&mut self) -> Option<u64> {
        if self.timer.is_running() {
            debug!("Start ignored, countdown already running");
            return None;
        }

        let baseline = self.timer.resume_point(&self.config);
        self.last_ticket += 1;
        self.countdown = Some(Countdown {
            ticket: self.last_ticket,
            minutes: baseline.minutes,
            seconds: baseline.seconds,
        });
        self.timer.paused_at = None;
        self.timer.status = Status::Running;

        info!("{} countdown started from {}", self.timer.phase, baseline.display());
        Some(self.last_ticket)
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `None` when `ticket` is not the active countdown. When the
    /// phase runs out, the next phase's full length is shown on this same
    /// tick; decrementing resumes on the following tick. The caller plays
    /// the cue for a [`TickOutcome::PhaseSwitched`] once it has released
    /// the engine.
    pub fn tick(&mut self, ticket: u64) -> Option<TickOutcome> {
        let countdown = self.countdown.as_mut().filter(|c| c.ticket == ticket)?;

        let outcome = if countdown.seconds > 0 {
            countdown.seconds -= 1;
            TickOutcome::Counted
        } else if countdown.minutes > 0 {
            countdown.minutes -= 1;
            countdown.seconds = 59;
            TickOutcome::Counted
        } else {
            let phase = self.timer.phase.next();
            self.timer.phase = phase;
            countdown.minutes = self.config.minutes_for(phase.interval());
            countdown.seconds = 0;
            TickOutcome::PhaseSwitched(phase)
        };

        self.timer.display = format_time(countdown.minutes, countdown.seconds);

        if let TickOutcome::PhaseSwitched(phase) = outcome {
            info!("Switched to {} ({})", phase, self.timer.display);
        }
        debug!("Tick: {} {}", self.timer.phase, self.timer.display);
        Some(outcome)
    }

    /// Stop the countdown, keeping the displayed time as the resume point.
    ///
    /// Returns `false` if nothing was running.
    pub fn pause(&mut self) -> bool {
        let Some(countdown) = self.countdown.take() else {
            debug!("Pause ignored, no countdown running");
            return false;
        };

        let resume = Remaining::parse_display(&self.timer.display).unwrap_or_else(|e| {
            warn!("{}, resuming from internal countdown", e);
            Remaining::new(countdown.minutes, countdown.seconds)
        });

        self.timer.paused_at = Some(resume);
        self.timer.status = Status::Paused;
        info!("{} countdown paused at {}", self.timer.phase, resume.display());
        true
    }

    /// Stop everything and go back to the 25/5 defaults
    pub fn reset(&mut self) {
        self.countdown = None;
        report_cue("stop", self.cues.stop_cue());
        report_cue("rewind", self.cues.rewind_cue());

        self.config = IntervalConfig::new();
        self.timer = TimerState::new(&self.config);
        info!("Timer reset to {}", self.timer.display);
    }
}
