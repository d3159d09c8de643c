//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{Direction, IntervalType, TickOutcome, TimerEngine, TimerSnapshot};
use crate::{
    services::{cue::report_cue, CueSignals},
    tasks::TickHandle,
};

/// Shared timer instance plus the countdown task that drives it.
///
/// Every intent and every tick goes through the engine lock, so mutations
/// are serialized. At most one countdown task exists at a time.
#[derive(Debug)]
pub struct AppState {
    /// Timer state machine and interval configuration
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Handle of the running countdown task, if any
    ticker: Mutex<Option<TickHandle>>,
    countdowns_spawned: AtomicU64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String, cues: Arc<dyn CueSignals>) -> Self {
        let engine = TimerEngine::new(cues);
        let (timer_update_tx, timer_update_rx) = watch::channel(engine.snapshot());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: Mutex::new(None),
            countdowns_spawned: AtomicU64::new(0),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, String> {
        self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    fn lock_ticker(&self) -> Result<MutexGuard<'_, Option<TickHandle>>, String> {
        self.ticker.lock()
            .map_err(|e| format!("Failed to lock countdown handle: {}", e))
    }

    /// Update last action tracking
    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Notify snapshot watchers
    fn publish(&self, snapshot: TimerSnapshot) -> TimerSnapshot {
        if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
        snapshot
    }

    /// Lengthen or shorten the session or break interval by one minute
    pub fn adjust(&self, interval: IntervalType, direction: Direction) -> Result<TimerSnapshot, String> {
        let mut engine = self.lock_engine()?;
        self.record_action(&format!("{}-{}", interval, direction));
        engine.adjust(interval, direction);
        Ok(self.publish(engine.snapshot()))
    }

    /// Start counting down. A no-op if a countdown is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        let mut engine = self.lock_engine()?;
        self.record_action("start");
        self.start_locked(&mut engine)?;
        Ok(self.publish(engine.snapshot()))
    }

    /// Pause the countdown. A no-op if nothing is running.
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        let mut engine = self.lock_engine()?;
        self.record_action("pause");
        self.pause_locked(&mut engine)?;
        Ok(self.publish(engine.snapshot()))
    }

    /// Start when paused, pause when running
    pub fn start_stop(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        let mut engine = self.lock_engine()?;
        if engine.timer().is_paused() {
            self.record_action("start");
            self.start_locked(&mut engine)?;
        } else {
            self.record_action("pause");
            self.pause_locked(&mut engine)?;
        }
        Ok(self.publish(engine.snapshot()))
    }

    /// Cancel any countdown and restore the default intervals
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let mut engine = self.lock_engine()?;
        self.record_action("reset");
        self.cancel_countdown()?;
        engine.reset();
        Ok(self.publish(engine.snapshot()))
    }

    /// Apply one tick of the countdown identified by `ticket`.
    ///
    /// Returns `Ok(false)` when the ticket is no longer active and the
    /// calling task should stop. A phase-switch cue is played after the
    /// engine lock is released.
    pub fn tick(&self, ticket: u64) -> Result<bool, String> {
        let (outcome, cues) = {
            let mut engine = self.lock_engine()?;
            let Some(outcome) = engine.tick(ticket) else {
                return Ok(false);
            };
            self.publish(engine.snapshot());
            (outcome, engine.cues())
        };

        if let TickOutcome::PhaseSwitched(_) = outcome {
            report_cue("play", cues.play_cue());
        }
        Ok(true)
    }

    fn start_locked(self: &Arc<Self>, engine: &mut TimerEngine) -> Result<(), String> {
        // Taken first so a poisoned handle leaves the engine paused
        let mut ticker = self.lock_ticker()?;
        let Some(ticket) = engine.start() else {
            return Ok(());
        };

        let handle = TickHandle::spawn(Arc::downgrade(self), ticket);
        self.countdowns_spawned.fetch_add(1, Ordering::SeqCst);
        if let Some(stale) = ticker.replace(handle) {
            warn!("Replacing leftover countdown task {}", stale.ticket());
        }
        Ok(())
    }

    fn pause_locked(&self, engine: &mut TimerEngine) -> Result<(), String> {
        self.cancel_countdown()?;
        engine.pause();
        Ok(())
    }

    /// Abort the running countdown task, if any
    pub fn cancel_countdown(&self) -> Result<(), String> {
        if let Some(handle) = self.lock_ticker()?.take() {
            info!("Cancelling countdown task {}", handle.ticket());
            handle.cancel();
        }
        Ok(())
    }

    /// Get the current observable timer state
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.lock_engine().map(|engine| engine.snapshot())
    }

    /// Watch the timer for published snapshots
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Number of countdown tasks spawned since creation
    pub fn countdown_processes_spawned(&self) -> u64 {
        self.countdowns_spawned.load(Ordering::SeqCst)
    }

    /// Check if a countdown task is currently held
    pub fn is_counting_down(&self) -> bool {
        self.ticker.lock()
            .map(|ticker| ticker.is_some())
            .unwrap_or(false)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
