//! Countdown background task

use std::{sync::Weak, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::state::AppState;

/// Time between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned handle to a running countdown task.
///
/// The task is aborted when the handle is cancelled or dropped.
#[derive(Debug)]
pub struct TickHandle {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl TickHandle {
    /// Spawn a countdown task that ticks `ticket` once per period
    pub fn spawn(state: Weak<AppState>, ticket: u64) -> Self {
        let handle = tokio::spawn(countdown_task(state, ticket));
        Self { ticket, handle }
    }

    /// Ticket of the countdown this task drives
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Stop the task
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Tick the engine once per period until the ticket goes stale
pub async fn countdown_task(state: Weak<AppState>, ticket: u64) {
    debug!("Starting countdown task {}", ticket);

    // First tick lands one full period after start
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        let Some(state) = state.upgrade() else {
            debug!("Timer state dropped, ending countdown task {}", ticket);
            break;
        };

        match state.tick(ticket) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Countdown {} is no longer active, ending task", ticket);
                break;
            }
            Err(e) => {
                error!("Countdown {} failed to tick: {}", ticket, e);
                break;
            }
        }
    }
}
