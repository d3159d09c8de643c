//! Display logging background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::state::AppState;

/// Background task that logs every published timer snapshot
pub async fn display_log_task(state: Arc<AppState>) {
    info!("Starting display task");

    let mut updates = state.subscribe();
    let mut last = updates.borrow_and_update().clone();
    info!("{} {} ({})", last.phase, last.display_time, if last.is_paused { "paused" } else { "running" });

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();

        if snapshot.phase != last.phase {
            info!("{} started: {}", snapshot.phase, snapshot.display_time);
        }
        if snapshot.is_paused != last.is_paused {
            info!(
                "{} {} ({})",
                snapshot.phase,
                snapshot.display_time,
                if snapshot.is_paused { "paused" } else { "running" }
            );
        }
        debug!(
            "{} {} [session {}m, break {}m]",
            snapshot.phase, snapshot.display_time, snapshot.session_length, snapshot.break_length
        );

        last = snapshot;
    }

    debug!("Timer update channel closed, display task ending");
}
