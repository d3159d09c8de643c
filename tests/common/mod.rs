#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tomato_timer::{services::CueSignals, AppState};

/// Cue backend that records every call
#[derive(Debug, Default)]
pub struct RecordingCue {
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingCue {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("cue calls").clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: &'static str) -> Result<(), String> {
        self.calls.lock().expect("cue calls").push(call);
        Ok(())
    }
}

impl CueSignals for RecordingCue {
    fn play_cue(&self) -> Result<(), String> {
        self.record("play")
    }

    fn stop_cue(&self) -> Result<(), String> {
        self.record("stop")
    }

    fn rewind_cue(&self) -> Result<(), String> {
        self.record("rewind")
    }
}

pub fn app_state() -> (Arc<AppState>, Arc<RecordingCue>) {
    let cue = Arc::new(RecordingCue::default());
    let state = Arc::new(AppState::new(20525, "127.0.0.1".to_string(), cue.clone()));
    (state, cue)
}
