//! Audible cue backends invoked on phase switches and resets

use std::{
    fmt,
    io::Write,
    process::Stdio,
    sync::Mutex,
};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Fire-and-forget audio signals used by the timer engine.
///
/// The engine never inspects the outcome beyond logging a failure.
pub trait CueSignals: Send + Sync + fmt::Debug {
    /// Start playing the cue
    fn play_cue(&self) -> Result<(), String>;
    /// Stop any cue that is currently playing
    fn stop_cue(&self) -> Result<(), String>;
    /// Move playback back to the start of the cue
    fn rewind_cue(&self) -> Result<(), String>;
}

/// Log a failed cue signal; cue failures never reach the caller
pub fn report_cue(action: &str, result: Result<(), String>) {
    if let Err(e) = result {
        warn!("Cue {} failed: {}", action, e);
    }
}

/// Cue backend that only logs
#[derive(Debug, Default)]
pub struct SilentCue;

impl CueSignals for SilentCue {
    fn play_cue(&self) -> Result<(), String> {
        debug!("Silent cue: play");
        Ok(())
    }

    fn stop_cue(&self) -> Result<(), String> {
        debug!("Silent cue: stop");
        Ok(())
    }

    fn rewind_cue(&self) -> Result<(), String> {
        debug!("Silent cue: rewind");
        Ok(())
    }
}

/// Rings the terminal bell on stdout
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CueSignals for TerminalBell {
    fn play_cue(&self) -> Result<(), String> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(|e| format!("Failed to ring terminal bell: {}", e))
    }

    // A bell cannot be interrupted or rewound
    fn stop_cue(&self) -> Result<(), String> {
        Ok(())
    }

    fn rewind_cue(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Plays the cue by spawning an external player process
pub struct CommandCue {
    program: String,
    args: Vec<String>,
    player: Mutex<Option<Child>>,
}

impl CommandCue {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            player: Mutex::new(None),
        }
    }

    /// Build from a whitespace separated command line, e.g. `paplay alarm.ogg`
    pub fn from_command_line(command_line: &str) -> Result<Self, String> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| "Cue command is empty".to_string())?;
        Ok(Self::new(program, parts.collect()))
    }

    /// The program and arguments this backend runs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for CommandCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandCue")
            .field("program", &self.program)
            .field("args", &self.args)
            .finish()
    }
}

impl CueSignals for CommandCue {
    fn play_cue(&self) -> Result<(), String> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to spawn cue player '{}': {}", self.program, e))?;

        let mut player = self.player.lock()
            .map_err(|e| format!("Failed to lock cue player: {}", e))?;
        *player = Some(child);

        info!("Cue player started: {}", self.command_line());
        Ok(())
    }

    fn stop_cue(&self) -> Result<(), String> {
        let mut player = self.player.lock()
            .map_err(|e| format!("Failed to lock cue player: {}", e))?;

        let Some(child) = player.as_mut() else {
            return Ok(());
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Cue player already exited ({})", status);
                Ok(())
            }
            Ok(None) => {
                child.start_kill()
                    .map_err(|e| format!("Failed to stop cue player: {}", e))?;
                info!("Cue player stopped");
                Ok(())
            }
            Err(e) => Err(format!("Failed to check cue player: {}", e)),
        }
    }

    // Each play spawns a fresh process, so rewinding means dropping the old one
    fn rewind_cue(&self) -> Result<(), String> {
        let mut player = self.player.lock()
            .map_err(|e| format!("Failed to lock cue player: {}", e))?;
        player.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_line() {
        let cue = CommandCue::from_command_line("  paplay   /usr/share/sounds/bell.oga ").unwrap();
        assert_eq!(cue.program, "paplay");
        assert_eq!(cue.args, vec!["/usr/share/sounds/bell.oga".to_string()]);
        assert_eq!(cue.command_line(), "paplay /usr/share/sounds/bell.oga");
    }

    #[test]
    fn rejects_empty_command_line() {
        assert!(CommandCue::from_command_line("   ").is_err());
    }

    #[test]
    fn stop_and_rewind_without_player_are_no_ops() {
        let cue = CommandCue::from_command_line("true").unwrap();
        assert!(cue.stop_cue().is_ok());
        assert!(cue.rewind_cue().is_ok());
    }

    #[tokio::test]
    async fn missing_player_reports_an_error() {
        let cue = CommandCue::from_command_line("tomato-timer-no-such-player").unwrap();
        assert!(cue.play_cue().is_err());
    }

    #[test]
    fn silent_cue_never_fails() {
        let cue = SilentCue;
        assert!(cue.play_cue().is_ok());
        assert!(cue.stop_cue().is_ok());
        assert!(cue.rewind_cue().is_ok());
    }
}
