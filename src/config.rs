//! Configuration and CLI argument handling

use std::sync::Arc;
use clap::{Parser, ValueEnum};

use crate::services::{CommandCue, CueSignals, SilentCue, TerminalBell};

/// How phase-switch cues are played
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CueKind {
    /// Log only
    Silent,
    /// Ring the terminal bell
    Bell,
    /// Run an external player command
    Command,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tomato-timer")]
#[command(about = "A work/break interval timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Cue played when a session or break ends
    #[arg(long, value_enum, default_value = "bell")]
    pub cue: CueKind,

    /// Player command for `--cue command`, e.g. "paplay alarm.ogg"
    #[arg(long)]
    pub cue_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the cue backend selected on the command line
    pub fn cue_signals(&self) -> Result<Arc<dyn CueSignals>, String> {
        match self.cue {
            CueKind::Silent => Ok(Arc::new(SilentCue)),
            CueKind::Bell => Ok(Arc::new(TerminalBell)),
            CueKind::Command => {
                let command_line = self.cue_command.as_deref()
                    .ok_or_else(|| "--cue command requires --cue-command".to_string())?;
                Ok(Arc::new(CommandCue::from_command_line(command_line)?))
            }
        }
    }
}
