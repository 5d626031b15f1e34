//! Invocation contract: `self-amend --service | --watchdog | --cleanup`.
//!
//! Exactly one flag and nothing else. Role matching on running processes
//! depends on this shape, so configuration never travels on the command
//! line.

use clap::{ArgGroup, Parser};
use shared_types::Role;

/// Self-amending service: replaces its own program once every registered
/// participant has signed the replacement.
#[derive(Parser, Debug)]
#[command(name = "self-amend", version)]
#[command(group(ArgGroup::new("mode").required(true).args(["service", "watchdog", "cleanup"])))]
pub struct Cli {
    /// Serve the control surface (and refresh the watchdog)
    #[arg(long)]
    pub service: bool,

    /// Restart the service whenever the program file is rewritten
    #[arg(long)]
    pub watchdog: bool,

    /// Terminate every running service and watchdog, then exit
    #[arg(long)]
    pub cleanup: bool,
}

/// What this invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run(Role),
    Cleanup,
}

impl Mode {
    pub fn tag(self) -> &'static str {
        match self {
            Mode::Run(role) => role.tag(),
            Mode::Cleanup => "cleanup",
        }
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.service {
            Mode::Run(Role::Service)
        } else if self.watchdog {
            Mode::Run(Role::Watchdog)
        } else {
            Mode::Cleanup
        }
    }
}
