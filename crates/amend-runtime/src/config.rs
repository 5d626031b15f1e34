//! # Runtime Configuration
//!
//! Every setting comes from the environment. Launched roles inherit it, so
//! the service and the watchdog always agree on the state directory and the
//! program path.

use sa_02_signature_verification::GpgConfig;
use sa_03_proposal_quorum::{StateLayout, StoreOptions};
use sa_04_process_supervisor::Runtime;
use sa_05_control_gateway::GatewayConfig;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STATE_DIR: &str = "/opt/self-amend";
pub const DEFAULT_PROGRAM_NAME: &str = "self-amend";
pub const DEFAULT_PARTICIPANTS_FILE: &str = "participants.json";
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 10;

/// Configuration shared by all roles.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Working state directory, watched recursively by the watchdog.
    pub state_dir: PathBuf,
    /// The authoritative program file.
    pub program: PathBuf,
    /// JSON participant list, read once at service start.
    pub participants_file: PathBuf,
    /// Interpreter the program is launched with, if it is a script.
    pub interpreter: Option<PathBuf>,
    /// Control surface listen address.
    pub bind_addr: SocketAddr,
    /// Request body limit.
    pub max_upload_bytes: usize,
    /// Signing tool.
    pub gpg_binary: PathBuf,
    pub gpg_homedir: Option<PathBuf>,
    /// Bound on a single signing-tool invocation.
    pub verify_timeout: Duration,
    /// Require a signature's payload to equal the proposal.
    pub bind_signatures: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let state_dir = PathBuf::from(DEFAULT_STATE_DIR);
        let gateway = GatewayConfig::default();
        Self {
            program: state_dir.join(DEFAULT_PROGRAM_NAME),
            participants_file: state_dir.join(DEFAULT_PARTICIPANTS_FILE),
            state_dir,
            interpreter: None,
            bind_addr: gateway.bind_addr,
            max_upload_bytes: gateway.max_upload_bytes,
            gpg_binary: PathBuf::from("gpg"),
            gpg_homedir: None,
            verify_timeout: Duration::from_secs(DEFAULT_VERIFY_TIMEOUT_SECS),
            bind_signatures: true,
        }
    }
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SA_STATE_DIR`: state directory (default: /opt/self-amend)
    /// - `SA_PROGRAM`: program path (default: `$SA_STATE_DIR/self-amend`)
    /// - `SA_PARTICIPANTS_FILE`: default `$SA_STATE_DIR/participants.json`
    /// - `SA_INTERPRETER`: launch the program through this interpreter
    /// - `SA_BIND_ADDR`: default 127.0.0.1:8080
    /// - `SA_MAX_UPLOAD_BYTES`: default 4194304
    /// - `SA_GPG_BINARY`, `SA_GPG_HOMEDIR`: signing tool
    /// - `SA_VERIFY_TIMEOUT_SECS`: default 10
    /// - `SA_BIND_SIGNATURES`: default true
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        let state_dir = path("SA_STATE_DIR").unwrap_or(defaults.state_dir);
        let program = path("SA_PROGRAM").unwrap_or_else(|| state_dir.join(DEFAULT_PROGRAM_NAME));
        let participants_file = path("SA_PARTICIPANTS_FILE")
            .unwrap_or_else(|| state_dir.join(DEFAULT_PARTICIPANTS_FILE));

        let bind_addr = match lookup("SA_BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("SA_BIND_ADDR", &raw))?,
            None => defaults.bind_addr,
        };
        let max_upload_bytes = match lookup("SA_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("SA_MAX_UPLOAD_BYTES", &raw))?,
            None => defaults.max_upload_bytes,
        };
        let verify_timeout = match lookup("SA_VERIFY_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|_| ConfigError::invalid("SA_VERIFY_TIMEOUT_SECS", &raw))?,
            ),
            None => defaults.verify_timeout,
        };
        let bind_signatures = match lookup("SA_BIND_SIGNATURES") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid("SA_BIND_SIGNATURES", &raw))?,
            None => defaults.bind_signatures,
        };

        Ok(Self {
            state_dir,
            program,
            participants_file,
            interpreter: path("SA_INTERPRETER"),
            bind_addr,
            max_upload_bytes,
            gpg_binary: path("SA_GPG_BINARY").unwrap_or(defaults.gpg_binary),
            gpg_homedir: path("SA_GPG_HOMEDIR"),
            verify_timeout,
            bind_signatures,
        })
    }

    /// Checks that must pass before any role touches the state directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.state_dir.is_dir() {
            return Err(ConfigError::MissingStateDir(self.state_dir.clone()));
        }
        if self.verify_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "SA_VERIFY_TIMEOUT_SECS",
                value: "0".into(),
            });
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SA_MAX_UPLOAD_BYTES",
                value: "0".into(),
            });
        }
        Ok(())
    }

    pub fn layout(&self) -> StateLayout {
        StateLayout::new(&self.state_dir, &self.program)
    }

    pub fn runtime(&self) -> Runtime {
        Runtime::new(&self.program, self.interpreter.clone())
    }

    pub fn gpg(&self) -> GpgConfig {
        GpgConfig {
            binary: self.gpg_binary.clone(),
            homedir: self.gpg_homedir.clone(),
            timeout: self.verify_timeout,
        }
    }

    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            bind_addr: self.bind_addr,
            max_upload_bytes: self.max_upload_bytes,
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            bind_signatures: self.bind_signatures,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be used.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    /// The state directory does not exist.
    #[error("State directory {} does not exist", .0.display())]
    MissingStateDir(PathBuf),
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
        }
    }
}
