//! # Process Entities

use shared_types::Role;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A running process as seen by the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescriptor {
    pub pid: u32,
    /// Executable name as reported by the kernel (`comm`).
    pub name: String,
    /// Full invocation, `argv[0]` included.
    pub argv: Vec<String>,
}

impl ProcessDescriptor {
    pub fn new(pid: u32, name: impl Into<String>, argv: &[&str]) -> Self {
        Self {
            pid,
            name: name.into(),
            argv: argv.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// How the authoritative program is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Runtime {
    /// `<program> --<role>`
    Native { program: PathBuf },
    /// `<interpreter> <program> --<role>`
    Interpreted {
        interpreter: PathBuf,
        program: PathBuf,
    },
}

impl Runtime {
    /// `Interpreted` when an interpreter is configured, `Native` otherwise.
    pub fn new(program: impl Into<PathBuf>, interpreter: Option<PathBuf>) -> Self {
        let program = program.into();
        match interpreter {
            Some(interpreter) => Self::Interpreted {
                interpreter,
                program,
            },
            None => Self::Native { program },
        }
    }

    pub fn program(&self) -> &Path {
        match self {
            Self::Native { program } | Self::Interpreted { program, .. } => program,
        }
    }

    /// Executable the kernel reports for a running instance.
    pub fn process_name(&self) -> String {
        let executable = match self {
            Self::Native { program } => program,
            Self::Interpreted { interpreter, .. } => interpreter,
        };
        file_name(executable)
    }

    /// File name of the program, as it appears in a running invocation.
    pub fn program_name(&self) -> String {
        file_name(self.program())
    }

    /// Number of arguments of a well-formed role invocation.
    pub fn expected_argc(&self) -> usize {
        match self {
            Self::Native { .. } => 2,
            Self::Interpreted { .. } => 3,
        }
    }

    /// Full invocation for `role`, `argv[0]` included.
    pub fn command_line(&self, role: Role) -> Vec<OsString> {
        match self {
            Self::Native { program } => vec![program.into(), role.flag().into()],
            Self::Interpreted {
                interpreter,
                program,
            } => vec![interpreter.into(), program.into(), role.flag().into()],
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
