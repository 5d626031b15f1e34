//! # Role Matching
//!
//! The only rule deciding which processes a role refresh may touch. A
//! process belongs to a role iff all of these hold:
//!
//! 1. its executable name is the runtime's (`comm` is truncated by the
//!    kernel to 15 bytes, so a truncated prefix also matches);
//! 2. its invocation has exactly one argument after the program path;
//! 3. the program path argument contains the program's file name;
//! 4. that last argument contains the role tag.
//!
//! The supervising process itself never matches.

use super::entities::{ProcessDescriptor, Runtime};
use shared_types::Role;

/// Kernel limit on `comm` (16 bytes including the terminator).
const COMM_LEN: usize = 15;

/// Exact-match predicate over process descriptors.
#[derive(Debug, Clone)]
pub struct RoleMatcher {
    process_name: String,
    program_name: String,
    argc: usize,
    own_pid: u32,
}

impl RoleMatcher {
    pub fn new(runtime: &Runtime) -> Self {
        Self::with_own_pid(runtime, std::process::id())
    }

    pub fn with_own_pid(runtime: &Runtime, own_pid: u32) -> Self {
        Self {
            process_name: runtime.process_name(),
            program_name: runtime.program_name(),
            argc: runtime.expected_argc(),
            own_pid,
        }
    }

    pub fn matches(&self, process: &ProcessDescriptor, role: Role) -> bool {
        if process.pid == self.own_pid || !self.name_matches(&process.name) {
            return false;
        }
        if process.argv.len() != self.argc {
            return false;
        }
        let program_arg = &process.argv[self.argc - 2];
        let role_arg = &process.argv[self.argc - 1];
        program_arg.contains(&self.program_name) && role_arg.contains(role.tag())
    }

    fn name_matches(&self, name: &str) -> bool {
        name == self.process_name
            || (name.len() == COMM_LEN && self.process_name.starts_with(name))
    }
}
