//! # Tool Output Parsing
//!
//! Reads the signer out of `gpg --verify` diagnostics:
//!
//! ```text
//! gpg: Signature made Tue 01 Jan 2019 00:00:00 UTC
//! gpg:                using RSA key 3E430BA8997F61554719E47A7854BF294E6DBC84
//! gpg: Good signature from "Ted <ted@example.org>" [ultimate]
//! ```

use super::entities::ToolOutput;
use super::errors::VerificationError;
use shared_types::Identity;

/// Marker the tool prints on stderr for a valid signature.
pub const GOOD_SIGNATURE_MARKER: &str = "Good signature";

/// Interpret a verification run, returning the signer identity.
pub fn parse_verification(output: &ToolOutput) -> Result<Identity, VerificationError> {
    if !output.success() {
        return Err(VerificationError::ToolFailed {
            status: output.status,
            diagnostic: output.diagnostic(),
        });
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains(GOOD_SIGNATURE_MARKER) {
        return Err(VerificationError::NoGoodSignature(output.diagnostic()));
    }

    signer_from_diagnostics(&stderr)
        .ok_or_else(|| VerificationError::UnparsableSigner(output.diagnostic()))
}

fn signer_from_diagnostics(stderr: &str) -> Option<Identity> {
    let lines: Vec<&str> = stderr.trim().lines().collect();

    let key_line = lines
        .iter()
        .find(|line| line.contains("using") && line.contains(" key "))
        .or_else(|| lines.get(1))?;

    let token = key_line.split_whitespace().last()?;
    let identity = Identity::new(token);
    (!identity.is_empty() && token.chars().all(|c| c.is_ascii_hexdigit())).then_some(identity)
}
