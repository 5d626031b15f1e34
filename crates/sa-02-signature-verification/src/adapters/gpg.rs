//! # GnuPG Adapter
//!
//! Drives `gpg` as a subprocess. Both operations are bounded by
//! [`GpgConfig::timeout`]; an overrunning child is killed when its future is
//! dropped.

use crate::domain::entities::ToolOutput;
use crate::domain::errors::VerificationError;
use crate::domain::output::parse_verification;
use crate::ports::outbound::DocumentVerifier;
use shared_types::Identity;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Signing-tool configuration.
#[derive(Debug, Clone)]
pub struct GpgConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Optional keyring directory passed as `--homedir`.
    pub homedir: Option<PathBuf>,
    /// Upper bound for a single invocation.
    pub timeout: Duration,
}

impl Default for GpgConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("gpg"),
            homedir: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// [`DocumentVerifier`] backed by the `gpg` command-line tool.
pub struct GpgVerifier {
    config: GpgConfig,
}

impl GpgVerifier {
    pub fn new(config: GpgConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg("--batch")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(homedir) = &self.config.homedir {
            cmd.arg("--homedir").arg(homedir);
        }
        cmd
    }

    async fn run(&self, mut cmd: Command) -> Result<ToolOutput, VerificationError> {
        let limit = self.config.timeout;
        let output = tokio::time::timeout(limit, cmd.output())
            .await
            .map_err(|_| {
                warn!("[sa-02] signing tool exceeded {:?}", limit);
                VerificationError::Timeout(limit)
            })?
            .map_err(|e| VerificationError::Io(e.to_string()))?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[async_trait::async_trait]
impl DocumentVerifier for GpgVerifier {
    async fn verify(&self, document: &Path) -> Result<Identity, VerificationError> {
        let mut cmd = self.command();
        cmd.arg("--verify").arg(document);

        let output = self.run(cmd).await?;
        let identity = parse_verification(&output)?;
        debug!(identity = %identity, "[sa-02] good signature");
        Ok(identity)
    }

    async fn extract_payload(&self, document: &Path) -> Result<Vec<u8>, VerificationError> {
        let mut cmd = self.command();
        cmd.arg("--decrypt").arg(document);

        let output = self.run(cmd).await?;
        if !output.success() {
            return Err(VerificationError::ToolFailed {
                status: output.status,
                diagnostic: output.diagnostic(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script standing in for the signing tool.
    fn fake_tool(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-gpg");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn verifier(binary: PathBuf, timeout: Duration) -> GpgVerifier {
        GpgVerifier::new(GpgConfig {
            binary,
            homedir: None,
            timeout,
        })
    }

    #[tokio::test]
    async fn test_verify_reads_signer() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(
            dir.path(),
            r#"echo "gpg: Signature made today" >&2
echo "gpg:                using RSA key ABCDEF0123456789" >&2
echo "gpg: Good signature from \"Ted\"" >&2"#,
        );
        let doc = dir.path().join("doc.asc");
        std::fs::write(&doc, b"signed").unwrap();

        let id = verifier(tool, Duration::from_secs(5))
            .verify(&doc)
            .await
            .unwrap();
        assert_eq!(id.as_str(), "ABCDEF0123456789");
    }

    #[tokio::test]
    async fn test_verify_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "sleep 5");
        let doc = dir.path().join("doc.asc");
        std::fs::write(&doc, b"signed").unwrap();

        let err = verifier(tool, Duration::from_millis(100))
            .verify(&doc)
            .await
            .unwrap_err();
        assert_eq!(err, VerificationError::Timeout(Duration::from_millis(100)));
        assert!(err.is_infrastructure());
    }

    #[tokio::test]
    async fn test_missing_tool_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = verifier(dir.path().join("absent"), Duration::from_secs(1))
            .verify(&dir.path().join("doc.asc"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Io(_)));
    }

    #[tokio::test]
    async fn test_extract_payload_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(dir.path(), "printf 'payload'");
        let payload = verifier(tool, Duration::from_secs(5))
            .extract_payload(&dir.path().join("doc.asc"))
            .await
            .unwrap();
        assert_eq!(payload, b"payload");
    }
}
