//! Handshake fingerprints from external utilities.
//!
//! Runs `ctls`, `ztls` and `openssl s_client` against a target and keeps their
//! combined output as diagnostic text. These results never influence the
//! resolved hostname.

use std::process::Stdio;
use std::time::Duration;

use log::debug;
use tokio::process::Command;

use crate::models::Target;

/// External fingerprinting utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintKind {
    /// `ctls <ip:port>`
    Ctls,
    /// `ztls <ip:port>`
    Ztls,
    /// `openssl s_client -connect <ip:port>`
    OpenSsl,
}

impl FingerprintKind {
    /// Every collector, in emission order.
    pub const ALL: [FingerprintKind; 3] = [
        FingerprintKind::Ctls,
        FingerprintKind::Ztls,
        FingerprintKind::OpenSsl,
    ];

    /// Executable name looked up on `PATH`.
    pub fn program(&self) -> &'static str {
        match self {
            FingerprintKind::Ctls => "ctls",
            FingerprintKind::Ztls => "ztls",
            FingerprintKind::OpenSsl => "openssl",
        }
    }

    /// Command-line arguments for probing `authority` (`ip:port`).
    pub fn args(&self, authority: &str) -> Vec<String> {
        match self {
            FingerprintKind::Ctls | FingerprintKind::Ztls => vec![authority.to_string()],
            FingerprintKind::OpenSsl => vec![
                "s_client".to_string(),
                "-connect".to_string(),
                authority.to_string(),
            ],
        }
    }
}

/// Collects one fingerprint summary for a target.
///
/// Never fails: a missing tool, a non-zero exit or a timeout produces an
/// `error: ...` string instead of the tool output.
pub async fn fingerprint(target: &Target, timeout: Duration, kind: FingerprintKind) -> String {
    run_tool(kind.program(), &kind.args(&target.authority()), timeout).await
}

/// Runs `program` with stdin closed and returns its trimmed stdout+stderr.
///
/// On a non-zero exit the output follows the exit status in the error text.
pub(crate) async fn run_tool(program: &str, args: &[String], timeout: Duration) -> String {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!("Failed to run {program}: {e}");
            return format!("error: failed to run {program}: {e}");
        }
        Err(_) => {
            debug!("{program} timed out after {}s", timeout.as_secs_f64());
            return format!("error: {program} timed out after {}s", timeout.as_secs_f64());
        }
    };

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim();

    if !output.status.success() {
        debug!("{program} exited with {}", output.status);
        if combined.is_empty() {
            return format!("error: {program} {}", output.status);
        }
        return format!("error: {program} {}: {combined}", output.status);
    }

    combined.to_string()
}
