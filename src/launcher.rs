use std::fmt;
use std::process::{Command, Stdio};

use crate::error::MonError;

/// iperf3 version as reported by `--version`. Daemon mode (`-D` with
/// `--pidfile`) needs 3.1 or above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IperfVersion {
    pub major: u32,
    pub minor: u32,
}

impl IperfVersion {
    pub fn supports_daemon(self) -> bool {
        (self.major, self.minor) >= (3, 1)
    }
}

impl fmt::Display for IperfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Seam to the external tool, so the runner and supervisor can be exercised
/// against scripted fakes.
pub trait Launcher {
    /// Blocking invocation. Ok(true) iff the child exited zero.
    fn call(&mut self, args: &[String]) -> Result<bool, MonError>;

    /// Start the tool and return without waiting. The child daemonizes, so
    /// its exit code is never observable here; "spawn attempted" is all
    /// this can report.
    fn spawn_detached(&mut self, args: &[String]) -> Result<(), MonError>;

    fn version(&mut self) -> Result<IperfVersion, MonError>;
}

pub struct IperfLauncher {
    executable: String,
}

impl IperfLauncher {
    pub fn new(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
        }
    }

    fn exec_error(&self, source: std::io::Error) -> MonError {
        MonError::Exec {
            tool: self.executable.clone(),
            source,
        }
    }
}

impl Launcher for IperfLauncher {
    fn call(&mut self, args: &[String]) -> Result<bool, MonError> {
        let status = Command::new(&self.executable)
            .args(args)
            .status()
            .map_err(|e| self.exec_error(e))?;
        Ok(status.success())
    }

    fn spawn_detached(&mut self, args: &[String]) -> Result<(), MonError> {
        Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| self.exec_error(e))
    }

    fn version(&mut self) -> Result<IperfVersion, MonError> {
        let out = Command::new(&self.executable)
            .arg("--version")
            .output()
            .map_err(|e| self.exec_error(e))?;
        parse_version(&String::from_utf8_lossy(&out.stdout))
    }
}

/// First line looks like `iperf 3.9 (cJSON 1.7.13)`.
pub fn parse_version(text: &str) -> Result<IperfVersion, MonError> {
    let bad = || MonError::VersionParse(text.lines().next().unwrap_or("").to_string());
    let token = text.split_whitespace().nth(1).ok_or_else(bad)?;
    let mut parts = token.split('.');
    let major = parts.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    let minor = parts
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    Ok(IperfVersion { major, minor })
}
