use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use crate::cli::ServerOpts;
use crate::error::MonError;
use crate::invocation::daemon_args;
use crate::launcher::{IperfLauncher, Launcher};
use crate::pidfile;
use crate::probe::{ProcessProbe, SystemProbe};

/// Liveness as seen through the PID file, evaluated fresh every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Running,
    NotRunning,
}

/// What the supervisor did this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supervision {
    AlreadyRunning,
    Respawned,
    RespawnFailed,
}

pub fn run(opts: ServerOpts) -> Result<()> {
    crate::logging::init(&opts.log)?;
    let mut launcher = IperfLauncher::new(&opts.iperf);
    let mut probe = SystemProbe::new();
    match supervise(&opts, &mut launcher, &mut probe)? {
        Supervision::AlreadyRunning | Supervision::Respawned => Ok(()),
        Supervision::RespawnFailed => {
            bail!("iperf could not be confirmed running after respawn")
        }
    }
}

/// Check, spawn if dead, settle, check again. The spawn is fire-and-forget
/// (the tool detaches), so only the second check tells whether it worked.
pub(crate) fn supervise(
    opts: &ServerOpts,
    launcher: &mut dyn Launcher,
    probe: &mut dyn ProcessProbe,
) -> Result<Supervision> {
    if check(&opts.pidfile, probe) == Liveness::Running {
        info!("iperf is running");
        return Ok(Supervision::AlreadyRunning);
    }

    warn!("iperf is not running, spawning");
    let version = launcher.version().context("query iperf version")?;
    if !version.supports_daemon() {
        error!("iperf {version} cannot daemonize");
        return Err(MonError::UnsupportedVersion(version).into());
    }
    launcher.spawn_detached(&daemon_args(&opts.pidfile))?;

    // Give the daemon a moment to write its PID file; helps slow hosts.
    thread::sleep(Duration::from_millis(opts.settle_ms));

    if check(&opts.pidfile, probe) == Liveness::Running {
        info!("iperf launched successfully");
        Ok(Supervision::Respawned)
    } else {
        error!("unable to launch iperf");
        Ok(Supervision::RespawnFailed)
    }
}

/// A missing, unreadable, or stale PID file all read as NotRunning.
pub(crate) fn check(path: &Path, probe: &mut dyn ProcessProbe) -> Liveness {
    match pidfile::read(path) {
        Ok(Some(pid)) if probe.is_alive(pid) => Liveness::Running,
        Ok(Some(_)) | Ok(None) => Liveness::NotRunning,
        Err(e) => {
            warn!("ignoring pid file: {e}");
            Liveness::NotRunning
        }
    }
}
