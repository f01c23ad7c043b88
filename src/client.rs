use std::fs;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{error, info, warn};

use crate::cli::{ClientOpts, Direction};
use crate::error::MonError;
use crate::invocation::TestInvocation;
use crate::launcher::{IperfLauncher, Launcher};

/// Per-direction results of one run. Never persisted, only narrated into
/// the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub forward: bool,
    pub reverse: bool,
}

impl RunOutcome {
    pub fn all_passed(self) -> bool {
        self.forward && self.reverse
    }
}

pub fn run(opts: ClientOpts) -> Result<()> {
    fs::create_dir_all(&opts.results_dir)
        .with_context(|| format!("create results dir {}", opts.results_dir.display()))?;

    // One timestamp groups every file of this run.
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let log_path = opts
        .results_dir
        .join(format!("{}{}_iperf_mon.log", opts.prefix, timestamp));
    crate::logging::init(&log_path)?;

    let mut launcher = IperfLauncher::new(&opts.iperf);
    let outcome = run_pair(&opts, &timestamp, &mut launcher);

    if outcome.all_passed() {
        info!("test pair completed");
        Ok(())
    } else {
        // The cron-era script always exited 0 here; reflecting the failure
        // in the exit status lets schedulers alert on it.
        error!("test pair completed with failures");
        bail!(
            "one or more iperf tests failed, see {}",
            log_path.display()
        );
    }
}

/// Runs the forward test, then the reverse test. A failed direction never
/// stops the other one.
pub(crate) fn run_pair(
    opts: &ClientOpts,
    timestamp: &str,
    launcher: &mut dyn Launcher,
) -> RunOutcome {
    info!("starting run {timestamp}");
    let forward = run_direction(opts, timestamp, Direction::Forward, launcher);
    let reverse = run_direction(opts, timestamp, Direction::Reverse, launcher);
    RunOutcome { forward, reverse }
}

fn run_direction(
    opts: &ClientOpts,
    timestamp: &str,
    direction: Direction,
    launcher: &mut dyn Launcher,
) -> bool {
    let output = opts.results_dir.join(format!(
        "{}{}{}.json",
        opts.prefix,
        timestamp,
        direction.result_suffix()
    ));
    let invocation = TestInvocation {
        duration: opts.duration,
        streams: opts.streams,
        direction,
        output,
        server: opts.server.clone(),
        extra: opts.extra.clone(),
    };

    info!("launching {} test", direction.describe());
    match call_with_retry(launcher, &invocation.args()) {
        Ok(true) => {
            info!("{} test succeeded", direction.describe());
            true
        }
        Ok(false) => {
            error!("{} test failed twice (retcode != 0)", direction.describe());
            false
        }
        Err(e) => {
            error!("{} test could not start: {e}", direction.describe());
            false
        }
    }
}

/// One retry on non-zero exit, then give up.
fn call_with_retry(launcher: &mut dyn Launcher, args: &[String]) -> Result<bool, MonError> {
    if launcher.call(args)? {
        return Ok(true);
    }
    warn!("iperf exited non-zero, trying again");
    launcher.call(args)
}
