use std::path::{Path, PathBuf};

use crate::cli::Direction;

/// One iperf3 client invocation. Built fresh per run, immutable once built,
/// discarded after the child returns.
#[derive(Debug, Clone)]
pub struct TestInvocation {
    pub duration: u64,
    pub streams: u32,
    pub direction: Direction,
    pub output: PathBuf,
    pub server: String,
    pub extra: Vec<String>,
}

impl TestInvocation {
    /// Argument order iperf3 expects: timing and parallelism first, any
    /// pass-through args, `-c <server>` last.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        args.push("-t".into());
        args.push(self.duration.to_string());
        args.push("-P".into());
        args.push(self.streams.to_string());
        if self.direction == Direction::Reverse {
            args.push("--reverse".into());
        }
        args.push("--json".into());
        args.push("--logfile".into());
        args.push(self.output.display().to_string());
        args.extend(self.extra.iter().cloned());
        args.push("-c".into());
        args.push(self.server.clone());
        args
    }
}

/// Fixed argument set for the server side: record a PID file, listen,
/// detach into daemon mode.
pub fn daemon_args(pidfile: &Path) -> Vec<String> {
    vec![
        "--pidfile".into(),
        pidfile.display().to_string(),
        "-s".into(),
        "-D".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(direction: Direction) -> TestInvocation {
        TestInvocation {
            duration: 60,
            streams: 30,
            direction,
            output: PathBuf::from("iperf_results/run_client.json"),
            server: "10.0.0.5".to_string(),
            extra: Vec::new(),
        }
    }

    #[test]
    fn forward_args_exact() {
        let args = invocation(Direction::Forward).args();
        assert_eq!(
            args,
            [
                "-t",
                "60",
                "-P",
                "30",
                "--json",
                "--logfile",
                "iperf_results/run_client.json",
                "-c",
                "10.0.0.5",
            ]
        );
    }

    #[test]
    fn reverse_args_add_reverse_flag() {
        let args = invocation(Direction::Reverse).args();
        assert_eq!(
            args,
            [
                "-t",
                "60",
                "-P",
                "30",
                "--reverse",
                "--json",
                "--logfile",
                "iperf_results/run_client.json",
                "-c",
                "10.0.0.5",
            ]
        );
    }

    #[test]
    fn extra_args_sit_before_server() {
        let mut inv = invocation(Direction::Forward);
        inv.extra = vec!["--bind".to_string(), "10.0.0.9".to_string()];
        let args = inv.args();
        let bind = args.iter().position(|a| a == "--bind").unwrap();
        let server = args.iter().position(|a| a == "-c").unwrap();
        assert!(bind < server);
        assert_eq!(args.last().unwrap(), "10.0.0.5");
    }

    #[test]
    fn daemon_args_exact() {
        assert_eq!(
            daemon_args(Path::new("/var/run/iperf.pid")),
            ["--pidfile", "/var/run/iperf.pid", "-s", "-D"]
        );
    }
}
