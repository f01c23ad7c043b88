use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "iperf-mon",
    about = "iperf3 wrapper: timed client test pairs & server daemon watchdog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Cmd {
    /// Run a forward/reverse throughput test pair against a server
    Client(ClientOpts),
    /// Check the iperf3 daemon via its PID file, respawn if dead
    Server(ServerOpts),
}

#[derive(Args, Debug, Clone)]
pub struct ClientOpts {
    /// iperf3 server address
    #[arg(long)]
    pub server: String,
    /// Test duration per direction, in seconds
    #[arg(long, default_value_t = 60)]
    pub duration: u64,
    /// Number of parallel streams
    #[arg(long, default_value_t = 30)]
    pub streams: u32,
    /// Directory for JSON results and the per-run log
    #[arg(long, default_value = "iperf_results")]
    pub results_dir: PathBuf,
    /// Prefix shared by all files of a run
    #[arg(long, default_value = "")]
    pub prefix: String,
    /// iperf executable to invoke
    #[arg(long, default_value = "iperf3")]
    pub iperf: String,
    /// Extra argument passed through to iperf3 (repeatable)
    #[arg(long = "extra", value_name = "ARG")]
    pub extra: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ServerOpts {
    /// PID file written by the daemonized iperf3
    #[arg(long, default_value = "iperf.pid")]
    pub pidfile: PathBuf,
    /// Rolling monitor log
    #[arg(long, default_value = "iperf_monitor.log")]
    pub log: PathBuf,
    /// iperf executable to invoke
    #[arg(long, default_value = "iperf3")]
    pub iperf: String,
    /// Delay before re-checking liveness after a spawn, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub settle_ms: u64,
}

/// Typed test direction to replace ad-hoc reverse flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Suffix of the JSON result file: forward tests measure the client's
    /// uplink, reverse tests the server's.
    pub fn result_suffix(self) -> &'static str {
        match self {
            Direction::Forward => "_client",
            Direction::Reverse => "_server",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Direction::Forward => "client to server",
            Direction::Reverse => "server to client",
        }
    }
}
