use anyhow::Result;
use clap::Parser;

mod cli;
mod client;
mod error;
mod invocation;
mod launcher;
mod logging;
mod pidfile;
mod probe;
mod server;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    match args.cmd {
        cli::Cmd::Client(opts) => client::run(opts),
        cli::Cmd::Server(opts) => server::run(opts),
    }
}
