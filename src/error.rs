use std::path::PathBuf;
use thiserror::Error;

use crate::launcher::IperfVersion;

#[derive(Error, Debug)]
pub enum MonError {
    #[error("failed to execute {tool}: {source}")]
    Exec {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read pid file {path}: {source}")]
    PidFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pid file {path} holds {content:?}, not a pid")]
    PidParse { path: PathBuf, content: String },

    #[error("cannot parse iperf version from {0:?}")]
    VersionParse(String),

    #[error("iperf {0} is too old, daemon mode needs 3.1 or above")]
    UnsupportedVersion(IperfVersion),
}
