use std::fs;
use std::io;
use std::path::Path;

use crate::error::MonError;

/// Reads the PID recorded by iperf3's daemonization. The file is owned by
/// iperf3; a missing file means no daemon has been started yet.
pub fn read(path: &Path) -> Result<Option<u32>, MonError> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(MonError::PidFile {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    // iperf3 pads the first line with NUL bytes on some platforms.
    let line = raw.lines().next().unwrap_or("");
    let cleaned = line.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    cleaned
        .parse::<u32>()
        .map(Some)
        .map_err(|_| MonError::PidParse {
            path: path.to_path_buf(),
            content: cleaned.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read(&dir.path().join("iperf.pid")).unwrap(), None);
    }

    #[test]
    fn plain_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iperf.pid");
        fs::write(&path, "1234\n").unwrap();
        assert_eq!(read(&path).unwrap(), Some(1234));
    }

    #[test]
    fn nul_padded_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iperf.pid");
        fs::write(&path, b"1234\0\0\0").unwrap();
        assert_eq!(read(&path).unwrap(), Some(1234));
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iperf.pid");
        fs::write(&path, "not-a-pid\n").unwrap();
        assert!(matches!(
            read(&path),
            Err(MonError::PidParse { content, .. }) if content == "not-a-pid"
        ));
    }
}
