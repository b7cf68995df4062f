use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TailError {
    #[error("Could not open file:\n{source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not save file:\n{source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A poll of the bound file failed. Never stops the watcher.
    #[error("{source}")]
    WatchRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TailError {
    /// Title for the dialog that reports this error.
    pub fn title(&self) -> &'static str {
        match self {
            TailError::Open { .. } | TailError::Save { .. } => "Error",
            TailError::WatchRead { .. } => "Watcher Error",
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            TailError::Open { path, .. }
            | TailError::Save { path, .. }
            | TailError::WatchRead { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, TailError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_messages_and_titles() {
        let err = TailError::Open {
            path: PathBuf::from("log.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Could not open file:\ndenied");
        assert_eq!(err.title(), "Error");

        let err = TailError::WatchRead {
            path: PathBuf::from("log.txt"),
            source: io::Error::new(io::ErrorKind::Other, "disk gone"),
        };
        assert_eq!(err.to_string(), "disk gone");
        assert_eq!(err.title(), "Watcher Error");
        assert_eq!(err.path(), std::path::Path::new("log.txt"));
    }
}
