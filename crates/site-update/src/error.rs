//! Error types for site-update

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using site-update's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors produced during an update attempt
///
/// Every variant is terminal for the current run: the orchestrator does not
/// retry or continue past any of them.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The command was not run with elevated privileges
    #[error("updating the site binary requires elevated privileges (try sudo)")]
    PrivilegeRequired,

    /// A request exceeded its timeout and was aborted
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The remote peer reset the connection mid-transfer
    #[error("connection reset while fetching {url}")]
    ConnectionReset { url: String },

    /// Nothing is listening at the release host
    #[error("connection refused by {url}")]
    ConnectionRefused { url: String },

    /// Any other transport-level failure
    #[error("transport error fetching {url}: {detail}")]
    Transport { url: String, detail: String },

    /// The release host answered with a status other than 200
    #[error("unexpected HTTP status {code} from {url}")]
    UnexpectedStatus { code: u16, url: String },

    /// The release archive contained an entry that is not the executable
    #[error("unexpected entry in release archive: {name}")]
    UnexpectedEntry { name: String },

    /// The release archive could not be parsed at all
    #[error("malformed release archive: {0}")]
    MalformedArchive(String),

    /// A filesystem operation on the installed binary failed
    #[error("{op} failed for {}: {source}", path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host OS/architecture has no published binaries
    #[error("no binaries are published for this platform ({os}/{arch})")]
    UnsupportedPlatform { os: String, arch: String },

    /// The managed daemon could not be restarted after the swap
    #[error("failed to restart the managed daemon: {0}")]
    DaemonRestart(String),

    /// The update configuration file could not be read or parsed
    #[error("invalid update configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}

impl UpdateError {
    /// Create a filesystem error for an operation on a path
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error; every update failure exits 1
    pub fn exit_code(&self) -> i32 {
        1
    }
}
