use std::io;

use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("fork: {0}")]
    Fork(#[source] nix::Error),

    #[error("waitpid: {0}")]
    Wait(#[source] nix::Error),

    #[error("SIGCHLD disposition: {0}")]
    Disposition(#[source] nix::Error),

    #[error("PID {pid} not terminated error {}", errno_code(.source))]
    Signal {
        pid: i32,
        #[source]
        source: nix::Error,
    },

    #[error("murder: invalid pid '{0}'")]
    InvalidPid(String),

    #[error("{0}: missing {1}")]
    MissingOperand(&'static str, &'static str),

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Only a failed fork takes the interpreter down.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::Fork(_))
    }
}

/// Platform error number behind a nix error, -1 when there is none.
pub fn errno_code(e: &nix::Error) -> i32 {
    e.as_errno().map_or(-1, |errno| errno as i32)
}
