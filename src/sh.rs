use nix::sys::wait::WaitStatus;

use crate::common::CliResult;
use crate::signal::ReapPolicy;

/// Process control as seen by the dispatch loop.
///
/// `argv[0]` is always the program path and is also passed to the program as
/// its own `argv[0]`. The command word of the input line is not part of it.
pub trait Launcher {
    /// Applies the SIGCHLD disposition for the current cycle.
    fn set_reap_policy(&mut self, policy: ReapPolicy) -> CliResult<()>;

    /// Forks, execs `argv` in the child and blocks until the child exits.
    fn spawn_foreground(&mut self, argv: &[String]) -> CliResult<WaitStatus>;

    /// Forks, execs `argv` in the child with its standard streams silenced,
    /// and returns without waiting.
    fn spawn_background(&mut self, argv: &[String]) -> CliResult<()>;

    /// Sends SIGTERM to `pid`.
    fn signal_by_id(&mut self, pid: i32) -> CliResult<()>;
}
