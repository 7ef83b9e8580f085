use nix::sys::signal::{self, SigHandler, Signal};
use tracing::debug;

/// Disposition of SIGCHLD for the current dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReapPolicy {
    /// Finished children are discarded by the kernel, nobody waits on them.
    Ignore,
    /// Children stay around until waited on.
    Default,
}

impl ReapPolicy {
    fn handler(self) -> SigHandler {
        match self {
            ReapPolicy::Ignore => SigHandler::SigIgn,
            ReapPolicy::Default => SigHandler::SigDfl,
        }
    }
}

pub fn set_child_reaping(policy: ReapPolicy) -> nix::Result<()> {
    debug!("SIGCHLD disposition -> {:?}", policy);
    // only the built-in dispositions are installed, no handler code runs
    unsafe { signal::signal(Signal::SIGCHLD, policy.handler()) }.map(|_| ())
}
