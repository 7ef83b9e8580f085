use nix::fcntl::{self, OFlag};
use nix::sys::signal::{self, Signal};
use nix::sys::stat::Mode;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};
use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

use crate::common::*;
use crate::settings::Settings;
use crate::sh::Launcher;
use crate::signal::{set_child_reaping, ReapPolicy};

/// `Launcher` backed by fork/exec/kill.
#[derive(Debug)]
pub struct Rterm {
    null_device: PathBuf,
    background_grace: Duration,
}

impl Rterm {
    pub fn new(settings: &Settings) -> Rterm {
        Rterm {
            null_device: settings.null_device.clone(),
            background_grace: settings.background_grace,
        }
    }
}

impl Default for Rterm {
    fn default() -> Self {
        Rterm::new(&Settings::default())
    }
}

impl Launcher for Rterm {
    fn set_reap_policy(&mut self, policy: ReapPolicy) -> CliResult<()> {
        set_child_reaping(policy).map_err(CliError::Disposition)
    }

    fn spawn_foreground(&mut self, argv: &[String]) -> CliResult<WaitStatus> {
        // single-threaded loop, and the child only writes and execs
        match unsafe { unistd::fork() } {
            Ok(ForkResult::Child) => Rterm::exec(argv),
            Ok(ForkResult::Parent { child, .. }) => {
                debug!("foreground child {} for {:?}", child, argv);
                let status = wait::waitpid(child, None).map_err(CliError::Wait)?;
                debug!("child {} finished: {:?}", child, status);
                Ok(status)
            }
            Err(e) => {
                error!("fork failed: {}", e);
                Err(CliError::Fork(e))
            }
        }
    }

    fn spawn_background(&mut self, argv: &[String]) -> CliResult<()> {
        // same as above, the child redirects and execs
        match unsafe { unistd::fork() } {
            Ok(ForkResult::Child) => {
                // the pid has to be out before the streams go to the null device
                let _ = writeln!(io::stdout(), "PID = {}", unistd::getpid());
                let _ = io::stdout().flush();
                if let Err(e) = self.silence() {
                    let _ = writeln!(io::stderr(), "{}: {}", self.null_device.display(), e);
                    process::exit(1);
                }
                Rterm::exec(argv)
            }
            Ok(ForkResult::Parent { child, .. }) => {
                debug!("background child {} for {:?}", child, argv);
                thread::sleep(self.background_grace);
                Ok(())
            }
            Err(e) => {
                error!("fork failed: {}", e);
                Err(CliError::Fork(e))
            }
        }
    }

    fn signal_by_id(&mut self, pid: i32) -> CliResult<()> {
        debug!("SIGTERM -> {}", pid);
        signal::kill(Pid::from_raw(pid), Signal::SIGTERM)
            .map_err(|source| CliError::Signal { pid, source })
    }
}

impl Rterm {
    /// Child side of a launch: replaces the process image with `argv[0]`.
    /// Getting past `execv` means the launch failed, so the child exits 1.
    fn exec(argv: &[String]) -> ! {
        {
            let mut out = io::stdout();
            let _ = writeln!(out, "Executing: {}", argv.join(" "));
            let _ = out.flush();
        }

        let array = match argv
            .iter()
            .map(|x| CString::new(x.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(array) => array,
            Err(e) => {
                let _ = writeln!(io::stderr(), "Error: {}", e);
                process::exit(1);
            }
        };
        if array.is_empty() {
            let _ = writeln!(io::stderr(), "Error: nothing to execute");
            process::exit(1);
        }
        let parts: Vec<&CStr> = array.iter().map(|x| x.as_c_str()).collect();

        let e = match unistd::execv(&array[0], &parts) {
            Ok(never) => match never {},
            Err(e) => e,
        };
        let _ = writeln!(io::stderr(), "Error: {} occurred ({})", errno_code(&e), e);
        let _ = io::stderr().flush();
        process::exit(1);
    }

    fn silence(&self) -> nix::Result<()> {
        let fd = fcntl::open(self.null_device.as_path(), OFlag::O_RDWR, Mode::empty())?;
        for &target in &[libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
            unistd::dup2(fd, target)?;
        }
        if fd > libc::STDERR_FILENO {
            unistd::close(fd)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    fn init() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    #[test]
    fn signal_missing_process_is_an_error() {
        init();
        let mut rterm = Rterm::default();
        match rterm.signal_by_id(999999) {
            Err(CliError::Signal { pid, source }) => {
                assert_eq!(pid, 999999);
                assert_eq!(source.as_errno(), Some(Errno::ESRCH));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn settings_are_picked_up() {
        let settings = Settings {
            null_device: PathBuf::from("/tmp/nothing"),
            background_grace: Duration::from_millis(5),
            ..Settings::default()
        };
        let rterm = Rterm::new(&settings);
        assert_eq!(rterm.null_device, PathBuf::from("/tmp/nothing"));
        assert_eq!(rterm.background_grace, Duration::from_millis(5));
    }
}
