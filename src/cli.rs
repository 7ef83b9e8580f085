use std::fs;
use std::io::{BufRead, Write};
use tracing::{debug, error};

use crate::args::{self, tokenize, Args};
use crate::command::{classify, Command};
use crate::common::*;
use crate::script::{self, ScriptOutcome};
use crate::settings::Settings;
use crate::sh::Launcher;
use crate::signal::ReapPolicy;

pub const HELP: &str = "Commands:
\trun path [args]\t\tRuns the program located at path
\tbackground path [args]\tRuns the program located at path in the background
\tmurder pid\t\tKills the process specified by pid
\tscript\t\t\tWrites a bash script, then runs and/or saves it
\thelp\t\t\tDisplays this menu
\tquit\t\t\tExits
";

/// What the loop does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Continue,
    Exit(i32),
}

/// The read, classify, launch loop.
pub struct Cli<L, R, O, E> {
    launcher: L,
    input: R,
    out: O,
    err: E,
    settings: Settings,
}

impl<L, R, O, E> Cli<L, R, O, E>
where
    L: Launcher,
    R: BufRead,
    O: Write,
    E: Write,
{
    pub fn new(launcher: L, input: R, out: O, err: E, settings: Settings) -> Cli<L, R, O, E> {
        Cli {
            launcher,
            input,
            out,
            err,
            settings,
        }
    }

    /// Runs until `quit`, end of input or a fatal error and returns the exit
    /// status for the process.
    pub fn go(&mut self) -> i32 {
        loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Exit(code)) => return code,
                Err(e) if e.is_fatal() => {
                    error!("{}", e);
                    let _ = writeln!(self.err, "Failed to fork, exiting...");
                    let _ = self.err.flush();
                    return 1;
                }
                Err(e) => {
                    let _ = writeln!(self.err, "{}", e);
                    let _ = self.err.flush();
                }
            }
        }
    }

    /// Prompts, reads one line and dispatches it.
    pub fn step(&mut self) -> CliResult<Step> {
        if self.settings.emit_prompt {
            write!(self.out, "{}", self.settings.prompt)?;
        }
        self.out.flush()?;

        let mut line = String::new();
        match args::read_line(&mut self.input, &mut line) {
            Ok(0) => {
                debug!("end of input");
                Ok(Step::Exit(0))
            }
            Ok(_) => self.dispatch(&line),
            Err(e) => {
                error!("reading input: {}", e);
                writeln!(self.err, "{}", e)?;
                Ok(Step::Exit(1))
            }
        }
    }

    pub fn dispatch(&mut self, line: &str) -> CliResult<Step> {
        let args = tokenize(line);
        let cmd = classify(&args, &mut self.out)?;
        debug!("{:?} <- {:?}", cmd, args);

        if cmd == Command::Quit {
            return Ok(Step::Exit(0));
        }

        let policy = match cmd {
            Command::Background => ReapPolicy::Ignore,
            _ => ReapPolicy::Default,
        };
        self.launcher.set_reap_policy(policy)?;

        match cmd {
            Command::Murder => self.murder(&args)?,
            Command::Help => {
                write!(self.out, "{}", HELP)?;
            }
            Command::Script => self.script()?,
            Command::Run => {
                let argv = program(&args, "run")?;
                self.flush()?;
                let status = self.launcher.spawn_foreground(argv)?;
                debug!("run finished: {:?}", status);
            }
            Command::Background => {
                let argv = program(&args, "background")?;
                self.flush()?;
                self.launcher.spawn_background(argv)?;
            }
            Command::Quit | Command::Invalid(_) => {}
        }
        Ok(Step::Continue)
    }

    fn murder(&mut self, args: &Args) -> CliResult<()> {
        let pid = parse_pid(args.get(1))?;
        self.launcher.signal_by_id(pid)?;
        writeln!(self.out, "Successfully killed process {}", pid)?;
        Ok(())
    }

    fn script(&mut self) -> CliResult<()> {
        let outcome = match script::capture(
            &mut self.input,
            &mut self.out,
            &mut self.err,
            &self.settings,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(self.err, "Script Error: {}", e)?;
                return Ok(());
            }
        };

        let path = match outcome {
            ScriptOutcome::Run(path) => path,
            ScriptOutcome::Abandon => return Ok(()),
        };
        let argv = vec![
            self.settings.shell.clone(),
            path.to_string_lossy().into_owned(),
        ];
        self.flush()?;
        let status = self.launcher.spawn_foreground(&argv);
        if let Err(e) = fs::remove_file(&path) {
            writeln!(self.err, "Error deleting temp script file: {}", e)?;
        }
        debug!("script finished: {:?}", status);
        status.map(|_| ())
    }

    fn flush(&mut self) -> CliResult<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }
}

/// Operands of `run`/`background`: the program path followed by its arguments.
fn program<'a>(args: &'a Args, name: &'static str) -> CliResult<&'a [String]> {
    let argv = args.operands();
    if argv.is_empty() {
        return Err(CliError::MissingOperand(name, "program path"));
    }
    Ok(argv)
}

fn parse_pid(operand: Option<&str>) -> CliResult<i32> {
    let text = operand.ok_or(CliError::MissingOperand("murder", "pid"))?;
    match text.parse::<i32>() {
        // 0 and negative ids address process groups, including our own
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(CliError::InvalidPid(text.to_owned())),
    }
}
