//! Script capture: collects lines of shell script until a terminator line
//! (`:q`, `:qr`, `:qs <file>`) and leaves the result in the transient file.

use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::args::{read_line, tokenize};
use crate::common::CliResult;
use crate::settings::Settings;

const INTRO: &str = "\
Type your script in bash syntax and use :q on a newline to quit
Use :qr to quit and run the script, without saving to file
Use :qs [filename] to quit, run the script and save to filename
NOTE: (important) This module saves the bash file to filename=";

/// How a capture session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptOutcome {
    /// Nothing to run, nothing saved.
    Abandon,
    /// The script sits in this transient file and should be run.
    Run(PathBuf),
}

#[derive(Debug, Error, PartialEq)]
#[error("script buffer full ({capacity} bytes)")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

/// Script text with a hard upper size.
#[derive(Debug, Clone)]
pub struct ScriptBuffer {
    text: String,
    capacity: usize,
}

impl ScriptBuffer {
    pub fn with_capacity(capacity: usize) -> ScriptBuffer {
        ScriptBuffer {
            text: String::new(),
            capacity,
        }
    }

    /// Appends `line` as is. A line that does not fit is rejected whole.
    pub fn push_line(&mut self, line: &str) -> Result<(), CapacityExceeded> {
        if self.text.len() + line.len() > self.capacity {
            return Err(CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.text.push_str(line);
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Runs one capture session, reading lines from `input`.
///
/// The transient file is created before the first line is read; failing to
/// create it is returned as an error and nothing is captured. Every outcome
/// other than [`ScriptOutcome::Run`], errors included, removes the transient
/// file again.
pub fn capture<R, O, E>(
    input: &mut R,
    out: &mut O,
    err: &mut E,
    settings: &Settings,
) -> CliResult<ScriptOutcome>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let transient = settings.transient_script.as_path();
    writeln!(out, "{}{},", INTRO, transient.display())?;
    writeln!(out, "make sure you dont have any files named {} in this directory!", transient.display())?;
    out.flush()?;

    let temp = File::create(transient)?;
    debug!("script session started, transient file {}", transient.display());

    let outcome = collect(input, err, temp, settings);
    if outcome.as_ref().map_or(true, |o| *o == ScriptOutcome::Abandon) {
        match fs::remove_file(transient) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                writeln!(err, "Error deleting temp script file: {}", e)?;
            }
            _ => {}
        }
        debug!("script session abandoned");
    }
    outcome
}

fn collect<R, E>(
    input: &mut R,
    err: &mut E,
    mut temp: File,
    settings: &Settings,
) -> CliResult<ScriptOutcome>
where
    R: BufRead,
    E: Write,
{
    let transient = settings.transient_script.as_path();
    let mut buffer = ScriptBuffer::with_capacity(settings.script_capacity);
    let mut line = String::new();
    loop {
        line.clear();
        if read_line(input, &mut line)? == 0 {
            writeln!(err, "End of input, script abandoned")?;
            return Ok(ScriptOutcome::Abandon);
        }

        let args = tokenize(&line);
        match args.first() {
            Some(":q") => return Ok(ScriptOutcome::Abandon),
            Some(":qr") | Some(":qs") => {
                if args.first() == Some(":qs") {
                    match args.get(1) {
                        Some(name) => {
                            if let Err(e) = save_copy(Path::new(name), &buffer) {
                                writeln!(err, "Could not save script to {}: {}, not saving", name, e)?;
                            }
                        }
                        None => writeln!(err, "Invalid user specified filename, not saving")?,
                    }
                }
                temp.write_all(buffer.as_str().as_bytes())?;
                temp.flush()?;
                debug!("script of {} bytes ready to run", buffer.len());
                return Ok(ScriptOutcome::Run(transient.to_path_buf()));
            }
            _ => {
                if let Err(e) = buffer.push_line(&line) {
                    debug!("{}", e);
                    writeln!(err, "Script buffer full, abandoning script")?;
                    return Ok(ScriptOutcome::Abandon);
                }
            }
        }
    }
}

fn save_copy(path: &Path, buffer: &ScriptBuffer) -> io::Result<()> {
    // start from a fresh file rather than truncating whatever is there
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }
    let mut file = File::create(path)?;
    file.write_all(buffer.as_str().as_bytes())?;
    file.flush()?;
    debug!("script saved to {}", path.display());
    Ok(())
}
