use std::path::PathBuf;
use std::time::Duration;

/// Knobs of the interpreter. There is no config file; the binary runs with
/// `Settings::default()` and tests override single fields.
#[derive(Debug, Clone)]
pub struct Settings {
    pub emit_prompt: bool,
    pub prompt: String,
    /// Scratch file handed to the shell when a captured script is run.
    pub transient_script: PathBuf,
    pub shell: String,
    /// Maximum size of a captured script, in bytes.
    pub script_capacity: usize,
    /// How long the parent pauses after starting a background child so the
    /// child's pid line shows up before the next prompt.
    pub background_grace: Duration,
    pub null_device: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            emit_prompt: true,
            prompt: "# ".to_owned(),
            transient_script: PathBuf::from("t"),
            shell: "/bin/bash".to_owned(),
            script_capacity: 8 * 1024,
            background_grace: Duration::from_secs(1),
            null_device: PathBuf::from("/dev/null"),
        }
    }
}
