//! An interactive launcher: reads one command per line and runs programs in
//! the foreground or background, kills processes by pid, and captures small
//! bash scripts to run or save.

pub mod args;
pub mod cli;
pub mod command;
pub mod common;
pub mod rterm;
pub mod script;
pub mod settings;
pub mod sh;
pub mod signal;

pub use cli::{Cli, Step};
pub use common::{CliError, CliResult};
pub use rterm::Rterm;
pub use settings::Settings;
pub use sh::Launcher;
