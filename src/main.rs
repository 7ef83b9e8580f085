use std::io;
use std::process;

use rterm::{Cli, Rterm, Settings};
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout belongs to the command protocol, logs go to stderr and are off by default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(io::stderr)
        .init();

    let settings = Settings::default();
    let stdin = io::stdin();
    let mut client = Cli::new(
        Rterm::new(&settings),
        stdin.lock(),
        io::stdout(),
        io::stderr(),
        settings,
    );
    process::exit(client.go());
}
