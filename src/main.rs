mod config;
mod console;
mod logger;
mod session;
mod ticket;
mod transport;

use anyhow::{Context, Result};
use config::{Config, Invocation, USAGE};
use console::Console;
use session::{validator, Session};
use transport::{ClientExit, DryRunTransport};

fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    logger::global()
        .init(config.log_path.as_ref(), config.verbose)
        .with_context(|| format!("failed to open log file {:?}", config.log_path))?;
    logger::log_debug(&format!(
        "[ticket-shell] attempts: {} | log: {:?} | verbose: {} | color: {}",
        config.max_input_attempts, config.log_path, config.verbose, config.color
    ));

    let console = Console::new(config.color);
    console.line("Commands:");
    for line in validator::help_lines() {
        console.line(&line);
    }
    console.line("");

    let mut session = Session::from_config(&config, console);
    let mut transport = DryRunTransport::new(console);
    match transport::run(&mut session, &mut transport)? {
        ClientExit::Finished => Ok(()),
        ClientExit::InputExhausted => {
            // Script frames were already closed by the session.
            drop(session);
            std::process::exit(0);
        }
    }
}
