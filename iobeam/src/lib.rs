//! The iobeam command line tool
//!
//! Manages resources of an iobeam project through the iobeam HTTP API. The
//! binary in `main.rs` only forwards its arguments to [`startup`].

use clap::Parser;
use dotenvy::dotenv;
use trogging::{
    TroggingGuard,
    cli::{LoggingConfig, LoggingConfigBuilderExt},
    tracing_subscriber::{Registry, prelude::*},
};

pub mod commands {
    pub mod common;
    pub mod trigger;
}

enum ReturnCode {
    Failure = 1,
}

#[derive(Debug, clap::Parser)]
#[clap(
    name = "iobeam",
    version,
    about = "Command line tool for the iobeam IoT platform",
    long_about = r#"Command line tool for the iobeam IoT platform

Examples:
    # Create a trigger that POSTs to a URL when the temperature is too high
    iobeam trigger create http --project-id 1 --token $TOKEN --name too_hot \
        --fire-when "{{temp}} > 25" --url https://example.com/hook

    # Show a trigger and its numbered actions
    iobeam trigger get --project-id 1 --token $TOKEN --name too_hot

    # Remove the second action of that trigger
    iobeam trigger remove-action --project-id 1 --token $TOKEN --trigger-name too_hot --num 2

    # Run any command with debug logging of the HTTP exchange
    iobeam -vv trigger list --project-id 1 --token $TOKEN
"#
)]
struct Config {
    #[clap(flatten)]
    logging_config: LoggingConfig,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Manage triggers and the actions they fire
    Trigger(commands::trigger::Config),
}

pub fn startup(args: Vec<String>) -> Result<(), std::io::Error> {
    // load all environment variables from .env before doing anything
    load_dotenv();

    let config = Config::parse_from(args);

    let tokio_runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    tokio_runtime.block_on(async move {
        fn handle_init_logs(r: Result<TroggingGuard, trogging::Error>) -> TroggingGuard {
            match r {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("Initializing logs failed: {e}");
                    std::process::exit(ReturnCode::Failure as _);
                }
            }
        }

        let _tracing_guard = handle_init_logs(init_logs(&config.logging_config));

        match config.command {
            None => println!("command required, -h/--help for help"),
            Some(Command::Trigger(config)) => {
                if let Err(e) = commands::trigger::command(config).await {
                    eprintln!("Trigger command failed: {e}");
                    std::process::exit(ReturnCode::Failure as _)
                }
            }
        }
    });

    Ok(())
}

/// Source the .env file before initialising the Config struct - this sets
/// any envs in the file, which the Config struct then uses.
///
/// Precedence is given to existing env variables.
fn load_dotenv() {
    match dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            // a missing env file is not an error, defaults apply
        }
        Err(e) => {
            eprintln!("FATAL Error loading config from: {e}");
            eprintln!("Aborting");
            std::process::exit(1);
        }
    };
}

fn init_logs(config: &LoggingConfig) -> Result<TroggingGuard, trogging::Error> {
    // command output goes to stdout, keep it free of routine log lines
    let log_layer = trogging::Builder::new()
        .with_default_log_filter("warn")
        .with_logging_config(config)
        .build()?;

    let subscriber = Registry::default().with(log_layer);
    trogging::install_global(subscriber)
}
