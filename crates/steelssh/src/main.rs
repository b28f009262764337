mod cli;
mod commands;
mod config;
mod error;
mod launcher;
mod output;
mod prompt;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use steelssh_core::Controller;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

const INTERRUPT_MESSAGE: &str = "\nCTRL+C pressed. Bye!";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbosity = cli.global.verbose;

    init_tracing(verbosity);

    // Every way out, including errors and Ctrl+C, exits with status 0.
    tokio::select! {
        result = run(cli) => {
            if let Err(err) = result {
                report(err, verbosity);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("{INTERRUPT_MESSAGE}");
            // A prompt may still hold stdin on the blocking pool; don't
            // wait for it.
            std::process::exit(0);
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// One line by default; the full diagnostic (code, cause, help) with `-v`.
fn report(err: CliError, verbosity: u8) {
    match err {
        CliError::Interrupted => println!("{INTERRUPT_MESSAGE}"),
        CliError::Cancelled => println!("{err}"),
        err if verbosity > 0 => eprintln!("{:?}", miette::Report::new(err)),
        err => eprintln!("{err}"),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command.unwrap_or(Command::Connect) {
        // Config commands don't need a realm connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global).await,

        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "steelssh", &mut std::io::stdout());
            Ok(())
        }

        Command::List(args) => {
            let controller = connect(&cli.global).await?;
            commands::list::handle(&controller, &args).await
        }

        Command::Connect => {
            let controller = connect(&cli.global).await?;
            let color = output::should_color(cli.global.color);
            commands::connect::handle(&controller, color).await
        }
    }
}

/// Resolve settings (prompting if needed) and build the controller.
async fn connect(global: &GlobalOpts) -> Result<Controller, CliError> {
    let opts = global.clone();
    let controller_config =
        prompt::blocking(move || config::resolve_controller_config(&opts)).await?;

    tracing::debug!(realm = %controller_config.realm, "connecting");
    Ok(Controller::new(controller_config)?)
}
