mod cli;
mod commands;
mod config;
mod error;
mod manager;
mod output;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use error::{Result, UserError};
use manager::UserManager;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "users", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    init_logging(cli.verbose, &config);
    output::set_json_output(cli.json);

    let mut manager = UserManager::open(config.resolve_data_file(cli.file.as_deref()));
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            drop(stdout);
            run_menu(manager).await?;
        }
        Commands::Add { name, email } => {
            commands::users::add(&mut manager, &name, &email, &mut stdout)?;
        }
        Commands::List { all } => {
            commands::users::list(&manager, all, &mut stdout)?;
        }
        Commands::Get { id } => {
            commands::users::get(&manager, id, &mut stdout)?;
        }
        Commands::Delete { id, yes } => {
            commands::users::delete(&mut manager, id, yes, &mut io::stdin().lock(), &mut stdout)?;
        }
        Commands::Completions { .. } => {
            // Already handled above
        }
    }

    Ok(())
}

/// Install the process-wide subscriber. `RUST_LOG` takes precedence.
fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run the blocking menu while listening for Ctrl-C.
///
/// Writes are atomic renames, so exiting mid-menu cannot truncate the store.
async fn run_menu(mut manager: UserManager) -> Result<()> {
    let menu = tokio::task::spawn_blocking(move || {
        commands::menu::run(&mut manager, &mut io::stdin().lock(), &mut io::stdout())
    });

    tokio::select! {
        joined = menu => joined.map_err(|e| UserError::Io(io::Error::other(e)))?,
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nProgram interrupted. Exiting...");
            info!("Interrupted by user");
            // The menu thread is parked on stdin; don't wait for it.
            std::process::exit(0);
        }
    }
}
