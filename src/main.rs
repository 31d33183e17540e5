//! mtgmap - Turn meeting audio into structured minutes
//!
//! Entry point for the mtgmap CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mtgmap::cli::{Cli, Commands, ConfigCommand};
use mtgmap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Completions { shell } => {
            mtgmap::cli::commands::print_completions(shell);
        }
        Commands::Styles => {
            mtgmap::cli::commands::list_styles();
        }
        // Init runs before settings load so it can repair a malformed config.
        Commands::Config(ConfigCommand::Init { force }) => {
            mtgmap::cli::commands::config_init(force)?;
        }
        command => {
            // Load configuration only for commands that need it.
            let settings = Settings::load()?;

            match command {
                Commands::Generate {
                    audio,
                    style,
                    output_dir,
                } => {
                    mtgmap::cli::commands::generate(&settings, audio, &style, output_dir).await?;
                }
                Commands::Doctor { json } => {
                    mtgmap::cli::commands::run_doctor(&settings, json)?;
                }
                Commands::Config(config_cmd) => {
                    mtgmap::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Styles | Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
