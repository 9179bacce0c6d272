mod aggregator;
mod api;
#[cfg(feature = "browse")]
mod browser;
mod cli;
mod demo;
mod error;
mod export;
mod fmt;
mod models;
mod navigation;
mod settings;
mod source;
#[cfg(feature = "browse")]
mod tui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

/// Logs go to stderr so table and export output on stdout stays clean.
fn init_logging(verbose: bool) {
    let default = if verbose { "dealerboard=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = &cli.source;
    let result = match cli.command {
        Commands::Models { top } => cli::report::models(source, top),
        Commands::Dealers { model, top } => cli::report::dealers(source, &model, top),
        Commands::Salespeople { model, dealer, top } => {
            cli::report::salespeople(source, &model, &dealer, top)
        }
        #[cfg(feature = "browse")]
        Commands::Browse => cli::browse::run(source),
        Commands::Export {
            level,
            model,
            dealer,
            format,
            output,
        } => cli::export::run(
            source,
            level,
            model.as_deref(),
            dealer.as_deref(),
            format,
            output.as_deref(),
        ),
        Commands::Demo { output } => cli::demo::run(source, output.as_deref()),
        Commands::Request { from_date, to_date } => cli::request::run(&from_date, &to_date),
        Commands::Config {
            data_file,
            demo_seed,
            top_n,
            fallback_to_demo,
        } => cli::config::run(data_file, demo_seed, top_n, fallback_to_demo),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dealerboard", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
