//! MediaMix CLI - Generate the synthetic media-mix panel and print analytics views.
//!
//! # Commands
//!
//! - `mediamix generate` - Generate the dataset and write it as JSON
//! - `mediamix summary` - Print headline KPIs and the channel table
//! - `mediamix view <view>` - Print one analytics view as JSON
//! - `mediamix completions <shell>` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Write the full dataset for seed 7
//! mediamix generate --seed 7 --output panel.json
//!
//! # Summer performance of one brand on video channels
//! mediamix summary --brand "Summit Grill" --start 2024-05-01 --end 2024-09-30 \
//!     --channels "TV,CTV,YouTube"
//!
//! # Attribution models for Germany, pretty-printed
//! mediamix view attribution --market Germany --pretty
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{generate, load_config, summary, view, FilterArgs};

/// MediaMix CLI - synthetic media-mix panel and analytics views
#[derive(Parser)]
#[command(name = "mediamix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (TOML); MEDIAMIX__* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the generator seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset and write it as JSON
    Generate {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print headline KPIs and the channel table
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print one analytics view as JSON
    View {
        /// View to render
        #[arg(value_enum)]
        view: view::View,

        #[command(flatten)]
        filter: FilterArgs,

        /// Target brand for the halo view
        #[arg(long)]
        target: Option<String>,

        /// Maximum points for long series (default: from configuration)
        #[arg(long)]
        sample: Option<usize>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(shell, &mut Cli::command(), "mediamix", &mut std::io::stdout());
            Ok(())
        }
        command => load_config(cli.config.as_deref(), cli.seed).and_then(|config| match command {
            Commands::Generate { output, pretty } => {
                generate::execute(&config, output.as_deref(), pretty)
            }
            Commands::Summary { filter } => summary::execute(&config, &filter),
            Commands::View {
                view,
                filter,
                target,
                sample,
                pretty,
            } => view::execute(&config, view, &filter, target.as_deref(), sample, pretty),
            Commands::Completions { .. } => Ok(()),
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
