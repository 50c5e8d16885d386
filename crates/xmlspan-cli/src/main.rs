//! xmlspan - print where the constructs of an XML file start and end.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "xmlspan")]
#[command(version)]
#[command(about = "Report source positions of XML constructs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every span the scanner finds, in document order
    Spans {
        /// XML file to scan
        file: PathBuf,

        /// Print the spans as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the location of every element
    Locate {
        /// XML file to parse
        file: PathBuf,

        /// Print the locations as JSON
        #[arg(long)]
        json: bool,

        /// Include each element's open tag in the output
        #[arg(long)]
        with_head: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xmlspan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Spans { file, json } => commands::spans::execute(&file, json),
        Commands::Locate {
            file,
            json,
            with_head,
        } => commands::locate::execute(commands::locate::LocateArgs {
            file,
            json,
            with_head,
        }),
    }
}
