//! Seongraph CLI entry point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "seongraph")]
#[command(about = "Code-to-ontology graph extraction over the SEON vocabulary", long_about = None)]
struct Cli {
    /// Source directory or ZIP archive to analyze
    input: PathBuf,

    /// RDF/XML output file
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the Java language-server command
    #[arg(long, value_name = "COMMAND")]
    java_server: Option<String>,

    /// Override the C++ language-server command
    #[arg(long, value_name = "COMMAND")]
    cpp_server: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "seongraph={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Seongraph v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Input: {}", cli.input.display());

    commands::analyze(cli.input, cli.output, cli.java_server, cli.cpp_server)
}
