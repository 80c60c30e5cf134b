mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "momo",
    version,
    about = "Convert MTN and Airtel mobile money statements to CSV or JSON"
)]
struct Cli {
    /// Log parsing decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement (PDF or extracted text) into transactions
    Parse {
        /// Path to a statement PDF, or a .txt file of already extracted text
        input_file: PathBuf,

        /// Provider: mtn or airtel (default: detect from the text)
        #[arg(short, long)]
        provider: Option<String>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write output to a file, or into a directory using a generated name
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Treat the input as extracted text even without a .txt extension
        #[arg(long)]
        raw_text: bool,

        /// Parse the text exactly as extracted, without rejoining split fields
        #[arg(long)]
        no_repair: bool,
    },
    /// Report which provider produced a statement
    Detect {
        /// Path to a statement PDF or .txt file
        input_file: PathBuf,

        #[arg(long)]
        raw_text: bool,
    },
    /// Totals per transaction type, fees and balances
    Summary {
        /// Path to a statement PDF or .txt file
        input_file: PathBuf,

        /// Provider: mtn or airtel (default: detect from the text)
        #[arg(short, long)]
        provider: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        #[arg(long)]
        raw_text: bool,

        #[arg(long)]
        no_repair: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose; otherwise only warnings.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            provider,
            output,
            out,
            raw_text,
            no_repair,
        } => commands::parse::run(&input_file, provider, &output, out, raw_text, no_repair),
        Commands::Detect {
            input_file,
            raw_text,
        } => commands::detect::run(&input_file, raw_text),
        Commands::Summary {
            input_file,
            provider,
            output,
            raw_text,
            no_repair,
        } => commands::summary::run(&input_file, provider, &output, raw_text, no_repair),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
