mod build_index;
mod convert;
mod list;
mod lookup;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "lenrec")]
#[command(about = "Convert, index, and look up length-indicated record files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite a CSV file with each line prefixed by its character length.
    Convert(convert::Args),
    /// Rebuild the binary key index over a length-indicated data file.
    BuildIndex(build_index::Args),
    /// Look up records by key through the index, building it if needed.
    Lookup(lookup::Args),
    /// Print the CSV as a labeled table, sorted by zip or by state.
    List(list::Args),
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Lenrec(#[from] lenrec::LenrecError),
}

fn main() -> Result<(), CliError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert::run(args),
        Command::BuildIndex(args) => build_index::run(args),
        Command::Lookup(args) => lookup::run(args),
        Command::List(args) => list::run(args),
    }
}
