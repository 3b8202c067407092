use std::path::PathBuf;

use lenrec::{defaults, prefix_file};

use crate::CliError;

#[derive(Debug, clap::Args)]
pub(crate) struct Args {
    /// CSV source to convert.
    #[arg(long, default_value = defaults::DEFAULT_INPUT_FILE)]
    pub(crate) input: PathBuf,
    /// Destination for the length-indicated output (created or overwritten).
    #[arg(long, default_value = defaults::DEFAULT_OUTPUT_FILE)]
    pub(crate) output: PathBuf,
}

pub(crate) fn run(args: Args) -> Result<(), CliError> {
    let summary = prefix_file(&args.input, &args.output)?;
    println!(
        "Wrote {} length-indicated records to {}",
        summary.lines,
        args.output.display()
    );
    Ok(())
}
