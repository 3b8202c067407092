use std::path::PathBuf;

use lenrec::{defaults, KeyIndex};

use crate::CliError;

#[derive(Debug, clap::Args)]
pub(crate) struct Args {
    /// Length-indicated data file to index.
    #[arg(long, default_value = defaults::DEFAULT_OUTPUT_FILE)]
    pub(crate) data: PathBuf,
    /// Where to write the binary index (any existing file is replaced).
    #[arg(long, default_value = defaults::DEFAULT_INDEX_FILE)]
    pub(crate) index: PathBuf,
}

pub(crate) fn run(args: Args) -> Result<(), CliError> {
    let index = KeyIndex::build_from_data(&args.data)?;
    index.write_to(&args.index)?;
    println!(
        "Index built and written to {} ({} entries)",
        args.index.display(),
        index.len()
    );
    Ok(())
}
