use std::fmt::Write as _;
use std::path::PathBuf;

use clap::ValueEnum;
use lenrec::{defaults, PostalRecord, PostalTable};

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortOrder {
    /// Ascending by zip code.
    Zip,
    /// By state, then by zip within each state.
    State,
    /// The order rows appear in the CSV.
    Insertion,
}

#[derive(Debug, clap::Args)]
pub(crate) struct Args {
    /// CSV source to load.
    #[arg(long, default_value = defaults::DEFAULT_INPUT_FILE)]
    pub(crate) input: PathBuf,
    /// Row ordering for the printed table.
    #[arg(long, value_enum, default_value_t = SortOrder::Zip)]
    pub(crate) sort: SortOrder,
}

pub(crate) fn run(args: Args) -> Result<(), CliError> {
    let table = PostalTable::load_csv(&args.input)?;
    let rows: Vec<&PostalRecord> = match args.sort {
        SortOrder::Zip => table.sorted_by_zip(),
        SortOrder::State => table.sorted_by_state(),
        SortOrder::Insertion => table.records().iter().collect(),
    };
    print!("{}", render_table(&rows, args.sort));
    Ok(())
}

fn render_table(rows: &[&PostalRecord], sort: SortOrder) -> String {
    let banner = match sort {
        SortOrder::Zip => "A table of all the postal records sorted by zip:",
        SortOrder::State => "A table of all the postal records sorted by state:",
        SortOrder::Insertion => "A table of all the postal records:",
    };

    let mut out = String::new();
    out.push_str(banner);
    out.push_str("\n\n");
    let _ = writeln!(
        out,
        "{:<10}{:<20}{:<10}{:<30}{:<12}{:<12}",
        "Zip Code", "Place Name", "State", "County", "Latitude", "Longitude"
    );
    out.push_str(&"-".repeat(95));
    out.push('\n');

    for row in rows {
        let _ = writeln!(
            out,
            "{:<10}{:<20}{:<10}{:<30}{:<12}{:<12}",
            row.zip, row.place, row.state, row.county, row.latitude, row.longitude
        );
    }
    out
}
