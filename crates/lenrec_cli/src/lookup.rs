use std::path::PathBuf;

use lenrec::{defaults, KeyIndex, LengthIndicatedRecord};

use crate::CliError;

const FIELD_LABELS: [&str; 6] = ["Zip Code", "Place Name", "State", "County", "Lat", "Long"];

#[derive(Debug, clap::Args)]
pub(crate) struct Args {
    /// Keys to look up (repeatable).
    #[arg(short = 'Z', long = "zip", value_name = "KEY", required = true)]
    pub(crate) zips: Vec<String>,
    /// Length-indicated data file to read records from.
    #[arg(long, default_value = defaults::DEFAULT_OUTPUT_FILE)]
    pub(crate) data: PathBuf,
    /// Index file; loaded when present, otherwise built and persisted.
    #[arg(long, default_value = defaults::DEFAULT_INDEX_FILE)]
    pub(crate) index: PathBuf,
}

pub(crate) fn run(args: Args) -> Result<(), CliError> {
    let index = KeyIndex::ensure(&args.data, &args.index)?;

    for zip in &args.zips {
        match index.fetch(&args.data, zip)? {
            Some(record) => print!("{}", render_record(&record)),
            None => println!("{zip} not found.\n"),
        }
    }
    Ok(())
}

fn render_record(record: &LengthIndicatedRecord) -> String {
    let mut out = String::new();
    for (label, field) in FIELD_LABELS.iter().zip(record.fields()) {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(field);
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_labeled_fields() {
        let record =
            LengthIndicatedRecord::new("90210,Beverly Hills,CA,Los Angeles,34.0901,-118.4065");
        let rendered = render_record(&record);
        assert_eq!(
            rendered,
            "Zip Code: 90210\nPlace Name: Beverly Hills\nState: CA\nCounty: Los Angeles\nLat: 34.0901\nLong: -118.4065\n\n"
        );
    }

    #[test]
    fn renders_only_available_fields() {
        let record = LengthIndicatedRecord::new("90210,Beverly Hills");
        let rendered = render_record(&record);
        assert_eq!(rendered, "Zip Code: 90210\nPlace Name: Beverly Hills\n\n");
    }
}
