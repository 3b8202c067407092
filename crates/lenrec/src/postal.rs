use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use crate::LenrecError;

/// One postal-code row of the source CSV, parsed into typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PostalRecord {
    pub zip: u32,
    pub place: String,
    pub state: String,
    pub county: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PostalRecord {
    /// Parses one CSV data line (`zip,place,state,county,latitude,longitude`).
    ///
    /// Fields are simple comma-separated values; quoted or embedded commas
    /// are not handled.
    pub fn parse_csv(line: &str) -> Result<Self, LenrecError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            return Err(LenrecError::CsvFieldCount {
                expected: 6,
                found: fields.len(),
                line: line.to_string(),
            });
        }

        let numeric = |field| LenrecError::CsvField {
            field,
            line: line.to_string(),
        };
        Ok(Self {
            zip: fields[0].parse().map_err(|_| numeric("zip"))?,
            place: fields[1].to_string(),
            state: fields[2].to_string(),
            county: fields[3].to_string(),
            latitude: fields[4].parse().map_err(|_| numeric("latitude"))?,
            longitude: fields[5].parse().map_err(|_| numeric("longitude"))?,
        })
    }
}

/// An in-memory collection of [`PostalRecord`]s in insertion order, with
/// sorted views layered on top.
#[derive(Debug, Clone, Default)]
pub struct PostalTable {
    records: Vec<PostalRecord>,
}

impl PostalTable {
    /// Loads a table from a CSV file, skipping the header line.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, LenrecError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LenrecError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::default();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| LenrecError::from_read(idx + 1, source))?;
            if idx == 0 || line.is_empty() {
                continue;
            }
            table.push(PostalRecord::parse_csv(&line)?);
        }

        debug!(csv = %path.display(), records = table.len(), "loaded postal table");
        Ok(table)
    }

    pub fn push(&mut self, record: PostalRecord) {
        self.records.push(record);
    }

    /// Records in the order they were added.
    pub fn records(&self) -> &[PostalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first record carrying `zip`, if any.
    pub fn find_by_zip(&self, zip: u32) -> Option<&PostalRecord> {
        self.records.iter().find(|record| record.zip == zip)
    }

    /// Records sorted ascending by zip; insertion order is left untouched.
    pub fn sorted_by_zip(&self) -> Vec<&PostalRecord> {
        let mut sorted: Vec<&PostalRecord> = self.records.iter().collect();
        sorted.sort_by_key(|record| record.zip);
        sorted
    }

    /// Records sorted by state, then by zip within each state.
    pub fn sorted_by_state(&self) -> Vec<&PostalRecord> {
        let mut sorted: Vec<&PostalRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.state.cmp(&b.state).then(a.zip.cmp(&b.zip)));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PostalTable {
        let mut table = PostalTable::default();
        for line in [
            "56301,Saint Cloud,MN,Stearns,45.541,-94.1632",
            "90210,Beverly Hills,CA,Los Angeles,34.0901,-118.4065",
            "10001,New York,NY,New York,40.7128,-74.006",
            "94105,San Francisco,CA,San Francisco,37.7898,-122.3942",
        ] {
            table.push(PostalRecord::parse_csv(line).unwrap());
        }
        table
    }

    #[test]
    fn parse_csv_types_the_fields() {
        let record = PostalRecord::parse_csv("90210,Beverly Hills,CA,Los Angeles,34.0901,-118.4065")
            .unwrap();
        assert_eq!(record.zip, 90210);
        assert_eq!(record.place, "Beverly Hills");
        assert_eq!(record.state, "CA");
        assert_eq!(record.county, "Los Angeles");
        assert_eq!(record.latitude, 34.0901);
        assert_eq!(record.longitude, -118.4065);
    }

    #[test]
    fn parse_csv_rejects_wrong_field_count() {
        assert!(matches!(
            PostalRecord::parse_csv("90210,Beverly Hills,CA"),
            Err(LenrecError::CsvFieldCount { found: 3, .. })
        ));
    }

    #[test]
    fn parse_csv_rejects_non_numeric_fields() {
        assert!(matches!(
            PostalRecord::parse_csv("zip,place,st,county,lat,long"),
            Err(LenrecError::CsvField { field: "zip", .. })
        ));
        assert!(matches!(
            PostalRecord::parse_csv("1,place,st,county,north,-94.1"),
            Err(LenrecError::CsvField {
                field: "latitude",
                ..
            })
        ));
    }

    #[test]
    fn sorted_by_zip_is_ascending_and_nondestructive() {
        let table = table();
        let zips: Vec<u32> = table.sorted_by_zip().iter().map(|r| r.zip).collect();
        assert_eq!(zips, [10001, 56301, 90210, 94105]);
        // Insertion order is preserved on the table itself.
        assert_eq!(table.records()[0].zip, 56301);
    }

    #[test]
    fn sorted_by_state_breaks_ties_by_zip() {
        let table = table();
        let keys: Vec<(&str, u32)> = table
            .sorted_by_state()
            .iter()
            .map(|r| (r.state.as_str(), r.zip))
            .collect();
        assert_eq!(
            keys,
            [("CA", 90210), ("CA", 94105), ("MN", 56301), ("NY", 10001)]
        );
    }

    #[test]
    fn find_by_zip_returns_first_match() {
        let table = table();
        assert_eq!(table.find_by_zip(10001).unwrap().place, "New York");
        assert!(table.find_by_zip(99999).is_none());
    }
}
