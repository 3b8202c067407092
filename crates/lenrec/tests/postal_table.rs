use lenrec::{LenrecError, PostalTable};

const CSV: &str = "\
Zip Code,Place Name,State,County,Lat,Long
90210,Beverly Hills,CA,Los Angeles,34.0901,-118.4065
56301,Saint Cloud,MN,Stearns,45.541,-94.1632

10001,New York,NY,New York,40.7128,-74.006
";

#[test]
fn load_csv_skips_header_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("us_postal_codes.csv");
    std::fs::write(&csv, CSV).unwrap();

    let table = PostalTable::load_csv(&csv).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.records()[0].zip, 90210);

    let zips: Vec<u32> = table.sorted_by_zip().iter().map(|r| r.zip).collect();
    assert_eq!(zips, [10001, 56301, 90210]);

    let found = table.find_by_zip(56301).unwrap();
    assert_eq!(found.county, "Stearns");
}

#[test]
fn load_csv_propagates_row_errors() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "header\n90210,Beverly Hills,CA\n").unwrap();

    let err = PostalTable::load_csv(&csv).unwrap_err();
    assert!(matches!(err, LenrecError::CsvFieldCount { found: 3, .. }));
}

#[test]
fn load_csv_missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PostalTable::load_csv(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LenrecError::OpenInput { .. }));
}
