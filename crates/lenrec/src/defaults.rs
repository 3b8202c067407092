/// File names used by the original postal-code pipeline; commands fall back to
/// these when no paths are given.
pub const DEFAULT_INPUT_FILE: &str = "us_postal_codes.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "us_postal_codes_length_indicated_header_record.txt";
pub const DEFAULT_INDEX_FILE: &str = "indexfile.bin";
