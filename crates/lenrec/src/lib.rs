//! Length-indicated record files: a streaming line transducer plus the record
//! codec and keyed byte-offset index layered on top of its output.
//!
//! The core is [`prefix_lines`]: every line of a text source is rewritten onto
//! a text sink as `{length}{content}\n`, where `length` is the decimal count of
//! Unicode scalar values in the line after stripping its terminator. The pass
//! is strictly sequential and order preserving, holds one line of state at a
//! time, and aborts on the first I/O or decode error, leaving any partially
//! written output in place.
//!
//! ```rust,no_run
//! use lenrec::{defaults, prefix_file};
//! # fn main() -> Result<(), lenrec::LenrecError> {
//! let summary = prefix_file(defaults::DEFAULT_INPUT_FILE, defaults::DEFAULT_OUTPUT_FILE)?;
//! println!("wrote {} records", summary.lines);
//! # Ok(()) }
//! ```
//!
//! Surfaces:
//! - [`prefix_lines`] / [`prefix_file`] and their tokio twins
//!   [`prefix_lines_async`] / [`prefix_file_async`] for the transduction pass.
//! - [`LengthIndicatedRecord`] to parse a stored line back into its
//!   `(length, content)` form, with the prefix verified against the content.
//! - [`LengthIndicatedReader`] to iterate an already-converted file with
//!   1-based line numbers and exact byte offsets per record.
//! - [`KeyIndex`] to build, persist, load, and query a binary key-to-offset
//!   index over a converted file (first record treated as the header), and
//!   [`fetch_record`] to seek straight to one record.
//! - [`PostalTable`] / [`PostalRecord`] to load the source CSV into typed
//!   rows and view them sorted by zip, or by state then zip, for tabular
//!   output.
//!
//! Input and output use a fixed UTF-8 encoding; an invalid byte sequence is a
//! hard error, not a lossy substitution.

pub mod defaults;
mod error;
mod index;
mod postal;
mod record;
mod transduce;

pub use error::LenrecError;
pub use index::{fetch_record, KeyIndex};
pub use postal::{PostalRecord, PostalTable};
pub use record::LengthIndicatedRecord;
pub use transduce::{
    length_indicated_file, prefix_file, prefix_file_async, prefix_lines, prefix_lines_async,
    LengthIndicatedLine, LengthIndicatedReader, TransduceSummary,
};
