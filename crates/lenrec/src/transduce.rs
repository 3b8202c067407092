use std::{
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use tokio::{
    fs,
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufWriter as AsyncBufWriter},
};
use tracing::debug;

use crate::{LengthIndicatedRecord, LenrecError};

/// Counters reported by a completed transduction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransduceSummary {
    /// Output records written, one per input line.
    pub lines: u64,
}

/// Rewrites every line of `reader` onto `writer` as a length-indicated record.
///
/// Per line, one trailing `\n` (and a preceding `\r`, if any) is stripped, the
/// remaining character count is computed over Unicode scalar values, and
/// `{length}{content}\n` is written. Lines are emitted strictly in input
/// order, one line of state at a time; a final line without a terminator is
/// treated as a complete line. Empty input yields empty output.
pub fn prefix_lines<R, W>(mut reader: R, mut writer: W) -> Result<TransduceSummary, LenrecError>
where
    R: BufRead,
    W: Write,
{
    let mut buffer = String::new();
    let mut summary = TransduceSummary::default();

    loop {
        buffer.clear();
        let line_number = summary.lines as usize + 1;
        match reader.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let content = trim_terminator(&buffer);
                write_record(&mut writer, content)?;
                summary.lines += 1;
            }
            Err(source) => return Err(LenrecError::from_read(line_number, source)),
        }
    }

    writer.flush().map_err(LenrecError::FlushOutput)?;
    debug!(lines = summary.lines, "length-prefixed input stream");
    Ok(summary)
}

/// File-to-file convenience over [`prefix_lines`].
///
/// Opens `input` for reading and creates (truncating) `output`; both handles
/// are scoped to this call and released on every exit path, including errors.
/// A failure leaves any partially written `output` in place.
pub fn prefix_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<TransduceSummary, LenrecError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source = std::fs::File::open(input).map_err(|source| LenrecError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let sink = std::fs::File::create(output).map_err(|source| LenrecError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })?;

    let summary = prefix_lines(BufReader::new(source), BufWriter::new(sink))?;
    debug!(
        input = %input.display(),
        output = %output.display(),
        lines = summary.lines,
        "length-prefixed file"
    );
    Ok(summary)
}

/// Async counterpart of [`prefix_lines`].
///
/// Note that [`AsyncBufReadExt::lines`] already strips the terminator, so the
/// per-line handling reduces to the length computation and write.
pub async fn prefix_lines_async<R, W>(
    reader: R,
    mut writer: W,
) -> Result<TransduceSummary, LenrecError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = TransduceSummary::default();

    loop {
        let line_number = summary.lines as usize + 1;
        match lines.next_line().await {
            Ok(Some(content)) => {
                let record = format!("{}{content}\n", content.chars().count());
                writer
                    .write_all(record.as_bytes())
                    .await
                    .map_err(LenrecError::WriteRecord)?;
                summary.lines += 1;
            }
            Ok(None) => break,
            Err(source) => return Err(LenrecError::from_read(line_number, source)),
        }
    }

    writer.flush().await.map_err(LenrecError::FlushOutput)?;
    debug!(lines = summary.lines, "length-prefixed input stream");
    Ok(summary)
}

/// Async counterpart of [`prefix_file`].
pub async fn prefix_file_async(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<TransduceSummary, LenrecError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source = fs::File::open(input)
        .await
        .map_err(|source| LenrecError::OpenInput {
            path: input.to_path_buf(),
            source,
        })?;
    let sink = fs::File::create(output)
        .await
        .map_err(|source| LenrecError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;

    prefix_lines_async(
        tokio::io::BufReader::new(source),
        AsyncBufWriter::new(sink),
    )
    .await
}

fn trim_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn write_record<W: Write>(writer: &mut W, content: &str) -> Result<(), LenrecError> {
    let length = content.chars().count();
    writeln!(writer, "{length}{content}").map_err(LenrecError::WriteRecord)
}

/// One line of a length-indicated file, as surfaced by [`LengthIndicatedReader`].
#[derive(Debug)]
pub struct LengthIndicatedLine {
    /// 1-based line number in the underlying source.
    pub line_number: usize,
    /// Byte offset of the start of this line within the source.
    pub offset: u64,
    /// The parse outcome for this line.
    pub outcome: Result<LengthIndicatedRecord, LenrecError>,
}

/// Iterator over the records of an already-converted length-indicated file.
///
/// Tracks the byte offset of every line so consumers (the index builder) can
/// later seek straight back to a record. Blank lines are skipped; parse
/// failures are surfaced per line rather than aborting the iteration.
pub struct LengthIndicatedReader<R: BufRead> {
    reader: R,
    line_number: usize,
    offset: u64,
    buffer: String,
    done: bool,
}

impl<R: BufRead> LengthIndicatedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            offset: 0,
            buffer: String::new(),
            done: false,
        }
    }

    /// Consumes the iterator and returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for LengthIndicatedReader<R> {
    type Item = LengthIndicatedLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buffer.clear();
            let line_number = self.line_number.saturating_add(1);
            let offset = self.offset;

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(consumed) => {
                    self.line_number = line_number;
                    self.offset += consumed as u64;

                    let line = trim_terminator(&self.buffer);
                    if line.is_empty() {
                        continue;
                    }

                    return Some(LengthIndicatedLine {
                        line_number,
                        offset,
                        outcome: LengthIndicatedRecord::parse(line),
                    });
                }
                Err(source) => {
                    self.done = true;
                    self.line_number = line_number;
                    return Some(LengthIndicatedLine {
                        line_number,
                        offset,
                        outcome: Err(LenrecError::from_read(line_number, source)),
                    });
                }
            }
        }
    }
}

/// Convenience constructor for file-backed reading.
pub fn length_indicated_file(
    path: impl AsRef<Path>,
) -> Result<LengthIndicatedReader<BufReader<std::fs::File>>, LenrecError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LenrecError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LengthIndicatedReader::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transduce_str(input: &str) -> String {
        let mut out = Vec::new();
        prefix_lines(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prefixes_each_line_with_character_count() {
        let out = transduce_str("90210,Beverly Hills,CA\n10001,New York,NY\n");
        assert_eq!(out, "2290210,Beverly Hills,CA\n1710001,New York,NY\n");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(transduce_str(""), "");
    }

    #[test]
    fn blank_line_yields_zero_record() {
        assert_eq!(transduce_str("\n"), "0\n");
        assert_eq!(transduce_str("a\n\nb\n"), "1a\n0\n1b\n");
    }

    #[test]
    fn final_line_without_terminator_is_complete() {
        assert_eq!(transduce_str("abc"), "3abc\n");
    }

    #[test]
    fn crlf_matches_lf() {
        assert_eq!(transduce_str("abc\r\n"), transduce_str("abc\n"));
    }

    #[test]
    fn interior_whitespace_is_counted() {
        assert_eq!(transduce_str("  ab  \n"), "6  ab  \n");
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        assert_eq!(transduce_str("é\n"), "1é\n");
        assert_eq!(transduce_str("Zürich,ZH\n"), "9Zürich,ZH\n");
    }

    #[test]
    fn invalid_utf8_aborts_with_decode_error() {
        let mut out = Vec::new();
        let err = prefix_lines(&b"ok\n\xff\xfe\n"[..], &mut out).unwrap_err();
        assert!(matches!(err, LenrecError::InvalidUtf8 { line_number: 2 }));
    }

    #[test]
    fn reader_reports_offsets_and_skips_blanks() {
        let data = "6header\n2290210,Beverly Hills,CA\n\n3abc\n";
        let lines: Vec<_> = LengthIndicatedReader::new(data.as_bytes()).collect();
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[0].offset, 0);
        assert_eq!(lines[0].outcome.as_ref().unwrap().content, "header");

        assert_eq!(lines[1].line_number, 2);
        assert_eq!(lines[1].offset, 8);
        assert_eq!(lines[1].outcome.as_ref().unwrap().key(), "90210");

        // The blank third line is skipped entirely.
        assert_eq!(lines[2].line_number, 4);
        assert_eq!(lines[2].outcome.as_ref().unwrap().content, "abc");
    }

    #[test]
    fn reader_surfaces_parse_failures_per_line() {
        let data = "2ok\nbogus\n2ok\n";
        let lines: Vec<_> = LengthIndicatedReader::new(data.as_bytes()).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].outcome.is_ok());
        assert!(matches!(
            lines[1].outcome,
            Err(LenrecError::MissingLengthPrefix { .. })
        ));
        assert!(lines[2].outcome.is_ok());
    }

    #[tokio::test]
    async fn async_transducer_matches_sync_output() {
        let input = "90210,Beverly Hills,CA\n\né\nlast";
        let mut sync_out = Vec::new();
        prefix_lines(input.as_bytes(), &mut sync_out).unwrap();

        let mut async_out = Vec::new();
        let summary = prefix_lines_async(input.as_bytes(), &mut async_out)
            .await
            .unwrap();

        assert_eq!(async_out, sync_out);
        assert_eq!(summary.lines, 4);
    }
}
