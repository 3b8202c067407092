use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Read, Seek, SeekFrom, Write},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    transduce::{length_indicated_file, LengthIndicatedLine},
    LengthIndicatedRecord, LenrecError,
};

/// Maps record keys to byte offsets within a length-indicated data file.
///
/// The persisted form is a flat sequence of entries, each `u8` key length,
/// the key bytes, then the record's file offset as a little-endian `u64`.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    entries: HashMap<String, u64>,
}

impl KeyIndex {
    /// Builds an index by streaming a length-indicated data file.
    ///
    /// The first record is treated as the header and skipped; blank lines are
    /// skipped; every other line must parse as a length-indicated record. When
    /// the same key appears twice the later record wins.
    pub fn build_from_data(path: impl AsRef<Path>) -> Result<Self, LenrecError> {
        let path = path.as_ref();
        let mut entries = HashMap::new();
        let mut header_skipped = false;

        for LengthIndicatedLine {
            offset, outcome, ..
        } in length_indicated_file(path)?
        {
            let record = outcome?;
            if !header_skipped {
                header_skipped = true;
                continue;
            }
            if let Some(previous) = entries.insert(record.key().to_string(), offset) {
                warn!(
                    key = record.key(),
                    previous, offset, "duplicate key, later record wins"
                );
            }
        }

        debug!(data = %path.display(), entries = entries.len(), "built key index");
        Ok(Self { entries })
    }

    /// Loads a previously persisted index.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LenrecError> {
        let path = path.as_ref();
        let mut bytes = Vec::new();
        std::fs::File::open(path)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(|source| LenrecError::OpenIndex {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = HashMap::new();
        let mut cursor = 0usize;
        while cursor < bytes.len() {
            let start = cursor as u64;
            let key_len = bytes[cursor] as usize;
            cursor += 1;

            let truncated = |offset| LenrecError::TruncatedIndex {
                path: path.to_path_buf(),
                offset,
            };
            let key_bytes = bytes
                .get(cursor..cursor + key_len)
                .ok_or_else(|| truncated(start))?;
            let key = std::str::from_utf8(key_bytes)
                .map_err(|_| truncated(start))?
                .to_string();
            cursor += key_len;

            let offset_bytes: [u8; 8] = bytes
                .get(cursor..cursor + 8)
                .ok_or_else(|| truncated(start))?
                .try_into()
                .map_err(|_| truncated(start))?;
            cursor += 8;

            entries.insert(key, u64::from_le_bytes(offset_bytes));
        }

        debug!(index = %path.display(), entries = entries.len(), "loaded key index");
        Ok(Self { entries })
    }

    /// Persists the index, truncating any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), LenrecError> {
        let path = path.as_ref();
        let io_err = |source| LenrecError::WriteIndex {
            path: path.to_path_buf(),
            source,
        };

        let mut file = std::fs::File::create(path).map_err(io_err)?;
        for (key, offset) in &self.entries {
            let key_len = u8::try_from(key.len()).map_err(|_| LenrecError::KeyTooLong {
                key: key.clone(),
            })?;
            file.write_all(&[key_len]).map_err(io_err)?;
            file.write_all(key.as_bytes()).map_err(io_err)?;
            file.write_all(&offset.to_le_bytes()).map_err(io_err)?;
        }
        file.flush().map_err(io_err)
    }

    /// Loads the index from `index_path` when it exists, otherwise builds it
    /// from `data_path` and persists the result.
    pub fn ensure(
        data_path: impl AsRef<Path>,
        index_path: impl AsRef<Path>,
    ) -> Result<Self, LenrecError> {
        let index_path = index_path.as_ref();
        if index_path.exists() {
            return Self::load(index_path);
        }

        let index = Self::build_from_data(data_path)?;
        index.write_to(index_path)?;
        Ok(index)
    }

    /// The data-file offset recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `key` and fetches its record from the data file.
    pub fn fetch(
        &self,
        data_path: impl AsRef<Path>,
        key: &str,
    ) -> Result<Option<LengthIndicatedRecord>, LenrecError> {
        match self.get(key) {
            Some(offset) => fetch_record(data_path, offset).map(Some),
            None => Ok(None),
        }
    }
}

/// Reads the single record starting at `offset` in a length-indicated file.
pub fn fetch_record(
    data_path: impl AsRef<Path>,
    offset: u64,
) -> Result<LengthIndicatedRecord, LenrecError> {
    let data_path: &Path = data_path.as_ref();
    let file = std::fs::File::open(data_path).map_err(|source| LenrecError::OpenInput {
        path: data_path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    reader
        .seek(SeekFrom::Start(offset))
        .map_err(|source| LenrecError::Seek { offset, source })?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|source| LenrecError::from_read(1, source))?;

    let line = line.strip_suffix('\n').unwrap_or(&line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    LengthIndicatedRecord::parse(line)
}
