use std::fmt;

use crate::LenrecError;

/// One stored line of a length-indicated file: the decimal character count of
/// `content`, serialized immediately before the content with no separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthIndicatedRecord {
    pub length: usize,
    pub content: String,
}

impl LengthIndicatedRecord {
    /// Wraps `content`, computing the length prefix from its character count.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            length: content.chars().count(),
            content,
        }
    }

    /// Parses a stored line back into a record.
    ///
    /// Splits the leading run of ASCII digits from the remainder and verifies
    /// the declared length against the remainder's character count. A line
    /// without a digit prefix, or with a prefix that disagrees with its
    /// content, is rejected.
    pub fn parse(line: &str) -> Result<Self, LenrecError> {
        let digits = line.len() - line.trim_start_matches(|ch: char| ch.is_ascii_digit()).len();
        if digits == 0 {
            return Err(LenrecError::MissingLengthPrefix {
                line: line.to_string(),
            });
        }

        // Content may itself begin with digits (a zip code does), so the
        // prefix/content split is not unique. Take the longest prefix first
        // and fall back to shorter splits until one agrees with its content.
        // A prefix with a leading zero is never written, so those splits are
        // not candidates (`0` itself being the one zero-length record form).
        let mut first_mismatch: Option<(usize, usize)> = None;
        for split in (1..=digits).rev() {
            let (prefix, content) = line.split_at(split);
            if prefix.len() > 1 && prefix.starts_with('0') {
                continue;
            }
            let Ok(declared) = prefix.parse::<usize>() else {
                continue;
            };
            let actual = content.chars().count();
            if declared == actual {
                return Ok(Self {
                    length: declared,
                    content: content.to_string(),
                });
            }
            if first_mismatch.is_none() {
                first_mismatch = Some((declared, actual));
            }
        }

        match first_mismatch {
            Some((declared, actual)) => Err(LenrecError::LengthMismatch {
                declared,
                actual,
                line: line.to_string(),
            }),
            None => Err(LenrecError::MissingLengthPrefix {
                line: line.to_string(),
            }),
        }
    }

    /// The record key: content up to the first comma (the whole content when
    /// no comma is present).
    pub fn key(&self) -> &str {
        self.content.split(',').next().unwrap_or("")
    }

    /// Comma-split view of the content, for presentation only.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.content.split(',')
    }
}

impl fmt::Display for LengthIndicatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.content)
    }
}
