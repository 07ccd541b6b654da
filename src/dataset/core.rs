/// Input/output boundary for the sort engine.
///
/// The input file is ASCII decimal unsigned integers separated by
/// whitespace: worker count, element count, then exactly `element count`
/// data values. The parser scans raw bytes — no UTF-8 validation pass
/// over what may be tens of megabytes of digits.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::common::io::read_file;

/// 4MB output buffer — keeps flush count low when writing millions of
/// values.
const OUTPUT_BUF_SIZE: usize = 4 * 1024 * 1024;

/// A parsed input file: worker count plus the values to sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub workers: usize,
    pub values: Vec<u32>,
}

/// Input boundary failures. All fatal; no partial dataset is produced.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("missing {field} in header")]
    MissingHeader { field: &'static str },

    #[error("invalid byte {byte:#04x} at offset {offset}, expected a digit")]
    InvalidDigit { offset: usize, byte: u8 },

    #[error("value at offset {offset} does not fit in 32 bits")]
    Overflow { offset: usize },

    #[error("expected {expected} values, input ends after {found}")]
    Truncated { expected: usize, found: usize },
}

/// Byte cursor over the input buffer.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Scanner { bytes, pos: 0 }
    }

    /// Advance past ASCII whitespace. Returns false at end of input.
    fn skip_whitespace(&mut self) -> bool {
        while let Some(&b) = self.bytes.get(self.pos) {
            if !b.is_ascii_whitespace() {
                return true;
            }
            self.pos += 1;
        }
        false
    }

    /// Parse the next unsigned decimal value, or None at end of input.
    /// Accumulates with checked arithmetic so oversized values are
    /// reported instead of wrapping.
    fn next_u32(&mut self) -> Option<Result<u32, DatasetError>> {
        if !self.skip_whitespace() {
            return None;
        }

        let start = self.pos;
        let first = self.bytes[self.pos];
        if !first.is_ascii_digit() {
            return Some(Err(DatasetError::InvalidDigit {
                offset: self.pos,
                byte: first,
            }));
        }

        let mut value: u32 = 0;
        while let Some(&b) = self.bytes.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
            {
                Some(v) => v,
                None => return Some(Err(DatasetError::Overflow { offset: start })),
            };
            self.pos += 1;
        }

        Some(Ok(value))
    }
}

impl Dataset {
    /// Read and parse an input file.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
        let path = path.as_ref();
        let data = read_file(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&data)
    }

    /// Parse a raw input buffer. Values past the declared element count
    /// are ignored; fewer than declared is an error.
    pub fn parse(bytes: &[u8]) -> Result<Dataset, DatasetError> {
        let mut scanner = Scanner::new(bytes);

        let workers = scanner.next_u32().ok_or(DatasetError::MissingHeader {
            field: "worker count",
        })?? as usize;
        let declared = scanner.next_u32().ok_or(DatasetError::MissingHeader {
            field: "element count",
        })?? as usize;

        let mut values = Vec::with_capacity(declared);
        for found in 0..declared {
            match scanner.next_u32() {
                Some(value) => values.push(value?),
                None => {
                    return Err(DatasetError::Truncated {
                        expected: declared,
                        found,
                    });
                }
            }
        }

        Ok(Dataset { workers, values })
    }
}

/// Write the sorted values with the same header shape the input carries:
/// worker count and element count on their own lines, then the values
/// separated by single spaces with a trailing space after each.
pub fn write_results(path: impl AsRef<Path>, workers: usize, values: &[u32]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::with_capacity(OUTPUT_BUF_SIZE, file);
    let mut buf = itoa::Buffer::new();

    out.write_all(buf.format(workers).as_bytes())?;
    out.write_all(b"\n")?;
    out.write_all(buf.format(values.len()).as_bytes())?;
    out.write_all(b"\n")?;
    for &value in values {
        out.write_all(buf.format(value).as_bytes())?;
        out.write_all(b" ")?;
    }

    out.flush()
}

/// Write the elapsed sort time as fractional milliseconds.
pub fn write_timing(path: impl AsRef<Path>, elapsed: Duration) -> io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{}", elapsed.as_secs_f64() * 1_000.0)
}
