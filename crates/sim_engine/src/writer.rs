//! Delimited-text persistence of path matrices.
//!
//! # Format
//!
//! One record per path, no header:
//!
//! ```text
//! <1-based path index>,<price step 0>,<price step 1>,...,<price step N>\n
//! ```
//!
//! Prices use Rust's shortest round-trip float formatting, so
//! [`read_paths`] reconstructs the original values exactly.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{SimError, SimResult};
use crate::matrix::PathMatrix;

/// Writes path matrices to a file.
///
/// # Examples
///
/// ```rust,no_run
/// use sim_engine::{gbm, rng::SimRng, PathWriter, SimulationParameters};
///
/// let params = SimulationParameters::default();
/// let paths = gbm::simulate(&params, SimRng::from_seed(1)).unwrap();
///
/// let writer = PathWriter::new("stockPrices.csv");
/// if let Err(err) = writer.write(&paths) {
///     eprintln!("{}", err);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct PathWriter {
    path: PathBuf,
}

impl PathWriter {
    /// Creates a writer targeting `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the destination path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates (or truncates) the destination and writes every path.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be created or written.
    pub fn write(&self, matrix: &PathMatrix) -> SimResult<()> {
        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        write_to(file, matrix).map_err(|source| self.io_error(source))
    }

    /// Reads a matrix back from the destination.
    ///
    /// # Errors
    ///
    /// - [`SimError::Io`] if the file cannot be opened
    /// - [`SimError::Malformed`] if its contents do not follow the format
    pub fn read(&self) -> SimResult<PathMatrix> {
        let file = File::open(&self.path).map_err(|source| self.io_error(source))?;
        read_paths(file)
    }

    fn io_error(&self, source: std::io::Error) -> SimError {
        SimError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Writes `matrix` to any sink.
///
/// # Errors
///
/// Propagates the sink's I/O errors.
pub fn write_to<W: Write>(sink: W, matrix: &PathMatrix) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    let mut record: Vec<String> = Vec::with_capacity(matrix.row_len() + 1);
    for (path, row) in matrix.rows().enumerate() {
        record.clear();
        record.push((path + 1).to_string());
        record.extend(row.iter().map(|price| price.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()
}

/// Parses a matrix written by [`write_to`].
///
/// # Errors
///
/// Returns [`SimError::Malformed`] for ragged rows, out-of-sequence path
/// indices, unparsable numbers or an empty input.
pub fn read_paths<R: Read>(source: R) -> SimResult<PathMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut data = Vec::new();
    let mut row_len: Option<usize> = None;
    let mut n_paths = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record_no = i + 1;
        let record = result.map_err(|e| malformed(record_no, e.to_string()))?;

        let mut fields = record.iter();
        let index: usize = fields
            .next()
            .ok_or_else(|| malformed(record_no, "empty record"))?
            .trim()
            .parse()
            .map_err(|e| malformed(record_no, format!("bad path index: {}", e)))?;
        if index != record_no {
            return Err(malformed(
                record_no,
                format!("expected path index {}, found {}", record_no, index),
            ));
        }

        let start = data.len();
        for field in fields {
            let price: f64 = field
                .trim()
                .parse()
                .map_err(|e| malformed(record_no, format!("bad price '{}': {}", field, e)))?;
            data.push(price);
        }
        let len = data.len() - start;

        match row_len {
            None if len < 2 => {
                return Err(malformed(record_no, "a path needs at least two prices"));
            }
            None => row_len = Some(len),
            Some(expected) if expected != len => {
                return Err(malformed(
                    record_no,
                    format!("expected {} prices, found {}", expected, len),
                ));
            }
            Some(_) => {}
        }
        n_paths += 1;
    }

    let row_len = row_len.ok_or_else(|| malformed(1, "no paths found"))?;
    PathMatrix::from_flat(n_paths, row_len - 1, data)
}

fn malformed(record: usize, reason: impl Into<String>) -> SimError {
    SimError::Malformed {
        record,
        reason: reason.into(),
    }
}
