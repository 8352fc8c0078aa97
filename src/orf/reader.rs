//! A GFF3 reader.

use std::io;
use std::io::BufRead;
use std::iter;

use crate::io::read_line;
use crate::orf::Record;
use crate::orf::record;

/// The prefix for comments and directives.
const COMMENT_PREFIX: char = '#';

/// The directive after which only sequences follow.
const FASTA_DIRECTIVE: &str = "##FASTA";

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An invalid record on the specified (1-based) line.
    Record(usize, record::Error, String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Record(line_no, err, line) => {
                write!(f, "invalid record at line {line_no}: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A GFF3 reader.
#[derive(Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,

    /// Whether the feature section has ended.
    done: bool,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a GFF3 reader.
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Attempts to read the next [`Record`], skipping comments, directives,
    /// and blank lines.
    ///
    /// Returns [`None`] once the underlying reader is exhausted or a `##FASTA`
    /// directive is reached.
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>> {
        while !self.done {
            let read = read_line(&mut self.inner, buffer).map_err(Error::Io)?;

            if read == 0 {
                self.done = true;
                break;
            }

            self.line_no += 1;

            if buffer.starts_with(FASTA_DIRECTIVE) {
                self.done = true;
                break;
            }

            if buffer.trim().is_empty() || buffer.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let record = buffer
                .parse::<Record>()
                .map_err(|err| Error::Record(self.line_no, err, buffer.clone()))?;

            return Ok(Some(record));
        }

        Ok(None)
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }

    /// Reads every remaining [`Record`] into memory.
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        self.records().collect()
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self {
            inner,
            line_no: 0,
            done: false,
        }
    }
}
