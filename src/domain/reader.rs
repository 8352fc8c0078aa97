//! A domain table reader.

use std::io;
use std::io::BufRead;
use std::iter;

use crate::domain::QueryNamer;
use crate::domain::Record;
use crate::domain::record;
use crate::domain::record::COMMENT_PREFIX;
use crate::io::read_line;

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

/// A domain table reader.
#[derive(Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The namer applied to each record's query name.
    namer: QueryNamer,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a domain table reader that normalizes query names with the
    /// default [`QueryNamer`].
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"# no hits\n";
    /// let reader = hmmremap::domain::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::with_namer(inner, QueryNamer::default())
    }

    /// Creates a domain table reader with the provided [`QueryNamer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::domain;
    ///
    /// let data = b"PF00001.1 - 100 tx_4.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 \
    ///              39.5 0.1 1 99 10 50 8 52 0.95 -\n";
    ///
    /// let namer = domain::QueryNamer::try_new("tx")?;
    /// let mut reader = domain::Reader::with_namer(&data[..], namer);
    /// let records = reader.read_all()?;
    ///
    /// assert_eq!(records[0].query_name(), "tx_4");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_namer(inner: T, namer: QueryNamer) -> Self {
        Self {
            inner,
            namer,
            line_no: 0,
        }
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Attempts to read the next [`Record`], skipping comments and blank
    /// lines.
    ///
    /// Returns [`None`] once the underlying reader is exhausted.
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>> {
        loop {
            let read = read_line(&mut self.inner, buffer).map_err(Error::Io)?;

            if read == 0 {
                return Ok(None);
            }

            self.line_no += 1;

            let line = buffer.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let mut record = line
                .parse::<Record>()
                .map_err(|err| Error::Record(self.line_no, err, line.to_string()))?;

            let name = self.namer.transcript_name(record.full_query_name()).to_string();
            record.set_query_name(name);

            return Ok(Some(record));
        }
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"#\n\
    /// PF00001.1 - 100 Transcript_1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 39.5 0.1 1 99 10 50 8 52 0.95 -\n\
    /// PF00002.1 - 100 Transcript_2.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 39.5 0.1 1 99 10 50 8 52 0.95 -\n";
    ///
    /// let mut reader = hmmremap::domain::Reader::new(&data[..]);
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    ///
    /// assert_eq!(records.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }

    /// Reads every remaining [`Record`] into memory.
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        self.records().collect()
    }
}
