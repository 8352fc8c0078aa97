//! A builder for remapping domain tables stored on disk.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::domain;
use crate::domain::QueryNamer;
use crate::orf;
use crate::remap;

/// An error related to remapping files.
#[derive(Debug)]
pub enum Error {
    /// An input file could not be opened.
    Open(PathBuf, io::Error),

    /// The output file could not be created.
    Create(PathBuf, io::Error),

    /// The domain table could not be read.
    Domains(domain::reader::Error),

    /// The ORF annotations could not be read.
    Orfs(orf::reader::Error),

    /// The records could not be remapped.
    Remap(remap::Error),

    /// The output could not be written.
    Write(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Open(path, err) => write!(f, "opening `{}`: {err}", path.display()),
            Error::Create(path, err) => write!(f, "creating `{}`: {err}", path.display()),
            Error::Domains(err) => write!(f, "domain table error: {err}"),
            Error::Orfs(err) => write!(f, "ORF annotation error: {err}"),
            Error::Remap(err) => write!(f, "remap error: {err}"),
            Error::Write(err) => write!(f, "writing output: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Counts describing a completed remap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// The number of domain hits read.
    pub domains: usize,

    /// The number of ORF annotation features read.
    pub annotations: usize,

    /// The number of domain hits written.
    pub written: usize,

    /// The number of domain hits dropped for lack of a matching ORF.
    pub unmatched: usize,

    /// Whether the hits were written unchanged because an input was empty.
    pub passthrough: bool,
}

/// A builder for remapping domain tables.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The namer applied to query names as the domain table is read.
    namer: QueryNamer,
}

impl Builder {
    /// Sets the namer applied to query names as the domain table is read.
    pub fn query_namer(mut self, namer: QueryNamer) -> Self {
        self.namer = namer;
        self
    }

    /// Remaps a domain table against ORF annotations, writing CSV to
    /// `output`.
    ///
    /// # Examples
    ///
    /// ```
    /// let hits = b"PF00001.1 - 100 Transcript_1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 \
    ///              39.5 0.1 1 99 15 45 10 50 0.95 -\n";
    /// let orfs = b"Transcript_1\ttransdecoder\tmRNA\t100\t400\t.\t+\t.\tID=Transcript_1.p1\n";
    ///
    /// let mut output = Vec::new();
    /// let summary = hmmremap::remap::Builder::default()
    ///     .try_remap(&hits[..], &orfs[..], &mut output)?;
    ///
    /// assert_eq!(summary.written, 1);
    ///
    /// let output = String::from_utf8(output)?;
    /// let row = output.lines().nth(1).unwrap();
    /// assert!(row.contains(",Transcript_1,"));
    /// assert!(row.contains(",145,235,130,250,"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_remap<D, O, W>(&self, domains: D, orfs: O, output: W) -> Result<Summary>
    where
        D: BufRead,
        O: BufRead,
        W: Write,
    {
        let prepared = self.prepare(domains, orfs)?;
        prepared.write(output)
    }

    /// Reads both tables and remaps the hits without writing anything.
    fn prepare<D, O>(&self, domains: D, orfs: O) -> Result<Prepared>
    where
        D: BufRead,
        O: BufRead,
    {
        let hits = domain::Reader::with_namer(domains, self.namer.clone())
            .read_all()
            .map_err(Error::Domains)?;
        let annotations = orf::Reader::new(orfs).read_all().map_err(Error::Orfs)?;

        debug!(
            "remap: read {} domain hits and {} ORF features",
            hits.len(),
            annotations.len()
        );

        let remapped = remap::remap(&hits, &annotations).map_err(Error::Remap)?;

        if remapped.is_passthrough() {
            info!("remap: an input table is empty; writing domain hits unchanged");
        }

        if remapped.unmatched() > 0 {
            warn!(
                "remap: dropped {} of {} domain hits with no matching ORF `ID`",
                remapped.unmatched(),
                hits.len()
            );
        }

        Ok(Prepared {
            domains: hits.len(),
            annotations: annotations.len(),
            remapped,
        })
    }

    /// Remaps the domain table at `domains` against the ORF annotations at
    /// `orfs`, writing CSV to the file at `output`.
    ///
    /// Either input may be gzip-compressed. The output file is only created
    /// once both inputs have been parsed and remapped, so a failure leaves no
    /// partial output behind.
    pub fn try_remap_paths<D, O, P>(&self, domains: D, orfs: O, output: P) -> Result<Summary>
    where
        D: AsRef<Path>,
        O: AsRef<Path>,
        P: AsRef<Path>,
    {
        let (domains, orfs, output) = (domains.as_ref(), orfs.as_ref(), output.as_ref());

        let domain_reader =
            crate::io::open(domains).map_err(|err| Error::Open(domains.to_path_buf(), err))?;
        let orf_reader =
            crate::io::open(orfs).map_err(|err| Error::Open(orfs.to_path_buf(), err))?;

        let prepared = self.prepare(domain_reader, orf_reader)?;

        let file =
            File::create(output).map_err(|err| Error::Create(output.to_path_buf(), err))?;

        let summary = prepared.write(BufWriter::new(file))?;

        info!(
            "remap: wrote {} domain hits to {}",
            summary.written,
            output.display()
        );

        Ok(summary)
    }
}

/// Parsed and remapped hits waiting to be written.
#[derive(Debug)]
struct Prepared {
    /// The number of domain hits read.
    domains: usize,

    /// The number of ORF annotation features read.
    annotations: usize,

    /// The remapped hits.
    remapped: remap::Remapped,
}

impl Prepared {
    /// Writes the remapped hits as CSV and summarizes the run.
    fn write<W>(self, output: W) -> Result<Summary>
    where
        W: Write,
    {
        let mut writer = domain::Writer::new(output);
        writer
            .write_all(self.remapped.records())
            .map_err(Error::Write)?;

        Ok(Summary {
            domains: self.domains,
            annotations: self.annotations,
            written: self.remapped.records().len(),
            unmatched: self.remapped.unmatched(),
            passthrough: self.remapped.is_passthrough(),
        })
    }
}
