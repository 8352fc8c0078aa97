//! Per-domain hits reported by `hmmscan --domtblout`.
//!
//! Each non-comment line of a domain table is parsed into a [`Record`]. The
//! raw query name is kept as the record's
//! [full query name](Record::full_query_name), while a [`QueryNamer`] derives
//! the name of the transcript the ORF came from. Records are written back out
//! as CSV with a [`Writer`].
//!
//! ```
//! use hmmremap::domain;
//!
//! let data = b"# comment\n\
//! PF00001.1 PF00001.1 100 Transcript_1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 39.5 0.1 \
//! 1 99 10 50 8 52 0.95 A domain\n";
//!
//! let mut reader = domain::Reader::new(&data[..]);
//! let records = reader.read_all()?;
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].query_name(), "Transcript_1");
//! assert_eq!(records[0].full_query_name(), "Transcript_1.p1");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod name;
pub mod reader;
pub mod record;
pub mod writer;

pub use name::QueryNamer;
pub use reader::Reader;
pub use record::Record;
pub use writer::Writer;
