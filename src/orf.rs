//! ORF locations reported as GFF3 by an ORF finder.
//!
//! TransDecoder's `LongOrfs` step describes each candidate ORF as a series of
//! GFF3 features on the transcript it was found on. The `mRNA` feature for
//! an ORF carries the ORF's name as its `ID` attribute and the ORF's offset
//! within the transcript as its start position.
//!
//! ```
//! use hmmremap::orf;
//!
//! let data = b"##gff-version 3\n\
//! Transcript_1\ttransdecoder\tmRNA\t100\t250\t.\t+\t.\tID=Transcript_1.p1;Parent=GENE.1\n";
//!
//! let mut reader = orf::Reader::new(&data[..]);
//! let records = reader.read_all()?;
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].id(), Some("Transcript_1.p1"));
//! assert_eq!(records[0].start(), 100);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod reader;
pub mod record;

pub use reader::Reader;
pub use record::Record;
