//! `hmmremap` is a crate for running protein domain searches over the ORFs of
//! a transcriptome and placing the resulting hits back onto the transcripts.
//!
//! The crate provides three main points of entry:
//!
//! - Parsing the per-domain tables written by `hmmscan --domtblout` and the
//!   GFF3 that ORF finders such as TransDecoder use to describe where each ORF
//!   lies.
//! - Remapping each domain hit from amino acid coordinates of its ORF to
//!   nucleotide coordinates of its transcript.
//! - Declaring the `hmmpress`, `hmmscan`, and remap steps as tasks for an
//!   external build-graph scheduler.
//!
//! ## Remapping domain hits
//!
//! Most users will want to use the [`remap::Builder`] facility, which reads
//! both tables from disk, joins them, and writes the remapped hits as CSV.
//! Hits are joined to ORFs by comparing the hit's
//! [full query name](domain::Record::full_query_name) with the ORF's
//! [`ID`](orf::Record::id). Hits without a matching ORF are dropped (and
//! counted), while every alignment and envelope coordinate of the remaining
//! hits is moved to `ORF start + 3 × coordinate`.
//!
//! If you already hold parsed records, [`remap::remap()`] performs the same
//! join and transform without touching the filesystem.
//!
//! ```
//! let hits = b"PF00001.1 - 100 Transcript_1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 \
//!              39.5 0.1 1 99 15 45 10 50 0.95 -\n";
//! let orfs = b"Transcript_1\ttransdecoder\tmRNA\t100\t400\t.\t+\t.\tID=Transcript_1.p1\n";
//!
//! let mut output = Vec::new();
//! let summary = hmmremap::remap::Builder::default().try_remap(&hits[..], &orfs[..], &mut output)?;
//!
//! assert_eq!(summary.written, 1);
//! assert_eq!(summary.unmatched, 0);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Declaring tasks
//!
//! The [`task`] module describes each step as a [`task::Task`] with a name,
//! file dependencies, targets, and actions. Constructing an `hmmscan` or
//! `hmmpress` task resolves the executable first (see [`tool`]), so a missing
//! installation is reported before any work is attempted.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod domain;
pub mod io;
pub mod orf;
pub mod remap;
pub mod task;
pub mod tool;
