//! Remapping domain hits from ORF coordinates onto transcript coordinates.
//!
//! `hmmscan` reports the alignment and envelope of each domain in amino acid
//! positions of the translated ORF. Each ORF starts at a known nucleotide
//! offset within its transcript, so every such position can be moved into
//! transcript space with
//!
//! ```text
//! transcript position = ORF start + 3 × ORF position
//! ```
//!
//! The core of this module is [`remap()`], a pure function over already
//! parsed records. The [`Builder`] wraps it with the reading and writing of
//! files.
//!
//! ```
//! use hmmremap::domain;
//! use hmmremap::orf;
//! use hmmremap::remap::remap;
//!
//! let hits = b"PF00001.1 - 100 T1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 39.5 0.1 \
//!              1 99 15 45 10 50 0.95 -\n";
//! let orfs = b"T1\ttransdecoder\tmRNA\t100\t400\t.\t+\t.\tID=T1.p1\n";
//!
//! let hits = domain::Reader::new(&hits[..]).read_all()?;
//! let orfs = orf::Reader::new(&orfs[..]).read_all()?;
//!
//! let remapped = remap(&hits, &orfs)?;
//! let record = &remapped.records()[0];
//!
//! assert_eq!(record.env_coord_from(), 130);
//! assert_eq!(record.env_coord_to(), 250);
//! assert_eq!(record.ali_coord_from(), 145);
//! assert_eq!(record.ali_coord_to(), 235);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashMap;

use omics::coordinate::position::Number;

use crate::domain;
use crate::orf;

pub mod builder;

pub use builder::Builder;

/// The number of nucleotides that encode a single amino acid.
pub const CODON_LENGTH: Number = 3;

/// An error related to remapping.
#[derive(Debug)]
pub enum Error {
    /// A remapped coordinate does not fit within a [`Number`].
    CoordinateOverflow {
        /// The full query name of the offending record.
        query: String,

        /// The start of the ORF.
        start: Number,

        /// The coordinate that could not be remapped.
        coordinate: Number,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CoordinateOverflow {
                query,
                start,
                coordinate,
            } => write!(
                f,
                "coordinate overflow for `{query}`: {start} + {CODON_LENGTH} × {coordinate} does \
                 not fit in a position"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The outcome of [`remap()`].
#[derive(Clone, Debug, PartialEq)]
pub struct Remapped {
    /// The remapped records.
    records: Vec<domain::Record>,

    /// The number of records without a matching ORF.
    unmatched: usize,

    /// Whether the records were passed through unchanged.
    passthrough: bool,
}

impl Remapped {
    /// Gets the remapped records.
    pub fn records(&self) -> &[domain::Record] {
        &self.records
    }

    /// Consumes self and returns the remapped records.
    pub fn into_records(self) -> Vec<domain::Record> {
        self.records
    }

    /// Gets the number of domain hits dropped because no ORF carried their
    /// query name as its `ID`.
    pub fn unmatched(&self) -> usize {
        self.unmatched
    }

    /// Returns whether the hits were passed through unchanged because one of
    /// the inputs was empty.
    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }
}

/// Translates a single amino acid position into transcript space.
///
/// Returns [`None`] if the result does not fit within a [`Number`].
///
/// # Examples
///
/// ```
/// use hmmremap::remap::translate;
///
/// assert_eq!(translate(100, 10), Some(130));
/// assert_eq!(translate(1, 0), Some(1));
/// assert_eq!(translate(u64::MAX, 1), None);
/// ```
pub fn translate(start: Number, coordinate: Number) -> Option<Number> {
    coordinate.checked_mul(CODON_LENGTH)?.checked_add(start)
}

/// Remaps the alignment and envelope coordinates of each domain hit onto the
/// transcript its ORF was found on.
///
/// Hits are joined to ORFs where the hit's
/// [full query name](domain::Record::full_query_name) equals the ORF's
/// [`ID`](orf::Record::id). The join is an inner join:
///
/// * hits without a matching ORF are dropped and counted in
///   [`Remapped::unmatched()`],
/// * a hit matching several ORFs appears once per ORF, and
/// * the output follows the order of `matches`.
///
/// If either input is empty, the hits are returned unchanged.
pub fn remap(matches: &[domain::Record], annotations: &[orf::Record]) -> Result<Remapped> {
    if matches.is_empty() || annotations.is_empty() {
        return Ok(Remapped {
            records: matches.to_vec(),
            unmatched: 0,
            passthrough: true,
        });
    }

    let mut starts = HashMap::<&str, Vec<Number>>::new();
    for annotation in annotations {
        if let Some(id) = annotation.id() {
            starts.entry(id).or_default().push(annotation.start());
        }
    }

    let mut records = Vec::with_capacity(matches.len());
    let mut unmatched = 0;

    for record in matches {
        let Some(orf_starts) = starts.get(record.full_query_name()) else {
            unmatched += 1;
            continue;
        };

        for &start in orf_starts {
            let remapped = record.try_map_coordinates(|coordinate| {
                translate(start, coordinate).ok_or_else(|| Error::CoordinateOverflow {
                    query: record.full_query_name().to_string(),
                    start,
                    coordinate,
                })
            })?;

            records.push(remapped);
        }
    }

    Ok(Remapped {
        records,
        unmatched,
        passthrough: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a domain hit with the provided query name and alignment and
    /// envelope coordinates.
    fn hit(query: &str, env: (Number, Number), ali: (Number, Number)) -> domain::Record {
        format!(
            "PF00001.21 7tm_1 268 {query} - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 39.5 0.1 1 99 {} \
             {} {} {} 0.95 7 transmembrane receptor (rhodopsin family)",
            ali.0, ali.1, env.0, env.1
        )
        .parse()
        .unwrap()
    }

    /// Builds an `mRNA` feature with the provided ID and start.
    fn orf(id: &str, start: Number) -> orf::Record {
        format!("T\ttransdecoder\tmRNA\t{start}\t{}\t.\t+\t.\tID={id}", start + 900)
            .parse()
            .unwrap()
    }

    #[test]
    fn remaps_matched_hits() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let matches = vec![hit("T1.p1", (10, 50), (15, 45))];
        let annotations = vec![orf("T1.p1", 100)];

        let remapped = remap(&matches, &annotations)?;

        assert!(!remapped.is_passthrough());
        assert_eq!(remapped.unmatched(), 0);
        assert_eq!(remapped.records().len(), 1);

        let record = &remapped.records()[0];
        assert_eq!(record.env_coord_from(), 130);
        assert_eq!(record.env_coord_to(), 250);
        assert_eq!(record.ali_coord_from(), 145);
        assert_eq!(record.ali_coord_to(), 235);

        Ok(())
    }

    #[test]
    fn preserves_other_columns() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let original = hit("T1.p1", (10, 50), (15, 45));
        let remapped = remap(&[original.clone()], &[orf("T1.p1", 7)])?;
        let record = &remapped.records()[0];

        assert_eq!(record.target_name(), original.target_name());
        assert_eq!(record.target_accession(), original.target_accession());
        assert_eq!(record.query_name(), original.query_name());
        assert_eq!(record.full_evalue(), original.full_evalue());
        assert_eq!(record.hmm_coord_from(), original.hmm_coord_from());
        assert_eq!(record.hmm_coord_to(), original.hmm_coord_to());
        assert_eq!(record.description(), original.description());
        assert_eq!(record.full_query_name(), original.full_query_name());

        Ok(())
    }

    #[test]
    fn drops_unmatched_hits() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let matches = vec![
            hit("T1.p1", (10, 50), (15, 45)),
            hit("T2.p1", (1, 20), (2, 19)),
            hit("T3.p1", (5, 6), (5, 6)),
        ];
        let annotations = vec![orf("T3.p1", 1), orf("T1.p1", 100)];

        let remapped = remap(&matches, &annotations)?;

        assert_eq!(remapped.unmatched(), 1);
        assert_eq!(
            remapped
                .records()
                .iter()
                .map(|r| r.full_query_name())
                .collect::<Vec<_>>(),
            vec!["T1.p1", "T3.p1"]
        );
        assert_eq!(remapped.records()[1].env_coord_from(), 16);

        Ok(())
    }

    #[test]
    fn passes_through_when_annotations_are_empty() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let matches = vec![hit("T1.p1", (10, 50), (15, 45))];
        let remapped = remap(&matches, &[])?;

        assert!(remapped.is_passthrough());
        assert_eq!(remapped.records(), &matches[..]);

        Ok(())
    }

    #[test]
    fn passes_through_when_matches_are_empty() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let remapped = remap(&[], &[orf("T1.p1", 100)])?;

        assert!(remapped.is_passthrough());
        assert!(remapped.records().is_empty());

        Ok(())
    }

    #[test]
    fn ignores_features_without_id() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let matches = vec![hit("T1.p1", (10, 50), (15, 45))];
        let annotations = vec![
            "T\ttransdecoder\tgene\t1\t900\t.\t+\t.\tName=T1.p1"
                .parse::<orf::Record>()
                .unwrap(),
        ];

        let remapped = remap(&matches, &annotations)?;

        assert!(!remapped.is_passthrough());
        assert!(remapped.records().is_empty());
        assert_eq!(remapped.unmatched(), 1);

        Ok(())
    }

    #[test]
    fn duplicate_ids_produce_one_row_each() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let matches = vec![hit("T1.p1", (10, 50), (15, 45))];
        let annotations = vec![orf("T1.p1", 100), orf("T1.p1", 200)];

        let remapped = remap(&matches, &annotations)?;

        assert_eq!(
            remapped
                .records()
                .iter()
                .map(|r| r.env_coord_from())
                .collect::<Vec<_>>(),
            vec![130, 230]
        );

        Ok(())
    }

    #[test]
    fn transform_preserves_ordering() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let matches = vec![hit("T1.p1", (1, 2), (1, 1)), hit("T1.p1", (0, 500), (3, 499))];
        let remapped = remap(&matches, &[orf("T1.p1", 55)])?;

        for record in remapped.records() {
            assert!(record.env_coord_from() <= record.env_coord_to());
            assert!(record.ali_coord_from() <= record.ali_coord_to());
        }

        Ok(())
    }

    #[test]
    fn overflow() {
        let matches = vec![hit("T1.p1", (10, u64::MAX), (15, 45))];
        let err = remap(&matches, &[orf("T1.p1", 1)]).unwrap_err();

        assert!(matches!(
            err,
            Error::CoordinateOverflow {
                coordinate: u64::MAX,
                ..
            }
        ));
    }
}
