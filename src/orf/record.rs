//! A GFF3 feature record.

pub mod attributes;

use std::num::ParseFloatError;
use std::num::ParseIntError;
use std::str::FromStr;

pub use attributes::Attributes;
use omics::coordinate::Strand;
use omics::coordinate::position::Number;
use omics::coordinate::strand;

/// The delimiter between columns.
pub const DELIMITER: char = '\t';

/// The number of expected fields in a feature record.
pub const NUM_FIELDS: usize = 9;

/// The value used for a missing score, strand, or phase.
const MISSING: &str = ".";

/// The value used for a strand that is relevant but unknown.
const UNKNOWN_STRAND: &str = "?";

/// The largest valid phase.
const MAX_PHASE: u8 = 2;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a feature record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the line.
    IncorrectNumberOfFields(usize),

    /// An invalid start position.
    InvalidStart(ParseIntError),

    /// An invalid end position.
    InvalidEnd(ParseIntError),

    /// The start position is after the end position.
    StartExceedsEnd(Number, Number),

    /// An invalid score.
    InvalidScore(ParseFloatError),

    /// An invalid strand.
    InvalidStrand(strand::Error),

    /// An invalid phase.
    InvalidPhase(String),

    /// Invalid attributes.
    InvalidAttributes(attributes::ParseError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in feature: expected {NUM_FIELDS} fields, found {n} \
                 fields"
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {err}"),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {err}"),
            ParseError::StartExceedsEnd(start, end) => write!(
                f,
                "the start position ({start}) exceeds the end position ({end})"
            ),
            ParseError::InvalidScore(err) => write!(f, "invalid score: {err}"),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {err}"),
            ParseError::InvalidPhase(value) => {
                write!(f, "invalid phase: expected \".\" or 0-{MAX_PHASE}, found \"{value}\"")
            }
            ParseError::InvalidAttributes(err) => write!(f, "invalid attributes: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Record`].
#[derive(Debug)]
pub enum Error {
    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A single GFF3 feature.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The sequence the feature lies on.
    seqid: String,

    /// The program or database that produced the feature.
    source: String,

    /// The feature type (e.g., `mRNA` or `CDS`).
    kind: String,

    /// The 1-based, inclusive start position.
    start: Number,

    /// The 1-based, inclusive end position.
    end: Number,

    /// The score.
    score: Option<f64>,

    /// The strand.
    strand: Option<Strand>,

    /// The phase.
    phase: Option<u8>,

    /// The attributes.
    attributes: Attributes,
}

impl Record {
    /// Gets the sequence id.
    pub fn seqid(&self) -> &str {
        &self.seqid
    }

    /// Gets the source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Gets the feature type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Gets the 1-based start position.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::orf::Record;
    ///
    /// let record = "Transcript_1\ttransdecoder\tmRNA\t100\t250\t.\t+\t.\tID=Transcript_1.p1"
    ///     .parse::<Record>()?;
    ///
    /// assert_eq!(record.start(), 100);
    /// assert_eq!(record.end(), 250);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the 1-based end position.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the score.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Gets the strand.
    pub fn strand(&self) -> Option<&Strand> {
        self.strand.as_ref()
    }

    /// Gets the phase.
    pub fn phase(&self) -> Option<u8> {
        self.phase
    }

    /// Gets the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Gets the value of the `ID` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get(attributes::ID)
    }
}

/// Parses the strand column.
fn parse_strand(value: &str) -> Result<Option<Strand>> {
    match value {
        MISSING | UNKNOWN_STRAND => Ok(None),
        value => value
            .parse::<Strand>()
            .map(Some)
            .map_err(|err| Error::Parse(ParseError::InvalidStrand(err))),
    }
}

/// Parses the phase column.
fn parse_phase(value: &str) -> Result<Option<u8>> {
    if value == MISSING {
        return Ok(None);
    }

    match value.parse::<u8>() {
        Ok(phase) if phase <= MAX_PHASE => Ok(Some(phase)),
        _ => Err(Error::Parse(ParseError::InvalidPhase(value.to_string()))),
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s.split(DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_FIELDS {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                parts.len(),
            )));
        }

        let start: Number = parts[3]
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidStart(err)))?;
        let end: Number = parts[4]
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidEnd(err)))?;

        if start > end {
            return Err(Error::Parse(ParseError::StartExceedsEnd(start, end)));
        }

        let score = match parts[5] {
            MISSING => None,
            value => Some(
                value
                    .parse()
                    .map_err(|err| Error::Parse(ParseError::InvalidScore(err)))?,
            ),
        };

        let attributes = parts[8]
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidAttributes(err)))?;

        Ok(Record {
            seqid: parts[0].to_string(),
            source: parts[1].to_string(),
            kind: parts[2].to_string(),
            start,
            end,
            score,
            strand: parse_strand(parts[6])?,
            phase: parse_phase(parts[7])?,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let record = "Transcript_1\ttransdecoder\tCDS\t100\t250\t12.5\t-\t0\t\
                      ID=cds.Transcript_1.p1;Parent=Transcript_1.p1"
            .parse::<Record>()
            .unwrap();

        assert_eq!(record.seqid(), "Transcript_1");
        assert_eq!(record.source(), "transdecoder");
        assert_eq!(record.kind(), "CDS");
        assert_eq!(record.start(), 100);
        assert_eq!(record.end(), 250);
        assert_eq!(record.score(), Some(12.5));
        assert_eq!(record.strand(), Some(&Strand::Negative));
        assert_eq!(record.phase(), Some(0));
        assert_eq!(record.id(), Some("cds.Transcript_1.p1"));
        assert_eq!(
            record.attributes().get("Parent"),
            Some("Transcript_1.p1")
        );
    }

    #[test]
    fn missing_values() {
        let record = "Transcript_1\ttransdecoder\tgene\t1\t900\t.\t?\t.\tName=ORF"
            .parse::<Record>()
            .unwrap();

        assert_eq!(record.score(), None);
        assert_eq!(record.strand(), None);
        assert_eq!(record.phase(), None);
        assert_eq!(record.id(), None);
    }

    #[test]
    fn incorrect_number_of_fields() {
        let err = "Transcript_1 transdecoder mRNA 1 900 . + . ID=x"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Parse(ParseError::IncorrectNumberOfFields(1))
        ));
        assert_eq!(
            err.to_string(),
            "parse error: invalid number of fields in feature: expected 9 fields, found 1 fields"
        );
    }

    #[test]
    fn invalid_start() {
        let err = "Transcript_1\ttransdecoder\tmRNA\t?\t900\t.\t+\t.\tID=x"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidStart(_))));
        assert_eq!(
            err.to_string(),
            "parse error: invalid start: invalid digit found in string"
        );
    }

    #[test]
    fn start_exceeds_end() {
        let err = "Transcript_1\ttransdecoder\tmRNA\t901\t900\t.\t+\t.\tID=x"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Parse(ParseError::StartExceedsEnd(901, 900))
        ));
        assert_eq!(
            err.to_string(),
            "parse error: the start position (901) exceeds the end position (900)"
        );
    }

    #[test]
    fn invalid_strand() {
        let err = "Transcript_1\ttransdecoder\tmRNA\t1\t900\t.\t*\t.\tID=x"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidStrand(_))));
    }

    #[test]
    fn invalid_phase() {
        let err = "Transcript_1\ttransdecoder\tCDS\t1\t900\t.\t+\t3\tID=x"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidPhase(_))));
        assert_eq!(
            err.to_string(),
            "parse error: invalid phase: expected \".\" or 0-2, found \"3\""
        );
    }

    #[test]
    fn invalid_attributes() {
        let err = "Transcript_1\ttransdecoder\tmRNA\t1\t900\t.\t+\t.\tID"
            .parse::<Record>()
            .unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::InvalidAttributes(_))));
    }
}
