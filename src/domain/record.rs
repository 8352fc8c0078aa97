//! A domain table record.

use std::num::ParseFloatError;
use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

/// The prefix for a comment line.
pub const COMMENT_PREFIX: char = '#';

/// The number of fixed fields before the free-text description.
pub const NUM_FIXED_FIELDS: usize = 22;

/// The separator placed between the tokens of a description.
const DESCRIPTION_SEPARATOR: &str = " ";

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a domain table record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the line.
    IncorrectNumberOfFields(usize),

    /// A column that should hold an integer could not be parsed.
    InvalidInteger(&'static str, ParseIntError),

    /// A column that should hold a float could not be parsed.
    InvalidFloat(&'static str, ParseFloatError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in domain table record: expected at least \
                 {NUM_FIXED_FIELDS} fields, found {n} fields"
            ),
            ParseError::InvalidInteger(column, err) => write!(f, "invalid {column}: {err}"),
            ParseError::InvalidFloat(column, err) => write!(f, "invalid {column}: {err}"),
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

/// A single domain hit from a domain table.
///
/// All coordinates are as reported by `hmmscan`: `hmm_coord_*` are positions
/// within the profile, while `ali_coord_*` and `env_coord_*` are amino acid
/// positions within the query (the translated ORF).
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The name of the profile.
    target_name: String,

    /// The accession of the profile.
    target_accession: String,

    /// The length of the profile.
    tlen: Number,

    /// The normalized query name.
    query_name: String,

    /// The accession of the query.
    query_accession: String,

    /// The length of the query.
    qlen: Number,

    /// The E-value of the full sequence.
    full_evalue: f64,

    /// The score of the full sequence.
    full_score: f64,

    /// The bias of the full sequence.
    full_bias: f64,

    /// The number of this domain.
    domain_num: usize,

    /// The total number of domains found in the query.
    domain_total: usize,

    /// The conditional E-value of this domain.
    domain_c_evalue: f64,

    /// The independent E-value of this domain.
    domain_i_evalue: f64,

    /// The score of this domain.
    domain_score: f64,

    /// The bias of this domain.
    domain_bias: f64,

    /// The start of the match within the profile.
    hmm_coord_from: Number,

    /// The end of the match within the profile.
    hmm_coord_to: Number,

    /// The start of the alignment within the query.
    ali_coord_from: Number,

    /// The end of the alignment within the query.
    ali_coord_to: Number,

    /// The start of the envelope within the query.
    env_coord_from: Number,

    /// The end of the envelope within the query.
    env_coord_to: Number,

    /// The mean posterior probability of the aligned residues.
    accuracy: f64,

    /// The free-text description of the profile.
    description: String,

    /// The query name exactly as it appeared in the table.
    full_query_name: String,
}

impl Record {
    /// Gets the target (profile) name.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Gets the target (profile) accession.
    pub fn target_accession(&self) -> &str {
        &self.target_accession
    }

    /// Gets the target (profile) length.
    pub fn tlen(&self) -> Number {
        self.tlen
    }

    /// Gets the normalized query name.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::domain::Record;
    ///
    /// let line = "PF00001.1 - 100 Transcript_1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 \
    ///             39.5 0.1 1 99 10 50 8 52 0.95 -";
    /// let record = line.parse::<Record>()?;
    ///
    /// // Until a namer is applied, the query name is the raw name.
    /// assert_eq!(record.query_name(), "Transcript_1.p1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// Gets the query accession.
    pub fn query_accession(&self) -> &str {
        &self.query_accession
    }

    /// Gets the query length.
    pub fn qlen(&self) -> Number {
        self.qlen
    }

    /// Gets the E-value of the full sequence.
    pub fn full_evalue(&self) -> f64 {
        self.full_evalue
    }

    /// Gets the score of the full sequence.
    pub fn full_score(&self) -> f64 {
        self.full_score
    }

    /// Gets the bias of the full sequence.
    pub fn full_bias(&self) -> f64 {
        self.full_bias
    }

    /// Gets the number of this domain.
    pub fn domain_num(&self) -> usize {
        self.domain_num
    }

    /// Gets the total number of domains in the query.
    pub fn domain_total(&self) -> usize {
        self.domain_total
    }

    /// Gets the conditional E-value of this domain.
    pub fn domain_c_evalue(&self) -> f64 {
        self.domain_c_evalue
    }

    /// Gets the independent E-value of this domain.
    pub fn domain_i_evalue(&self) -> f64 {
        self.domain_i_evalue
    }

    /// Gets the score of this domain.
    pub fn domain_score(&self) -> f64 {
        self.domain_score
    }

    /// Gets the bias of this domain.
    pub fn domain_bias(&self) -> f64 {
        self.domain_bias
    }

    /// Gets the start of the match within the profile.
    pub fn hmm_coord_from(&self) -> Number {
        self.hmm_coord_from
    }

    /// Gets the end of the match within the profile.
    pub fn hmm_coord_to(&self) -> Number {
        self.hmm_coord_to
    }

    /// Gets the start of the alignment within the query.
    pub fn ali_coord_from(&self) -> Number {
        self.ali_coord_from
    }

    /// Gets the end of the alignment within the query.
    pub fn ali_coord_to(&self) -> Number {
        self.ali_coord_to
    }

    /// Gets the start of the envelope within the query.
    pub fn env_coord_from(&self) -> Number {
        self.env_coord_from
    }

    /// Gets the end of the envelope within the query.
    pub fn env_coord_to(&self) -> Number {
        self.env_coord_to
    }

    /// Gets the accuracy.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Gets the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Gets the query name exactly as it appeared in the table.
    pub fn full_query_name(&self) -> &str {
        &self.full_query_name
    }

    /// Replaces the normalized query name.
    pub fn set_query_name(&mut self, name: impl Into<String>) {
        self.query_name = name.into();
    }

    /// Returns a copy of this record with the alignment and envelope
    /// coordinates passed through `f`.
    ///
    /// The profile coordinates (`hmm_coord_*`) are left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::domain::Record;
    ///
    /// let line = "PF00001.1 - 100 T1.p1 - 300 1e-10 40.0 0.1 1 1 1e-12 2e-12 \
    ///             39.5 0.1 1 99 15 45 10 50 0.95 -";
    /// let record = line.parse::<Record>()?;
    ///
    /// let doubled = record.try_map_coordinates(|c| Ok::<_, ()>(c * 2)).unwrap();
    /// assert_eq!(doubled.ali_coord_from(), 30);
    /// assert_eq!(doubled.env_coord_to(), 100);
    /// assert_eq!(doubled.hmm_coord_to(), 99);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_map_coordinates<F, E>(&self, f: F) -> std::result::Result<Self, E>
    where
        F: Fn(Number) -> std::result::Result<Number, E>,
    {
        Ok(Self {
            env_coord_from: f(self.env_coord_from)?,
            env_coord_to: f(self.env_coord_to)?,
            ali_coord_from: f(self.ali_coord_from)?,
            ali_coord_to: f(self.ali_coord_to)?,
            ..self.clone()
        })
    }
}

/// Parses an integer column.
fn parse_integer<T>(column: &'static str, value: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    value
        .parse()
        .map_err(|err| Error::Parse(ParseError::InvalidInteger(column, err)))
}

/// Parses a float column.
fn parse_float(column: &'static str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|err| Error::Parse(ParseError::InvalidFloat(column, err)))
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s.split_whitespace().collect::<Vec<_>>();
        if parts.len() < NUM_FIXED_FIELDS {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                parts.len(),
            )));
        }

        let full_query_name = parts[3].to_string();

        Ok(Record {
            target_name: parts[0].to_string(),
            target_accession: parts[1].to_string(),
            tlen: parse_integer("tlen", parts[2])?,
            query_name: full_query_name.clone(),
            query_accession: parts[4].to_string(),
            qlen: parse_integer("qlen", parts[5])?,
            full_evalue: parse_float("full_evalue", parts[6])?,
            full_score: parse_float("full_score", parts[7])?,
            full_bias: parse_float("full_bias", parts[8])?,
            domain_num: parse_integer("domain_num", parts[9])?,
            domain_total: parse_integer("domain_total", parts[10])?,
            domain_c_evalue: parse_float("domain_c_evalue", parts[11])?,
            domain_i_evalue: parse_float("domain_i_evalue", parts[12])?,
            domain_score: parse_float("domain_score", parts[13])?,
            domain_bias: parse_float("domain_bias", parts[14])?,
            hmm_coord_from: parse_integer("hmm_coord_from", parts[15])?,
            hmm_coord_to: parse_integer("hmm_coord_to", parts[16])?,
            ali_coord_from: parse_integer("ali_coord_from", parts[17])?,
            ali_coord_to: parse_integer("ali_coord_to", parts[18])?,
            env_coord_from: parse_integer("env_coord_from", parts[19])?,
            env_coord_to: parse_integer("env_coord_to", parts[20])?,
            accuracy: parse_float("accuracy", parts[21])?,
            description: parts[NUM_FIXED_FIELDS..].join(DESCRIPTION_SEPARATOR),
            full_query_name,
        })
    }
}
