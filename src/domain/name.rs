//! Normalization of ORF query names back to transcript names.
//!
//! ORF finders name each ORF after the transcript it was found on. Current
//! TransDecoder releases produce names such as `Transcript_12.p1`, while older
//! releases produce names such as `Gene.3::Transcript_12::g.3::m.3`. Given the
//! basename used when the transcripts were renamed (e.g., `Transcript`), a
//! [`QueryNamer`] recovers `Transcript_12` from either form.

use regex::Regex;

/// The basename assigned to transcripts when none is specified.
pub const DEFAULT_QUERY_BASENAME: &str = "Transcript";

/// An error related to a [`QueryNamer`].
#[derive(Debug)]
pub enum Error {
    /// The basename is empty.
    EmptyBasename,

    /// The pattern built from the basename could not be compiled.
    Regex(regex::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyBasename => write!(f, "query basename cannot be empty"),
            Error::Regex(err) => write!(f, "regex error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Derives transcript names from ORF query names.
#[derive(Clone, Debug)]
pub struct QueryNamer {
    /// The basename.
    basename: String,

    /// A pattern matching `<basename>_<digits>` that is not preceded by a
    /// name character.
    pattern: Regex,
}

impl QueryNamer {
    /// Attempts to create a namer for the provided basename.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::domain::QueryNamer;
    ///
    /// let namer = QueryNamer::try_new("Transcript")?;
    ///
    /// assert_eq!(namer.transcript_name("Transcript_12.p1"), "Transcript_12");
    /// assert_eq!(
    ///     namer.transcript_name("Gene.3::Transcript_12::g.3::m.3"),
    ///     "Transcript_12"
    /// );
    /// assert_eq!(namer.transcript_name("contig_7.p1"), "contig_7.p1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(basename: impl Into<String>) -> Result<Self, Error> {
        let basename = basename.into();

        if basename.is_empty() {
            return Err(Error::EmptyBasename);
        }

        let pattern = Regex::new(&format!(
            r"(?:^|[^A-Za-z0-9_])({}_[0-9]+)",
            regex::escape(&basename)
        ))
        .map_err(Error::Regex)?;

        Ok(Self { basename, pattern })
    }

    /// Gets the basename.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Returns the transcript name embedded in `name`.
    ///
    /// If `name` does not contain a transcript name, it is returned as is.
    pub fn transcript_name<'a>(&self, name: &'a str) -> &'a str {
        self.pattern
            .captures(name)
            .and_then(|groups| groups.get(1))
            .map(|m| m.as_str())
            .unwrap_or(name)
    }
}

impl Default for QueryNamer {
    fn default() -> Self {
        // SAFETY: the default basename is non-empty and is escaped before
        // being placed in the pattern, so this will always unwrap.
        Self::try_new(DEFAULT_QUERY_BASENAME).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_transdecoder_names() {
        let namer = QueryNamer::default();

        assert_eq!(namer.transcript_name("Transcript_1.p1"), "Transcript_1");
        assert_eq!(namer.transcript_name("Transcript_104.p12"), "Transcript_104");
    }

    #[test]
    fn legacy_transdecoder_names() {
        let namer = QueryNamer::default();

        assert_eq!(
            namer.transcript_name("Gene.1::Transcript_1::g.1::m.1"),
            "Transcript_1"
        );
        assert_eq!(
            namer.transcript_name("Transcript_5|m.12"),
            "Transcript_5"
        );
    }

    #[test]
    fn basename_must_not_be_embedded() {
        let namer = QueryNamer::default();
        assert_eq!(
            namer.transcript_name("MyTranscript_1.p1"),
            "MyTranscript_1.p1"
        );
    }

    #[test]
    fn custom_basename_with_metacharacters() -> Result<(), Box<dyn std::error::Error>> {
        let namer = QueryNamer::try_new("tx.v2")?;

        assert_eq!(namer.basename(), "tx.v2");
        assert_eq!(namer.transcript_name("tx.v2_9.p1"), "tx.v2_9");
        assert_eq!(namer.transcript_name("txav2_9.p1"), "txav2_9.p1");

        Ok(())
    }

    #[test]
    fn empty_basename() {
        let err = QueryNamer::try_new("").unwrap_err();
        assert!(matches!(err, Error::EmptyBasename));
        assert_eq!(err.to_string(), "query basename cannot be empty");
    }
}
