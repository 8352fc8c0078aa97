//! The attributes column of a GFF3 feature.

use std::str::FromStr;

/// The attribute holding a feature's identifier.
pub const ID: &str = "ID";

/// The delimiter between attributes.
const ATTRIBUTE_DELIMITER: char = ';';

/// The separator between an attribute's key and value.
const KEY_VALUE_SEPARATOR: char = '=';

/// The value used when there are no attributes.
const MISSING: &str = ".";

/// An error associated with parsing attributes.
#[derive(Debug)]
pub enum ParseError {
    /// An attribute without a key/value separator.
    MissingSeparator(String),

    /// An attribute with an empty key.
    EmptyKey(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingSeparator(attribute) => write!(
                f,
                "expected \"key{KEY_VALUE_SEPARATOR}value\", found \"{attribute}\""
            ),
            ParseError::EmptyKey(attribute) => {
                write!(f, "empty attribute key: \"{attribute}\"")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// The ordered key/value attributes of a feature.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Gets the value of the first attribute with the provided key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::orf::record::Attributes;
    ///
    /// let attributes = "ID=Transcript_1.p1;Parent=GENE.1".parse::<Attributes>()?;
    ///
    /// assert_eq!(attributes.get("ID"), Some("Transcript_1.p1"));
    /// assert_eq!(attributes.get("Name"), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns an iterator over the key/value pairs in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Gets the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Attributes {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == MISSING {
            return Ok(Self::default());
        }

        let mut attributes = Vec::new();

        for attribute in s.split(ATTRIBUTE_DELIMITER) {
            let attribute = attribute.trim();

            if attribute.is_empty() {
                continue;
            }

            let (key, value) = attribute
                .split_once(KEY_VALUE_SEPARATOR)
                .ok_or_else(|| ParseError::MissingSeparator(attribute.to_string()))?;

            if key.is_empty() {
                return Err(ParseError::EmptyKey(attribute.to_string()));
            }

            attributes.push((key.to_string(), value.to_string()));
        }

        Ok(Self(attributes))
    }
}
