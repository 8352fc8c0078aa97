//! A CSV writer for domain table records.

use std::io;
use std::io::Write;

use crate::domain::Record;

/// The columns written for each record, in order.
pub const COLUMNS: [&str; 24] = [
    "target_name",
    "target_accession",
    "tlen",
    "query_name",
    "query_accession",
    "qlen",
    "full_evalue",
    "full_score",
    "full_bias",
    "domain_num",
    "domain_total",
    "domain_c_evalue",
    "domain_i_evalue",
    "domain_score",
    "domain_bias",
    "hmm_coord_from",
    "hmm_coord_to",
    "ali_coord_from",
    "ali_coord_to",
    "env_coord_from",
    "env_coord_to",
    "accuracy",
    "description",
    "full_query_name",
];

/// The field delimiter.
const DELIMITER: &str = ",";

/// The quote character.
const QUOTE: &str = "\"";

/// Floats smaller in magnitude than this are written in exponent notation.
const EXPONENT_THRESHOLD: f64 = 1e-4;

/// A CSV writer for domain table [`Record`]s.
#[derive(Debug)]
pub struct Writer<W>
where
    W: Write,
{
    /// The inner writer.
    inner: W,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a new writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Gets a mutable reference to the inner writer.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes the header line.
    pub fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.inner, "{}", COLUMNS.join(DELIMITER))
    }

    /// Writes a single record.
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        let fields = [
            escape(record.target_name()),
            escape(record.target_accession()),
            record.tlen().to_string(),
            escape(record.query_name()),
            escape(record.query_accession()),
            record.qlen().to_string(),
            format_float(record.full_evalue()),
            format_float(record.full_score()),
            format_float(record.full_bias()),
            record.domain_num().to_string(),
            record.domain_total().to_string(),
            format_float(record.domain_c_evalue()),
            format_float(record.domain_i_evalue()),
            format_float(record.domain_score()),
            format_float(record.domain_bias()),
            record.hmm_coord_from().to_string(),
            record.hmm_coord_to().to_string(),
            record.ali_coord_from().to_string(),
            record.ali_coord_to().to_string(),
            record.env_coord_from().to_string(),
            record.env_coord_to().to_string(),
            format_float(record.accuracy()),
            escape(record.description()),
            escape(record.full_query_name()),
        ];

        writeln!(self.inner, "{}", fields.join(DELIMITER))
    }

    /// Writes the header followed by every record.
    ///
    /// The header is written even if there are no records.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::domain;
    ///
    /// let records: Vec<domain::Record> = Vec::new();
    ///
    /// let mut writer = domain::Writer::new(Vec::new());
    /// writer.write_all(&records)?;
    ///
    /// let output = String::from_utf8(writer.into_inner())?;
    /// assert!(output.starts_with("target_name,target_accession,tlen,"));
    /// assert_eq!(output.lines().count(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_all<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        self.write_header()?;

        for record in records {
            self.write_record(record)?;
        }

        self.inner.flush()
    }
}

/// Quotes a field if it contains a delimiter, a quote, or a line break.
fn escape(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        let doubled = value.replace(QUOTE, "\"\"");
        format!("{QUOTE}{doubled}{QUOTE}")
    } else {
        value.to_string()
    }
}

/// Formats a float, switching to exponent notation for tiny magnitudes.
///
/// Values are written in their shortest round-trip form rather than copied
/// from the input text, so they are numerically equal to what `hmmscan`
/// wrote but not always textually equal: `40.0` becomes `40` and `1.5e-05`
/// becomes `1.5e-5`.
fn format_float(value: f64) -> String {
    if value != 0.0 && value.abs() < EXPONENT_THRESHOLD {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "Pkinase PF00069.26 264 Transcript_3.p2 - 412 2.1e-45 153.2 0 1 2 4.5e-48 \
                        3.3e-45 152.6 0.25 2 260 30 290 29 292 0.93 Protein kinase, \"PK\" domain";

    #[test]
    fn header() -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_header()?;

        assert_eq!(
            String::from_utf8(writer.into_inner())?,
            "target_name,target_accession,tlen,query_name,query_accession,qlen,full_evalue,\
             full_score,full_bias,domain_num,domain_total,domain_c_evalue,domain_i_evalue,\
             domain_score,domain_bias,hmm_coord_from,hmm_coord_to,ali_coord_from,ali_coord_to,\
             env_coord_from,env_coord_to,accuracy,description,full_query_name\n"
        );

        Ok(())
    }

    #[test]
    fn record() -> Result<(), Box<dyn std::error::Error>> {
        let mut record = LINE.parse::<Record>()?;
        record.set_query_name("Transcript_3");

        let mut writer = Writer::new(Vec::new());
        writer.write_record(&record)?;

        assert_eq!(
            String::from_utf8(writer.into_inner())?,
            "Pkinase,PF00069.26,264,Transcript_3,-,412,2.1e-45,153.2,0,1,2,4.5e-48,3.3e-45,\
             152.6,0.25,2,260,30,290,29,292,0.93,\"Protein kinase, \"\"PK\"\" domain\",\
             Transcript_3.p2\n"
        );

        Ok(())
    }

    #[test]
    fn escaping() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn float_formatting() {
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(1e-10), "1e-10");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(40.5), "40.5");
        assert_eq!(format_float(40.0), "40");
        assert_eq!(format_float(1.5e-5), "1.5e-5");
        assert_eq!(format_float("1.5e-05".parse().unwrap()), "1.5e-5");
        assert_eq!(format_float(-2.5e-7), "-2.5e-7");
        assert_eq!(format_float(1e30), "1000000000000000000000000000000");
    }
}
