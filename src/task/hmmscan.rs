//! Declaring `hmmscan` searches.

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use crate::task::Action;
use crate::task::CommandLine;
use crate::task::Task;
use crate::task::basename;
use crate::task::with_suffix;
use crate::tool;
use crate::tool::Tool;

/// The default E-value cutoff.
pub const DEFAULT_CUTOFF: f64 = 1e-5;

/// The suffix of the human-readable report written next to the domain table.
pub const REPORT_SUFFIX: &str = ".hmmscan.out";

/// The index file whose presence marks a pressed database.
pub const PRESSED_SUFFIX: &str = ".h3p";

/// Options for an `hmmscan` search.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// The E-value cutoff.
    pub cutoff: f64,

    /// The number of worker threads given to `hmmscan`.
    pub threads: usize,

    /// Extra parameters passed before the standard ones.
    pub params: Vec<OsString>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            threads: 1,
            params: Vec::new(),
        }
    }
}

/// Declares an `hmmscan` search of `input` (protein FASTA) against the
/// pressed database `db`, writing the domain table to `output`.
///
/// Fails if `hmmscan` cannot be found.
pub fn task(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    db: impl AsRef<Path>,
    options: &Options,
) -> Result<Task, tool::Error> {
    let executable = Tool::Hmmscan.resolve()?;
    Ok(task_with_executable(executable, input, output, db, options))
}

/// Declares an `hmmscan` search using the provided executable.
///
/// # Examples
///
/// ```
/// use hmmremap::task::Action;
/// use hmmremap::task::hmmscan;
///
/// let task = hmmscan::task_with_executable(
///     "hmmscan",
///     "orfs.pep",
///     "orfs.pep.x.Pfam-A.tbl",
///     "Pfam-A.hmm",
///     &hmmscan::Options::default(),
/// );
///
/// assert_eq!(task.name(), "hmmscan:orfs.pep.x.Pfam-A.hmm");
///
/// match task.actions().first() {
///     Action::Command(command) => assert_eq!(
///         command.to_string(),
///         "hmmscan --cpu 1 --domtblout orfs.pep.x.Pfam-A.tbl -E 0.00001 \
///          -o orfs.pep.x.Pfam-A.tbl.hmmscan.out Pfam-A.hmm orfs.pep"
///     ),
///     _ => unreachable!(),
/// }
/// ```
pub fn task_with_executable(
    executable: impl Into<PathBuf>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    db: impl AsRef<Path>,
    options: &Options,
) -> Task {
    let (input, output, db) = (input.as_ref(), output.as_ref(), db.as_ref());
    let report = with_suffix(output, REPORT_SUFFIX);

    let name = format!("hmmscan:{}.x.{}", basename(input), basename(db));

    let command = CommandLine::new(executable)
        .args(&options.params)
        .arg("--cpu")
        .arg(options.threads.to_string())
        .arg("--domtblout")
        .arg(output)
        .arg("-E")
        .arg(options.cutoff.to_string())
        .arg("-o")
        .arg(&report)
        .arg(db)
        .arg(input);

    Task::new(name, Action::Command(command))
        .file_dep(input)
        .file_dep(db)
        .file_dep(with_suffix(db, PRESSED_SUFFIX))
        .target(output)
        .target(report)
}
