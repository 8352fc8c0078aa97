//! Declaring `hmmpress` indexing of a profile database.

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

/// The suffixes of the index files `hmmpress` writes next to the database.
pub const INDEX_SUFFIXES: [&str; 4] = [".h3f", ".h3i", ".h3m", ".h3p"];

/// Declares an `hmmpress` run over `db`.
///
/// Fails if `hmmpress` cannot be found.
pub fn task(
    db: impl AsRef<Path>,
    params: &[OsString],
    task_dep: Option<&str>,
) -> Result<Task, tool::Error> {
    let executable = Tool::Hmmpress.resolve()?;
    Ok(task_with_executable(executable, db, params, task_dep))
}

/// Declares an `hmmpress` run over `db` using the provided executable.
///
/// The task is considered up to date whenever its index files exist.
pub fn task_with_executable(
    executable: impl Into<PathBuf>,
    db: impl AsRef<Path>,
    params: &[OsString],
    task_dep: Option<&str>,
) -> Task {
    let db = db.as_ref();

    let command = CommandLine::new(executable).args(params).arg(db);

    let mut task = Task::new(
        format!("hmmpress:{}", basename(db)),
        Action::Command(command),
    )
    .uptodate(true);

    for suffix in INDEX_SUFFIXES {
        task = task.target(with_suffix(db, suffix));
    }

    if let Some(dep) = task_dep {
        task = task.task_dep(dep);
    }

    task
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration() {
        let task = task_with_executable(
            "/opt/hmmer/bin/hmmpress",
            "db/Pfam-A.hmm",
            &[OsString::from("-f")],
            Some("download:Pfam-A"),
        );

        assert_eq!(task.name(), "hmmpress:Pfam-A.hmm");
        assert!(task.file_deps().is_empty());
        assert_eq!(
            task.targets(),
            &[
                PathBuf::from("db/Pfam-A.hmm.h3f"),
                PathBuf::from("db/Pfam-A.hmm.h3i"),
                PathBuf::from("db/Pfam-A.hmm.h3m"),
                PathBuf::from("db/Pfam-A.hmm.h3p"),
            ]
        );
        assert_eq!(task.task_deps(), &[String::from("download:Pfam-A")]);
        assert!(task.is_uptodate());

        match task.actions().first() {
            Action::Command(command) => {
                assert_eq!(command.to_string(), "/opt/hmmer/bin/hmmpress -f db/Pfam-A.hmm")
            }
            Action::Remap(_) => panic!("expected a command"),
        }
    }

    #[test]
    fn no_task_dep() {
        let task = task_with_executable("hmmpress", "Pfam-A.hmm", &[], None);
        assert!(task.task_deps().is_empty());
    }
}
