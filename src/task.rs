//! Declarations of units of work for an external build-graph scheduler.
//!
//! A [`Task`] describes a single unit of work: its name, the files it depends
//! on, the files it produces, and the actions that produce them. Ordering
//! tasks and deciding which are stale is left to the scheduler consuming the
//! declarations; a task can, however, be [run](Task::run) or
//! [cleaned](Task::clean) on its own.
//!
//! ```
//! use hmmremap::task::hmmpress;
//!
//! let task = hmmpress::task_with_executable("/opt/hmmer/bin/hmmpress", "db/Pfam-A.hmm", &[], None);
//!
//! assert_eq!(task.name(), "hmmpress:Pfam-A.hmm");
//! assert_eq!(task.targets().len(), 4);
//! ```

use std::ffi::OsStr;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Instant;

use nonempty::NonEmpty;
use tracing::debug;
use tracing::info;

use crate::remap;

pub mod hmmpress;
pub mod hmmscan;
pub mod remap_hmmer;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to running or cleaning a [`Task`].
#[derive(Debug)]
pub enum Error {
    /// A file dependency does not exist.
    MissingFileDep(String, PathBuf),

    /// A command could not be started.
    Spawn(String, String, io::Error),

    /// A command exited unsuccessfully.
    CommandFailed {
        /// The name of the task.
        task: String,

        /// The command line.
        command: String,

        /// The exit status.
        status: ExitStatus,

        /// Whatever the command wrote to stderr.
        stderr: String,
    },

    /// A remap action failed.
    Remap(String, remap::builder::Error),

    /// A target could not be removed.
    Clean(String, PathBuf, io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingFileDep(task, path) => write!(
                f,
                "task `{task}`: missing file dependency `{}`",
                path.display()
            ),
            Error::Spawn(task, command, err) => {
                write!(f, "task `{task}`: could not run `{command}`: {err}")
            }
            Error::CommandFailed {
                task,
                command,
                status,
                stderr,
            } => {
                write!(f, "task `{task}`: `{command}` failed with {status}")?;

                if !stderr.trim().is_empty() {
                    write!(f, "\n\nstderr: {}", stderr.trim())?;
                }

                Ok(())
            }
            Error::Remap(task, err) => write!(f, "task `{task}`: {err}"),
            Error::Clean(task, path, err) => write!(
                f,
                "task `{task}`: could not remove `{}`: {err}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Actions
////////////////////////////////////////////////////////////////////////////////////////

/// An external command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandLine {
    /// The program to execute.
    program: PathBuf,

    /// The arguments.
    args: Vec<OsString>,
}

impl CommandLine {
    /// Creates a command line with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        self
    }

    /// Gets the program.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Gets the arguments.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Runs the command to completion, capturing its output.
    fn execute(&self, task: &str) -> Result<()> {
        info!("{task}: running `{self}`");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| Error::Spawn(task.to_string(), self.to_string(), err))?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                task: task.to_string(),
                command: self.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;

        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }

        Ok(())
    }
}

/// A remap of a domain table stored on disk.
#[derive(Clone, Debug)]
pub struct RemapJob {
    /// The `hmmscan` domain table.
    domains: PathBuf,

    /// The GFF3 of ORF locations.
    orfs: PathBuf,

    /// The CSV to write.
    output: PathBuf,

    /// The configured remapper.
    builder: remap::Builder,
}

impl RemapJob {
    /// Creates a new remap job.
    pub fn new(
        domains: impl Into<PathBuf>,
        orfs: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        builder: remap::Builder,
    ) -> Self {
        Self {
            domains: domains.into(),
            orfs: orfs.into(),
            output: output.into(),
            builder,
        }
    }

    /// Runs the remap.
    fn execute(&self, task: &str) -> Result<()> {
        info!("{task}: remapping `{}`", self.domains.display());

        let summary = self
            .builder
            .try_remap_paths(&self.domains, &self.orfs, &self.output)
            .map_err(|err| Error::Remap(task.to_string(), err))?;

        debug!("{task}: {summary:?}");
        Ok(())
    }
}

/// A single action within a [`Task`].
#[derive(Clone, Debug)]
pub enum Action {
    /// Run an external command.
    Command(CommandLine),

    /// Remap a domain table.
    Remap(RemapJob),
}

impl Action {
    /// Runs the action.
    fn execute(&self, task: &str) -> Result<()> {
        match self {
            Action::Command(command) => command.execute(task),
            Action::Remap(job) => job.execute(task),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Task
////////////////////////////////////////////////////////////////////////////////////////

/// A unit of work.
#[derive(Clone, Debug)]
pub struct Task {
    /// The name of the task.
    name: String,

    /// The actions, run in order.
    actions: NonEmpty<Action>,

    /// The files the task reads.
    file_dep: Vec<PathBuf>,

    /// The files the task produces.
    targets: Vec<PathBuf>,

    /// The names of tasks that must run first.
    task_dep: Vec<String>,

    /// Whether the task is always considered up to date once its targets
    /// exist.
    uptodate: bool,
}

impl Task {
    /// Creates a task with a single action and no dependencies or targets.
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            actions: NonEmpty::new(action),
            file_dep: Vec::new(),
            targets: Vec::new(),
            task_dep: Vec::new(),
            uptodate: false,
        }
    }

    /// Appends an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a file dependency.
    pub fn file_dep(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_dep.push(path.into());
        self
    }

    /// Appends a target.
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.targets.push(path.into());
        self
    }

    /// Appends a task dependency.
    pub fn task_dep(mut self, name: impl Into<String>) -> Self {
        self.task_dep.push(name.into());
        self
    }

    /// Sets whether the task is up to date once its targets exist.
    pub fn uptodate(mut self, uptodate: bool) -> Self {
        self.uptodate = uptodate;
        self
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the actions.
    pub fn actions(&self) -> &NonEmpty<Action> {
        &self.actions
    }

    /// Gets the file dependencies.
    pub fn file_deps(&self) -> &[PathBuf] {
        &self.file_dep
    }

    /// Gets the targets.
    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Gets the task dependencies.
    pub fn task_deps(&self) -> &[String] {
        &self.task_dep
    }

    /// Gets whether the task is up to date once its targets exist.
    pub fn is_uptodate(&self) -> bool {
        self.uptodate
    }

    /// Runs each action in order.
    ///
    /// Every file dependency must exist before any action is started.
    pub fn run(&self) -> Result<()> {
        if let Some(missing) = self.file_dep.iter().find(|path| !path.exists()) {
            return Err(Error::MissingFileDep(self.name.clone(), missing.clone()));
        }

        let started = Instant::now();
        info!("{}: started", self.name);

        for action in self.actions.iter() {
            action.execute(&self.name)?;
        }

        info!(
            "{}: finished in {:.2}s",
            self.name,
            started.elapsed().as_secs_f64()
        );

        Ok(())
    }

    /// Removes every target that exists, returning the removed paths.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for target in &self.targets {
            match std::fs::remove_file(target) {
                Ok(()) => {
                    debug!("{}: removed `{}`", self.name, target.display());
                    removed.push(target.clone());
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(Error::Clean(self.name.clone(), target.clone(), err)),
            }
        }

        Ok(removed)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Gets the final component of a path for use in a task name.
fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Appends a suffix to the final component of a path.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut path = path.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}
