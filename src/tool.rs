//! Discovery of the external HMMER executables.
//!
//! Each [`Tool`] is resolved to an executable path once, before any work is
//! declared. An environment variable can point a tool at a specific binary;
//! otherwise the first matching executable on `PATH` is used.

use std::env;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

/// The environment variable that overrides the `hmmscan` executable.
pub const HMMSCAN_ENV_BIN: &str = "HMMREMAP_HMMSCAN_BIN";

/// The environment variable that overrides the `hmmpress` executable.
pub const HMMPRESS_ENV_BIN: &str = "HMMREMAP_HMMPRESS_BIN";

/// An error related to tool discovery.
#[derive(Debug)]
pub enum Error {
    /// The tool could not be found.
    NotInstalled(Tool),

    /// One or more tools could not be found.
    Missing(Vec<Tool>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotInstalled(tool) => write!(
                f,
                "`{}` not found: install it on `PATH` or set `{}`",
                tool.name(),
                tool.env_var()
            ),
            Error::Missing(tools) => {
                let names = tools
                    .iter()
                    .map(|tool| format!("`{}`", tool.name()))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "missing required executables: {names}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// An external executable used by the pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tool {
    /// Searches sequences against a profile HMM database.
    Hmmscan,

    /// Indexes a profile HMM database for `hmmscan`.
    Hmmpress,
}

impl Tool {
    /// All tools.
    pub const ALL: [Tool; 2] = [Tool::Hmmscan, Tool::Hmmpress];

    /// Gets the executable name.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Hmmscan => "hmmscan",
            Tool::Hmmpress => "hmmpress",
        }
    }

    /// Gets the environment variable that overrides the executable.
    pub fn env_var(&self) -> &'static str {
        match self {
            Tool::Hmmscan => HMMSCAN_ENV_BIN,
            Tool::Hmmpress => HMMPRESS_ENV_BIN,
        }
    }

    /// Resolves the tool using the current environment.
    pub fn resolve(&self) -> Result<PathBuf> {
        self.resolve_with(env::var_os(self.env_var()), env::var_os("PATH"))
    }

    /// Resolves the tool from an explicit override and search path.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmremap::tool::Tool;
    ///
    /// let err = Tool::Hmmscan.resolve_with(None, None).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "`hmmscan` not found: install it on `PATH` or set `HMMREMAP_HMMSCAN_BIN`"
    /// );
    /// ```
    pub fn resolve_with(
        &self,
        override_path: Option<OsString>,
        search_path: Option<OsString>,
    ) -> Result<PathBuf> {
        let resolved = override_path
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .filter(|path| path.is_file())
            .or_else(|| search_path.and_then(|paths| which(self.name(), &paths)));

        match resolved {
            Some(path) => {
                debug!("{}: {}", self.name(), path.display());
                Ok(path)
            }
            None => Err(Error::NotInstalled(*self)),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Finds the first executable file called `name` within `paths`.
pub fn which(name: &str, paths: &OsStr) -> Option<PathBuf> {
    env::split_paths(paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// Returns whether `path` is an executable file.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt as _;

    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Returns whether `path` is an executable file.
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolves every tool in `tools`, reporting all missing tools at once.
///
/// This is intended to run once at startup, before any work is declared.
pub fn check(tools: &[Tool]) -> Result<Vec<(Tool, PathBuf)>> {
    check_with(tools, |tool| tool.resolve())
}

/// Resolves every tool in `tools` with `resolve`, reporting all missing tools
/// at once.
///
/// # Examples
///
/// ```
/// use hmmremap::tool;
/// use hmmremap::tool::Tool;
///
/// let err = tool::check_with(&Tool::ALL, |tool| tool.resolve_with(None, None)).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "missing required executables: `hmmscan`, `hmmpress`"
/// );
/// ```
pub fn check_with<F>(tools: &[Tool], mut resolve: F) -> Result<Vec<(Tool, PathBuf)>>
where
    F: FnMut(Tool) -> Result<PathBuf>,
{
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for &tool in tools {
        match resolve(tool) {
            Ok(path) => found.push((tool, path)),
            Err(_) => missing.push(tool),
        }
    }

    match missing.is_empty() {
        true => Ok(found),
        false => Err(Error::Missing(missing)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    /// Writes an empty file with the provided permissions.
    #[cfg(unix)]
    fn touch(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt as _;

        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn finds_executable_on_path() {
        let first = TempDir::new("first").unwrap();
        let second = TempDir::new("second").unwrap();

        touch(&first.path().join("hmmscan"), 0o644);
        touch(&second.path().join("hmmscan"), 0o755);

        let paths = env::join_paths([first.path(), second.path()]).unwrap();
        let resolved = Tool::Hmmscan.resolve_with(None, Some(paths)).unwrap();

        assert_eq!(resolved, second.path().join("hmmscan"));
    }

    #[test]
    fn override_takes_precedence() {
        let dir = TempDir::new("override").unwrap();
        let custom = dir.path().join("my-hmmpress");
        fs::write(&custom, "").unwrap();

        let resolved = Tool::Hmmpress
            .resolve_with(Some(custom.clone().into_os_string()), None)
            .unwrap();

        assert_eq!(resolved, custom);
    }

    #[test]
    fn missing_override_falls_back_to_path() {
        let err = Tool::Hmmpress
            .resolve_with(Some(OsString::from("/does/not/exist/hmmpress")), None)
            .unwrap_err();

        assert!(matches!(err, Error::NotInstalled(Tool::Hmmpress)));
    }

    #[test]
    fn not_installed() {
        let dir = TempDir::new("empty").unwrap();
        let err = Tool::Hmmpress
            .resolve_with(None, Some(dir.path().as_os_str().to_owned()))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "`hmmpress` not found: install it on `PATH` or set `HMMREMAP_HMMPRESS_BIN`"
        );
    }

    #[cfg(unix)]
    #[test]
    fn check_finds_every_tool() {
        let dir = TempDir::new("check").unwrap();
        touch(&dir.path().join("hmmscan"), 0o755);
        touch(&dir.path().join("hmmpress"), 0o755);

        let paths = dir.path().as_os_str().to_owned();
        let found =
            check_with(&Tool::ALL, |tool| tool.resolve_with(None, Some(paths.clone()))).unwrap();

        assert_eq!(
            found,
            vec![
                (Tool::Hmmscan, dir.path().join("hmmscan")),
                (Tool::Hmmpress, dir.path().join("hmmpress")),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn check_reports_only_missing_tools() {
        let dir = TempDir::new("check").unwrap();
        touch(&dir.path().join("hmmscan"), 0o755);

        let paths = dir.path().as_os_str().to_owned();
        let err = check_with(&Tool::ALL, |tool| tool.resolve_with(None, Some(paths.clone())))
            .unwrap_err();

        assert!(matches!(err, Error::Missing(ref tools) if tools == &[Tool::Hmmpress]));
        assert_eq!(err.to_string(), "missing required executables: `hmmpress`");
    }

    #[test]
    fn missing_display() {
        let err = Error::Missing(vec![Tool::Hmmscan, Tool::Hmmpress]);
        assert_eq!(
            err.to_string(),
            "missing required executables: `hmmscan`, `hmmpress`"
        );
    }
}
