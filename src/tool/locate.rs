//! Finding the vorbiscomment executable

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, TagWriteError};

/// Executable name looked up on the search path
pub const TOOL_NAME: &str = "vorbiscomment";
/// Executable name expected in the Windows helper directory
pub const TOOL_EXE_NAME: &str = "vorbiscomment.exe";

/// Resolves the helper executable to run.
pub trait ToolLocator: Send + Sync {
    /// Path of the executable, or [`TagWriteError::ToolNotFound`].
    fn locate(&self) -> Result<PathBuf>;
}

/// Looks for `vorbiscomment.exe` in a fixed helper directory.
#[derive(Debug, Clone)]
pub struct HelperDirLocator {
    dir: PathBuf,
}

impl HelperDirLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ToolLocator for HelperDirLocator {
    fn locate(&self) -> Result<PathBuf> {
        let candidate = self.dir.join(TOOL_EXE_NAME);
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(TagWriteError::ToolNotFound {
                program: TOOL_EXE_NAME.to_string(),
                location: self.dir.display().to_string(),
            })
        }
    }
}

/// Looks for `vorbiscomment` in each directory of a search path.
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    search_path: Option<OsString>,
}

impl SearchPathLocator {
    /// Search the process `PATH`.
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Search an explicit `PATH`-style list.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl ToolLocator for SearchPathLocator {
    fn locate(&self) -> Result<PathBuf> {
        let found = self.search_path.as_ref().and_then(|paths| {
            std::env::split_paths(paths)
                .map(|dir| dir.join(TOOL_NAME))
                .find(|candidate| is_executable(candidate))
        });

        found.ok_or_else(|| TagWriteError::ToolNotFound {
            program: TOOL_NAME.to_string(),
            location: "PATH".to_string(),
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
