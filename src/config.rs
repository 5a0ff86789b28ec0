//! Writer configuration
//!
//! Where temp comment files go, where the helper executable lives, and which
//! platform heuristics apply. Everything can be overridden from the
//! environment so hosts don't need to rebuild to relocate the helper.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Env var overriding the temp directory
pub const ENV_TEMP_DIR: &str = "VCTAG_TEMP_DIR";
/// Env var overriding the helper executable directory
pub const ENV_HELPER_DIR: &str = "VCTAG_HELPER_DIR";
/// Env var overriding platform detection (`windows` or `posix`)
pub const ENV_PLATFORM: &str = "VCTAG_PLATFORM";

/// Directory name searched next to the running executable for helpers.
pub const DEFAULT_HELPER_SUBDIR: &str = "helperapps";

/// Platform classification used to pick locator and success check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Helper comes from the search path; its output is trusted.
    Posix,
    /// Helper ships in the helper directory; its output is not always
    /// captured, so success is confirmed by the file's modification time.
    Windows,
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Parse `windows` / `posix` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Some(Self::Windows),
            "posix" | "unix" | "linux" | "macos" => Some(Self::Posix),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Settings for building a [`TagWriter`](crate::TagWriter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Directory temp comment files are created in
    pub temp_dir: PathBuf,
    /// Directory holding `vorbiscomment.exe` (Windows only)
    pub helper_dir: PathBuf,
    /// Platform heuristics to apply
    pub platform: Platform,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            helper_dir: default_helper_dir(),
            platform: Platform::current(),
        }
    }
}

impl WriterConfig {
    /// Defaults, overridden by `VCTAG_TEMP_DIR`, `VCTAG_HELPER_DIR` and
    /// `VCTAG_PLATFORM` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_TEMP_DIR).filter(|v| !v.is_empty()) {
            config.temp_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_HELPER_DIR).filter(|v| !v.is_empty()) {
            config.helper_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(ENV_PLATFORM) {
            match Platform::parse(&value) {
                Some(platform) => config.platform = platform,
                None => tracing::warn!(
                    value = %value,
                    "ignoring unknown {}, using {}",
                    ENV_PLATFORM,
                    config.platform
                ),
            }
        }

        config
    }

    pub fn with_temp_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.temp_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_helper_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.helper_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

/// `helperapps/` next to the running executable, or relative to the
/// working directory if that can't be determined.
fn default_helper_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_HELPER_SUBDIR)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HELPER_SUBDIR))
}
