//! Tag writer
//!
//! Writes a [`TagSet`] into a temp comment file, runs `vorbiscomment` in raw
//! write mode against the target, and reports the outcome.
//!
//! Raw write mode replaces every existing comment, so the tag set passed in
//! is the complete set the file ends up with.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::TempPath;

use crate::abort::AbortGuard;
use crate::config::{Platform, WriterConfig};
use crate::error::{Result, TagWriteError};
use crate::invoker::{self, PlatformInvoker};
use crate::tags::{line_count, sanitize_name, write_comments, TagSet};
use crate::tool::{HelperDirLocator, ProcessRunner, SearchPathLocator, ToolLocator, ToolRunner};

/// Prefix of temp comment file names
pub const TEMP_PREFIX: &str = "vctag";

/// Leads every error that came from the helper call.
pub const TOOL_FAILURE_PREFIX: &str = "system call to vorbiscomment failed with message: \n\n";

/// Outcome of a write or delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub success: bool,
    /// Non-fatal notes; the tags were still written
    pub warnings: Vec<String>,
    /// Why the write failed
    pub errors: Vec<String>,
}

impl WriteResult {
    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Writes Vorbis comments through the `vorbiscomment` helper.
pub struct TagWriter {
    locator: Box<dyn ToolLocator>,
    runner: Box<dyn ToolRunner>,
    invoker: Box<dyn PlatformInvoker>,
    temp_dir: PathBuf,
}

impl TagWriter {
    /// Build a writer from explicit collaborators.
    pub fn new(
        locator: impl ToolLocator + 'static,
        runner: impl ToolRunner + 'static,
        invoker: impl PlatformInvoker + 'static,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            locator: Box::new(locator),
            runner: Box::new(runner),
            invoker: Box::new(invoker),
            temp_dir: temp_dir.into(),
        }
    }

    /// Build the platform-appropriate writer described by `config`.
    pub fn from_config(config: &WriterConfig) -> Self {
        let locator: Box<dyn ToolLocator> = match config.platform {
            Platform::Windows => Box::new(HelperDirLocator::new(&config.helper_dir)),
            Platform::Posix => Box::new(SearchPathLocator::from_env()),
        };

        Self {
            locator,
            runner: Box::new(ProcessRunner),
            invoker: invoker::for_platform(config.platform),
            temp_dir: config.temp_dir.clone(),
        }
    }

    /// Replace all comments in `target` with `tags`.
    ///
    /// Never panics or returns early with an error; failures land in
    /// [`WriteResult::errors`].
    pub fn write(&self, target: &Path, tags: &TagSet) -> WriteResult {
        let warnings = collect_warnings(tags);
        match self.try_write(target, tags) {
            Ok(()) => WriteResult {
                success: true,
                warnings,
                errors: Vec::new(),
            },
            Err(e) => WriteResult {
                success: false,
                warnings,
                errors: vec![report(&e)],
            },
        }
    }

    /// Remove every comment from `target`.
    pub fn delete(&self, target: &Path) -> WriteResult {
        self.write(target, &TagSet::cleared())
    }

    /// Like [`write`](Self::write), but returns the error itself.
    pub fn try_write(&self, target: &Path, tags: &TagSet) -> Result<()> {
        let comments = self.create_comments_file(tags)?;

        let outcome = self.apply(&comments, target);

        let comments_path = comments.to_path_buf();
        if let Err(e) = comments.close() {
            tracing::debug!(path = %comments_path.display(), error = %e, "could not remove temp comments file");
        }

        match &outcome {
            Ok(()) => tracing::info!(file = %target.display(), "comments written"),
            Err(e) => tracing::warn!(file = %target.display(), code = e.error_code(), "comments not written: {}", e),
        }
        outcome
    }

    /// Like [`delete`](Self::delete), but returns the error itself.
    pub fn try_delete(&self, target: &Path) -> Result<()> {
        self.try_write(target, &TagSet::cleared())
    }

    /// Write `tags` into a fresh temp file and close it.
    ///
    /// The returned path deletes the file when dropped.
    fn create_comments_file(&self, tags: &TagSet) -> Result<TempPath> {
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&self.temp_dir)
            .map_err(|e| TagWriteError::TempFileCreationFailed {
                path: self.temp_dir.clone(),
                source: e,
            })?;

        let path = file.path().to_path_buf();
        tracing::debug!(
            path = %path.display(),
            lines = line_count(tags),
            "writing temp comments file"
        );

        {
            let mut out = BufWriter::new(file.as_file_mut());
            write_comments(&mut out, tags)
                .map_err(|e| TagWriteError::TempFileWrite { path, source: e })?;
        }

        Ok(file.into_temp_path())
    }

    fn apply(&self, comments_file: &Path, target: &Path) -> Result<()> {
        let _guard = AbortGuard::suppress();

        let program = self.locator.locate()?;
        tracing::debug!(
            invoker = self.invoker.name(),
            program = %program.display(),
            "helper located"
        );

        self.invoker
            .invoke(self.runner.as_ref(), &program, comments_file, target)
    }
}

impl std::fmt::Debug for TagWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagWriter")
            .field("invoker", &self.invoker.name())
            .field("temp_dir", &self.temp_dir)
            .finish_non_exhaustive()
    }
}

/// Turn an error into the line stored in `WriteResult::errors`.
pub fn report(error: &TagWriteError) -> String {
    if error.is_tool_failure() {
        format!("{}{}", TOOL_FAILURE_PREFIX, error)
    } else {
        error.to_string()
    }
}

/// Notes about tags that will not be stored exactly as given.
fn collect_warnings(tags: &TagSet) -> Vec<String> {
    let mut warnings = Vec::new();

    for (name, values) in tags.iter() {
        let cleaned = sanitize_name(name);
        if !cleaned.eq_ignore_ascii_case(name) {
            warnings.push(format!(
                "tag name \"{}\" contains characters not allowed in Vorbis comments, written as \"{}\"",
                name.escape_debug(),
                cleaned
            ));
        }
        if values.iter().any(|v| v.contains('\n')) {
            warnings.push(format!(
                "a value of {} contains a line break and will be split into separate comments",
                cleaned
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::DirectOutputCheck;
    use crate::tool::ToolOutput;
    use std::ffi::OsString;
    use std::io;

    struct Missing;

    impl ToolLocator for Missing {
        fn locate(&self) -> Result<PathBuf> {
            Err(TagWriteError::ToolNotFound {
                program: "vorbiscomment".to_string(),
                location: "PATH".to_string(),
            })
        }
    }

    struct Found;

    impl ToolLocator for Found {
        fn locate(&self) -> Result<PathBuf> {
            Ok(PathBuf::from("/usr/bin/vorbiscomment"))
        }
    }

    struct Silent;

    impl ToolRunner for Silent {
        fn run(&self, _program: &Path, _args: &[OsString]) -> io::Result<ToolOutput> {
            Ok(ToolOutput {
                text: String::new(),
                exit_code: Some(0),
            })
        }
    }

    #[test]
    fn test_missing_tool_reports_once_with_prefix() {
        let temp = tempfile::tempdir().unwrap();
        let writer = TagWriter::new(Missing, Silent, DirectOutputCheck, temp.path());

        let result = writer.write(Path::new("song.ogg"), &TagSet::new());
        assert!(!result.success);
        assert_eq!(
            result.errors,
            [format!("{}vorbiscomment not found in PATH", TOOL_FAILURE_PREFIX)]
        );
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_temp_dir() {
        let temp = tempfile::tempdir().unwrap();
        let missing_dir = temp.path().join("nope");
        let writer = TagWriter::new(Found, Silent, DirectOutputCheck, &missing_dir);

        let result = writer.delete(Path::new("song.ogg"));
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("failed to open temporary tags file"));
        assert!(result.errors[0].ends_with("tags not written"));
    }

    #[test]
    fn test_success_leaves_no_temp_file() {
        let temp = tempfile::tempdir().unwrap();
        let writer = TagWriter::new(Found, Silent, DirectOutputCheck, temp.path());

        let tags: TagSet = [("TITLE", "T")].into_iter().collect();
        let result = writer.write(Path::new("song.ogg"), &tags);
        assert!(result.is_success());
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_warnings_for_altered_names_and_line_breaks() {
        let mut tags = TagSet::new();
        tags.push("title", "fine");
        tags.push("foo=bar", "x");
        tags.push("COMMENT", "a\nb");

        let warnings = collect_warnings(&tags);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("\"FOO BAR\""));
        assert!(warnings[1].contains("COMMENT"));
    }

    #[test]
    fn test_report_prefixes_only_tool_failures() {
        let tool = TagWriteError::ToolReportedError {
            output: "boom".to_string(),
        };
        assert_eq!(report(&tool), format!("{}boom", TOOL_FAILURE_PREFIX));

        let input = TagWriteError::InvalidTagArgument {
            arg: "x".to_string(),
        };
        assert!(!report(&input).starts_with("system call"));
    }

    #[test]
    fn test_write_result_json_shape() {
        let result = WriteResult {
            success: false,
            warnings: vec![],
            errors: vec!["e".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0], "e");
    }
}
