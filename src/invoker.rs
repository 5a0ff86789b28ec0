//! Success detection for the helper call
//!
//! On POSIX-like systems `vorbiscomment` reliably reports problems on its
//! output, so any output is an error. On Windows the output is sometimes lost
//! even when the write failed; there, silence only counts as success if the
//! target's modification time moved.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::config::Platform;
use crate::error::{Result, TagWriteError};
use crate::tool::{raw_write_args, ToolOutput, ToolRunner};

/// Source of file modification times.
pub trait FileClock: Send + Sync {
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// Reads modification times from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsClock;

impl FileClock for FsClock {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }
}

/// Runs the helper in raw write mode and decides whether it worked.
pub trait PlatformInvoker: Send + Sync {
    fn invoke(
        &self,
        runner: &dyn ToolRunner,
        program: &Path,
        comments_file: &Path,
        target: &Path,
    ) -> Result<()>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Pick the success check for `platform`.
pub fn for_platform(platform: Platform) -> Box<dyn PlatformInvoker> {
    match platform {
        Platform::Posix => Box::new(DirectOutputCheck),
        Platform::Windows => Box::new(TimestampFallbackCheck::new(FsClock)),
    }
}

fn run_raw_write(
    runner: &dyn ToolRunner,
    program: &Path,
    comments_file: &Path,
    target: &Path,
) -> Result<ToolOutput> {
    let args = raw_write_args(comments_file, target);
    tracing::debug!(
        program = %program.display(),
        comments = %comments_file.display(),
        file = %target.display(),
        "running vorbiscomment"
    );

    runner.run(program, &args).map_err(|e| match e.kind() {
        // Located a moment ago but gone now
        io::ErrorKind::NotFound => TagWriteError::ToolNotFound {
            program: program.display().to_string(),
            location: program
                .parent()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "PATH".to_string()),
        },
        _ => TagWriteError::ToolReportedError {
            output: format!("failed to run {}: {}", program.display(), e),
        },
    })
}

/// Trusts the helper's output: anything printed is an error.
///
/// A silent non-zero exit is reported too.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectOutputCheck;

impl PlatformInvoker for DirectOutputCheck {
    fn invoke(
        &self,
        runner: &dyn ToolRunner,
        program: &Path,
        comments_file: &Path,
        target: &Path,
    ) -> Result<()> {
        let output = run_raw_write(runner, program, comments_file, target)?;

        if !output.is_silent() {
            return Err(TagWriteError::ToolReportedError {
                output: output.text,
            });
        }
        if !output.exited_cleanly() {
            return Err(TagWriteError::ToolExitStatus {
                code: output.exit_code.unwrap_or(-1),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "direct-output-check"
    }
}

/// Treats printed output as an error; treats silence as success only if the
/// target's modification time changed across the call.
///
/// Exit codes are ignored: they are as unreliable as the output here.
pub struct TimestampFallbackCheck {
    clock: Box<dyn FileClock>,
}

impl TimestampFallbackCheck {
    pub fn new(clock: impl FileClock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    // An unreadable mtime compares equal to another unreadable one, so a
    // missing target is reported as "not written".
    fn snapshot(&self, target: &Path) -> Option<SystemTime> {
        self.clock.modified(target).ok()
    }
}

impl Default for TimestampFallbackCheck {
    fn default() -> Self {
        Self::new(FsClock)
    }
}

impl std::fmt::Debug for TimestampFallbackCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampFallbackCheck").finish_non_exhaustive()
    }
}

impl PlatformInvoker for TimestampFallbackCheck {
    fn invoke(
        &self,
        runner: &dyn ToolRunner,
        program: &Path,
        comments_file: &Path,
        target: &Path,
    ) -> Result<()> {
        let before = self.snapshot(target);
        let output = run_raw_write(runner, program, comments_file, target)?;

        if !output.is_silent() {
            return Err(TagWriteError::ToolReportedError {
                output: output.text,
            });
        }

        let after = self.snapshot(target);
        if before == after {
            tracing::warn!(file = %target.display(), "vorbiscomment was silent but the file did not change");
            return Err(TagWriteError::SilentFailure {
                path: target.to_path_buf(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "timestamp-fallback-check"
    }
}
