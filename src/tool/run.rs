//! Running vorbiscomment

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

/// What the helper printed and how it exited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// stdout followed by stderr, lossily decoded
    pub text: String,
    /// Exit code; `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl ToolOutput {
    pub fn is_silent(&self) -> bool {
        self.text.is_empty()
    }

    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Arguments for raw write mode: replace every comment in `target` with the
/// lines in `comments_file`.
pub fn raw_write_args(comments_file: &Path, target: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-w"),
        OsString::from("--raw"),
        OsString::from("-c"),
        comments_file.as_os_str().to_os_string(),
        target.as_os_str().to_os_string(),
    ]
}

/// Runs a program to completion, blocking the calling thread.
pub trait ToolRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ToolOutput>;
}

/// Spawns a real child process.
///
/// The child gets its own process group, so a terminal Ctrl+C reaches only
/// this process; the interrupt handler then waits for the child to finish.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<ToolOutput> {
        let mut command = Command::new(program);
        command.args(args);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NEW_PROCESS_GROUP);
        }

        let output = command.output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ToolOutput {
            text,
            exit_code: output.status.code(),
        })
    }
}
