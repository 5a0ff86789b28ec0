//! External tool boundary
//!
//! Locating `vorbiscomment` and running it are separate seams so the writer
//! can be driven without a real executable.

pub mod locate;
pub mod run;

pub use locate::{HelperDirLocator, SearchPathLocator, ToolLocator, TOOL_EXE_NAME, TOOL_NAME};
pub use run::{raw_write_args, ProcessRunner, ToolOutput, ToolRunner};
