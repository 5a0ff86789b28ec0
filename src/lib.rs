//! vctag - Vorbis comment writer
//!
//! Writes and clears Vorbis comment tags by handing a flat `NAME=value`
//! file to the `vorbiscomment` helper in raw write mode.
//!
//! # Architecture
//!
//! - [`tags`]: the tag set, field-name cleanup and the raw comment format
//! - [`tool`]: locating and running the helper executable
//! - [`invoker`]: deciding whether the helper call worked, per platform
//! - [`writer`]: the [`TagWriter`] tying these together
//!
//! ```no_run
//! use std::path::Path;
//! use vctag::{TagSet, TagWriter, WriterConfig};
//!
//! let writer = TagWriter::from_config(&WriterConfig::from_env());
//! let mut tags = TagSet::new();
//! tags.push("ARTIST", "Nina Simone");
//! tags.push("TITLE", "Sinnerman");
//!
//! let result = writer.write(Path::new("track.ogg"), &tags);
//! if !result.success {
//!     eprintln!("{:?}", result.errors);
//! }
//! ```

pub mod abort;
pub mod cli;
pub mod config;
pub mod error;
pub mod invoker;
pub mod tags;
pub mod tool;
pub mod writer;

pub use config::{Platform, WriterConfig};
pub use error::{Result, TagWriteError};
pub use invoker::{DirectOutputCheck, FileClock, FsClock, PlatformInvoker, TimestampFallbackCheck};
pub use tags::{render_comments, sanitize_name, sanitize_name_bytes, TagSet};
pub use tool::{HelperDirLocator, ProcessRunner, SearchPathLocator, ToolLocator, ToolOutput, ToolRunner};
pub use writer::{TagWriter, WriteResult};
