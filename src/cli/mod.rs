//! CLI Module
//!
//! Command-line interface for writing and clearing Vorbis comments.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vctag - write Vorbis comment tags through vorbiscomment
#[derive(Parser, Debug)]
#[command(name = "vctag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the tags for a write come from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TagArgs {
    /// Tag as NAME=VALUE (repeat for more values or names)
    #[arg(short, long = "tag", value_name = "NAME=VALUE")]
    pub tags: Vec<String>,

    /// JSON object of name -> string or list of strings
    #[arg(long, value_name = "PATH")]
    pub tags_json: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace all comments in a file
    #[command(name = "write")]
    Write {
        /// Ogg Vorbis file to tag
        file: PathBuf,

        #[command(flatten)]
        tags: TagArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all comments from a file
    #[command(name = "delete")]
    Delete {
        /// Ogg Vorbis file to clear
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a tag name will be stored
    #[command(name = "sanitize")]
    Sanitize {
        /// Tag name to clean up
        name: String,
    },

    /// Print the raw comment text that would be handed to vorbiscomment
    #[command(name = "render")]
    Render {
        #[command(flatten)]
        tags: TagArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_with_tags() {
        let cli = Cli::parse_from([
            "vctag", "write", "song.ogg", "-t", "ARTIST=A", "--tag", "TITLE=T", "--json",
        ]);
        match cli.command {
            Commands::Write { file, tags, json } => {
                assert_eq!(file, PathBuf::from("song.ogg"));
                assert_eq!(tags.tags, ["ARTIST=A", "TITLE=T"]);
                assert!(tags.tags_json.is_none());
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_delete_verbose() {
        let cli = Cli::parse_from(["vctag", "-v", "delete", "song.ogg"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Delete { json: false, .. }));
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["vctag"]).is_err());
    }
}
