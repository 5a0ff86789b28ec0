//! CLI Command Implementations
//!
//! Each command returns whether it succeeded; `main` turns that into the
//! exit status.

use std::fs;
use std::path::Path;

use log::{info, warn};

use super::TagArgs;
use crate::error::{Result, TagWriteError};
use crate::tags::{render_comments, sanitize_name, TagSet};
use crate::writer::{TagWriter, WriteResult};

/// Build a tag set from a JSON file (if any) followed by `-t` arguments.
pub fn collect_tags(args: &TagArgs) -> Result<TagSet> {
    let mut tags = match &args.tags_json {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| TagWriteError::TagsFile {
                path: path.clone(),
                source: e,
            })?;
            TagSet::from_json(&json)?
        }
        None => TagSet::new(),
    };

    for arg in &args.tags {
        tags.push_assignment(arg)?;
    }

    Ok(tags)
}

/// Replace all comments in `file`.
pub fn write(writer: &TagWriter, file: &Path, args: &TagArgs, json: bool) -> Result<bool> {
    let tags = collect_tags(args)?;
    info!("Writing {} tag(s) to: {}", tags.len(), file.display());

    if tags.is_empty() {
        warn!("No tags given; this clears every comment in {}", file.display());
    }

    let result = writer.write(file, &tags);
    print_result(&result, json)?;
    Ok(result.success)
}

/// Remove every comment from `file`.
pub fn delete(writer: &TagWriter, file: &Path, json: bool) -> Result<bool> {
    info!("Clearing comments in: {}", file.display());

    let result = writer.delete(file);
    print_result(&result, json)?;
    Ok(result.success)
}

/// Print the cleaned form of a tag name.
pub fn sanitize(name: &str) -> Result<bool> {
    println!("{}", sanitize_name(name));
    Ok(true)
}

/// Print the raw comment text for the given tags.
pub fn render(args: &TagArgs) -> Result<bool> {
    let tags = collect_tags(args)?;
    print!("{}", render_comments(&tags));
    Ok(true)
}

fn print_result(result: &WriteResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    for warning in &result.warnings {
        println!("WARNING: {}", warning);
    }
    if result.success {
        println!("Tags written.");
    } else {
        for error in &result.errors {
            eprintln!("ERROR: {}", error);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_collect_tags_json_then_args() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("tags.json");
        fs::write(&json_path, r#"{"ARTIST": ["A"], "ALBUM": "X"}"#).unwrap();

        let args = TagArgs {
            tags: vec!["artist=B".to_string(), "TITLE=T".to_string()],
            tags_json: Some(json_path),
        };
        let tags = collect_tags(&args).unwrap();
        assert_eq!(render_comments(&tags), "ARTIST=A\nARTIST=B\nALBUM=X\nTITLE=T\n");
    }

    #[test]
    fn test_collect_tags_missing_json_file() {
        let args = TagArgs {
            tags: vec![],
            tags_json: Some(PathBuf::from("/no/such/tags.json")),
        };
        let err = collect_tags(&args).unwrap_err();
        assert_eq!(err.error_code(), "TAGS_FILE");
    }

    #[test]
    fn test_collect_tags_bad_argument() {
        let args = TagArgs {
            tags: vec!["TITLE".to_string()],
            tags_json: None,
        };
        assert!(collect_tags(&args).is_err());
    }
}
