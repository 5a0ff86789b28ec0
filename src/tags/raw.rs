//! Raw comment file format
//!
//! `vorbiscomment --raw` reads one `NAME=value` pair per line. Values are
//! written untouched, so a value containing a newline splits into two
//! entries on the tool's side.

use std::io::{self, Write};

use super::sanitize::sanitize_name;
use super::TagSet;

/// Write every `NAME=value` line for `tags` to `out`.
///
/// Tag order and per-tag value order are preserved. A tag with no values
/// writes nothing.
pub fn write_comments<W: Write>(out: &mut W, tags: &TagSet) -> io::Result<()> {
    for (name, values) in tags.iter() {
        let name = sanitize_name(name);
        for value in values {
            out.write_all(name.as_bytes())?;
            out.write_all(b"=")?;
            out.write_all(value.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()
}

/// Render `tags` into the text `write_comments` would produce.
pub fn render_comments(tags: &TagSet) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_comments(&mut buf, tags);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Number of lines `write_comments` will emit for `tags`.
pub fn line_count(tags: &TagSet) -> usize {
    tags.iter().map(|(_, values)| values.len()).sum()
}
