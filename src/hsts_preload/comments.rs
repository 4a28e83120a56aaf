//! Line-comment stripping for the Chromium preload feed.
//!
//! The feed is JSON with `//` line comments. The accepted grammar is
//! deliberately narrow and matches what the upstream file actually contains:
//!
//! - a line whose trimmed content is exactly `//` is dropped;
//! - on every other line, everything from the first `"// "` (slash, slash,
//!   space) to the end of the line is dropped;
//! - the surviving fragments are concatenated without separators.
//!
//! A `//` that is not followed by a space is left alone, so URLs inside
//! string values survive. This is not JSON5 support.

const COMMENT_MARKER: &str = "// ";
const BARE_COMMENT_LINE: &str = "//";

/// Removes `// ` line comments and joins the remaining line fragments.
pub fn strip_line_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.split('\n') {
        if line.trim() == BARE_COMMENT_LINE {
            continue;
        }
        match line.find(COMMENT_MARKER) {
            Some(idx) => out.push_str(&line[..idx]),
            None => out.push_str(line),
        }
    }
    out
}
