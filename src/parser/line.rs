//! Line-level text handling: comment stripping and argument slicing.

use std::ops::Range;

/// Argument separators: space, tab, colon, pipe and comma.
pub fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b':' | b'|' | b',')
}

/// Cut a trailing comment from a data line.
///
/// `;` starts a comment anywhere. For `//`, the last `//` found is walked
/// back over `/`, space and tab, and the line is cut there. A single `/`
/// never starts a comment.
pub fn strip_comments(line: &str) -> &str {
    let line = line.find(';').map_or(line, |cut| &line[..cut]);

    let Some(last) = line.rfind("//") else {
        return line.trim_end();
    };
    let cut = line[..last]
        .trim_end_matches(|c| matches!(c, '/' | ' ' | '\t'))
        .len();
    line[..cut].trim_end()
}

/// Slice `line` into argument ranges.
///
/// Runs of separators count as one. At most `max_args` ranges are produced;
/// anything past the last one is dropped.
pub fn tokenize(line: &str, max_args: usize, out: &mut Vec<Range<usize>>) {
    out.clear();
    let bytes = line.as_bytes();
    let mut start: Option<usize> = None;

    for (i, &c) in bytes.iter().enumerate() {
        if is_separator(c) {
            if let Some(s) = start.take() {
                out.push(s..i);
                if out.len() == max_args {
                    return;
                }
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        if out.len() < max_args {
            out.push(s..bytes.len());
        }
    }
}

/// Split on any of `delims`, trim each piece and drop the empty ones.
pub fn split_trimmed<'a>(text: &'a str, delims: &[char]) -> Vec<&'a str> {
    text.split(|c| delims.contains(&c))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
