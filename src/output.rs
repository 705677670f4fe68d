//! Status lines on stderr for `check` and `dump`.
//!
//! Each line is a verb right-aligned in a fixed column followed by a message.
//! Verbs are bold and tinted when stderr is a terminal. Stdout only carries
//! command output such as the JSON dump.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const VERB_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Good,
    Note,
    Warn,
    Bad,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Good => "\x1b[1;32m",
            Tone::Note => "\x1b[1;36m",
            Tone::Warn => "\x1b[1;33m",
            Tone::Bad => "\x1b[1;31m",
        }
    }
}

fn render(tone: Tone, color: bool, verb: &str, message: &str) -> String {
    if color {
        format!("{}{verb:>VERB_WIDTH$}\x1b[0m {message}", tone.ansi())
    } else {
        format!("{verb:>VERB_WIDTH$} {message}")
    }
}

pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Progress, e.g. `    Checking trucks/dumper.truck`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Good, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Good, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Note, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Warn, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Bad, verb, message);
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = render(tone, self.color, verb, message);
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }
}

/// `plural(1, "file", "files")` is "1 file".
pub fn plural(n: usize, singular: &str, many: &str) -> String {
    let word = if n == 1 { singular } else { many };
    format!("{} {}", n, word)
}

/// `path` relative to the working directory when it lies below it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "error", "errors"), "1 error");
        assert_eq!(plural(0, "error", "errors"), "0 errors");
        assert_eq!(plural(3, "warning", "warnings"), "3 warnings");
    }

    #[test]
    fn test_display_path_absolute() {
        let p = Path::new("/nonexistent/trucks/dumper.truck");
        assert_eq!(display_path(p), "/nonexistent/trucks/dumper.truck");
    }

    #[test]
    fn test_render_aligns_verb() {
        assert_eq!(
            render(Tone::Good, false, "Checking", "dumper.truck"),
            "    Checking dumper.truck"
        );
        assert_eq!(
            render(Tone::Bad, true, "error", "x"),
            "\x1b[1;31m       error\x1b[0m x"
        );
    }
}
