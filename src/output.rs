//! Status lines for the mosaic CLI.
//!
//! Everything here writes to stderr so `mosaic map` can keep stdout for JSON.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Verbs are right-aligned to this width, as cargo does.
const VERB_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Green,
    Cyan,
    Yellow,
    Red,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Cyan => "\x1b[36m",
            Tone::Yellow => "\x1b[33m",
            Tone::Red => "\x1b[31m",
        }
    }
}

/// Prints `      Loaded 2 libraries`-style lines, coloured on a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Never colours, whatever stderr is.
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn status(&self, verb: &str, message: &str) {
        self.line(Tone::Green, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.line(Tone::Cyan, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.line(Tone::Yellow, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.line(Tone::Red, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.wrap(Tone::Cyan.code(), text)
    }

    /// `error` in bold red or `warning` in bold yellow.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let tone = if is_error { Tone::Red } else { Tone::Yellow };
        self.wrap(&format!("{BOLD}{}", tone.code()), label)
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) {
        let verb = format!("{verb:>VERB_WIDTH$}");
        let verb = self.wrap(&format!("{BOLD}{}", tone.code()), &verb);
        let _ = writeln!(io::stderr().lock(), "{verb} {message}");
    }
}

/// `plural(1, "mapping", "mappings")` is "1 mapping".
pub fn plural(n: usize, singular: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { many })
}
