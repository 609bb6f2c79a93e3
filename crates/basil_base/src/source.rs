//! Source text and position tracking.
//!
//! A [`Source`] holds the lines of one input file. A [`Pos`] is a compact
//! range of characters within it: start and end line/column pairs. Every
//! token, term, and diagnostic in the compiler carries a `Pos`, and
//! positions of compound expressions are built with [`Pos::span`].
//!
//! # Limits
//!
//! Positions pack into 64 bits as `line:20 col:12` pairs, so a source may
//! have at most 1,048,575 lines and no line may exceed 4,095 columns.
//! [`Source::check_limits`] enforces this on load.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum number of lines in a source file.
pub const MAX_LINES: u32 = (1 << 20) - 1;

/// Maximum number of columns in a source line.
pub const MAX_COLS: u32 = (1 << 12) - 1;

/// An exclusive range of characters within a source file.
///
/// `Pos` is `Copy` and cheap; the default value is the zero position, used
/// for synthesized terms with no source of their own.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Pos {
    pub line_start: u32,
    pub col_start: u32,
    pub line_end: u32,
    pub col_end: u32,
}

impl Pos {
    /// Creates a position from line/column bounds.
    pub fn new(line_start: u32, col_start: u32, line_end: u32, col_end: u32) -> Pos {
        Pos { line_start, col_start, line_end, col_end }
    }

    /// Creates a single-character position.
    pub fn at(line: u32, col: u32) -> Pos {
        Pos { line_start: line, col_start: col, line_end: line, col_end: col + 1 }
    }

    /// Returns the smallest range encompassing both `self` and `other`.
    pub fn span(self, other: Pos) -> Pos {
        let (line_start, col_start) =
            if (self.line_start, self.col_start) <= (other.line_start, other.col_start) {
                (self.line_start, self.col_start)
            } else {
                (other.line_start, other.col_start)
            };
        let (line_end, col_end) = if (self.line_end, self.col_end) >= (other.line_end, other.col_end) {
            (self.line_end, self.col_end)
        } else {
            (other.line_end, other.col_end)
        };
        Pos { line_start, col_start, line_end, col_end }
    }

    /// Returns `true` if this is the zero position.
    pub fn is_none(self) -> bool {
        self == Pos::default()
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}..{}:{}",
            self.line_start + 1,
            self.col_start + 1,
            self.line_end + 1,
            self.col_end + 1
        )
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_start + 1, self.col_start + 1)
    }
}

/// A loaded source file: its lines, and optionally the path it came from.
pub struct Source {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl Source {
    /// Constructs a source from in-memory text.
    pub fn from_str(text: &str) -> Source {
        let mut lines: Vec<String> =
            text.split('\n').map(|line| format!("{}\n", line.trim_end_matches('\r'))).collect();
        // split produces a trailing empty segment for newline-terminated text
        if let Some(last) = lines.last() {
            if last == "\n" {
                lines.pop();
            }
        }
        Source { path: None, lines }
    }

    /// Loads the file at `path`.
    pub fn load(path: &Path) -> io::Result<Source> {
        let text = fs::read_to_string(path)?;
        let mut source = Source::from_str(&text);
        source.path = Some(path.to_path_buf());
        Ok(source)
    }

    /// Returns the path this source originated from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the line at index `i`, including its terminating newline.
    pub fn line(&self, i: u32) -> &str {
        &self.lines[i as usize]
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the source has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Verifies the line/column caps that make every location representable
    /// in a packed 64-bit position.
    pub fn check_limits(&self) -> Result<(), String> {
        if self.lines.len() as u32 > MAX_LINES {
            return Err(format!(
                "source has {} lines; the limit is {}",
                self.lines.len(),
                MAX_LINES
            ));
        }
        for (i, line) in self.lines.iter().enumerate() {
            let cols = line.chars().count() as u32;
            if cols > MAX_COLS {
                return Err(format!(
                    "line {} has {} columns; the limit is {}",
                    i + 1,
                    cols,
                    MAX_COLS
                ));
            }
        }
        Ok(())
    }

    /// Returns a position spanning the entire file.
    pub fn full_span(&self) -> Pos {
        if self.lines.is_empty() {
            return Pos::default();
        }
        let last = self.lines.len() as u32 - 1;
        Pos::new(0, 0, last, self.lines[last as usize].chars().count() as u32)
    }
}

/// A cursor over a [`Source`], providing the peek/read interface the lexer
/// consumes.
pub struct SourceView<'a> {
    src: &'a Source,
    pub line: u32,
    pub column: u32,
    chars: Vec<char>,
    last: char,
}

impl<'a> SourceView<'a> {
    /// Constructs a view at the start of `src`.
    pub fn new(src: &'a Source) -> SourceView<'a> {
        let chars = if src.is_empty() { Vec::new() } else { src.line(0).chars().collect() };
        SourceView { src, line: 0, column: 0, chars, last: '\0' }
    }

    /// Returns the position of the character under the cursor.
    pub fn pos(&self) -> Pos {
        Pos::at(self.line, self.column)
    }

    /// Returns the character immediately before the cursor, or `'\0'` at the
    /// start of input.
    pub fn last(&self) -> char {
        self.last
    }

    /// Returns the character under the cursor, or `'\0'` at end of input.
    pub fn peek(&self) -> char {
        self.peek_at(0)
    }

    /// Returns the character `n` places ahead of the cursor on the current
    /// line, or `'\0'` past its end.
    pub fn peek_at(&self, n: u32) -> char {
        self.chars.get((self.column + n) as usize).copied().unwrap_or('\0')
    }

    /// Returns the character under the cursor and advances past it, moving
    /// to the next line at line ends.
    pub fn read(&mut self) -> char {
        let c = self.peek();
        if c == '\0' {
            return c;
        }
        self.last = c;
        self.column += 1;
        if self.column as usize >= self.chars.len() {
            self.line += 1;
            self.column = 0;
            self.chars = if (self.line as usize) < self.src.len() {
                self.src.line(self.line).chars().collect()
            } else {
                Vec::new()
            };
        }
        c
    }

    /// Returns `true` if the cursor has consumed all input.
    pub fn done(&self) -> bool {
        self.line as usize >= self.src.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_takes_min_start_max_end() {
        let a = Pos::new(1, 4, 1, 9);
        let b = Pos::new(0, 7, 2, 3);
        let merged = a.span(b);
        assert_eq!(merged, Pos::new(0, 7, 2, 3));
    }

    #[test]
    fn span_is_commutative() {
        let a = Pos::new(3, 0, 3, 5);
        let b = Pos::new(3, 5, 3, 10);
        assert_eq!(a.span(b), b.span(a));
    }

    #[test]
    fn from_str_splits_lines() {
        let src = Source::from_str("one\ntwo\nthree");
        assert_eq!(src.len(), 3);
        assert_eq!(src.line(1), "two\n");
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let src = Source::from_str("one\ntwo\n");
        assert_eq!(src.len(), 2);
    }

    #[test]
    fn view_reads_across_lines() {
        let src = Source::from_str("ab\ncd");
        let mut view = SourceView::new(&src);
        assert_eq!(view.read(), 'a');
        assert_eq!(view.read(), 'b');
        assert_eq!(view.read(), '\n');
        assert_eq!(view.pos(), Pos::at(1, 0));
        assert_eq!(view.read(), 'c');
        assert_eq!(view.last(), 'c');
        assert_eq!(view.read(), 'd');
        assert_eq!(view.read(), '\n');
        assert!(view.done());
        assert_eq!(view.read(), '\0');
    }

    #[test]
    fn check_limits_rejects_overlong_lines() {
        let long = "x".repeat((MAX_COLS + 2) as usize);
        let src = Source::from_str(&long);
        assert!(src.check_limits().is_err());
        let ok = Source::from_str("short line");
        assert!(ok.check_limits().is_ok());
    }
}
