//! Accumulating diagnostics with source positions.
//!
//! The compiler never throws on user errors: it records them in a
//! [`Diagnostics`] buffer and keeps going, so a single bad subexpression
//! cannot invalidate the surrounding analysis. Evaluation consults
//! [`Diagnostics::count`] as its gate, and error *values* propagate
//! contagiously without reporting twice.
//!
//! A diagnostic may carry notes — secondary messages with their own
//! positions, attached to the most recently reported error (grouping errors
//! use these for per-candidate explanations).

use crate::source::Pos;
use std::fmt;

/// A secondary message attached to a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub pos: Pos,
    pub message: String,
}

/// One reported error: a message, where it happened, and its notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub pos: Pos,
    pub message: String,
    pub notes: Vec<Note>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.pos, self.message)?;
        for note in &self.notes {
            write!(f, "\n{}: note: {}", note.pos, note.message)?;
        }
        Ok(())
    }
}

/// The error buffer for one compilation.
#[derive(Default)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    /// Reports an error at `pos`.
    pub fn error(&mut self, pos: Pos, message: impl Into<String>) {
        self.errors.push(Diagnostic { pos, message: message.into(), notes: Vec::new() });
    }

    /// Attaches a note to the most recently reported error.
    ///
    /// Notes reported before any error are dropped.
    pub fn note(&mut self, pos: Pos, message: impl Into<String>) {
        if let Some(last) = self.errors.last_mut() {
            last.notes.push(Note { pos, message: message.into() });
        }
    }

    /// Returns the number of errors reported so far.
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the reported errors.
    pub fn all(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Removes and returns all reported errors.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.errors)
    }

    /// Discards all reported errors.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}
