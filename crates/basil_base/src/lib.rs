//! # basil-base
//!
//! Structural atoms for the Basil compiler.
//!
//! This crate provides the foundations the rest of the pipeline builds on:
//!
//! - [`Interner`]/[`Symbol`] — string interning for O(1) name equality,
//!   with the language's reserved symbols predefined ([`sym`])
//! - [`Source`]/[`Pos`] — source text, bounded positions, span merging
//! - [`Diagnostics`] — the accumulating error buffer with notes
//!
//! It knows nothing about types, values, or evaluation.

pub mod error;
pub mod intern;
pub mod source;

pub use error::{Diagnostic, Diagnostics, Note};
pub use intern::{sym, Interner, Symbol};
pub use source::{Pos, Source, SourceView};
