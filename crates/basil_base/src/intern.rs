//! String interning for O(1) symbol comparison.
//!
//! Every name the compiler touches — variables, keywords, operators — is
//! interned once and referred to by a [`Symbol`], a copyable 32-bit handle.
//! Symbol equality is integer equality, independent of string length.
//!
//! ## Example
//!
//! ```
//! use basil_base::Interner;
//!
//! let mut interner = Interner::new();
//! let a = interner.intern("with");
//! let b = interner.intern("with");
//! assert_eq!(a, b);
//! assert_eq!(interner.resolve(a), "with");
//! ```
//!
//! ## Predefined symbols
//!
//! The punctuation and reserved operators of the language are interned at
//! construction, in a fixed order, so their handles are available as
//! constants in [`sym`] without carrying the interner around.

use std::collections::HashMap;
use std::fmt;

/// A lightweight handle to an interned string.
///
/// `Symbol`s are `Copy` and compare in O(1). Use [`Interner::resolve`] to
/// get the text back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// The empty-string symbol, always at index 0.
    pub const NONE: Symbol = Symbol(0);

    /// Returns the internal index of this symbol.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Reconstructs a symbol from an index previously obtained via
    /// [`Symbol::index`]. The index must have come from the same interner.
    pub fn from_index(index: usize) -> Symbol {
        Symbol(index as u32)
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::NONE
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Handles for the symbols every [`Interner`] predefines, in order.
///
/// These are the punctuation and reserved operators the grouper and the
/// builtins pattern-match against.
pub mod sym {
    use super::Symbol;

    pub const NONE: Symbol = Symbol(0);
    pub const COMMA: Symbol = Symbol(1);
    pub const PIPE: Symbol = Symbol(2);
    pub const CONS: Symbol = Symbol(3);
    pub const ASSIGN: Symbol = Symbol(4);
    pub const COLON: Symbol = Symbol(5);
    pub const WITH: Symbol = Symbol(6);
    pub const CASE_ARROW: Symbol = Symbol(7);
    pub const OF: Symbol = Symbol(8);
    pub const ARRAY: Symbol = Symbol(9);
    pub const LIST: Symbol = Symbol(10);
    pub const QUOTE: Symbol = Symbol(11);
    pub const SPLICE: Symbol = Symbol(12);
    pub const DO: Symbol = Symbol(13);
    pub const AT: Symbol = Symbol(14);
    pub const QUESTION: Symbol = Symbol(15);
    pub const ELLIPSIS: Symbol = Symbol(16);
    pub const PLUS: Symbol = Symbol(17);
    pub const MINUS: Symbol = Symbol(18);
    pub const TIMES: Symbol = Symbol(19);

    /// Text of the predefined symbols, indexed by handle.
    pub(super) const PREDEFINED: &[&str] = &[
        "", ",", "|", "::", "=", ":", "with", "=>", "of", "array", "list",
        "quote", "splice", "do", "at", "?", "...", "+", "-", "*",
    ];
}

/// A bidirectional string interner.
///
/// Each unique string is stored exactly once; interning it again returns the
/// existing handle.
pub struct Interner {
    map: HashMap<String, Symbol>,
    strings: Vec<String>,
}

impl Interner {
    /// Creates an interner with the predefined symbols (see [`sym`]) already
    /// present.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: HashMap::new(),
            strings: Vec::new(),
        };
        for s in sym::PREDEFINED {
            interner.intern(s);
        }
        interner
    }

    /// Interns a string, returning its symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&found) = self.map.get(s) {
            return found;
        }
        let symbol = Symbol(self.strings.len() as u32);
        self.strings.push(s.to_string());
        self.map.insert(s.to_string(), symbol);
        symbol
    }

    /// Returns the string for the given symbol.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not created by this interner.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }

    /// Looks up an existing symbol without creating a new entry.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    /// Returns the number of interned strings, including the predefined set.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if only the predefined symbols are present.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= sym::PREDEFINED.len()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
