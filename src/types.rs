//! Resolved program variables.
//!
//! The analysis never works with raw names: every identifier is first interned
//! into a [`Var`], a small copyable slot index. [`Vars`] owns the name table and
//! can map a slot back to its name for display.

use std::collections::HashMap;
use std::fmt;

/// A resolved variable (0-indexed slot).
///
/// Two `Var`s are equal iff they denote the same storage location.
/// A variable is never destroyed: `delete x` only removes it from the
/// current [`State`][crate::state::State], not from the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a variable with the given slot index.
    pub fn new(index: u32) -> Self {
        Var(index)
    }

    /// Returns the raw slot index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// Name table: interns identifiers into [`Var`]s.
#[derive(Debug, Default, Clone)]
pub struct Vars {
    names: Vec<String>,
    index: HashMap<String, Var>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variable for `name`, allocating a fresh slot on first use.
    pub fn intern(&mut self, name: &str) -> Var {
        if let Some(&var) = self.index.get(name) {
            return var;
        }
        let var = Self::slot(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), var);
        var
    }

    fn slot(len: usize) -> Var {
        Var::new(u32::try_from(len).expect("name table holds at most u32::MAX variables"))
    }

    /// Looks up an already interned name.
    pub fn get(&self, name: &str) -> Option<Var> {
        self.index.get(name).copied()
    }

    /// Returns the name a variable was interned from.
    pub fn name(&self, var: Var) -> Option<&str> {
        self.names.get(var.index() as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
