use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A context-free L-System: an axiom plus single-symbol rewrite rules.
///
/// Expansion depth is not stored here; it is supplied per render as the order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// The symbol sequence expansion starts from.
    pub axiom: String,

    /// Replacement sequence for each rewritable symbol.
    rules: HashMap<char, String>,
}

impl Grammar {
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            rules: HashMap::new(),
        }
    }

    /// Adds a rule (builder pattern).
    pub fn with_rule(mut self, sym: char, replacement: impl Into<String>) -> Self {
        self.set_rule(sym, replacement);
        self
    }

    /// Registers `sym -> replacement`, replacing any previous rule for `sym`.
    pub fn set_rule(&mut self, sym: char, replacement: impl Into<String>) {
        self.rules.insert(sym, replacement.into());
    }

    pub fn rule(&self, sym: char) -> Option<&str> {
        self.rules.get(&sym).map(String::as_str)
    }

    pub fn rules(&self) -> &HashMap<char, String> {
        &self.rules
    }

    /// The terminal symbols the axiom expands to at `order`.
    ///
    /// Follows the same routing as rendering: a symbol is rewritten only while
    /// `order > 0` and it has a rule; everything else is emitted as-is.
    pub fn derive(&self, order: i32) -> String {
        self.derive_from(&self.axiom, order)
    }

    /// Like [`derive`](Self::derive), starting from an arbitrary sequence.
    pub fn derive_from(&self, sequence: &str, order: i32) -> String {
        let mut out = String::new();
        self.derive_into(sequence, order, &mut out);
        out
    }

    fn derive_into(&self, sequence: &str, order: i32, out: &mut String) {
        for sym in sequence.chars() {
            match self.rule(sym) {
                Some(replacement) if order > 0 => self.derive_into(replacement, order - 1, out),
                _ => out.push(sym),
            }
        }
    }
}
