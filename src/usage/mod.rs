//! Textual usage heuristics.
//!
//! Both heuristics are deliberately approximate: no symbol table, no type
//! resolution. At artifact level a false "still referenced" only costs a
//! kept file; a false "unused" is caught downstream by the build gate.

/// Lifecycle prefixes whose methods are never evaluated for removal
pub const RESERVED_PREFIXES: [&str; 2] = ["ng", "ion"];

/// The constructor is part of the class contract, never a removal candidate
pub const CONSTRUCTOR_NAME: &str = "constructor";

/// Artifact-level heuristic: a symbol is possibly referenced if its exact
/// name appears anywhere in the buffer.
pub fn is_referenced(text: &str, symbol: &str) -> bool {
    !symbol.is_empty() && text.contains(symbol)
}

/// Non-overlapping occurrence count of a name in a buffer
pub fn count_occurrences(text: &str, name: &str) -> usize {
    if name.is_empty() {
        return 0;
    }
    text.matches(name).count()
}

/// Hard exclusion list for the method pass: framework lifecycle hooks and
/// the constructor are always kept without evaluation.
pub fn is_reserved_method(name: &str) -> bool {
    name == CONSTRUCTOR_NAME || RESERVED_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Occurrence counts for one method, in both usage scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodUsage {
    /// Occurrences in the declaring unit's own text (includes the
    /// declaration site itself)
    pub own: usize,

    /// Occurrences in the companion markup
    pub markup: usize,
}

impl MethodUsage {
    /// Measure a method name against its unit text and companion markup
    pub fn measure(unit_text: &str, markup_text: &str, name: &str) -> Self {
        Self {
            own: count_occurrences(unit_text, name),
            markup: count_occurrences(markup_text, name),
        }
    }

    /// A method is unused iff its only own-unit occurrence is the
    /// declaration site and the markup never mentions it.
    pub fn is_unused(&self) -> bool {
        self.own <= 1 && self.markup == 0
    }

    /// Call sites beyond the declaration itself
    pub fn own_call_sites(&self) -> usize {
        self.own.saturating_sub(1)
    }
}
