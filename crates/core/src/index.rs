//! Secondary index declarations
//!
//! An [`IndexDescriptor`] names one record field whose value should be
//! queryable in sorted order. The descriptor is static: callers build it once
//! and pass it to every insert, delete, and sorted listing of the table.

use serde::{Deserialize, Serialize};

/// How an index orders its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Ordered by the field's numeric value, used directly as the score
    Numeric,
    /// Ordered by byte comparison of `<value>:<id>` members at score 0
    Lexicographic,
}

impl IndexKind {
    /// Short identifier
    pub const fn id(&self) -> &'static str {
        match self {
            IndexKind::Numeric => "numeric",
            IndexKind::Lexicographic => "lexicographic",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Direction of a sorted listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Smallest score (or lowest member) first
    #[default]
    Ascending,
    /// Largest score (or highest member) first
    Descending,
}

impl Order {
    /// `Descending` when `desc` is true
    pub const fn from_desc(desc: bool) -> Self {
        if desc {
            Order::Descending
        } else {
            Order::Ascending
        }
    }

    /// Whether entries are walked from the top
    pub const fn is_descending(&self) -> bool {
        matches!(self, Order::Descending)
    }
}

/// Declares that one field is indexed, and how
///
/// `name` must equal the field's external (stored) name.
///
/// # Example
///
/// ```
/// use tablekv_core::IndexDescriptor;
///
/// let by_age = IndexDescriptor::numeric("age");
/// let by_name = IndexDescriptor::lexicographic("name");
/// assert_ne!(by_age.kind, by_name.kind);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// External name of the indexed field
    pub name: String,
    /// Ordering kind
    pub kind: IndexKind,
}

impl IndexDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, kind: IndexKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a numeric index descriptor
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, IndexKind::Numeric)
    }

    /// Create a lexicographic index descriptor
    pub fn lexicographic(name: impl Into<String>) -> Self {
        Self::new(name, IndexKind::Lexicographic)
    }
}

impl std::fmt::Display for IndexDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
