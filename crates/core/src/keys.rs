//! Keyspace layout
//!
//! All keys for one record shape live under a table namespace:
//!
//! ```text
//! <table>:<id>            hash of field name -> text value (one record)
//! <table>:index:id        set of every live record id
//! <table>:index:<name>    sorted set backing the index called <name>
//! ```
//!
//! The layout is shared with other clients of the same store and must not
//! change.

use crate::error::{KeyError, KeyResult};

/// Separator between key segments and inside lexicographic index members
pub const SEPARATOR: char = ':';

/// Segment naming the index area of a table
const INDEX_SEGMENT: &str = "index";

/// Name of the membership set inside the index area
const MEMBERSHIP_NAME: &str = "id";

/// Key builder for one table namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKeys {
    table: String,
}

impl TableKeys {
    /// Create the key builder for `table`
    pub fn new(table: impl Into<String>) -> KeyResult<Self> {
        let table = table.into();
        if table.is_empty() {
            return Err(KeyError::EmptyTable);
        }
        Ok(Self { table })
    }

    /// The table namespace
    pub fn table(&self) -> &str {
        &self.table
    }

    /// `<table>:<id>`
    pub fn record(&self, id: &str) -> String {
        format!("{}{}{}", self.table, SEPARATOR, id)
    }

    /// `<table>:index:id`
    pub fn membership(&self) -> String {
        self.index(MEMBERSHIP_NAME)
    }

    /// `<table>:index:<name>`
    pub fn index(&self, name: &str) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.table,
            INDEX_SEGMENT,
            name,
            sep = SEPARATOR
        )
    }

    /// Glob pattern matching every key of the table
    pub fn all_keys_pattern(&self) -> String {
        format!("{}{}*", escape_glob(&self.table), SEPARATOR)
    }
}

/// Validate a record identifier
///
/// Identifiers may not be empty and may not contain the separator: the
/// identifier is recovered from lexicographic members by splitting on the last
/// separator, and `index:<x>` would alias the table's index keys.
pub fn validate_id(id: &str) -> KeyResult<()> {
    if id.is_empty() {
        return Err(KeyError::EmptyId);
    }
    if id.contains(SEPARATOR) {
        return Err(KeyError::InvalidId {
            id: id.to_string(),
            reason: "must not contain ':'",
        });
    }
    Ok(())
}

/// Validate an index name
///
/// The name `id` is taken by the membership set, and an empty name would
/// address `<table>:index:`.
pub fn validate_index(name: &str) -> KeyResult<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name == MEMBERSHIP_NAME {
        "reserved for the membership set"
    } else {
        return Ok(());
    };
    Err(KeyError::InvalidIndex {
        name: name.to_string(),
        reason,
    })
}

/// Build a lexicographic index member: `<value>:<id>`
pub fn lex_member(value: &str, id: &str) -> String {
    format!("{}{}{}", value, SEPARATOR, id)
}

/// Recover the record id from a lexicographic index member
///
/// Takes the suffix after the last separator; a member without a separator is
/// returned whole.
pub fn id_from_lex_member(member: &str) -> &str {
    match member.rfind(SEPARATOR) {
        Some(pos) => &member[pos + SEPARATOR.len_utf8()..],
        None => member,
    }
}

/// Glob pattern matching every lexicographic member that belongs to `id`
pub fn lex_member_pattern(id: &str) -> String {
    format!("*{}{}", SEPARATOR, escape_glob(id))
}

/// Escape glob metacharacters so `text` matches only itself
pub fn escape_glob(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
