//! Field kinds and their canonical text encodings
//!
//! Every record field is stored as text inside the record's hash. This module
//! owns the mapping between native values and that text.
//!
//! ## The Eleven Field Kinds
//!
//! | Kind | Rust type | Stored text |
//! |------|-----------|-------------|
//! | Text | `String` | verbatim |
//! | Bool | `bool` | `true` / `false` |
//! | Int | `i64` | base-10 |
//! | UInt | `u64` | base-10 |
//! | Float | `f64` | shortest round-trip decimal |
//! | Timestamp | `DateTime<Utc>` | RFC 3339, UTC, nanosecond precision |
//! | Nullable* | `Option<_>` | as above, omitted when `None` |

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The kinds of field a record shape can declare
///
/// Nullable kinds carry a payload plus a validity flag (an `Option` on the
/// Rust side). An invalid nullable field is omitted from the stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// UTF-8 text
    Text,
    /// Boolean
    Bool,
    /// Signed 64-bit integer
    Int,
    /// Unsigned 64-bit integer
    UInt,
    /// 64-bit float
    Float,
    /// UTC timestamp
    Timestamp,
    /// Optional text
    NullableText,
    /// Optional boolean
    NullableBool,
    /// Optional signed integer
    NullableInt,
    /// Optional float
    NullableFloat,
    /// Optional timestamp
    NullableTimestamp,
}

impl FieldKind {
    /// All field kinds (for iteration)
    pub const ALL: [FieldKind; 11] = [
        FieldKind::Text,
        FieldKind::Bool,
        FieldKind::Int,
        FieldKind::UInt,
        FieldKind::Float,
        FieldKind::Timestamp,
        FieldKind::NullableText,
        FieldKind::NullableBool,
        FieldKind::NullableInt,
        FieldKind::NullableFloat,
        FieldKind::NullableTimestamp,
    ];

    /// Short identifier (for logs and diagnostics)
    pub const fn id(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::UInt => "uint",
            FieldKind::Float => "float",
            FieldKind::Timestamp => "timestamp",
            FieldKind::NullableText => "nullable_text",
            FieldKind::NullableBool => "nullable_bool",
            FieldKind::NullableInt => "nullable_int",
            FieldKind::NullableFloat => "nullable_float",
            FieldKind::NullableTimestamp => "nullable_timestamp",
        }
    }

    /// Whether the kind carries a validity flag
    pub const fn is_nullable(&self) -> bool {
        matches!(
            self,
            FieldKind::NullableText
                | FieldKind::NullableBool
                | FieldKind::NullableInt
                | FieldKind::NullableFloat
                | FieldKind::NullableTimestamp
        )
    }

    /// Whether a numeric index may score this kind
    pub const fn is_numeric_indexable(&self) -> bool {
        matches!(
            self,
            FieldKind::Bool
                | FieldKind::Int
                | FieldKind::UInt
                | FieldKind::Float
                | FieldKind::NullableBool
                | FieldKind::NullableInt
                | FieldKind::NullableFloat
        )
    }

    /// Whether a lexicographic index may order this kind
    pub const fn is_lexicographic_indexable(&self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Timestamp
                | FieldKind::NullableText
                | FieldKind::NullableTimestamp
        )
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Field values
// ============================================================================

/// A present field value, borrowed from a record during encoding
///
/// Invalid nullable fields never produce a `FieldValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Text payload
    Text(&'a str),
    /// Boolean payload
    Bool(bool),
    /// Signed integer payload
    Int(i64),
    /// Unsigned integer payload
    UInt(u64),
    /// Float payload
    Float(f64),
    /// Timestamp payload
    Timestamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    /// Canonical stored text
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => (*s).to_string(),
            FieldValue::Bool(b) => format_bool(*b),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::UInt(u) => u.to_string(),
            FieldValue::Float(f) => format_float(*f),
            FieldValue::Timestamp(ts) => format_timestamp(ts),
        }
    }

    /// Score for a numeric index
    ///
    /// Booleans score `1`/`0`. Integers beyond 2^53 lose precision. NaN has
    /// no position in a sorted set and yields `None`.
    pub fn score(&self) -> Option<f64> {
        match self {
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::UInt(u) => Some(*u as f64),
            FieldValue::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Text ordered by a lexicographic index
    pub fn lex_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(_) | FieldValue::Timestamp(_) => Some(self.to_text()),
            _ => None,
        }
    }
}

// ============================================================================
// Text encodings
// ============================================================================

/// Encode a boolean as stored text
pub fn format_bool(value: bool) -> String {
    let text = if value { "true" } else { "false" };
    text.to_string()
}

/// Parse stored boolean text
///
/// Accepts `1, t, T, TRUE, true, True` and `0, f, F, FALSE, false, False`,
/// which covers hashes written by other clients of the same keyspace.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Encode a float as stored text
///
/// Rust's `Display` for `f64` is the shortest text that parses back to the
/// same value.
pub fn format_float(value: f64) -> String {
    value.to_string()
}

/// Parse stored float text
pub fn parse_float(text: &str) -> Option<f64> {
    text.parse().ok()
}

/// Encode a timestamp as stored text
///
/// Always UTC with nine fractional digits, so byte order of the text matches
/// chronological order (lexicographic indexes rely on this).
///
/// Supported years are 0000 to 9999. Later years are written with a sign and
/// five digits, which RFC 3339 does not allow: such values fail to parse on
/// read and sort out of order in a lexicographic index.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse stored RFC 3339 text into a UTC timestamp
///
/// Any offset and any fractional precision are accepted.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ============================================================================
// Tests
// ============================================================================
