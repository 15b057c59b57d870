//! Record codec
//!
//! Maps a typed record to and from its flat hash: an ordered list of
//! `(field name, text value)` pairs. Encoding also produces the index side
//! values for every declared index the record has a value for.
//!
//! ## Failure model
//!
//! Neither direction fails. Invalid nullable fields are omitted on encode; on
//! decode, pairs naming unknown fields and values that do not parse as the
//! field's kind are skipped, leaving that field at its default. Extra stored
//! fields and extra struct fields are therefore harmless.

use crate::index::{IndexDescriptor, IndexKind};
use crate::keys::lex_member;
use crate::schema::{Record, Schema};
use tracing::trace;

/// Score shared by every lexicographic index entry
pub const LEX_SCORE: f64 = 0.0;

/// A sorted-set entry derived from one indexed field
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Name of the index (and of the field)
    pub index: String,
    /// Kind of the index
    pub kind: IndexKind,
    /// Entry score: the field value (numeric) or [`LEX_SCORE`]
    pub score: f64,
    /// Entry member: the record id (numeric) or `<value>:<id>`
    pub member: String,
}

/// Output of [`encode`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoded {
    /// Hash pairs in field declaration order
    pub fields: Vec<(String, String)>,
    /// Declared fields left out because they are invalid nullables
    pub omitted: Vec<&'static str>,
    /// Index side values, in field declaration order
    pub index_entries: Vec<IndexEntry>,
}

/// Encode a record using its registered schema
pub fn encode<R: Record>(record: &R, id: &str, indexes: &[IndexDescriptor]) -> Encoded {
    encode_with(R::schema(), record, id, indexes)
}

/// Encode a record with an explicit schema
///
/// `id` is only used to build index members.
pub fn encode_with<R>(
    schema: &Schema<R>,
    record: &R,
    id: &str,
    indexes: &[IndexDescriptor],
) -> Encoded {
    let mut out = Encoded::default();

    for field in schema.fields() {
        let value = match field.accessor().read(record) {
            Some(value) => value,
            None => {
                out.omitted.push(field.name());
                continue;
            }
        };

        out.fields.push((field.name().to_string(), value.to_text()));

        for index in indexes.iter().filter(|idx| idx.name == field.name()) {
            let entry = match index.kind {
                IndexKind::Numeric => value.score().map(|score| (score, id.to_string())),
                IndexKind::Lexicographic => value
                    .lex_text()
                    .map(|text| (LEX_SCORE, lex_member(&text, id))),
            };

            match entry {
                Some((score, member)) => out.index_entries.push(IndexEntry {
                    index: index.name.clone(),
                    kind: index.kind,
                    score,
                    member,
                }),
                None => trace!(
                    field = field.name(),
                    field_kind = %field.kind(),
                    index_kind = %index.kind,
                    "value not indexable, skipping index entry"
                ),
            }
        }
    }

    out
}

/// Decode a flat hash using the record's registered schema
pub fn decode<R: Record>(pairs: &[(String, String)]) -> R {
    decode_with(R::schema(), pairs)
}

/// Decode a flat hash with an explicit schema
///
/// If a name appears more than once, the last parseable value wins.
pub fn decode_with<R: Default>(schema: &Schema<R>, pairs: &[(String, String)]) -> R {
    let mut record = R::default();

    for (name, text) in pairs {
        match schema.field(name) {
            Some(field) => {
                if !field.accessor().write(&mut record, text) {
                    trace!(
                        field = name.as_str(),
                        kind = %field.kind(),
                        "unparseable stored value, field left at default"
                    );
                }
            }
            None => trace!(field = name.as_str(), "unknown stored field ignored"),
        }
    }

    record
}
