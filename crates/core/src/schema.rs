//! Record shapes as explicit field-descriptor tables
//!
//! A record shape is described once per type by a [`Schema`]: an ordered list
//! of [`Field`]s, each pairing an external (stored) name with a typed
//! [`Accessor`]. The codec walks this table instead of inspecting types at
//! runtime.
//!
//! # Example
//!
//! ```
//! use once_cell::sync::Lazy;
//! use tablekv_core::{Field, Record, Schema};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: i64,
//!     nickname: Option<String>,
//! }
//!
//! static USER_SCHEMA: Lazy<Schema<User>> = Lazy::new(|| {
//!     Schema::new(vec![
//!         Field::text("name", |u: &User| u.name.as_str(), |u: &mut User, v| u.name = v),
//!         Field::int("age", |u: &User| u.age, |u: &mut User, v| u.age = v),
//!         Field::nullable_text("nickname", |u: &User| u.nickname.as_deref(), |u: &mut User, v| u.nickname = v),
//!     ])
//! });
//!
//! impl Record for User {
//!     fn schema() -> &'static Schema<Self> {
//!         &USER_SCHEMA
//!     }
//! }
//!
//! assert_eq!(User::schema().len(), 3);
//! ```

use crate::value::{parse_bool, parse_float, parse_timestamp, FieldKind, FieldValue};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

/// A typed record shape stored as a flat hash
///
/// Decoding starts from `Default::default()` and fills in every field it can
/// parse, so fields missing from storage keep their zero value.
pub trait Record: Default + 'static {
    /// The shape's field-descriptor table, built once per type
    fn schema() -> &'static Schema<Self>;
}

/// Typed read/write access to one record field
///
/// Nullable setters always receive `Some(_)` from the decoder; an absent or
/// unparseable nullable field is never written.
pub enum Accessor<R> {
    /// Text field
    Text(fn(&R) -> &str, fn(&mut R, String)),
    /// Boolean field
    Bool(fn(&R) -> bool, fn(&mut R, bool)),
    /// Signed integer field
    Int(fn(&R) -> i64, fn(&mut R, i64)),
    /// Unsigned integer field
    UInt(fn(&R) -> u64, fn(&mut R, u64)),
    /// Float field
    Float(fn(&R) -> f64, fn(&mut R, f64)),
    /// Timestamp field
    Timestamp(fn(&R) -> DateTime<Utc>, fn(&mut R, DateTime<Utc>)),
    /// Optional text field
    NullableText(fn(&R) -> Option<&str>, fn(&mut R, Option<String>)),
    /// Optional boolean field
    NullableBool(fn(&R) -> Option<bool>, fn(&mut R, Option<bool>)),
    /// Optional signed integer field
    NullableInt(fn(&R) -> Option<i64>, fn(&mut R, Option<i64>)),
    /// Optional float field
    NullableFloat(fn(&R) -> Option<f64>, fn(&mut R, Option<f64>)),
    /// Optional timestamp field
    NullableTimestamp(
        fn(&R) -> Option<DateTime<Utc>>,
        fn(&mut R, Option<DateTime<Utc>>),
    ),
}

impl<R> Accessor<R> {
    /// The field kind this accessor reads and writes
    pub const fn kind(&self) -> FieldKind {
        match self {
            Accessor::Text(..) => FieldKind::Text,
            Accessor::Bool(..) => FieldKind::Bool,
            Accessor::Int(..) => FieldKind::Int,
            Accessor::UInt(..) => FieldKind::UInt,
            Accessor::Float(..) => FieldKind::Float,
            Accessor::Timestamp(..) => FieldKind::Timestamp,
            Accessor::NullableText(..) => FieldKind::NullableText,
            Accessor::NullableBool(..) => FieldKind::NullableBool,
            Accessor::NullableInt(..) => FieldKind::NullableInt,
            Accessor::NullableFloat(..) => FieldKind::NullableFloat,
            Accessor::NullableTimestamp(..) => FieldKind::NullableTimestamp,
        }
    }

    /// Read the field's current value
    ///
    /// Returns `None` for an invalid nullable field.
    pub fn read<'r>(&self, record: &'r R) -> Option<FieldValue<'r>> {
        match self {
            Accessor::Text(get, _) => Some(FieldValue::Text(get(record))),
            Accessor::Bool(get, _) => Some(FieldValue::Bool(get(record))),
            Accessor::Int(get, _) => Some(FieldValue::Int(get(record))),
            Accessor::UInt(get, _) => Some(FieldValue::UInt(get(record))),
            Accessor::Float(get, _) => Some(FieldValue::Float(get(record))),
            Accessor::Timestamp(get, _) => Some(FieldValue::Timestamp(get(record))),
            Accessor::NullableText(get, _) => get(record).map(FieldValue::Text),
            Accessor::NullableBool(get, _) => get(record).map(FieldValue::Bool),
            Accessor::NullableInt(get, _) => get(record).map(FieldValue::Int),
            Accessor::NullableFloat(get, _) => get(record).map(FieldValue::Float),
            Accessor::NullableTimestamp(get, _) => get(record).map(FieldValue::Timestamp),
        }
    }

    /// Parse stored text into the field
    ///
    /// Returns `false` and leaves the record untouched when the text does not
    /// parse as this field's kind.
    pub fn write(&self, record: &mut R, text: &str) -> bool {
        match self {
            Accessor::Text(_, set) => {
                set(record, text.to_string());
                true
            }
            Accessor::Bool(_, set) => apply(parse_bool(text), |v| set(record, v)),
            Accessor::Int(_, set) => apply(text.parse().ok(), |v| set(record, v)),
            Accessor::UInt(_, set) => apply(text.parse().ok(), |v| set(record, v)),
            Accessor::Float(_, set) => apply(parse_float(text), |v| set(record, v)),
            Accessor::Timestamp(_, set) => apply(parse_timestamp(text), |v| set(record, v)),
            Accessor::NullableText(_, set) => {
                set(record, Some(text.to_string()));
                true
            }
            Accessor::NullableBool(_, set) => {
                apply(parse_bool(text), |v| set(record, Some(v)))
            }
            Accessor::NullableInt(_, set) => {
                apply(text.parse().ok(), |v| set(record, Some(v)))
            }
            Accessor::NullableFloat(_, set) => {
                apply(parse_float(text), |v| set(record, Some(v)))
            }
            Accessor::NullableTimestamp(_, set) => {
                apply(parse_timestamp(text), |v| set(record, Some(v)))
            }
        }
    }
}

fn apply<T>(parsed: Option<T>, set: impl FnOnce(T)) -> bool {
    match parsed {
        Some(value) => {
            set(value);
            true
        }
        None => false,
    }
}

/// One entry of a field-descriptor table
pub struct Field<R> {
    name: &'static str,
    accessor: Accessor<R>,
}

impl<R> Field<R> {
    /// Create a field from an explicit accessor
    pub fn new(name: &'static str, accessor: Accessor<R>) -> Self {
        Self { name, accessor }
    }

    /// Text field
    pub fn text(name: &'static str, get: fn(&R) -> &str, set: fn(&mut R, String)) -> Self {
        Self::new(name, Accessor::Text(get, set))
    }

    /// Boolean field
    pub fn bool(name: &'static str, get: fn(&R) -> bool, set: fn(&mut R, bool)) -> Self {
        Self::new(name, Accessor::Bool(get, set))
    }

    /// Signed integer field
    pub fn int(name: &'static str, get: fn(&R) -> i64, set: fn(&mut R, i64)) -> Self {
        Self::new(name, Accessor::Int(get, set))
    }

    /// Unsigned integer field
    pub fn uint(name: &'static str, get: fn(&R) -> u64, set: fn(&mut R, u64)) -> Self {
        Self::new(name, Accessor::UInt(get, set))
    }

    /// Float field
    pub fn float(name: &'static str, get: fn(&R) -> f64, set: fn(&mut R, f64)) -> Self {
        Self::new(name, Accessor::Float(get, set))
    }

    /// Timestamp field
    pub fn timestamp(
        name: &'static str,
        get: fn(&R) -> DateTime<Utc>,
        set: fn(&mut R, DateTime<Utc>),
    ) -> Self {
        Self::new(name, Accessor::Timestamp(get, set))
    }

    /// Optional text field
    pub fn nullable_text(
        name: &'static str,
        get: fn(&R) -> Option<&str>,
        set: fn(&mut R, Option<String>),
    ) -> Self {
        Self::new(name, Accessor::NullableText(get, set))
    }

    /// Optional boolean field
    pub fn nullable_bool(
        name: &'static str,
        get: fn(&R) -> Option<bool>,
        set: fn(&mut R, Option<bool>),
    ) -> Self {
        Self::new(name, Accessor::NullableBool(get, set))
    }

    /// Optional signed integer field
    pub fn nullable_int(
        name: &'static str,
        get: fn(&R) -> Option<i64>,
        set: fn(&mut R, Option<i64>),
    ) -> Self {
        Self::new(name, Accessor::NullableInt(get, set))
    }

    /// Optional float field
    pub fn nullable_float(
        name: &'static str,
        get: fn(&R) -> Option<f64>,
        set: fn(&mut R, Option<f64>),
    ) -> Self {
        Self::new(name, Accessor::NullableFloat(get, set))
    }

    /// Optional timestamp field
    pub fn nullable_timestamp(
        name: &'static str,
        get: fn(&R) -> Option<DateTime<Utc>>,
        set: fn(&mut R, Option<DateTime<Utc>>),
    ) -> Self {
        Self::new(name, Accessor::NullableTimestamp(get, set))
    }

    /// External (stored) field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field kind
    pub fn kind(&self) -> FieldKind {
        self.accessor.kind()
    }

    /// Typed accessor
    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }
}

impl<R> std::fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Field-descriptor table for one record shape
///
/// Fields keep declaration order (the order pairs are written to the hash).
/// If two fields share a name, the first declared one owns it.
pub struct Schema<R> {
    fields: Vec<Field<R>>,
    by_name: FxHashMap<&'static str, usize>,
}

impl<R> Schema<R> {
    /// Build a table from fields in declaration order
    pub fn new(fields: Vec<Field<R>>) -> Self {
        let mut by_name = FxHashMap::default();
        for (pos, field) in fields.iter().enumerate() {
            by_name.entry(field.name).or_insert(pos);
        }
        Self { fields, by_name }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    /// Look up a field by external name
    pub fn field(&self, name: &str) -> Option<&Field<R>> {
        self.by_name.get(name).map(|&pos| &self.fields[pos])
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> std::fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema").field("fields", &self.fields).finish()
    }
}
