//! Record introspection.
//!
//! A record is any value whose fields can be listed in declaration order as
//! [`FieldDescriptor`]s. `#[derive(Record)]` generates the listing for plain
//! structs; [`serde_json::Value`] objects are records too.
//!
//! Column names come from per-field tags, the same way a `json:"name"` struct
//! tag names a field on the wire:
//!
//! ```ignore
//! use tagsql::Record;
//!
//! #[derive(Record)]
//! struct PersonFilter {
//!     #[tag(json = "first_name,omitempty", form = "first_name")]
//!     first_name: Option<String>,
//!     #[tag(json = "limit")]
//!     limit: Option<i32>,
//! }
//! ```

use crate::error::{QueryError, QueryResult};
use crate::value::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Tag read when none is configured.
pub const DEFAULT_TAG: &str = "json";

/// Column mapping parsed from one tag value (`"first_name,omitempty"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    column: Cow<'static, str>,
    flags: BTreeSet<Cow<'static, str>>,
}

impl ColumnMeta {
    pub fn new(column: impl Into<Cow<'static, str>>) -> Self {
        Self {
            column: column.into(),
            flags: BTreeSet::new(),
        }
    }

    /// Add a flag (the segments after the column, e.g. `omitempty`).
    pub fn with_flag(mut self, flag: impl Into<Cow<'static, str>>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    /// Parse a raw tag value: the first comma-separated segment is the
    /// column, the remaining non-empty segments are flags.
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split(',');
        let column = segments.next().unwrap_or_default().trim().to_string();
        segments
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .fold(Self::new(column), |meta, flag| {
                meta.with_flag(flag.to_string())
            })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|f| f.as_ref())
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// One `key = "value"` annotation on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    key: Cow<'static, str>,
    meta: ColumnMeta,
}

impl FieldTag {
    pub fn new(key: impl Into<Cow<'static, str>>, meta: ColumnMeta) -> Self {
        Self {
            key: key.into(),
            meta,
        }
    }

    /// Build a tag from its key and raw value.
    pub fn parse(key: impl Into<Cow<'static, str>>, raw: &str) -> Self {
        Self::new(key, ColumnMeta::parse(raw))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn meta(&self) -> &ColumnMeta {
        &self.meta
    }
}

/// Pseudo-fields diverted from the WHERE predicates into trailing clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reserved {
    OrderBy,
    Limit,
    Offset,
}

impl Reserved {
    /// Match a declared field name, ignoring ASCII case and underscores, so
    /// `order_by`, `OrderBy` and `ORDERBY` are all [`Reserved::OrderBy`].
    pub fn from_field_name(name: &str) -> Option<Self> {
        let matches = |keyword: &str| {
            name.chars()
                .filter(|c| *c != '_')
                .map(|c| c.to_ascii_uppercase())
                .eq(keyword.chars())
        };

        if matches("ORDERBY") {
            Some(Reserved::OrderBy)
        } else if matches("LIMIT") {
            Some(Reserved::Limit)
        } else if matches("OFFSET") {
            Some(Reserved::Offset)
        } else {
            None
        }
    }
}

/// A record field as seen by the clause assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    index: usize,
    optional: bool,
    value: Option<Value>,
    tags: Vec<FieldTag>,
}

impl FieldDescriptor {
    /// A field whose type has no absent state; it is always present.
    pub fn required(name: impl Into<Cow<'static, str>>, index: usize, value: Value) -> Self {
        Self {
            name: name.into(),
            index,
            optional: false,
            value: Some(value),
            tags: Vec::new(),
        }
    }

    /// An optional field; `None` means absent.
    pub fn optional(
        name: impl Into<Cow<'static, str>>,
        index: usize,
        value: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            optional: true,
            value,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: FieldTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = FieldTag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the record's type definition.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn tags(&self) -> &[FieldTag] {
        &self.tags
    }

    /// Metadata under `tag`, if the field carries that annotation.
    pub fn meta(&self, tag: &str) -> Option<&ColumnMeta> {
        self.tags.iter().find(|t| t.key() == tag).map(FieldTag::meta)
    }

    /// Column name under `tag`.
    ///
    /// A missing annotation, or one with an empty column segment, is a
    /// [`QueryError::MissingColumnMapping`].
    pub fn column(&self, tag: &str) -> QueryResult<&str> {
        match self.meta(tag) {
            Some(meta) if !meta.column().is_empty() => Ok(meta.column()),
            _ => Err(QueryError::missing_column(self.name(), tag)),
        }
    }

    pub fn reserved(&self) -> Option<Reserved> {
        Reserved::from_field_name(&self.name)
    }

    pub(crate) fn into_value(self) -> Option<Value> {
        self.value
    }
}

/// A value whose fields can be listed in declaration order.
///
/// Usually derived with `#[derive(Record)]`. Hand-written impls must list
/// fields in declaration order; the list is never re-sorted.
pub trait Record {
    fn fields(&self) -> QueryResult<Vec<FieldDescriptor>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> QueryResult<Vec<FieldDescriptor>> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&self) -> QueryResult<Vec<FieldDescriptor>> {
        (**self).fields()
    }
}

/// A JSON object is a record whose keys are both the field names and the
/// `json` columns. `null` members are absent; a `null` document has no fields.
///
/// Keys are registered under the `json` tag only. A builder reading any other
/// tag rejects a JSON record with a present member as
/// [`QueryError::MissingColumnMapping`]; use a derived record to name columns
/// under several tags.
impl Record for serde_json::Value {
    fn fields(&self) -> QueryResult<Vec<FieldDescriptor>> {
        let map = match self {
            serde_json::Value::Null => return Ok(Vec::new()),
            serde_json::Value::Object(map) => map,
            serde_json::Value::Bool(_) => return Err(QueryError::invalid_shape("boolean")),
            serde_json::Value::Number(_) => return Err(QueryError::invalid_shape("number")),
            serde_json::Value::String(_) => return Err(QueryError::invalid_shape("string")),
            serde_json::Value::Array(_) => return Err(QueryError::invalid_shape("array")),
        };

        let fields = map
            .iter()
            .enumerate()
            .map(|(index, (key, value))| {
                let value = (!value.is_null()).then(|| Value::from_json(value));
                FieldDescriptor::optional(key.clone(), index, value)
                    .with_tag(FieldTag::new(DEFAULT_TAG, ColumnMeta::new(key.clone())))
            })
            .collect();
        Ok(fields)
    }
}

/// List a record's fields and check that every present field maps to a
/// column under `tag`.
///
/// An absent record yields no fields. Absent optional fields are kept in the
/// list (marked not present) and need no mapping.
pub fn extract(record: Option<&dyn Record>, tag: &str) -> QueryResult<Vec<FieldDescriptor>> {
    let Some(record) = record else {
        return Ok(Vec::new());
    };

    let fields = record.fields()?;
    for field in fields.iter().filter(|f| f.is_present()) {
        field.column(tag)?;
    }
    Ok(fields)
}
