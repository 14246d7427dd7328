//! Bind values carried by a [`Statement`](crate::Statement).
//!
//! [`Value`] is the opaque parameter type: the builder never inspects or
//! coerces it, it only passes values through in placeholder order. It
//! implements `ToSql` so the parameter list can be handed to `tokio-postgres`
//! as is.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A bindable SQL parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Uuid(uuid::Uuid),
    /// `timestamptz`
    TimestampTz(DateTime<Utc>),
    /// `timestamp`
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer payload widened to `i64`, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as literal clause text (ORDER BY / LIMIT / OFFSET).
    ///
    /// Integers render in decimal and strings verbatim. Empty strings and every
    /// other variant have no clause text.
    pub fn clause_text(&self) -> Option<String> {
        match self {
            Value::I16(_) | Value::I32(_) | Value::I64(_) => self.as_i64().map(|n| n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Convert a JSON scalar into the closest bind value.
    ///
    /// Arrays and objects stay JSON.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::I64(i),
                (None, Some(f)) => Value::F64(f),
                (None, None) => Value::Json(json.clone()),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            other => Value::Json(other.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Bytes(v) => {
                f.write_str("\\x")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Value::Json(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::TimestampTz(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
        }
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        // Each variant defers to its own checked encoder so a mismatched
        // column type is still reported by the driver.
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql_checked(ty, out),
            Value::I16(v) => v.to_sql_checked(ty, out),
            Value::I32(v) => v.to_sql_checked(ty, out),
            Value::I64(v) => v.to_sql_checked(ty, out),
            Value::F32(v) => v.to_sql_checked(ty, out),
            Value::F64(v) => v.to_sql_checked(ty, out),
            Value::String(v) => v.to_sql_checked(ty, out),
            Value::Bytes(v) => v.to_sql_checked(ty, out),
            Value::Json(v) => v.to_sql_checked(ty, out),
            Value::Uuid(v) => v.to_sql_checked(ty, out),
            Value::TimestampTz(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => v.to_sql_checked(ty, out),
            Value::Date(v) => v.to_sql_checked(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

/// Conversion from a record field into a [`Value`].
///
/// `#[derive(Record)]` calls this on every present field, so a field type
/// must implement it to be usable in a record.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_value_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }
            }

            impl From<$ty> for Value {
                fn from(val: $ty) -> Self {
                    Value::$variant(val.into())
                }
            }
        )*
    };
}

impl_value_conversions! {
    bool => Bool,
    i8 => I16,
    u8 => I16,
    i16 => I16,
    u16 => I32,
    i32 => I32,
    u32 => I64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    uuid::Uuid => Uuid,
    DateTime<Utc> => TimestampTz,
    NaiveDateTime => Timestamp,
    NaiveDate => Date,
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::Json(self.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

/// An inner `None` (e.g. `Option<Option<T>>`) binds as NULL.
impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(val: Vec<u8>) -> Self {
        Value::Bytes(val)
    }
}

impl From<serde_json::Value> for Value {
    fn from(val: serde_json::Value) -> Self {
        Value::Json(val)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(Value::from(42i32), Value::I32(42));
        assert_eq!(Value::from(7u16), Value::I32(7));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Some(3i64).to_value(), Value::I64(3));
        assert_eq!("x".to_value(), Value::String("x".to_string()));
    }

    #[test]
    fn clause_text_renders_integers_and_strings() {
        assert_eq!(Value::I32(50).clause_text().as_deref(), Some("50"));
        assert_eq!(Value::I64(-1).clause_text().as_deref(), Some("-1"));
        assert_eq!(
            Value::String("last_name DESC".to_string())
                .clause_text()
                .as_deref(),
            Some("last_name DESC")
        );
    }

    #[test]
    fn other_values_have_no_clause_text() {
        assert_eq!(Value::from("").clause_text(), None);
        assert_eq!(Value::Bool(false).clause_text(), None);
        assert_eq!(Value::F64(2.5).clause_text(), None);
        assert_eq!(Value::Json(serde_json::json!([1])).clause_text(), None);
        assert_eq!(Value::Null.clause_text(), None);
    }

    #[test]
    fn json_scalars_map_to_native_values() {
        assert_eq!(Value::from_json(&serde_json::json!(1)), Value::I64(1));
        assert_eq!(Value::from_json(&serde_json::json!(1.5)), Value::F64(1.5));
        assert_eq!(
            Value::from_json(&serde_json::json!("a")),
            Value::String("a".to_string())
        );
        assert_eq!(
            Value::from_json(&serde_json::json!([1, 2])),
            Value::Json(serde_json::json!([1, 2]))
        );
    }

    #[test]
    fn bytes_display_as_hex() {
        assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_string(), "\\xdead");
    }

    #[test]
    fn serializes_untagged() {
        let v = serde_json::to_value([Value::from("Oli"), Value::from(1i32), Value::Null]).unwrap();
        assert_eq!(v, serde_json::json!(["Oli", 1, null]));
    }
}
