//! SET / WHERE clause assembly.
//!
//! Fields are consumed in declaration order. Absent fields contribute
//! nothing. Reserved pseudo-fields (`order_by`, `limit`, `offset`) never become
//! predicates; their values are inlined into trailing clauses instead.

use crate::dialect::{Join, Placeholders};
use crate::error::QueryResult;
use crate::record::{FieldDescriptor, Reserved};
use crate::value::Value;

/// SQL text plus the values bound by its placeholders, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Fragment {
    pub(crate) text: String,
    pub(crate) params: Vec<Value>,
}

/// Values captured from reserved pseudo-fields, already rendered as text.
#[derive(Debug, Default)]
struct Trailing {
    order_by: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
}

impl Trailing {
    fn capture(&mut self, reserved: Reserved, value: &Value) {
        // Only integers and non-empty strings are inlined.
        let text = value.clause_text();
        match reserved {
            Reserved::OrderBy => self.order_by = text,
            Reserved::Limit => self.limit = text,
            Reserved::Offset => self.offset = text,
        }
    }

    fn write_to(&self, out: &mut String) {
        if let Some(order_by) = &self.order_by {
            out.push_str(" ORDER BY ");
            out.push_str(order_by);
        }
        // LIMIT and OFFSET are only emitted as a pair.
        if let (Some(limit), Some(offset)) = (&self.limit, &self.offset) {
            out.push_str(" LIMIT ");
            out.push_str(limit);
            out.push_str(" OFFSET ");
            out.push_str(offset);
        }
    }
}

/// Build `" col_a = $1, col_b = $2"` from the present fields of a SET record.
///
/// No present fields yields an empty fragment.
pub(crate) fn assemble_set(
    fields: Vec<FieldDescriptor>,
    tag: &str,
    placeholders: &mut Placeholders,
) -> QueryResult<Fragment> {
    let mut fragment = Fragment::default();

    for field in fields.into_iter().filter(FieldDescriptor::is_present) {
        if !fragment.params.is_empty() {
            fragment.text.push(',');
        }
        fragment.text.push(' ');
        fragment.text.push_str(field.column(tag)?);
        fragment.text.push_str(" = ");
        placeholders.push_next(&mut fragment.text);
        fragment.params.extend(field.into_value());
    }

    Ok(fragment)
}

/// Build `" WHERE a = $1 AND b = $2 ORDER BY .. LIMIT .. OFFSET .."`.
///
/// Predicates are flat, joined left to right by `join`, never parenthesized.
pub(crate) fn assemble_where(
    fields: Vec<FieldDescriptor>,
    tag: &str,
    join: Join,
    placeholders: &mut Placeholders,
) -> QueryResult<Fragment> {
    let mut fragment = Fragment::default();
    let mut trailing = Trailing::default();

    for field in fields.into_iter().filter(FieldDescriptor::is_present) {
        if let Some(reserved) = field.reserved() {
            if let Some(value) = field.value() {
                trailing.capture(reserved, value);
            }
            continue;
        }

        let column = field.column(tag)?;
        if fragment.params.is_empty() {
            fragment.text.push_str(" WHERE ");
        } else {
            fragment.text.push(' ');
            fragment.text.push_str(join.as_str());
            fragment.text.push(' ');
        }
        fragment.text.push_str(column);
        fragment.text.push_str(" = ");
        placeholders.push_next(&mut fragment.text);
        fragment.params.extend(field.into_value());
    }

    trailing.write_to(&mut fragment.text);
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::record::FieldTag;

    fn field(name: &'static str, index: usize, column: &str, value: Option<Value>) -> FieldDescriptor {
        FieldDescriptor::optional(name, index, value).with_tag(FieldTag::parse("json", column))
    }

    #[test]
    fn set_fragment_is_comma_joined() {
        let mut p = Placeholders::new(Dialect::Numbered);
        let fields = vec![
            field("LastName", 0, "last_name,omitempty", Some(Value::from("BoT"))),
            field("Nick", 1, "nick", None),
            field("FirstName", 2, "first_name", Some(Value::from("Ol1"))),
        ];
        let set = assemble_set(fields, "json", &mut p).unwrap();
        assert_eq!(set.text, " last_name = $1, first_name = $2");
        assert_eq!(set.params, vec![Value::from("BoT"), Value::from("Ol1")]);
    }

    #[test]
    fn trailing_absent_last_field_leaves_no_dangling_comma() {
        let mut p = Placeholders::new(Dialect::Generic);
        let fields = vec![
            field("A", 0, "a", Some(Value::I32(1))),
            field("B", 1, "b", None),
        ];
        let set = assemble_set(fields, "json", &mut p).unwrap();
        assert_eq!(set.text, " a = ?");
    }

    #[test]
    fn empty_set_is_legal() {
        let mut p = Placeholders::new(Dialect::Numbered);
        let set = assemble_set(vec![field("A", 0, "a", None)], "json", &mut p).unwrap();
        assert_eq!(set, Fragment::default());
    }

    #[test]
    fn where_continues_numbering_after_set() {
        let mut p = Placeholders::new(Dialect::Numbered);
        assemble_set(
            vec![field("A", 0, "a", Some(Value::I32(1)))],
            "json",
            &mut p,
        )
        .unwrap();
        let w = assemble_where(
            vec![
                field("B", 0, "b", Some(Value::I32(2))),
                field("C", 1, "c", Some(Value::I32(3))),
            ],
            "json",
            Join::Or,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, " WHERE b = $2 OR c = $3");
        assert_eq!(w.params, vec![Value::I32(2), Value::I32(3)]);
    }

    #[test]
    fn first_predicate_after_absent_and_reserved_fields_gets_where() {
        let mut p = Placeholders::new(Dialect::Numbered);
        let w = assemble_where(
            vec![
                field("Limit", 0, "limit", Some(Value::I32(10))),
                field("LastName", 1, "last_name", None),
                field("FirstName", 2, "first_name", Some(Value::from("Oli"))),
            ],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, " WHERE first_name = $1");
    }

    #[test]
    fn lone_limit_or_offset_is_dropped() {
        let mut p = Placeholders::new(Dialect::Generic);
        let w = assemble_where(
            vec![field("Limit", 0, "limit", Some(Value::I32(10)))],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, "");

        let w = assemble_where(
            vec![field("Offset", 0, "offset", Some(Value::I32(10)))],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, "");
        assert!(w.params.is_empty());
    }

    #[test]
    fn order_by_precedes_limit_offset_regardless_of_declaration_order() {
        let mut p = Placeholders::new(Dialect::Generic);
        let w = assemble_where(
            vec![
                field("Offset", 0, "offset", Some(Value::I64(20))),
                field("Limit", 1, "limit", Some(Value::I64(10))),
                field("OrderBy", 2, "order_by", Some(Value::from("id DESC"))),
            ],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, " ORDER BY id DESC LIMIT 10 OFFSET 20");
        assert!(w.params.is_empty());
    }

    #[test]
    fn empty_order_by_adds_nothing() {
        let mut p = Placeholders::new(Dialect::Generic);
        let w = assemble_where(
            vec![field("OrderBy", 0, "order_by", Some(Value::from("")))],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, "");
    }

    #[test]
    fn non_scalar_trailing_values_are_not_inlined() {
        let mut p = Placeholders::new(Dialect::Generic);
        let w = assemble_where(
            vec![
                field("Limit", 0, "limit", Some(Value::Json(serde_json::json!([1])))),
                field("Offset", 1, "offset", Some(Value::F64(2.5))),
                field("OrderBy", 2, "order_by", Some(Value::Bool(true))),
            ],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, "");

        let w = assemble_where(
            vec![
                field("Limit", 0, "limit", Some(Value::I16(5))),
                field("Offset", 1, "offset", Some(Value::from("15"))),
            ],
            "json",
            Join::And,
            &mut p,
        )
        .unwrap();
        assert_eq!(w.text, " LIMIT 5 OFFSET 15");
    }

    #[test]
    fn first_predicate_mapping_is_validated() {
        let mut p = Placeholders::new(Dialect::Generic);
        let untagged = FieldDescriptor::required("PersonId", 0, Value::I32(1));
        let err = assemble_where(vec![untagged], "json", Join::And, &mut p).unwrap_err();
        assert!(err.is_missing_column());
    }
}
