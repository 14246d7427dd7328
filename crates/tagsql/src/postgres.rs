//! Shorthands for Postgres (`$n`) SELECT filters.
//!
//! ```ignore
//! let stmt = tagsql::postgres::construct_and_query("SELECT * FROM persons", "json", Some(&filter))?;
//! let rows = client.query(stmt.sql(), &stmt.params_ref()).await?;
//! ```

use crate::builder::StatementBuilder;
use crate::dialect::{Dialect, Join};
use crate::error::QueryResult;
use crate::record::Record;
use crate::statement::Statement;

/// Append a `$n`-numbered WHERE clause built from `params` to `query`.
///
/// An empty `tag` means `json`.
pub fn construct_query(
    query: &str,
    tag: &str,
    join: Join,
    params: Option<&dyn Record>,
) -> QueryResult<Statement> {
    StatementBuilder::new(Dialect::Numbered)
        .with_tag(tag)
        .with_join(join)
        .select(query, params)
}

/// [`construct_query`] with predicates joined by `AND`.
pub fn construct_and_query(
    query: &str,
    tag: &str,
    params: Option<&dyn Record>,
) -> QueryResult<Statement> {
    construct_query(query, tag, Join::And, params)
}

/// [`construct_query`] with predicates joined by `OR`.
pub fn construct_or_query(
    query: &str,
    tag: &str,
    params: Option<&dyn Record>,
) -> QueryResult<Statement> {
    construct_query(query, tag, Join::Or, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn and_query_numbers_placeholders() {
        let params = json!({
            "limit": 50,
            "offset": 1,
            "last_name": "BoT",
            "first_name": "Oli",
        });

        let stmt = construct_and_query("SELECT * FROM PERSONS", "", Some(&params)).unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM PERSONS WHERE last_name = $1 AND first_name = $2 LIMIT 50 OFFSET 1"
        );
        assert_eq!(stmt.params(), &[Value::from("BoT"), Value::from("Oli")]);
    }

    #[test]
    fn or_query_uses_or() {
        let params = json!({ "a": 1, "b": 2 });
        let stmt = construct_or_query("SELECT * FROM t", "json", Some(&params)).unwrap();
        assert_eq!(stmt.sql(), "SELECT * FROM t WHERE a = $1 OR b = $2");
    }
}
