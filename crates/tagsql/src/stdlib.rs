//! Shorthands for `?`-placeholder statements (MySQL, SQLite, `database/sql` style drivers).
//!
//! ```ignore
//! let stmt = tagsql::stdlib::update_and_query(Some(&changes), Some(&by_id), "person", "")?;
//! assert_eq!(stmt.sql(), "UPDATE person SET first_name = ? WHERE person_id = ?");
//! ```

use crate::builder::StatementBuilder;
use crate::dialect::{Dialect, Join};
use crate::error::QueryResult;
use crate::record::Record;
use crate::statement::Statement;

fn builder(tag: &str, join: Join) -> StatementBuilder {
    StatementBuilder::new(Dialect::Generic)
        .with_tag(tag)
        .with_join(join)
}

/// Append a `?` WHERE clause built from `params` to `query`, joined by `AND`.
///
/// An empty `tag` means `json`.
pub fn select_and_query(
    query: &str,
    tag: &str,
    params: Option<&dyn Record>,
) -> QueryResult<Statement> {
    builder(tag, Join::And).select(query, params)
}

/// [`select_and_query`] with predicates joined by `OR`.
pub fn select_or_query(
    query: &str,
    tag: &str,
    params: Option<&dyn Record>,
) -> QueryResult<Statement> {
    builder(tag, Join::Or).select(query, params)
}

/// `UPDATE <table> SET ... [WHERE ...]` with `?` placeholders and `AND` joins.
///
/// An absent `update` record is [`QueryError::NoFieldsToUpdate`](crate::QueryError::NoFieldsToUpdate).
pub fn update_and_query(
    update: Option<&dyn Record>,
    filter: Option<&dyn Record>,
    table: &str,
    tag: &str,
) -> QueryResult<Statement> {
    builder(tag, Join::And).update(table, update, filter)
}
