//! Built statements.

use crate::clause::Fragment;
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use tokio_postgres::types::ToSql;

/// A parameterized SQL statement.
///
/// The Nth placeholder in [`sql`](Statement::sql) binds `params()[N]`.
/// Executing it is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
}

impl Statement {
    pub(crate) fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// `query_prefix` followed by the WHERE fragment.
    ///
    /// The prefix is opaque; it is neither parsed nor validated.
    pub(crate) fn compose_select(query_prefix: &str, filter: Fragment) -> Self {
        let mut sql = String::with_capacity(query_prefix.len() + filter.text.len());
        sql.push_str(query_prefix);
        sql.push_str(&filter.text);
        Self::new(sql, filter.params)
    }

    /// `UPDATE <table> SET` followed by the SET and WHERE fragments.
    ///
    /// An empty WHERE fragment leaves the update unfiltered.
    pub(crate) fn compose_update(table: &str, set: Fragment, filter: Fragment) -> Self {
        let mut sql = String::with_capacity(11 + table.len() + set.text.len() + filter.text.len());
        sql.push_str("UPDATE ");
        sql.push_str(table);
        sql.push_str(" SET");
        sql.push_str(&set.text);
        sql.push_str(&filter.text);

        let mut params = set.params;
        params.extend(filter.params);
        Self::new(sql, params)
    }

    /// SQL text with placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
