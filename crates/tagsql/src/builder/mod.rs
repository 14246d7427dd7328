//! Statement builder.
//!
//! [`StatementBuilder`] holds the immutable configuration (tag, join keyword,
//! dialect) and turns records into [`Statement`]s. It has no interior state,
//! so one instance can be shared freely across threads.
//!
//! # Example
//!
//! ```ignore
//! use tagsql::{Record, StatementBuilder};
//!
//! #[derive(Record)]
//! struct PersonFilter {
//!     #[tag(json = "first_name,omitempty")]
//!     first_name: String,
//!     #[tag(json = "last_name,omitempty")]
//!     last_name: Option<String>,
//!     #[tag(json = "limit")]
//!     limit: Option<i32>,
//!     #[tag(json = "offset")]
//!     offset: Option<i32>,
//! }
//!
//! let filter = PersonFilter {
//!     first_name: "Oli".into(),
//!     last_name: None,
//!     limit: Some(50),
//!     offset: Some(0),
//! };
//!
//! let stmt = StatementBuilder::postgres().select("SELECT * FROM person", Some(&filter))?;
//! assert_eq!(stmt.sql(), "SELECT * FROM person WHERE first_name = $1 LIMIT 50 OFFSET 0");
//! ```

use crate::clause::{assemble_set, assemble_where};
use crate::dialect::{Dialect, Join, Placeholders};
use crate::error::{QueryError, QueryResult};
use crate::record::{DEFAULT_TAG, Record, extract};
use crate::statement::Statement;


/// Immutable configuration for building statements from records.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct StatementBuilder {
    tag: String,
    join: Join,
    dialect: Dialect,
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl StatementBuilder {
    /// Builder for `dialect` with the `json` tag and `AND` joins.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            join: Join::default(),
            dialect,
        }
    }

    /// `?` placeholders.
    pub fn generic() -> Self {
        Self::new(Dialect::Generic)
    }

    /// `$1, $2, ...` placeholders.
    pub fn postgres() -> Self {
        Self::new(Dialect::Numbered)
    }

    /// Read column names from `tag` instead of `json`. An empty tag means `json`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.is_empty() {
            DEFAULT_TAG.to_string()
        } else {
            tag
        };
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn join(&self) -> Join {
        self.join
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Append a WHERE clause built from `filter` to `query`.
    ///
    /// `query` is used verbatim (e.g. `"SELECT * FROM person"`). Without a
    /// filter, or with a filter that has no present fields, the statement is
    /// just `query`.
    pub fn select(&self, query: &str, filter: Option<&dyn Record>) -> QueryResult<Statement> {
        let fields = extract(filter, &self.tag)?;

        let mut placeholders = Placeholders::new(self.dialect);
        let filter = assemble_where(fields, &self.tag, self.join, &mut placeholders)?;

        let stmt = Statement::compose_select(query, filter);
        trace_built("select", &stmt);
        Ok(stmt)
    }

    /// Build `UPDATE <table> SET ... [WHERE ...]`.
    ///
    /// `set` is required. Without `filter` the statement updates every row
    /// of the table; that is allowed and not guarded against.
    pub fn update(
        &self,
        table: &str,
        set: Option<&dyn Record>,
        filter: Option<&dyn Record>,
    ) -> QueryResult<Statement> {
        let Some(set) = set else {
            return Err(QueryError::NoFieldsToUpdate);
        };
        let set_fields = extract(Some(set), &self.tag)?;
        let filter_fields = extract(filter, &self.tag)?;

        let mut placeholders = Placeholders::new(self.dialect);
        let set = assemble_set(set_fields, &self.tag, &mut placeholders)?;
        let filter = assemble_where(filter_fields, &self.tag, self.join, &mut placeholders)?;

        let stmt = Statement::compose_update(table, set, filter);
        trace_built("update", &stmt);
        Ok(stmt)
    }
}

#[cfg(feature = "tracing")]
fn trace_built(kind: &'static str, stmt: &Statement) {
    tracing::debug!(
        target: "tagsql.build",
        kind,
        param_count = stmt.params().len(),
        sql = %stmt.sql(),
        "built statement"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_built(_kind: &'static str, _stmt: &Statement) {}
