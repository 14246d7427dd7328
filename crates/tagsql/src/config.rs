//! String-based builder configuration.
//!
//! [`BuilderConfig`] is the loosely typed form read from a config file or
//! assembled from user input. Empty fields fall back to defaults; everything
//! else is validated once by [`BuilderConfig::build`], so a bad join keyword is
//! rejected before any record is looked at.
//!
//! ```toml
//! tag = "db"
//! dialect = "pgx"
//! join = "OR"
//! ```

use crate::builder::StatementBuilder;
use crate::dialect::{Dialect, Join};
use crate::error::{QueryError, QueryResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Tag holding column names. Defaults to `json`.
    pub tag: String,
    /// `std` (`?`) or `pgx` (`$n`). Defaults to `std`.
    #[serde(alias = "query_type")]
    pub dialect: String,
    /// `AND` or `OR`. Defaults to `AND`.
    #[serde(alias = "where_type")]
    pub join: String,
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = dialect.into();
        self
    }

    pub fn with_join(mut self, join: impl Into<String>) -> Self {
        self.join = join.into();
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> QueryResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QueryError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Validate into an immutable [`StatementBuilder`].
    pub fn build(&self) -> QueryResult<StatementBuilder> {
        let join = if self.join.is_empty() {
            Join::default()
        } else {
            self.join.parse()?
        };
        let dialect = if self.dialect.is_empty() {
            Dialect::default()
        } else {
            self.dialect.parse()?
        };
        Ok(StatementBuilder::new(dialect)
            .with_tag(self.tag.as_str())
            .with_join(join))
    }
}
