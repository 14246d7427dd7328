//! Placeholder dialects and the WHERE join keyword.

use crate::error::{QueryError, QueryResult};
use std::fmt;
use std::str::FromStr;

/// Placeholder syntax expected by the executing driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// `?` everywhere; position is resolved by the driver.
    #[default]
    Generic,
    /// `$1, $2, ...` numbered over the whole statement (Postgres).
    Numbered,
}

impl Dialect {
    /// Placeholder token for the parameter at 1-based `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Generic => "?".to_string(),
            Dialect::Numbered => format!("${index}"),
        }
    }

    /// Append the placeholder for `index` to `out` without an intermediate string.
    pub(crate) fn write_placeholder(self, out: &mut String, index: usize) {
        match self {
            Dialect::Generic => out.push('?'),
            Dialect::Numbered => {
                out.push('$');
                out.push_str(&index.to_string());
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Generic => "std",
            Dialect::Numbered => "pgx",
        }
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    /// Accepts `std`/`generic`/`?` and `pgx`/`postgres`/`numbered`/`$`,
    /// ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> QueryResult<Self> {
        let name = s.trim();
        const GENERIC: [&str; 3] = ["std", "generic", "?"];
        const NUMBERED: [&str; 5] = ["pgx", "postgres", "postgresql", "numbered", "$"];
        if GENERIC.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            Ok(Dialect::Generic)
        } else if NUMBERED.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            Ok(Dialect::Numbered)
        } else {
            Err(QueryError::InvalidDialect(s.to_string()))
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword joining the second and later WHERE predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Join {
    #[default]
    And,
    Or,
}

impl Join {
    pub fn as_str(self) -> &'static str {
        match self {
            Join::And => "AND",
            Join::Or => "OR",
        }
    }
}

impl FromStr for Join {
    type Err = QueryError;

    /// Only the exact keywords `AND` and `OR` are accepted.
    fn from_str(s: &str) -> QueryResult<Self> {
        match s {
            "AND" => Ok(Join::And),
            "OR" => Ok(Join::Or),
            other => Err(QueryError::InvalidJoinOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running placeholder counter for one statement.
///
/// The counter spans the whole statement so SET placeholders and WHERE
/// placeholders share one sequence.
#[derive(Debug)]
pub(crate) struct Placeholders {
    dialect: Dialect,
    emitted: usize,
}

impl Placeholders {
    pub(crate) fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            emitted: 0,
        }
    }

    /// Append the next placeholder token to `out`.
    pub(crate) fn push_next(&mut self, out: &mut String) {
        self.emitted += 1;
        self.dialect.write_placeholder(out, self.emitted);
    }
}
