//! Convenient imports for typical `tagsql` usage.
//!
//! ```ignore
//! use tagsql::prelude::*;
//! ```

pub use crate::{
    BuilderConfig, Dialect, Join, QueryError, QueryResult, Record, Statement, StatementBuilder,
    ToValue, Value,
};
