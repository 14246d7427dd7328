//! # tagsql
//!
//! Build parameterized `SELECT ... WHERE` and `UPDATE ... SET ... WHERE`
//! statements from plain structs whose fields carry column-name tags.
//!
//! ## Features
//!
//! - **Tag-driven columns**: each field names its column through a tag
//!   (`json` by default), e.g. `#[tag(json = "first_name,omitempty")]`
//! - **Optional fields**: `Option<T>` fields set to `None` are left out of every clause
//! - **Declaration order**: predicates and parameters follow field order, always
//! - **Two placeholder dialects**: `?` and Postgres-style `$1, $2, ...`
//! - **Pagination pseudo-fields**: fields named `order_by`, `limit`, `offset`
//!   become trailing `ORDER BY` / `LIMIT .. OFFSET ..` text instead of predicates
//! - **No execution**: you get SQL text plus ordered bind values; running them is up to you
//!
//! ## Example
//!
//! ```ignore
//! use tagsql::{Record, StatementBuilder};
//!
//! #[derive(Record)]
//! struct UpdatePerson {
//!     #[tag(json = "first_name")]
//!     first_name: String,
//!     #[tag(json = "last_name")]
//!     last_name: Option<String>,
//! }
//!
//! #[derive(Record)]
//! struct ById {
//!     #[tag(json = "person_id")]
//!     person_id: i64,
//! }
//!
//! let set = UpdatePerson { first_name: "Ol1".into(), last_name: Some("BoT".into()) };
//! let stmt = StatementBuilder::postgres()
//!     .update("public.person", Some(&set), Some(&ById { person_id: 1 }))?;
//!
//! assert_eq!(
//!     stmt.sql(),
//!     "UPDATE public.person SET first_name = $1, last_name = $2 WHERE person_id = $3"
//! );
//! client.execute(stmt.sql(), &stmt.params_ref()).await?;
//! ```

// Lets `#[derive(Record)]` output (which names `::tagsql`) resolve inside this crate.
extern crate self as tagsql;

pub mod builder;
mod clause;
pub mod config;
pub mod dialect;
pub mod error;
pub mod postgres;
pub mod prelude;
pub mod record;
pub mod statement;
pub mod stdlib;
pub mod value;

pub use builder::StatementBuilder;
pub use config::BuilderConfig;
pub use dialect::{Dialect, Join};
pub use error::{QueryError, QueryResult};
pub use record::{ColumnMeta, DEFAULT_TAG, FieldDescriptor, FieldTag, Record, Reserved, extract};
pub use statement::Statement;
pub use value::{ToValue, Value};

#[cfg(feature = "derive")]
pub use tagsql_derive::Record;
