//! Derive macros for tagsql
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod record;

/// Derive `Record` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use tagsql::Record;
///
/// #[derive(Record)]
/// struct PersonFilter {
///     #[tag(json = "first_name,omitempty", form = "fname")]
///     first_name: Option<String>,
///     #[tag(json = "person_id")]
///     person_id: i64,
///     #[tag(json = "limit")]
///     limit: Option<i32>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[tag(key = "column[,flag...]")]` - Column name under tag `key`. Any
///   number of keys; each may appear once per field.
///
/// `Option<T>` fields are absent when `None`. Every other field is always
/// present. Field values convert through `tagsql::ToValue`.
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
