//! Field-level `#[tag(...)]` parsing.

use syn::Result;

/// One `key = "column,flag,..."` pair, already split at the commas.
pub(super) struct TagEntry {
    pub key: String,
    pub column: String,
    pub flags: Vec<String>,
}

impl TagEntry {
    fn new(key: String, raw: &str) -> Self {
        let mut segments = raw.split(',');
        let column = segments.next().unwrap_or_default().trim().to_string();
        let flags = segments
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { key, column, flags }
    }
}

/// Collect every `#[tag(...)]` entry on `field`, in source order.
///
/// Several `#[tag]` attributes on one field are merged; a key given twice is
/// an error.
pub(super) fn parse_field_tags(field: &syn::Field) -> Result<Vec<TagEntry>> {
    let mut entries: Vec<TagEntry> = Vec::new();

    for attr in &field.attrs {
        if !attr.path().is_ident("tag") {
            continue;
        }

        let items = attr.parse_args_with(
            syn::punctuated::Punctuated::<syn::MetaNameValue, syn::Token![,]>::parse_terminated,
        )?;

        for nv in items {
            let Some(key) = nv.path.get_ident().map(ToString::to_string) else {
                return Err(syn::Error::new_spanned(
                    &nv.path,
                    "tag keys must be plain identifiers, e.g. #[tag(json = \"...\")]",
                ));
            };
            let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = &nv.value
            else {
                return Err(syn::Error::new_spanned(
                    &nv.value,
                    format!("tag({key} = \"...\") expects a string literal"),
                ));
            };
            if entries.iter().any(|e| e.key == key) {
                return Err(syn::Error::new_spanned(
                    &nv.path,
                    format!("duplicate tag key `{key}` on this field"),
                ));
            }
            entries.push(TagEntry::new(key, &lit.value()));
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field(f: syn::FieldsNamed) -> syn::Field {
        f.named.into_iter().next().unwrap()
    }

    #[test]
    fn splits_column_and_flags() {
        let f = field(parse_quote!({
            #[tag(json = "first_name,omitempty", form = "fname")]
            first_name: String
        }));
        let tags = parse_field_tags(&f).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].key, "json");
        assert_eq!(tags[0].column, "first_name");
        assert_eq!(tags[0].flags, vec!["omitempty".to_string()]);
        assert_eq!(tags[1].key, "form");
        assert_eq!(tags[1].column, "fname");
        assert!(tags[1].flags.is_empty());
    }

    #[test]
    fn merges_repeated_attributes() {
        let f = field(parse_quote!({
            #[tag(json = "id")]
            #[tag(db = "person_id")]
            id: i64
        }));
        let keys: Vec<_> = parse_field_tags(&f)
            .unwrap()
            .into_iter()
            .map(|t| t.key)
            .collect();
        assert_eq!(keys, vec!["json", "db"]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let f = field(parse_quote!({
            #[tag(json = "a")]
            #[tag(json = "b")]
            id: i64
        }));
        assert!(parse_field_tags(&f).is_err());
    }

    #[test]
    fn rejects_non_string_values() {
        let f = field(parse_quote!({
            #[tag(json = 5)]
            id: i64
        }));
        assert!(parse_field_tags(&f).is_err());
    }

    #[test]
    fn untagged_field_has_no_entries() {
        let f = field(parse_quote!({ id: i64 }));
        assert!(parse_field_tags(&f).unwrap().is_empty());
    }
}
