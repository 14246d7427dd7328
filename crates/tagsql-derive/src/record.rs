//! Record derive macro implementation.

mod attrs;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

use crate::common::syn_types::option_inner;
use attrs::{TagEntry, parse_field_tags};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let descriptors = fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_descriptor(index, field))
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::tagsql::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::tagsql::QueryResult<::std::vec::Vec<::tagsql::FieldDescriptor>> {
                ::std::result::Result::Ok(::std::vec![
                    #(#descriptors),*
                ])
            }
        }
    })
}

fn field_descriptor(index: usize, field: &syn::Field) -> Result<TokenStream> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let field_name = ident.unraw().to_string();
    let tags = parse_field_tags(field)?.into_iter().map(tag_tokens);

    let descriptor = if option_inner(&field.ty).is_some() {
        quote! {
            ::tagsql::FieldDescriptor::optional(
                #field_name,
                #index,
                self.#ident.as_ref().map(::tagsql::ToValue::to_value),
            )
        }
    } else {
        quote! {
            ::tagsql::FieldDescriptor::required(
                #field_name,
                #index,
                ::tagsql::ToValue::to_value(&self.#ident),
            )
        }
    };

    Ok(quote! {
        #descriptor #(.with_tag(#tags))*
    })
}

fn tag_tokens(entry: TagEntry) -> TokenStream {
    let TagEntry { key, column, flags } = entry;
    quote! {
        ::tagsql::FieldTag::new(
            #key,
            ::tagsql::ColumnMeta::new(#column) #(.with_flag(#flags))*,
        )
    }
}
