//! Procedural macros for keylist.
//!
//! This crate provides `#[derive(Members)]`, which implements the
//! `keylist::Members` trait for structs with named fields. Use it through the
//! `keylist` crate (the `derive` feature is on by default).
//!
//! # Attributes
//!
//! ## `#[member]`
//!
//! Field-level options:
//!
//! ```ignore
//! #[derive(Members)]
//! struct Invoice {
//!     #[member(rename = "number")]
//!     id: u64,
//!
//!     #[member(skip)]
//!     attachments: Vec<Vec<u8>>,
//!
//!     // Leading underscore: never exposed.
//!     _cache: Option<String>,
//! }
//! ```
//!
//! - `rename = "name"`: Exposes the field under a different member name
//! - `skip`: Excludes the field from lookup
//!
//! ## `#[members]`
//!
//! Struct-level options:
//!
//! ```ignore
//! fn invoice_comparer(kind: ValueKind) -> Comparator {
//!     match kind {
//!         ValueKind::String => Comparator::case_insensitive(),
//!         _ => Comparator::natural(),
//!     }
//! }
//!
//! #[derive(Members)]
//! #[members(comparer = invoice_comparer)]
//! struct Invoice {
//!     customer: String,
//! }
//! ```
//!
//! - `comparer = path`: A `fn(ValueKind) -> Comparator` used for every member

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, Ident, Lit,
    LitStr, Path,
};

/// Derive the `Members` trait.
///
/// Every named field whose type converts into `keylist::Value` becomes a
/// member, in declaration order. The value is cloned out on each lookup.
///
/// # Example
///
/// ```ignore
/// use keylist::Members;
///
/// #[derive(Members, Clone)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// assert_eq!(Person::member_names(), &["name", "age"]);
/// ```
#[proc_macro_derive(Members, attributes(member, members))]
pub fn derive_members(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_members(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed member information.
struct MemberInfo {
    field_name: Ident,
    member_name: LitStr,
}

/// Parsed struct-level `#[members(...)]` attributes.
struct MembersAttrs {
    comparer: Option<Path>,
}

fn impl_derive_members(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let members_attrs = parse_members_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Members derive only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Members derive only supports structs",
            ))
        }
    };

    let mut members: Vec<MemberInfo> = Vec::new();
    for field in fields.iter() {
        let Some(info) = parse_member_field(field)? else {
            continue;
        };
        if members
            .iter()
            .any(|m| m.member_name.value() == info.member_name.value())
        {
            return Err(syn::Error::new_spanned(
                &info.member_name,
                format!("duplicate member name `{}`", info.member_name.value()),
            ));
        }
        members.push(info);
    }

    let names: Vec<&LitStr> = members.iter().map(|m| &m.member_name).collect();
    let field_names: Vec<&Ident> = members.iter().map(|m| &m.field_name).collect();

    let comparer_fn = members_attrs.comparer.map(|path| {
        quote! {
            fn member_comparer(&self, kind: ::keylist::ValueKind) -> ::keylist::Comparator {
                #path(kind)
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics ::keylist::Members for #struct_name #ty_generics #where_clause {
            fn member_names() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn member_value(&self, name: &str) -> ::keylist::Result<::keylist::Value> {
                match name {
                    #(
                        #names => ::core::result::Result::Ok(::core::convert::Into::<::keylist::Value>::into(
                            ::core::clone::Clone::clone(&self.#field_names),
                        )),
                    )*
                    _ => ::core::result::Result::Err(::keylist::ListError::attribute_not_found(name)),
                }
            }

            #comparer_fn
        }
    };

    Ok(expanded)
}

/// Parse struct-level #[members(...)] attributes.
fn parse_members_attrs(attrs: &[Attribute]) -> syn::Result<MembersAttrs> {
    let mut result = MembersAttrs { comparer: None };

    for attr in attrs {
        if !attr.path().is_ident("members") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("comparer") {
                result.comparer = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported members attribute, expected `comparer`"))
            }
        })?;
    }

    Ok(result)
}

/// Parse a field, honoring #[member(...)].
fn parse_member_field(field: &Field) -> syn::Result<Option<MemberInfo>> {
    let field_name = match &field.ident {
        Some(name) => name.clone(),
        None => return Ok(None),
    };

    let mut rename = None;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("member") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: Expr = meta.value()?.parse()?;
                match value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(lit_str),
                        ..
                    }) => {
                        rename = Some(lit_str);
                        Ok(())
                    }
                    other => Err(syn::Error::new_spanned(
                        other,
                        "expected a string literal: rename = \"name\"",
                    )),
                }
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported member attribute, expected `rename` or `skip`"))
            }
        })?;
    }

    if skip || field_name.to_string().starts_with('_') {
        return Ok(None);
    }

    let member_name =
        rename.unwrap_or_else(|| LitStr::new(&unraw(&field_name), field_name.span()));

    Ok(Some(MemberInfo {
        field_name,
        member_name,
    }))
}

/// Field name without a raw identifier prefix (`r#type` is exposed as `type`).
fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
