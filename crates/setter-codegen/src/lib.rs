// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr, Visibility};

/// A visible (`pub`) field collected for code generation
struct FieldInfo {
    name: syn::Ident,
    ty: syn::Type,
    /// Index among visible fields only
    index: usize,
    /// Declaration position among all fields
    position: usize,
    tags: Vec<(String, String)>,
}

/// `#[derive(Settable)]` macro: generates `Settable` + `Struct` impls
///
/// Only `pub` fields are visible to the engine. Every other field is left out
/// of the descriptor and of traversal; its zero value is `Default::default()`.
///
/// Field annotations use `#[tag(key = "value", ...)]`.
///
/// # Panics
///
/// Never panics; malformed input is reported as a spanned compile error.
///
/// Example:
/// ```ignore
/// use setter::Settable;
///
/// #[derive(Clone, Default, Settable)]
/// pub struct Account {
///     #[tag(db = "account_id", json = "id")]
///     pub id: u64,
///     pub owner: String,
///     pub balance: Option<f64>,
///     audit: Vec<String>, // hidden
/// }
/// ```
#[proc_macro_derive(Settable, attributes(tag))]
pub fn derive_settable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return syn::Error::new_spanned(&input, "Only named fields are supported")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Only structs are supported")
                .to_compile_error()
                .into()
        }
    };

    let mut visible = Vec::new();
    let mut hidden = Vec::new();
    let mut hidden_types = Vec::new();

    for (position, field) in fields.iter().enumerate() {
        let Some(field_name) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Field must have a name")
                .to_compile_error()
                .into();
        };

        let tags = match parse_tags(&field.attrs) {
            Ok(tags) => tags,
            Err(err) => return err.to_compile_error().into(),
        };

        if matches!(field.vis, Visibility::Public(_)) {
            visible.push(FieldInfo {
                name: field_name.clone(),
                ty: field.ty.clone(),
                index: visible.len(),
                position,
                tags,
            });
        } else {
            hidden.push(field_name.clone());
            hidden_types.push(field.ty.clone());
        }
    }

    // FieldInfo entries for the shape
    let field_infos: Vec<_> = visible
        .iter()
        .map(|f| {
            let name_str = f.name.unraw().to_string();
            let ty = &f.ty;
            let index = f.index;
            let position = f.position;
            let tag_keys = f.tags.iter().map(|(k, _)| k);
            let tag_values = f.tags.iter().map(|(_, v)| v);

            quote! {
                ::setter::FieldInfo::new(
                    #name_str,
                    ::setter::TypeKey::of::<#ty>(),
                    #index,
                    #position,
                )
                .with_tags(::setter::Tags::new(&[#((#tag_keys, #tag_values)),*]))
            }
        })
        .collect();

    // Type parameters must be settable; hidden fields of generic structs need a zero
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause
                .predicates
                .push(syn::parse_quote!(#param: ::setter::Settable));
        }
        for ty in &hidden_types {
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: ::core::default::Default));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let visible_names: Vec<_> = visible.iter().map(|f| &f.name).collect();
    let visible_types: Vec<_> = visible.iter().map(|f| &f.ty).collect();
    let visible_indexes: Vec<_> = visible.iter().map(|f| f.index).collect();
    let field_count = visible.len();

    let expanded = quote! {
        impl #impl_generics ::setter::Settable for #name #ty_generics #where_clause {
            fn shape() -> ::setter::Shape {
                ::setter::Shape::Struct {
                    fields: ::std::vec![#(#field_infos),*],
                }
            }

            fn zero() -> Self {
                Self {
                    #(#visible_names: <#visible_types as ::setter::Settable>::zero(),)*
                    #(#hidden: ::core::default::Default::default(),)*
                }
            }

            fn view(&self) -> ::setter::ReflectRef<'_> {
                ::setter::ReflectRef::Struct(self)
            }

            fn view_mut(&mut self) -> ::setter::ReflectMut<'_> {
                ::setter::ReflectMut::Struct(self)
            }
        }

        impl #impl_generics ::setter::Struct for #name #ty_generics #where_clause {
            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::setter::Reflect> {
                match index {
                    #(#visible_indexes => ::core::option::Option::Some(
                        &self.#visible_names as &dyn ::setter::Reflect
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::setter::Reflect> {
                match index {
                    #(#visible_indexes => ::core::option::Option::Some(
                        &mut self.#visible_names as &mut dyn ::setter::Reflect
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<&mut dyn ::setter::Reflect> {
                ::std::vec![#(&mut self.#visible_names as &mut dyn ::setter::Reflect),*]
            }

            fn field_count(&self) -> usize {
                #field_count
            }
        }
    };

    TokenStream::from(expanded)
}

/// Collect `#[tag(key = "value")]` pairs in declaration order
fn parse_tags(attrs: &[Attribute]) -> syn::Result<Vec<(String, String)>> {
    let mut tags = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            let key = meta.path.require_ident()?.unraw().to_string();
            let value: LitStr = meta.value()?.parse()?;
            tags.push((key, value.value()));
            Ok(())
        })?;
    }
    Ok(tags)
}
