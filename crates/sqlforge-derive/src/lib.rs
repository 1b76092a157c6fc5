//! Derive macro mapping structs onto table rows.
//!
//! This crate provides `#[derive(Model)]`, which implements
//! `sqlforge_core::model::Model` for a struct with named fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta, Type};

/// Derives the `Model` trait for a struct.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name (optional,
///   defaults to snake_case of struct name)
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to field name)
///
/// Every field type must implement both `FromSqlValue` and `ToSqlValue`
/// plus `Clone`. `Option<T>` fields decode SQL NULL and absent columns as
/// `None`.
#[proc_macro_derive(Model, attributes(table, column))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_model_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_model_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Model derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Model derive only supports structs",
            ));
        }
    };

    let mut columns: Vec<ColumnInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let column_name = parse_column_name(&field.attrs)?;
        columns.push(ColumnInfo {
            field_name: field_name.clone(),
            field_type: field.ty.clone(),
            column_name: column_name.unwrap_or_else(|| field_name.to_string()),
        });
    }

    let column_names: Vec<&str> = columns.iter().map(|c| c.column_name.as_str()).collect();

    let decoded_fields: Vec<TokenStream2> = columns
        .iter()
        .map(|info| {
            let field_name = &info.field_name;
            let field_type = &info.field_type;
            let column_name = &info.column_name;
            quote! {
                #field_name: decoder.get::<#field_type>(#column_name)?
            }
        })
        .collect();

    let field_values: Vec<TokenStream2> = columns
        .iter()
        .map(|info| {
            let field_name = &info.field_name;
            quote! {
                ::sqlforge_core::value::ToSqlValue::to_sql_value(
                    ::core::clone::Clone::clone(&self.#field_name)
                )
            }
        })
        .collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::sqlforge_core::model::Model for #struct_name #ty_generics #where_clause {
            const TABLE: &'static str = #table_name;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];

            fn decode(
                decoder: &::sqlforge_core::row::RowDecoder<'_>,
            ) -> ::core::result::Result<Self, ::sqlforge_core::error::DecodeError> {
                ::core::result::Result::Ok(Self {
                    #(#decoded_fields),*
                })
            }

            fn values(&self) -> ::std::vec::Vec<::sqlforge_core::value::SqlValue> {
                ::std::vec![#(#field_values),*]
            }
        }
    };

    Ok(expanded)
}

struct ColumnInfo {
    field_name: Ident,
    field_type: Type,
    column_name: String,
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("table") {
            let mut table_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    table_name = Some(string_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported table attribute"))
                }
            })?;
            if let Some(name) = table_name {
                return Ok(name);
            }
        }
    }
    Ok(to_snake_case(&struct_name.to_string()))
}

fn parse_column_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs {
        if attr.path().is_ident("column") {
            // #[column] alone changes nothing
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    name = Some(string_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported column attribute"))
                }
            })?;
        }
    }
    Ok(name)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
