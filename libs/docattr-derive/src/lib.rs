use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input};

/// Derive macro for document field tables.
///
/// Generates three impls on the annotated struct:
///
/// - `docattr::Document`: static field-to-key table, `to_attribute_map()`
///   and `assign_fields()`.
/// - `docattr::ToAttributeValue`: the struct as a wire `M`.
/// - `docattr::Assign`: the struct as a nested field of another document.
///
/// Field attributes:
///
/// - `#[document(column = "...")]`: explicit wire key, highest priority.
/// - `#[document(rename = "...")]`: secondary wire key, used when `column`
///   is absent.
/// - `#[document(skip)]`: field is neither encoded nor assigned.
/// - `#[document(scan)]`: decode through the field type's `Scan` impl
///   instead of `Assign`.
///
/// Fields without `column` or `rename` use the snake-case field name.
///
/// # Example
///
/// ```ignore
/// #[derive(Document, Default)]
/// pub struct Order {
///     #[document(column = "order_id")]
///     pub id: String,
///     pub line_items: docattr::TypedList<LineItem>,
///     pub shipped: Option<bool>,
/// }
/// ```
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

/// Parsed `#[document(...)]` options of one field.
#[derive(Default)]
struct FieldOpts {
    column: Option<String>,
    rename: Option<String>,
    skip: bool,
    scan: bool,
}

fn field_opts(field: &Field) -> Result<FieldOpts, syn::Error> {
    let mut opts = FieldOpts::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let value: LitStr = meta.value()?.parse()?;
                opts.column = Some(value.value());
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                opts.rename = Some(value.value());
            } else if meta.path.is_ident("skip") {
                opts.skip = true;
            } else if meta.path.is_ident("scan") {
                opts.scan = true;
            } else {
                return Err(meta.error(
                    "unknown document attribute (expected column, rename, skip or scan)",
                ));
            }
            Ok(())
        })?;
    }
    Ok(opts)
}

fn candidate(name: &Option<String>) -> proc_macro2::TokenStream {
    match name {
        Some(n) => quote! { ::core::option::Option::Some(#n) },
        None => quote! { ::core::option::Option::None },
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Document only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Document only supports structs",
            ))
        }
    };

    let mut name_tokens = Vec::new();
    let mut encode_tokens = Vec::new();
    let mut assign_tokens = Vec::new();

    for field in fields {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let opts = field_opts(field)?;
        if opts.skip {
            continue;
        }
        if opts.column.as_deref() == Some("") || opts.rename.as_deref() == Some("") {
            return Err(syn::Error::new_spanned(field_name, "wire key must not be empty"));
        }

        // Raw identifiers (`r#type`) resolve against their bare name.
        let ident_str = field_name.to_string().trim_start_matches("r#").to_string();
        let column = candidate(&opts.column);
        let rename = candidate(&opts.rename);
        let key_expr = quote! {
            ::docattr::naming::resolve_field_name(&[#column, #rename], #ident_str)
        };

        name_tokens.push(key_expr.clone());

        encode_tokens.push(quote! {
            __map.insert(
                (#key_expr).into_owned(),
                ::docattr::ToAttributeValue::to_attribute_value(&self.#field_name)
                    .map_err(|e| e.in_field(#ident_str))?,
            );
        });

        let assign_expr = if opts.scan {
            quote! { ::docattr::Scan::scan(&mut self.#field_name, __value) }
        } else {
            quote! { ::docattr::Assign::assign(&mut self.#field_name, __value, __options) }
        };
        assign_tokens.push(quote! {
            let __key = #key_expr;
            if let ::core::option::Option::Some(__value) = __fields.remove(&*__key) {
                #assign_expr.map_err(|e| e.in_field(#ident_str))?;
            }
        });
    }

    let expanded = quote! {
        impl #impl_generics ::docattr::Document for #name #ty_generics #where_clause {
            fn field_names() -> ::std::vec::Vec<::std::borrow::Cow<'static, str>> {
                ::std::vec![
                    #(#name_tokens),*
                ]
            }

            #[allow(unused_mut)]
            fn to_attribute_map(
                &self,
            ) -> ::docattr::Result<
                ::std::collections::BTreeMap<::std::string::String, ::docattr::AttributeValue>,
            > {
                let mut __map = ::std::collections::BTreeMap::new();
                #(#encode_tokens)*
                ::core::result::Result::Ok(__map)
            }

            #[allow(unused_mut, unused_variables)]
            fn assign_fields(
                &mut self,
                mut __fields: ::docattr::Object,
                __options: &::docattr::Options,
            ) -> ::docattr::Result<()> {
                #(#assign_tokens)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::docattr::ToAttributeValue for #name #ty_generics #where_clause {
            fn to_attribute_value(&self) -> ::docattr::Result<::docattr::AttributeValue> {
                ::core::result::Result::Ok(::docattr::AttributeValue::M(
                    ::docattr::Document::to_attribute_map(self)?,
                ))
            }
        }

        impl #impl_generics ::docattr::Assign for #name #ty_generics #where_clause {
            fn assign(
                &mut self,
                value: ::docattr::Value,
                options: &::docattr::Options,
            ) -> ::docattr::Result<()> {
                ::docattr::assign_document(self, value, options)
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
