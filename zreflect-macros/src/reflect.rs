use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ext::IdentExt, Data, DeriveInput, Error, Field, Fields, LitStr, Visibility};

use crate::utils;

/// Main entry point for the Reflect derive macro.
pub(crate) fn derive_reflect(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_reflect_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_reflect_impl(input: DeriveInput) -> Result<TokenStream2, Error> {
    let name = &input.ident;
    let attrs = ContainerAttrs::parse(&input.attrs)?;
    let crate_path = utils::crate_path(attrs.crate_path.as_ref())?;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Reflect derive macro does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(fields) => {
                return Err(Error::new_spanned(
                    fields,
                    "Reflect derive macro only supports structs with named fields",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                &input,
                "Reflect derive macro only supports structs, not enums",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                &input,
                "Reflect derive macro only supports structs, not unions",
            ));
        }
    };

    let mut field_infos = Vec::new();
    let mut field_idents = Vec::new();
    for field in fields {
        let field_attrs = FieldAttrs::parse(field)?;
        if field_attrs.skip {
            continue;
        }
        field_infos.push(generate_field_info(field, &field_attrs, &crate_path));
        field_idents.push(&field.ident);
    }
    let field_count = field_infos.len();
    let indices: Vec<_> = (0..field_count)
        .map(proc_macro2::Literal::usize_unsuffixed)
        .collect();

    let record_name = attrs.rename.unwrap_or_else(|| name.to_string());
    let module_path = match attrs.module {
        Some(module) => quote! { #module },
        None => quote! { ::core::module_path!() },
    };
    let methods = (!attrs.methods.is_empty()).then(|| {
        let tables = attrs
            .methods
            .iter()
            .map(|trait_ident| utils::method_table_ident(trait_ident.as_ref()));
        quote! {
            fn methods(&self) -> &'static [&'static [#crate_path::MethodInfo]] {
                const TABLES: &'static [&'static [#crate_path::MethodInfo]] =
                    &[#(#name::#tables),*];

                TABLES
            }
        }
    });

    Ok(quote! {
        impl #crate_path::Reflect for #name {
            fn kind(&self) -> #crate_path::Kind {
                #crate_path::Kind::Record
            }

            fn clone_value(&self) -> #crate_path::Value {
                #crate_path::Value::new(::core::clone::Clone::clone(self))
            }

            fn assign(
                &mut self,
                value: #crate_path::Value,
            ) -> ::core::result::Result<(), #crate_path::Value> {
                *self = value.downcast::<Self>()?;
                ::core::result::Result::Ok(())
            }

            fn to_json(&self) -> #crate_path::__private::serde_json::Value {
                #crate_path::record_to_json(self)
            }

            fn debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #crate_path::record_debug(self, f)
            }

            fn as_record(&self) -> ::core::option::Option<&dyn #crate_path::Record> {
                ::core::option::Option::Some(self)
            }

            fn as_record_mut(&mut self) -> ::core::option::Option<&mut dyn #crate_path::Record> {
                ::core::option::Option::Some(self)
            }
        }

        impl #crate_path::Typed for #name {
            const KIND: #crate_path::Kind = #crate_path::Kind::Record;
        }

        impl #crate_path::Record for #name {
            fn record_info(&self) -> &'static #crate_path::RecordInfo {
                static FIELDS: [#crate_path::FieldInfo; #field_count] = [#(#field_infos),*];
                static RECORD: #crate_path::RecordInfo =
                    #crate_path::RecordInfo::new(#record_name, #module_path, &FIELDS);

                &RECORD
            }

            fn field(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn #crate_path::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#field_idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn #crate_path::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#field_idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            #methods
        }
    })
}

/// Generate the `FieldInfo` expression of one field.
fn generate_field_info(
    field: &Field,
    attrs: &FieldAttrs,
    crate_path: &TokenStream2,
) -> TokenStream2 {
    let name = attrs.rename.clone().unwrap_or_else(|| {
        field
            .ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default()
    });
    let ty = &field.ty;
    let type_name = utils::render_type(ty);

    let exported = matches!(field.vis, Visibility::Public(_)).then(|| quote! { .exported() });
    let embedded = attrs.embed.then(|| quote! { .embedded() });
    let tags = (!attrs.tags.is_empty()).then(|| {
        let (keys, values): (Vec<_>, Vec<_>) = attrs.tags.iter().cloned().unzip();
        quote! { .with_tags(#crate_path::Tags::new(&[#((#keys, #values)),*])) }
    });
    let docs = utils::extract_doc_comments(&field.attrs);
    let docs = (!docs.is_empty()).then(|| quote! { .with_docs(&[#(#docs),*]) });

    quote! {
        #crate_path::FieldInfo::new(
            #name,
            #type_name,
            <#ty as #crate_path::Typed>::KIND,
        )
        #exported
        #embedded
        #tags
        #docs
    }
}

/// Attributes on the struct itself.
#[derive(Default)]
struct ContainerAttrs {
    crate_path: Option<LitStr>,
    /// The registered `impl` blocks: `None` for the inherent one, else the trait name.
    methods: Vec<Option<syn::Ident>>,
    module: Option<String>,
    rename: Option<String>,
}

impl ContainerAttrs {
    fn parse(attrs: &[syn::Attribute]) -> Result<Self, Error> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| utils::is_zreflect_attr(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    parsed.crate_path = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("methods") {
                    if !meta.input.peek(syn::token::Paren) {
                        parsed.methods.push(None);
                        return Ok(());
                    }
                    meta.parse_nested_meta(|block| {
                        if block.path.is_ident("Self") {
                            parsed.methods.push(None);
                        } else {
                            let segment = block
                                .path
                                .segments
                                .last()
                                .ok_or_else(|| block.error("expected `Self` or a trait name"))?;
                            parsed.methods.push(Some(segment.ident.unraw()));
                        }
                        Ok(())
                    })?;
                } else if meta.path.is_ident("module") {
                    let module: LitStr = meta.value()?.parse()?;
                    parsed.module = Some(module.value());
                } else if meta.path.is_ident("rename") {
                    let rename: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(rename.value());
                } else {
                    return Err(meta.error("unsupported zreflect attribute on a struct"));
                }
                Ok(())
            })?;
        }

        Ok(parsed)
    }
}

/// Attributes on a field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    embed: bool,
    skip: bool,
    tags: Vec<(String, String)>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> Result<Self, Error> {
        let mut parsed = Self::default();
        for attr in field.attrs.iter().filter(|attr| utils::is_zreflect_attr(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let rename: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(rename.value());
                } else if meta.path.is_ident("embed") {
                    parsed.embed = true;
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else if meta.path.is_ident("tag") {
                    meta.parse_nested_meta(|tag| {
                        let key = tag
                            .path
                            .get_ident()
                            .ok_or_else(|| tag.error("tag keys must be identifiers"))?
                            .unraw()
                            .to_string();
                        let value: LitStr = tag.value()?.parse()?;
                        parsed.tags.push((key, value.value()));
                        Ok(())
                    })?;
                } else {
                    return Err(meta.error("unsupported zreflect attribute on a field"));
                }
                Ok(())
            })?;
        }

        Ok(parsed)
    }
}
