use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote, ToTokens};
use syn::{Attribute, Error, GenericArgument, Ident, LitStr, PathArguments, Type};

/// The path to the `zreflect` crate, `::zreflect` unless overridden.
///
/// # Examples
///
/// ```ignore
/// #[derive(Reflect)]
/// #[zreflect(crate = "crate")]
/// struct MyStruct;
/// ```
pub(crate) fn crate_path(path: Option<&LitStr>) -> Result<TokenStream2, Error> {
    match path {
        Some(lit_str) => {
            let path: syn::Path = lit_str.parse()?;
            Ok(quote! { #path })
        }
        None => Ok(quote! { ::zreflect }),
    }
}

/// The name of the method table of an `impl` block, suffixed with the implemented trait if any.
pub(crate) fn method_table_ident(trait_ident: Option<&Ident>) -> Ident {
    match trait_ident {
        Some(trait_ident) => format_ident!("__ZREFLECT_METHODS_{}", trait_ident),
        None => format_ident!("__ZREFLECT_METHODS"),
    }
}

/// Whether `attr` is a `#[zreflect(...)]` attribute.
pub(crate) fn is_zreflect_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("zreflect")
}

/// Extract doc comments from attributes.
///
/// Each `#[doc = "..."]` attribute becomes a single comment string.
pub(crate) fn extract_doc_comments(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(meta_name_value) => match &meta_name_value.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) => Some(lit_str.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Render a type the way it would be written by hand, without lifetimes.
///
/// `&'a Vec < Option < String > >` becomes `&Vec<Option<String>>`.
pub(crate) fn render_type(ty: &Type) -> String {
    match ty {
        Type::Reference(type_ref) => {
            let mutability = if type_ref.mutability.is_some() { "mut " } else { "" };
            format!("&{mutability}{}", render_type(&type_ref.elem))
        }
        Type::Slice(type_slice) => format!("[{}]", render_type(&type_slice.elem)),
        Type::Array(type_array) => format!(
            "[{}; {}]",
            render_type(&type_array.elem),
            render_tokens(&type_array.len)
        ),
        Type::Tuple(type_tuple) => {
            let elems: Vec<_> = type_tuple.elems.iter().map(render_type).collect();
            match elems.as_slice() {
                [single] => format!("({single},)"),
                _ => format!("({})", elems.join(", ")),
            }
        }
        Type::Paren(type_paren) => format!("({})", render_type(&type_paren.elem)),
        Type::Group(type_group) => render_type(&type_group.elem),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let mut rendered = String::new();
            if type_path.path.leading_colon.is_some() {
                rendered.push_str("::");
            }
            for (i, segment) in type_path.path.segments.iter().enumerate() {
                if i > 0 {
                    rendered.push_str("::");
                }
                rendered.push_str(&segment.ident.to_string());
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    let args: Vec<_> = args
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            GenericArgument::Lifetime(_) => None,
                            GenericArgument::Type(ty) => Some(render_type(ty)),
                            other => Some(render_tokens(other)),
                        })
                        .collect();
                    if !args.is_empty() {
                        rendered.push_str(&format!("<{}>", args.join(", ")));
                    }
                }
            }
            rendered
        }
        other => render_tokens(other),
    }
}

/// Render tokens with whitespace collapsed.
fn render_tokens(tokens: &impl ToTokens) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recursively elides all lifetimes of a type, so it can be named outside of the item that
/// declared them.
pub(crate) fn remove_lifetimes_from_type(ty: &Type) -> Type {
    match ty {
        Type::Reference(type_ref) => Type::Reference(syn::TypeReference {
            and_token: type_ref.and_token,
            lifetime: None,
            mutability: type_ref.mutability,
            elem: Box::new(remove_lifetimes_from_type(&type_ref.elem)),
        }),
        Type::Path(type_path) => {
            let mut new_type_path = type_path.clone();
            if let Some(ref mut qself) = new_type_path.qself {
                qself.ty = Box::new(remove_lifetimes_from_type(&qself.ty));
            }
            for segment in &mut new_type_path.path.segments {
                match &mut segment.arguments {
                    PathArguments::AngleBracketed(args) => {
                        // Lifetime arguments are elided, type arguments processed recursively.
                        let mut new_args = syn::punctuated::Punctuated::new();
                        for arg in args.args.iter() {
                            match arg {
                                GenericArgument::Type(ty) => {
                                    new_args.push(GenericArgument::Type(
                                        remove_lifetimes_from_type(ty),
                                    ));
                                }
                                GenericArgument::Lifetime(lifetime) => {
                                    new_args.push(GenericArgument::Lifetime(syn::Lifetime::new(
                                        "'_",
                                        lifetime.span(),
                                    )));
                                }
                                other => {
                                    new_args.push(other.clone());
                                }
                            }
                        }
                        args.args = new_args;
                    }
                    PathArguments::Parenthesized(args) => {
                        for input in &mut args.inputs {
                            *input = remove_lifetimes_from_type(input);
                        }
                        if let syn::ReturnType::Type(_, ref mut output) = args.output {
                            *output = Box::new(remove_lifetimes_from_type(output));
                        }
                    }
                    PathArguments::None => {}
                }
            }
            Type::Path(new_type_path)
        }
        Type::Tuple(type_tuple) => {
            let mut new_type_tuple = type_tuple.clone();
            for elem in &mut new_type_tuple.elems {
                *elem = remove_lifetimes_from_type(elem);
            }
            Type::Tuple(new_type_tuple)
        }
        Type::Array(type_array) => {
            let mut new_type_array = type_array.clone();
            new_type_array.elem = Box::new(remove_lifetimes_from_type(&type_array.elem));
            Type::Array(new_type_array)
        }
        Type::Slice(type_slice) => {
            let mut new_type_slice = type_slice.clone();
            new_type_slice.elem = Box::new(remove_lifetimes_from_type(&type_slice.elem));
            Type::Slice(new_type_slice)
        }
        Type::Group(type_group) => remove_lifetimes_from_type(&type_group.elem),
        Type::Paren(type_paren) => {
            let mut new_type_paren = type_paren.clone();
            new_type_paren.elem = Box::new(remove_lifetimes_from_type(&type_paren.elem));
            Type::Paren(new_type_paren)
        }
        // Nothing else can appear in a reflected signature.
        _ => ty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(ty: &str) -> String {
        render_type(&syn::parse_str(ty).unwrap())
    }

    #[test]
    fn render_compact_types() {
        assert_eq!(render("String"), "String");
        assert_eq!(render("Vec < Option < String > >"), "Vec<Option<String>>");
        assert_eq!(render("&'a str"), "&str");
        assert_eq!(render("&'static [u8]"), "&[u8]");
        assert_eq!(render("Cow<'a, str>"), "Cow<str>");
        assert_eq!(render("&mut Self"), "&mut Self");
        assert_eq!(render("HashMap<String, Vec<i32>>"), "HashMap<String, Vec<i32>>");
        assert_eq!(
            render("std::collections::BTreeMap<String, u8>"),
            "std::collections::BTreeMap<String, u8>"
        );
        assert_eq!(render("(i32, String)"), "(i32, String)");
        assert_eq!(render("[u8; 4]"), "[u8; 4]");
        assert_eq!(render("(u8,)"), "(u8,)");
    }

    #[test]
    fn lifetimes_are_elided() {
        let ty: Type = syn::parse_str("&'a [Cow<'a, str>]").unwrap();
        let elided = remove_lifetimes_from_type(&ty);
        assert_eq!(
            quote!(#elided).to_string(),
            quote!(&[Cow<'_, str>]).to_string()
        );
    }
}
