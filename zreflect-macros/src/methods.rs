use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    ext::IdentExt, parse::Parser, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat, ReturnType,
    Type, Visibility,
};

use crate::utils;

/// Main entry point for the methods attribute macro.
pub(crate) fn methods(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let mut crate_path = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("crate") {
            crate_path = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported zreflect::methods argument"))
        }
    });
    if let Err(err) = parser.parse(attr) {
        return err.to_compile_error().into();
    }
    let input = syn::parse_macro_input!(input as ItemImpl);

    match methods_impl(input, crate_path.as_ref()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn methods_impl(
    mut input: ItemImpl,
    crate_path: Option<&LitStr>,
) -> Result<TokenStream2, syn::Error> {
    let crate_path = utils::crate_path(crate_path)?;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "zreflect::methods does not support generic impl blocks",
        ));
    }

    let self_ty = &input.self_ty;
    let trait_path = input.trait_.as_ref().map(|(_, path, _)| path.clone());
    // Each block gets its own table, named after the implemented trait if any.
    let trait_ident = trait_path
        .as_ref()
        .and_then(|path| path.segments.last())
        .map(|segment| segment.ident.unraw());
    let table_ident = utils::method_table_ident(trait_ident.as_ref());
    let mut invokers = Vec::new();
    let mut entries = Vec::new();
    let mut errors: Option<syn::Error> = None;
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let attrs = MethodAttrs::parse(method);
        // The attributes are ours, the compiler doesn't know them.
        method.attrs.retain(|attr| !utils::is_zreflect_attr(attr));
        let attrs = match attrs {
            Ok(attrs) => attrs,
            Err(err) => {
                combine(&mut errors, err);
                continue;
            }
        };
        if attrs.skip || method.sig.receiver().is_none() {
            continue;
        }

        match generate_method(
            method,
            &attrs,
            trait_path.as_ref(),
            trait_ident.as_ref(),
            &crate_path,
        ) {
            Ok((invoker, entry)) => {
                invokers.push(invoker);
                entries.push(entry);
            }
            Err(err) => combine(&mut errors, err),
        }
    }
    if let Some(errors) = errors {
        return Err(errors);
    }

    Ok(quote! {
        #input

        impl #self_ty {
            #(#invokers)*

            #[doc(hidden)]
            #[allow(non_upper_case_globals)]
            pub(crate) const #table_ident: &'static [#crate_path::MethodInfo] = &[#(#entries),*];
        }
    })
}

/// Generate the invoker function of one method and its `MethodInfo` expression.
fn generate_method(
    method: &ImplItemFn,
    attrs: &MethodAttrs,
    trait_path: Option<&syn::Path>,
    trait_ident: Option<&syn::Ident>,
    crate_path: &TokenStream2,
) -> Result<(TokenStream2, TokenStream2), syn::Error> {
    let sig = &method.sig;
    let ident = &sig.ident;
    let name = attrs
        .rename
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "async methods can not be called dynamically",
        ));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            "unsafe methods can not be called dynamically",
        ));
    }
    if sig.generics.type_params().next().is_some() || sig.generics.const_params().next().is_some()
    {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "generic methods can not be called dynamically",
        ));
    }

    let exclusive = match sig.receiver() {
        Some(receiver) if receiver.colon_token.is_none() && receiver.reference.is_some() => {
            receiver.mutability.is_some()
        }
        Some(receiver) => {
            return Err(syn::Error::new_spanned(
                receiver,
                "only `&self` and `&mut self` receivers are supported",
            ));
        }
        None => unreachable!("associated functions are skipped"),
    };

    let params: Vec<Param<'_>> = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(position, pat_type)| Param::new(position, &pat_type.pat, &pat_type.ty))
        .collect::<Result<_, _>>()?;
    if attrs.variadic {
        match params.last() {
            Some(last) if last.sequence_element().is_some() => (),
            _ => {
                return Err(syn::Error::new_spanned(
                    sig,
                    "variadic methods must take a `Vec<T>` or `&[T]` as last parameter",
                ));
            }
        }
    }

    let invoker_ident = match trait_ident {
        Some(trait_ident) => format_ident!("__zreflect_invoke_{}_{}", trait_ident, ident.unraw()),
        None => format_ident!("__zreflect_invoke_{}", ident.unraw()),
    };
    let param_count = params.len();
    let bindings = params.iter().map(|param| param.binding());
    let arguments = params.iter().map(|param| param.argument());
    let call_path = match trait_path {
        Some(trait_path) => quote! { <Self as #trait_path>::#ident },
        None => quote! { Self::#ident },
    };
    let (receiver_ty, receiver_fn, invoker_variant) = if exclusive {
        (
            quote! { &mut dyn #crate_path::Record },
            quote! { receiver_mut },
            quote! { Exclusive },
        )
    } else {
        (
            quote! { &dyn #crate_path::Record },
            quote! { receiver },
            quote! { Shared },
        )
    };
    let returns = generate_returns(&sig.output, crate_path)?;

    let invoker = quote! {
        #[doc(hidden)]
        #[allow(non_snake_case, clippy::let_unit_value)]
        fn #invoker_ident(
            this: #receiver_ty,
            args: ::std::vec::Vec<#crate_path::Value>,
        ) -> #crate_path::Result<::std::vec::Vec<#crate_path::Value>> {
            #[allow(unused_mut)]
            let mut args = #crate_path::call::Args::new(#name, args, #param_count)?;
            #(#bindings)*
            let this = #crate_path::call::#receiver_fn::<Self>(this)?;
            let returned = #call_path(this, #(#arguments),*);
            #returns
        }
    };

    let signature = render_signature(exclusive, &params, &sig.output, attrs.variadic);
    let exported = (trait_path.is_some() || matches!(method.vis, Visibility::Public(_)))
        .then(|| quote! { .exported() });
    let variadic = attrs.variadic.then(|| quote! { .variadic() });
    let entry = quote! {
        #crate_path::MethodInfo::new(
            #name,
            #signature,
            #crate_path::Invoker::#invoker_variant(Self::#invoker_ident),
        )
        #exported
        #variadic
    };

    Ok((invoker, entry))
}

/// Pack the returned value into `Value`s.
fn generate_returns(
    output: &ReturnType,
    crate_path: &TokenStream2,
) -> Result<TokenStream2, syn::Error> {
    let unit = quote! {
        let () = returned;
        ::core::result::Result::Ok(::std::vec::Vec::new())
    };
    let ty = match output {
        ReturnType::Default => return Ok(unit),
        ReturnType::Type(_, ty) => &**ty,
    };

    match ty {
        Type::Tuple(tuple) if tuple.elems.is_empty() => Ok(unit),
        Type::Tuple(tuple) => {
            let elems: Vec<_> = (0..tuple.elems.len())
                .map(|i| format_ident!("returned_{}", i))
                .collect();
            let values = tuple
                .elems
                .iter()
                .zip(&elems)
                .map(|(ty, elem)| return_value(ty, quote! { #elem }, crate_path))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(quote! {
                let (#(#elems,)*) = returned;
                ::core::result::Result::Ok(::std::vec![#(#values),*])
            })
        }
        ty => {
            let value = return_value(ty, quote! { returned }, crate_path)?;
            Ok(quote! {
                ::core::result::Result::Ok(::std::vec![#value])
            })
        }
    }
}

/// One returned value as a `Value`, references converted to owned values.
fn return_value(
    ty: &Type,
    value: TokenStream2,
    crate_path: &TokenStream2,
) -> Result<TokenStream2, syn::Error> {
    match ty {
        Type::ImplTrait(_) => Err(syn::Error::new_spanned(
            ty,
            "`impl Trait` can not be returned from dynamically called methods",
        )),
        Type::Reference(reference) if reference.mutability.is_some() => Err(syn::Error::new_spanned(
            ty,
            "mutable references can not be returned",
        )),
        Type::Reference(_) => Ok(quote! {
            #crate_path::Value::new(::std::borrow::ToOwned::to_owned(#value))
        }),
        _ => Ok(quote! { #crate_path::Value::new(#value) }),
    }
}

/// Render the signature, e.g. `fn(&self, name: &str, parts: ...String) -> Vec<String>`.
fn render_signature(
    exclusive: bool,
    params: &[Param<'_>],
    output: &ReturnType,
    variadic: bool,
) -> String {
    let mut rendered = vec![String::from(if exclusive { "&mut self" } else { "&self" })];
    for (i, param) in params.iter().enumerate() {
        let ty = match param.sequence_element() {
            Some(element) if variadic && i + 1 == params.len() => {
                format!("...{}", utils::render_type(element))
            }
            _ => utils::render_type(param.ty),
        };
        rendered.push(format!("{}: {ty}", param.name));
    }

    let mut signature = format!("fn({})", rendered.join(", "));
    if let ReturnType::Type(_, ty) = output {
        signature.push_str(" -> ");
        signature.push_str(&utils::render_type(ty));
    }

    signature
}

/// A typed parameter of a method.
struct Param<'a> {
    name: String,
    binding: syn::Ident,
    ty: &'a Type,
}

impl<'a> Param<'a> {
    fn new(position: usize, pat: &Pat, ty: &'a Type) -> Result<Self, syn::Error> {
        match ty {
            Type::Reference(reference) if reference.mutability.is_some() => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "mutable reference parameters can not be passed dynamically",
                ));
            }
            Type::ImplTrait(_) => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "`impl Trait` parameters can not be passed dynamically",
                ));
            }
            _ => (),
        }
        let name = match pat {
            Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
            _ => String::from("_"),
        };

        Ok(Self {
            name,
            binding: format_ident!("arg_{}", position),
            ty,
        })
    }

    /// Take the argument from `args`, references as their owned form.
    fn binding(&self) -> TokenStream2 {
        let binding = &self.binding;
        let ty = match self.ty {
            Type::Reference(reference) => {
                let elem = utils::remove_lifetimes_from_type(&reference.elem);
                quote! { <#elem as ::std::borrow::ToOwned>::Owned }
            }
            ty => {
                let ty = utils::remove_lifetimes_from_type(ty);
                quote! { #ty }
            }
        };

        quote! { let #binding = args.next::<#ty>()?; }
    }

    /// The argument as passed to the method.
    fn argument(&self) -> TokenStream2 {
        let binding = &self.binding;
        match self.ty {
            Type::Reference(_) => quote! { ::std::borrow::Borrow::borrow(&#binding) },
            _ => quote! { #binding },
        }
    }

    /// The element type if the parameter is a `Vec<T>` or a `&[T]`.
    fn sequence_element(&self) -> Option<&'a Type> {
        match self.ty {
            Type::Reference(reference) => match &*reference.elem {
                Type::Slice(slice) => Some(&slice.elem),
                _ => None,
            },
            Type::Path(type_path) => {
                let segment = type_path.path.segments.last()?;
                if segment.ident != "Vec" {
                    return None;
                }
                match &segment.arguments {
                    syn::PathArguments::AngleBracketed(args) => match args.args.first()? {
                        syn::GenericArgument::Type(ty) => Some(ty),
                        _ => None,
                    },
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Attributes on a method.
#[derive(Default)]
struct MethodAttrs {
    rename: Option<String>,
    variadic: bool,
    skip: bool,
}

impl MethodAttrs {
    fn parse(method: &ImplItemFn) -> Result<Self, syn::Error> {
        let mut parsed = Self::default();
        for attr in method.attrs.iter().filter(|attr| utils::is_zreflect_attr(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let rename: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(rename.value());
                } else if meta.path.is_ident("variadic") {
                    parsed.variadic = true;
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else {
                    return Err(meta.error("unsupported zreflect attribute on a method"));
                }
                Ok(())
            })?;
        }

        Ok(parsed)
    }
}

fn combine(errors: &mut Option<syn::Error>, error: syn::Error) {
    match errors {
        Some(errors) => errors.combine(error),
        None => *errors = Some(error),
    }
}
