//! Procedural macros for date/time action definitions.
//!
//! `#[action]` leaves the annotated function untouched and registers a
//! declarative binding next to it (name, description, typed parameters, and a
//! JSON invoker) that `datetime_tools::registry::ActionRegistry` discovers at
//! startup.

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, FnArg, ItemFn, Lit, LitStr, MetaNameValue, Pat, ReturnType, Token, Type};

/// Registers a free function as an externally invokable action.
///
/// The action name defaults to the function identifier in lowerCamelCase
/// (`add_days` becomes `addDays`); parameter names are converted the same way.
///
/// ```ignore
/// #[action(description = "Adds the given number of days to the ISO date string")]
/// pub fn add_days(date_iso: &str, days: i64) -> ActionResult<String> {
///     /* ... */
/// }
/// ```
///
/// Functions returning `Result`/`ActionResult` propagate their error through
/// the invoker; any other return type must implement `serde::Serialize`.
#[proc_macro_attribute]
pub fn action(attr: TokenStream, item: TokenStream) -> TokenStream {
    let function = syn::parse_macro_input!(item as ItemFn);
    let args = match Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse(attr) {
        Ok(args) => args,
        Err(err) => return err.into_compile_error().into(),
    };

    expand(&args, &function)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct ActionArgs {
    name: Option<LitStr>,
    description: LitStr,
}

struct Param {
    ident: Ident,
    external: String,
    type_name: String,
    decode_ty: TokenStream2,
    borrowed: bool,
}

fn parse_args(args: &Punctuated<MetaNameValue, Token![,]>, span: Span) -> syn::Result<ActionArgs> {
    let mut name = None;
    let mut description = None;

    for arg in args {
        let Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) = &arg.value
        else {
            return Err(syn::Error::new_spanned(&arg.value, "expected a string literal"));
        };

        if arg.path.is_ident("name") {
            if value.value().trim().is_empty() {
                return Err(syn::Error::new_spanned(value, "action name cannot be empty"));
            }
            name = Some(value.clone());
        } else if arg.path.is_ident("description") {
            description = Some(value.clone());
        } else {
            return Err(syn::Error::new_spanned(
                &arg.path,
                "unknown `action` argument, expected `name` or `description`",
            ));
        }
    }

    let description = description
        .ok_or_else(|| syn::Error::new(span, "`#[action]` requires `description = \"...\"`"))?;

    Ok(ActionArgs { name, description })
}

fn expand(args: &Punctuated<MetaNameValue, Token![,]>, function: &ItemFn) -> syn::Result<TokenStream2> {
    let sig = &function.sig;
    let args = parse_args(args, sig.ident.span())?;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "actions must be synchronous"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "actions cannot be generic"));
    }

    let mut params = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "`#[action]` must be applied to a free function",
                ));
            }
            FnArg::Typed(typed) => {
                let Pat::Ident(pat) = typed.pat.as_ref() else {
                    return Err(syn::Error::new_spanned(
                        &typed.pat,
                        "action parameters must be plain identifiers",
                    ));
                };
                let (decode_ty, borrowed) = decode_type(&typed.ty)?;
                params.push(Param {
                    ident: pat.ident.clone(),
                    external: camel_case(&pat.ident.to_string()),
                    type_name: type_name(&typed.ty),
                    decode_ty,
                    borrowed,
                });
            }
        }
    }

    let fn_ident = &sig.ident;
    let name = args
        .name
        .map_or_else(|| camel_case(&fn_ident.to_string()), |lit| lit.value());
    let description = args.description.value();

    let idents: Vec<_> = params.iter().map(|p| &p.ident).collect();
    let externals: Vec<_> = params.iter().map(|p| p.external.as_str()).collect();
    let type_names: Vec<_> = params.iter().map(|p| p.type_name.as_str()).collect();
    let decode_tys: Vec<_> = params.iter().map(|p| &p.decode_ty).collect();
    let call_args: Vec<_> = params
        .iter()
        .map(|p| {
            let ident = &p.ident;
            if p.borrowed {
                quote!(&#ident)
            } else {
                quote!(#ident)
            }
        })
        .collect();
    let propagate = if is_fallible(&sig.output) {
        quote!(?)
    } else {
        TokenStream2::new()
    };

    Ok(quote! {
        #function

        const _: () = {
            fn __invoke(
                __args: &::datetime_tools::registry::Value,
            ) -> ::datetime_tools::ActionResult<::datetime_tools::registry::Value> {
                #(
                    let #idents: #decode_tys =
                        ::datetime_tools::registry::argument(__args, #externals)?;
                )*
                let __output = #fn_ident(#(#call_args),*) #propagate;
                ::datetime_tools::registry::output(__output)
            }

            ::datetime_tools::inventory::submit! {
                ::datetime_tools::registry::ActionBinding::new(
                    #name,
                    #description,
                    ::core::module_path!(),
                    ::core::line!(),
                    &[#(::datetime_tools::registry::ParamBinding::new(#externals, #type_names)),*],
                    __invoke,
                )
            }
        };
    })
}

/// Type decoded from the JSON arguments, and whether it is passed by reference.
fn decode_type(ty: &Type) -> syn::Result<(TokenStream2, bool)> {
    match ty {
        Type::Reference(reference) => {
            if let Some(mutability) = &reference.mutability {
                return Err(syn::Error::new_spanned(
                    mutability,
                    "action parameters cannot be mutable references",
                ));
            }
            match reference.elem.as_ref() {
                Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => {
                    Ok((quote!(::std::string::String), true))
                }
                Type::Slice(_) | Type::TraitObject(_) => Err(syn::Error::new_spanned(
                    ty,
                    "unsized action parameters other than `&str` are not supported",
                )),
                elem => Ok((elem.to_token_stream(), true)),
            }
        }
        Type::Paren(paren) => decode_type(&paren.elem),
        Type::Group(group) => decode_type(&group.elem),
        other => Ok((other.to_token_stream(), false)),
    }
}

/// Normalised type name handed to `TypeTag::infer`.
fn type_name(ty: &Type) -> String {
    match ty {
        Type::Reference(reference) => format!("&{}", type_name(&reference.elem)),
        Type::Paren(paren) => type_name(&paren.elem),
        Type::Group(group) => type_name(&group.elem),
        Type::Path(path) if path.qself.is_none() => match path.path.segments.last() {
            Some(segment) => {
                let args = segment.arguments.to_token_stream().to_string();
                format!("{}{}", segment.ident, args).replace(' ', "")
            }
            None => String::new(),
        },
        other => other.to_token_stream().to_string().replace(' ', ""),
    }
}

fn is_fallible(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Result" || segment.ident == "ActionResult")
}

/// `snake_case` to `lowerCamelCase`.
fn camel_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut out = String::with_capacity(ident.len());
    for (idx, part) in ident
        .trim_start_matches('_')
        .split('_')
        .filter(|part| !part.is_empty())
        .enumerate()
    {
        if idx == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_snake_case() {
        assert_eq!(camel_case("add_days"), "addDays");
        assert_eq!(camel_case("start_date_time_iso"), "startDateTimeIso");
        assert_eq!(camel_case("zone_id1"), "zoneId1");
        assert_eq!(camel_case("date1"), "date1");
        assert_eq!(camel_case("_unused"), "unused");
    }

    #[test]
    fn normalises_type_names() {
        let ty: Type = syn::parse_quote!(&str);
        assert_eq!(type_name(&ty), "&str");
        let ty: Type = syn::parse_quote!(std::string::String);
        assert_eq!(type_name(&ty), "String");
        let ty: Type = syn::parse_quote!(Vec<String>);
        assert_eq!(type_name(&ty), "Vec<String>");
    }

    #[test]
    fn borrowed_str_decodes_as_string() {
        let ty: Type = syn::parse_quote!(&str);
        let (decoded, borrowed) = decode_type(&ty).unwrap();
        assert!(borrowed);
        assert_eq!(decoded.to_string(), quote!(::std::string::String).to_string());
    }

    #[test]
    fn detects_fallible_returns() {
        let output: ReturnType = syn::parse_quote!(-> ActionResult<String>);
        assert!(is_fallible(&output));
        let output: ReturnType = syn::parse_quote!(-> bool);
        assert!(!is_fallible(&output));
    }

    #[test]
    fn rejects_receivers() {
        let function: ItemFn = syn::parse_quote! {
            fn method(&self) -> bool { true }
        };
        let args: Punctuated<MetaNameValue, Token![,]> = syn::parse_quote!(description = "x");
        assert!(expand(&args, &function).is_err());
    }

    #[test]
    fn requires_description() {
        let function: ItemFn = syn::parse_quote! {
            fn nothing() -> bool { true }
        };
        let args = Punctuated::<MetaNameValue, Token![,]>::new();
        assert!(expand(&args, &function).is_err());
    }
}
