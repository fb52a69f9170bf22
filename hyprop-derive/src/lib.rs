use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitInt, LitStr, Path, parse_macro_input};

/// Convert a type identifier to the snake-case name used in diagnostics
/// (`L1CacheHintKey` -> `l1_cache_hint_key`).
fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = match prev {
                Some(p) if p == '_' => false,
                Some(p) => p.is_lowercase() || p.is_ascii_digit() || (p.is_uppercase() && next_lower),
                None => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn require_unit_struct(input: &DeriveInput, what: &str) -> syn::Result<()> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            format!("{what} cannot be generic"),
        ));
    }
    match &input.data {
        Data::Struct(data) if matches!(data.fields, Fields::Unit) => Ok(()),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{what} must be a unit struct"),
        )),
    }
}

fn expand_property_key(input: &DeriveInput) -> syn::Result<TokenStream2> {
    require_unit_struct(input, "property keys")?;

    let mut name: Option<LitStr> = None;
    let mut runtime = false;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("property")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("runtime") {
                runtime = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `runtime`"))
            }
        })?;
    }

    let ident = &input.ident;
    let ident_str = ident.to_string();
    let name = name.map(|lit| lit.value()).unwrap_or_else(|| snake_case(&ident_str));
    let compile_time = !runtime;

    Ok(quote! {
        impl ::hyprop::key::PropertyKey for #ident {
            const KIND: ::hyprop::kind::KindId = ::hyprop::kind::KindId::new(
                ::core::concat!(::core::module_path!(), "::", #ident_str),
                #name,
            );
            const COMPILE_TIME: bool = #compile_time;
        }

        ::hyprop::register_property_kind!(#ident);
    })
}

fn expand_payload(input: &DeriveInput) -> syn::Result<TokenStream2> {
    require_unit_struct(input, "payloads")?;

    let mut code: Option<u32> = None;
    let mut name: Option<LitStr> = None;
    let mut accepts: Vec<Path> = Vec::new();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("payload")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("code") {
                let lit: LitInt = meta.value()?.parse()?;
                code = Some(lit.base10_parse()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("accepts") {
                meta.parse_nested_meta(|key| {
                    accepts.push(key.path);
                    Ok(())
                })
            } else {
                Err(meta.error("expected `code = ...`, `name = \"...\"` or `accepts(...)`"))
            }
        })?;
    }

    let ident = &input.ident;
    let Some(code) = code else {
        return Err(syn::Error::new_spanned(
            ident,
            "missing `#[payload(code = ...)]` attribute",
        ));
    };
    let name = name
        .map(|lit| lit.value())
        .unwrap_or_else(|| snake_case(&ident.to_string()));

    Ok(quote! {
        impl ::hyprop::key::Payload for #ident {
            const NAME: &'static str = #name;
            const CODE: u32 = #code;
        }

        #(
            impl ::hyprop::key::PayloadFor<#accepts> for #ident {}
        )*
    })
}

/// Declare a property key and register it.
///
/// Accepts `#[property(name = "...")]` to override the display name and
/// `#[property(runtime)]` for keys whose values carry runtime data.
#[proc_macro_derive(PropertyKey, attributes(property))]
pub fn derive_property_key(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_property_key(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Declare a payload: `#[payload(code = 0x4, name = "...", accepts(KeyA, KeyB))]`.
#[proc_macro_derive(Payload, attributes(payload))]
pub fn derive_payload(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_payload(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
