//! Derive macro implementation used by `stuff`.
//!
//! `stuff-derive` is an implementation detail of this workspace. The `StuffKind` derive
//! expands in terms of `::stuff::StuffKind`, `::stuff::Kind` and `::stuff::__private`, so
//! it is meant to be used through the `stuff` facade crate.
//!
//! # Generated impls
//!
//! For a marker type `MyStuff`, the derive implements `::stuff::StuffKind for MyStuff`,
//! backed by a lazily built static `Kind`.
//!
//! # Attributes
//!
//! The derive reads a required `#[stuff(...)]` attribute:
//!
//! - `domain = integer | real | identity_set` (required)
//! - `name = "Ammo"`: display name, defaults to the type name
//! - `min_amount = 6`: smallest nonempty amount (item count for identity sets)
//! - `unit_size = 3`: granularity for integer kinds, size factor for all kinds
//! - `item_type = SomeItem`: identity sets only, accepted item type
//! - `sized_items = true`: identity sets only, items must report a size
//! - `minimum_rule = strict | remainder_only`
//!
//! Literal values are checked at compile time against the same rules the runtime builder
//! applies.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, DeriveInput, Ident, Lit, LitBool, LitStr, Token, Type,
};

/// Derive `::stuff::StuffKind` for a marker type.
///
/// The derive must be paired with a `#[stuff(...)]` attribute providing at least
/// `domain`.
#[proc_macro_derive(StuffKind, attributes(stuff))]
pub fn derive_stuff_kind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_stuff_kind_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_stuff_kind_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`StuffKind` cannot be derived for generic types",
        ));
    }

    let attr = parse_stuff_attribute(&input.attrs)?;
    attr.validate()?;

    let kind_name = attr
        .name
        .as_ref()
        .map(LitStr::value)
        .unwrap_or_else(|| name.to_string());
    let builder = attr.builder(&kind_name);

    let expanded = quote! {
        impl ::stuff::StuffKind for #name {
            fn kind() -> &'static ::stuff::Kind {
                static KIND: ::stuff::__private::Lazy<::stuff::Kind> =
                    ::stuff::__private::Lazy::new(|| {
                        ::stuff::__private::build_static_kind(#builder)
                    });
                &KIND
            }
        }
    };

    Ok(expanded)
}

/// A numeric literal with its location, for error reporting.
struct Number {
    value: f64,
    span: Span,
}

impl Parse for Number {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit: Lit = input.parse()?;
        let value = match &lit {
            Lit::Int(int) => int.base10_parse::<f64>()?,
            Lit::Float(float) => float.base10_parse::<f64>()?,
            _ => return Err(syn::Error::new(lit.span(), "expected a number literal")),
        };
        Ok(Number {
            value,
            span: lit.span(),
        })
    }
}

impl Number {
    fn whole(&self, field: &str, minimum: f64) -> syn::Result<()> {
        if self.value.fract() != 0.0 || self.value < minimum {
            return Err(syn::Error::new(
                self.span,
                format!("`{field}` must be a whole number of at least {minimum}"),
            ));
        }
        Ok(())
    }

    fn literal(&self) -> Literal {
        Literal::f64_unsuffixed(self.value)
    }
}

/// Parsed contents of the `#[stuff(...)]` attribute.
struct StuffAttribute {
    domain: Ident,
    name: Option<LitStr>,
    min_amount: Option<Number>,
    unit_size: Option<Number>,
    item_type: Option<Type>,
    sized_items: Option<LitBool>,
    minimum_rule: Option<Ident>,
}

impl Parse for StuffAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut domain: Option<Ident> = None;
        let mut name: Option<LitStr> = None;
        let mut min_amount: Option<Number> = None;
        let mut unit_size: Option<Number> = None;
        let mut item_type: Option<Type> = None;
        let mut sized_items: Option<LitBool> = None;
        let mut minimum_rule: Option<Ident> = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "domain" => {
                    domain = Some(input.parse()?);
                }
                "name" => {
                    name = Some(input.parse()?);
                }
                "min_amount" => {
                    min_amount = Some(input.parse()?);
                }
                "unit_size" => {
                    unit_size = Some(input.parse()?);
                }
                "item_type" => {
                    item_type = Some(input.parse()?);
                }
                "sized_items" => {
                    sized_items = Some(input.parse()?);
                }
                "minimum_rule" => {
                    minimum_rule = Some(input.parse()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute `{}`", other),
                    ));
                }
            }

            // Consume trailing comma if present
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let domain = domain
            .ok_or_else(|| syn::Error::new(input.span(), "missing required attribute `domain`"))?;

        Ok(StuffAttribute {
            domain,
            name,
            min_amount,
            unit_size,
            item_type,
            sized_items,
            minimum_rule,
        })
    }
}

impl StuffAttribute {
    fn validate(&self) -> syn::Result<()> {
        if let Some(name) = &self.name {
            if name.value().trim().is_empty() {
                return Err(syn::Error::new(name.span(), "`name` must not be empty"));
            }
        }

        let domain = self.domain.to_string();
        match domain.as_str() {
            "integer" => {
                if let Some(min) = &self.min_amount {
                    min.whole("min_amount", 1.0)?;
                }
                if let Some(unit) = &self.unit_size {
                    unit.whole("unit_size", 1.0)?;
                }
            }
            "real" => {
                if let Some(min) = &self.min_amount {
                    if !min.value.is_finite() || min.value < 0.0 {
                        return Err(syn::Error::new(
                            min.span,
                            "`min_amount` must be finite and non-negative",
                        ));
                    }
                }
                self.check_positive_unit()?;
            }
            "identity_set" => {
                if let Some(min) = &self.min_amount {
                    min.whole("min_amount", 1.0)?;
                }
                self.check_positive_unit()?;
            }
            other => {
                return Err(syn::Error::new(
                    self.domain.span(),
                    format!(
                        "unknown domain `{}`, expected `integer`, `real` or `identity_set`",
                        other
                    ),
                ));
            }
        }

        if domain != "identity_set" {
            if let Some(item_type) = &self.item_type {
                return Err(syn::Error::new_spanned(
                    item_type,
                    "`item_type` only applies to `identity_set` kinds",
                ));
            }
            if let Some(sized) = &self.sized_items {
                return Err(syn::Error::new(
                    sized.span(),
                    "`sized_items` only applies to `identity_set` kinds",
                ));
            }
        }

        if let Some(rule) = &self.minimum_rule {
            if rule != "strict" && rule != "remainder_only" {
                return Err(syn::Error::new(
                    rule.span(),
                    "unknown minimum rule, expected `strict` or `remainder_only`",
                ));
            }
        }

        Ok(())
    }

    fn check_positive_unit(&self) -> syn::Result<()> {
        match &self.unit_size {
            Some(unit) if !unit.value.is_finite() || unit.value <= 0.0 => Err(syn::Error::new(
                unit.span,
                "`unit_size` must be finite and positive",
            )),
            _ => Ok(()),
        }
    }

    /// Builder expression for a validated attribute.
    fn builder(&self, kind_name: &str) -> TokenStream2 {
        let constructor = &self.domain;
        let mut builder = quote! { ::stuff::Kind::#constructor(#kind_name) };

        if let Some(min) = &self.min_amount {
            let min = min.literal();
            builder = quote! { #builder.min_amount(#min) };
        }
        if let Some(unit) = &self.unit_size {
            let unit = unit.literal();
            builder = quote! { #builder.unit_size(#unit) };
        }
        if let Some(item_type) = &self.item_type {
            builder = quote! { #builder.restricted_to::<#item_type>() };
        }
        if let Some(sized) = &self.sized_items {
            builder = quote! { #builder.sized_items(#sized) };
        }
        if let Some(rule) = &self.minimum_rule {
            let variant = if rule == "remainder_only" {
                quote! { RemainderOnly }
            } else {
                quote! { Strict }
            };
            builder = quote! { #builder.minimum_rule(::stuff::MinimumRule::#variant) };
        }
        builder
    }
}

fn parse_stuff_attribute(attrs: &[Attribute]) -> syn::Result<StuffAttribute> {
    for attr in attrs {
        if attr.path().is_ident("stuff") {
            return attr.parse_args::<StuffAttribute>();
        }
    }

    Err(syn::Error::new(
        proc_macro2::Span::call_site(),
        "missing #[stuff(...)] attribute",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use syn::parse_quote;

    fn derive_error(input: DeriveInput) -> String {
        derive_stuff_kind_impl(input).err().unwrap().to_string()
    }

    #[test]
    fn test_parse_stuff_attribute_complete() {
        let input: DeriveInput = parse_quote! {
            #[stuff(name = "Ammo", domain = integer, min_amount = 6, unit_size = 3)]
            pub struct Ammo;
        };

        let attr = parse_stuff_attribute(&input.attrs).unwrap();
        assert_eq!(attr.domain, "integer");
        assert_eq!(attr.name.unwrap().value(), "Ammo");
        assert_eq!(attr.min_amount.unwrap().value, 6.0);
        assert_eq!(attr.unit_size.unwrap().value, 3.0);
    }

    #[test]
    fn test_parse_stuff_attribute_missing() {
        let input: DeriveInput = parse_quote! {
            pub struct Ammo;
        };

        let result = parse_stuff_attribute(&input.attrs);
        assert!(result.is_err());
        let err_msg = result.err().unwrap().to_string();
        assert!(err_msg.contains("missing #[stuff(...)] attribute"));
    }

    #[test]
    fn test_parse_stuff_attribute_missing_domain() {
        let input: DeriveInput = parse_quote! {
            #[stuff(min_amount = 6)]
            pub struct Ammo;
        };

        let result = parse_stuff_attribute(&input.attrs);
        let err_msg = result.err().unwrap().to_string();
        assert!(err_msg.contains("missing required attribute `domain`"));
    }

    #[test]
    fn test_parse_stuff_attribute_unknown_field() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = real, colour = "blue")]
            pub struct Paint;
        };

        let err_msg = parse_stuff_attribute(&input.attrs)
            .err()
            .unwrap()
            .to_string();
        assert!(err_msg.contains("unknown attribute"));
    }

    #[test]
    fn test_parse_rejects_non_numeric_amount() {
        let tokens = quote! { domain = integer, min_amount = "six" };
        let result: syn::Result<StuffAttribute> = syn::parse2(tokens);
        assert!(result.err().unwrap().to_string().contains("number literal"));
    }

    #[test]
    fn test_parse_with_trailing_comma() {
        let tokens = quote! { domain = real, unit_size = 0.5, };
        let attr: StuffAttribute = syn::parse2(tokens).unwrap();
        assert_eq!(attr.unit_size.unwrap().value, 0.5);
    }

    #[test]
    fn test_validate_integer_literals() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = integer, unit_size = 1.5)]
            pub struct Ammo;
        };
        assert!(derive_error(input).contains("`unit_size` must be a whole number"));

        let input: DeriveInput = parse_quote! {
            #[stuff(domain = integer, min_amount = 0)]
            pub struct Ammo;
        };
        assert!(derive_error(input).contains("`min_amount` must be a whole number"));
    }

    #[test]
    fn test_validate_unknown_domain() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = complex)]
            pub struct Thing;
        };
        assert!(derive_error(input).contains("unknown domain `complex`"));
    }

    #[test]
    fn test_validate_item_settings_on_scalar_kind() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = real, item_type = Barrel)]
            pub struct Oil;
        };
        assert!(derive_error(input).contains("only applies to `identity_set`"));

        let input: DeriveInput = parse_quote! {
            #[stuff(domain = integer, sized_items = true)]
            pub struct Ammo;
        };
        assert!(derive_error(input).contains("only applies to `identity_set`"));
    }

    #[test]
    fn test_validate_minimum_rule() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = integer, minimum_rule = lenient)]
            pub struct Ammo;
        };
        assert!(derive_error(input).contains("unknown minimum rule"));
    }

    #[test]
    fn test_rejects_generic_types() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = integer)]
            pub struct Ammo<T>(T);
        };
        assert!(derive_error(input).contains("generic"));
    }

    #[test]
    fn test_derive_impl_integer() {
        let input: DeriveInput = parse_quote! {
            #[stuff(domain = integer, min_amount = 6, unit_size = 3)]
            pub struct MyStuff;
        };

        let code = derive_stuff_kind_impl(input).unwrap().to_string();
        assert!(code.contains("impl :: stuff :: StuffKind for MyStuff"));
        assert!(code.contains(":: stuff :: Kind :: integer (\"MyStuff\")"));
        assert!(code.contains("min_amount (6.0)"));
        assert!(code.contains("unit_size (3.0)"));
        assert!(code.contains("build_static_kind"));
    }

    #[test]
    fn test_derive_impl_identity_set() {
        let input: DeriveInput = parse_quote! {
            #[stuff(
                name = "Cargo",
                domain = identity_set,
                item_type = Crate,
                sized_items = true,
                minimum_rule = remainder_only
            )]
            pub struct CargoHold;
        };

        let code = derive_stuff_kind_impl(input).unwrap().to_string();
        assert!(code.contains(":: stuff :: Kind :: identity_set (\"Cargo\")"));
        assert!(code.contains("restricted_to :: < Crate > ()"));
        assert!(code.contains("sized_items (true)"));
        assert!(code.contains(":: stuff :: MinimumRule :: RemainderOnly"));
    }

    #[test]
    fn test_derive_impl_error_path() {
        let input: DeriveInput = parse_quote! {
            pub struct Ammo;
        };
        let err = derive_stuff_kind_impl(input).err().unwrap();
        let code = err.to_compile_error().to_string();
        assert!(code.contains("compile_error"));
    }
}
