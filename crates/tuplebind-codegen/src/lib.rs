// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, FnArg, ImplItem,
    ImplItemFn, ItemImpl, LitStr, ReturnType, Type,
};

/// `#[derive(Introspect)]` macro: generates `impl tuplebind::Introspect`
///
/// Every named field becomes a directly accessible field of the descriptor.
/// Field types must implement `tuplebind::ToValue`.
///
/// The descriptor's type name is the struct name; its qualified name is
/// `std::any::type_name::<Self>()`, which tells apart same-named structs in
/// different modules.
///
/// Container attributes:
/// - `#[introspect(name = "...")]` overrides the type name and doubles as the
///   qualified name, giving plans a stable identity across crate refactors
/// - `#[introspect(accessors)]` pulls in methods declared by an `#[accessors]` impl block
///
/// Field attributes:
/// - `#[introspect(skip)]` hides the field from resolution
/// - `#[introspect(rename = "...")]` exposes the field under another name
///
/// Example:
/// ```ignore
/// use tuplebind::Introspect;
///
/// #[derive(Introspect)]
/// #[introspect(name = "Person")]
/// struct PersonRecord {
///     id: i32,
///     #[introspect(rename = "name")]
///     display_name: String,
///     #[introspect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_introspect(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `#[accessors]` attribute for inherent impl blocks.
///
/// Records every `&self` (or `self: &Self`) method so `#[derive(Introspect)]`
/// with `#[introspect(accessors)]` can resolve fields through them.
/// Zero-argument methods are callable accessors; methods with parameters are
/// recorded with their parameter count and never bound. Methods returning
/// `()`, generic, async or `unsafe` methods and methods without a shared
/// receiver are ignored.
///
/// Method attributes:
/// - `#[accessor(name = "...")]` declares the method under another name (e.g. `getAge`)
/// - `#[accessor(skip)]` leaves the method out
///
/// An `#[accessor(..)]` attribute on a method that cannot be recorded is a
/// compile error.
#[proc_macro_attribute]
pub fn accessors(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[accessors] takes no arguments",
        )
        .to_compile_error()
        .into();
    }
    let item = parse_macro_input!(input as ItemImpl);
    expand_accessors(item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    accessors: bool,
}

#[derive(Default)]
struct MemberAttrs {
    rename: Option<String>,
    skip: bool,
    present: bool,
}

fn expand_introspect(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;
    let qualified_name = match &container.name {
        Some(name) => quote!(#name),
        None => quote!(::std::any::type_name::<Self>()),
    };
    let type_name = container
        .name
        .unwrap_or_else(|| ident.unraw().to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => f.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only structs with named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut field_entries = Vec::new();
    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let attrs = parse_member_attrs(&field.attrs, "introspect")?;
        if attrs.skip {
            continue;
        }
        let exposed = attrs
            .rename
            .unwrap_or_else(|| field_ident.unraw().to_string());
        field_entries.push(quote! {
            .field(#exposed, |this: &Self| ::tuplebind::ToValue::to_value(&this.#field_ident))
        });
    }

    let declare_accessors = container.accessors.then(|| {
        quote! {
            let builder = <Self as ::tuplebind::Accessors>::declare_accessors(builder);
        }
    });

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tuplebind::Introspect for #ident #ty_generics #where_clause {
            fn type_descriptor() -> ::tuplebind::TypeDescriptor<Self> {
                let builder = ::tuplebind::TypeDescriptorBuilder::<Self>::new(#type_name)
                    .qualified_name(#qualified_name);
                #declare_accessors
                builder
                    #(#field_entries)*
                    .build()
            }
        }
    })
}

fn expand_accessors(mut item: ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[accessors] only applies to inherent impl blocks",
        ));
    }

    let mut declarations = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = parse_member_attrs(&method.attrs, "accessor")?;
        method.attrs.retain(|a| !a.path().is_ident("accessor"));
        if attrs.skip {
            continue;
        }
        if let Some(reason) = ineligibility(method) {
            if attrs.present {
                return Err(syn::Error::new_spanned(
                    &method.sig,
                    format!("#[accessor] method {reason}"),
                ));
            }
            continue;
        }

        let method_ident = &method.sig.ident;
        let declared = attrs
            .rename
            .unwrap_or_else(|| method_ident.unraw().to_string());
        let param_count = method
            .sig
            .inputs
            .iter()
            .filter(|arg| matches!(arg, FnArg::Typed(_)))
            .count();

        declarations.push(if param_count == 0 {
            quote! {
                .accessor(#declared, |this: &Self| {
                    ::tuplebind::ToValue::to_value(&this.#method_ident())
                })
            }
        } else {
            quote! {
                .method_with_params(#declared, #param_count)
            }
        });
    }

    let self_ty: &Type = &item.self_ty;
    let mut generics = item.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics ::tuplebind::Accessors for #self_ty #where_clause {
            fn declare_accessors(
                builder: ::tuplebind::TypeDescriptorBuilder<Self>,
            ) -> ::tuplebind::TypeDescriptorBuilder<Self> {
                builder
                    #(#declarations)*
            }
        }
    })
}

/// Why `method` cannot be recorded, or `None` if it can.
fn ineligibility(method: &ImplItemFn) -> Option<&'static str> {
    let sig = &method.sig;
    // `self: &Self` and `&self` both parse to a receiver of reference type.
    let shared_receiver = matches!(
        sig.inputs.first(),
        Some(FnArg::Receiver(r))
            if matches!(&*r.ty, Type::Reference(t) if t.mutability.is_none())
    );
    let returns_value = match &sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => !matches!(&**ty, Type::Tuple(t) if t.elems.is_empty()),
    };
    if !shared_receiver {
        Some("must take `&self`")
    } else if sig.unsafety.is_some() {
        Some("must not be `unsafe`")
    } else if sig.asyncness.is_some() {
        Some("must not be `async`")
    } else if sig.generics.type_params().next().is_some()
        || sig.generics.const_params().next().is_some()
    {
        Some("must not have type or const parameters")
    } else if !returns_value {
        Some("must return a value")
    } else {
        None
    }
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("introspect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                out.name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("accessors") {
                out.accessors = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `accessors`"))
            }
        })?;
    }
    Ok(out)
}

fn parse_member_attrs(attrs: &[Attribute], marker: &str) -> syn::Result<MemberAttrs> {
    let mut out = MemberAttrs::default();
    // Fields take `rename`, methods take `name`.
    let rename_key = if marker == "accessor" { "name" } else { "rename" };
    for attr in attrs.iter().filter(|a| a.path().is_ident(marker)) {
        out.present = true;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(rename_key) {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(lit, "name must not be empty"));
                }
                out.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else {
                Err(meta.error(format!("expected `{rename_key} = \"...\"` or `skip`")))
            }
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(item: ItemImpl) -> syn::Result<String> {
        expand_accessors(item).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_typed_receiver_is_recorded() {
        let out = expand(parse_quote! {
            impl Meter {
                fn reading(self: &Self) -> u32 { self.reading }
            }
        })
        .expect("typed shared receiver");
        assert!(out.contains("\"reading\""), "{}", out);
    }

    #[test]
    fn test_plain_unsafe_method_is_ignored() {
        let out = expand(parse_quote! {
            impl Meter {
                unsafe fn raw(&self) -> u32 { self.reading }
            }
        })
        .expect("unmarked methods are filtered");
        assert!(!out.contains("\"raw\""), "{}", out);
    }

    #[test]
    fn test_marked_ineligible_methods_are_rejected() {
        let cases: [(ItemImpl, &str); 4] = [
            (
                parse_quote! {
                    impl Meter {
                        #[accessor(name = "getRaw")]
                        unsafe fn raw(&self) -> u32 { self.reading }
                    }
                },
                "unsafe",
            ),
            (
                parse_quote! {
                    impl Meter {
                        #[accessor(name = "getReading")]
                        fn reading(&mut self) -> u32 { self.reading }
                    }
                },
                "&self",
            ),
            (
                parse_quote! {
                    impl Meter {
                        #[accessor(name = "getTotal")]
                        async fn total(&self) -> u32 { self.reading }
                    }
                },
                "async",
            ),
            (
                parse_quote! {
                    impl Meter {
                        #[accessor(name = "getReset")]
                        fn reset(&self) {}
                    }
                },
                "return a value",
            ),
        ];
        for (item, reason) in cases {
            let err = expand(item).expect_err("marked method cannot be recorded");
            assert!(err.to_string().contains(reason), "{}", err);
        }
    }

    #[test]
    fn test_skip_wins_over_eligibility() {
        let out = expand(parse_quote! {
            impl Meter {
                #[accessor(skip)]
                fn reset(&mut self) -> u32 { 0 }
            }
        })
        .expect("skipped methods are never checked");
        assert!(!out.contains("\"reset\""), "{}", out);
    }
}
