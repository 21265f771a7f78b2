use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, Ident, Type, Variant};

/// What the expansion needs to know about a single variant.
struct VariantShape<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("luthier_error can only be applied to enums"); };
    };

    let shapes = match data.variants.iter().map(inspect_variant).collect::<Result<Vec<_>, _>>() {
        Ok(shapes) => shapes,
        Err(err) => return err.to_compile_error(),
    };
    if let Some(err) = missing_context(&shapes) {
        return err.to_compile_error();
    }

    let name = &input.ident;
    let ext_trait = format_ident!("{}Ext", name);

    let derives = missing_derives(&input);
    let context_trait = expand_context_trait(name, &ext_trait, &shapes);
    let source_impls = shapes.iter().filter_map(|shape| expand_source_impls(name, &ext_trait, shape));
    let internal_impls = expand_internal_impls(name, &shapes);
    let kind = expand_kind(&input, &shapes);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls
        #kind

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn inspect_variant(variant: &Variant) -> syn::Result<VariantShape<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "luthier_error variants must use named fields",
        ));
    };

    let has_context = context_field(fields)?.is_some();
    let source = source_field(fields)
        .and_then(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)));
    let cfg_attrs =
        variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    Ok(VariantShape { ident: &variant.ident, source, has_context, cfg_attrs })
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) = fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == "context"))
    else {
        return Ok(None);
    };
    if is_cow_option(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn source_field(fields: &FieldsNamed) -> Option<&Field> {
    fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == "source")
            || has_attr(field, "source")
            || has_attr(field, "from")
    })
}

fn missing_context(shapes: &[VariantShape<'_>]) -> Option<syn::Error> {
    shapes.iter().find(|shape| shape.source.is_some() && !shape.has_context).map(|shape| {
        syn::Error::new_spanned(
            shape.ident,
            "luthier_error needs `context: Option<Cow<'static, str>>` next to a source field",
        )
    })
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let present = derived_names(input);
    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !present.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }
    if wanted.is_empty() { quote! {} } else { quote! { #[derive(#(#wanted),*)] } }
}

fn expand_context_trait(
    name: &Ident,
    ext_trait: &Ident,
    shapes: &[VariantShape<'_>],
) -> TokenStream {
    let arms = shapes.iter().filter(|shape| shape.has_context).map(|shape| {
        let cfg_attrs = &shape.cfg_attrs;
        let ident = shape.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext_trait<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext_trait<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #( #arms )*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn expand_source_impls(
    name: &Ident,
    ext_trait: &Ident,
    shape: &VariantShape<'_>,
) -> Option<TokenStream> {
    if shape.ident == "Internal" {
        return None;
    }
    let (field, ty) = shape.source?;
    let ident = shape.ident;
    let cfg_attrs = &shape.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self { Self::#ident { #field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #ext_trait<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn expand_internal_impls(name: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let Some(internal) = shapes.iter().find(|shape| shape.ident == "Internal") else {
        return quote! {};
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn expand_kind(input: &DeriveInput, shapes: &[VariantShape<'_>]) -> TokenStream {
    let name = &input.ident;
    let vis = &input.vis;
    let kind = format_ident!("{}Kind", name);

    let members = shapes.iter().map(|shape| {
        let cfg_attrs = &shape.cfg_attrs;
        let ident = shape.ident;
        quote! { #(#cfg_attrs)* #ident, }
    });
    let to_kind = shapes.iter().map(|shape| {
        let cfg_attrs = &shape.cfg_attrs;
        let ident = shape.ident;
        quote! { #(#cfg_attrs)* Self::#ident { .. } => #kind::#ident, }
    });
    let labels = shapes.iter().map(|shape| {
        let cfg_attrs = &shape.cfg_attrs;
        let ident = shape.ident;
        let label = ident.to_string();
        quote! { #(#cfg_attrs)* Self::#ident => #label, }
    });

    quote! {
        /// Fieldless mirror of the error variants.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #vis enum #kind {
            #( #members )*
        }

        impl #kind {
            /// Variant name, suitable for structured log fields.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    #( #labels )*
                }
            }
        }

        impl std::fmt::Display for #kind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[automatically_derived]
        impl #name {
            /// Returns which failure this is, without its payload.
            #[must_use]
            pub const fn kind(&self) -> #kind {
                match self {
                    #( #to_kind )*
                }
            }
        }
    }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_names(input: &DeriveInput) -> FxHashSet<String> {
    let mut names = FxHashSet::default();

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                names.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    names
}

/// Accepts `Option<Cow<'static, str>>` with any path prefix on `Option` and `Cow`.
fn is_cow_option(ty: &Type) -> bool {
    let Some(inner) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(path) = inner else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Cow" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };
    let mut args = args.args.iter();
    let Some(syn::GenericArgument::Lifetime(lifetime)) = args.next() else {
        return false;
    };
    let Some(syn::GenericArgument::Type(Type::Path(target))) = args.next() else {
        return false;
    };
    lifetime.ident == "static" && target.path.segments.last().is_some_and(|seg| seg.ident == "str")
}

fn single_generic<'a>(ty: &'a Type, outer: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != outer {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
