use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DataStruct, DeriveInput, Error, Fields, LitStr};

/// Attributes collected from `#[loose(...)]` on one field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<LitStr>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = FieldAttrs::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("loose")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if parsed.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    parsed.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown loose attribute, expected `rename` or `skip`"))
                }
            })?;
        }
        Ok(parsed)
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "#[derive(Record)] does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        Data::Struct(_) => {
            return Err(Error::new(
                input.ident.span(),
                "#[derive(Record)] requires a struct with named fields",
            ));
        }
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new(
                input.ident.span(),
                "#[derive(Record)] can only be used on structs",
            ));
        }
    };

    let ident = &input.ident;
    let type_identifier = ident.unraw().to_string();

    let mut shape_fields = Vec::with_capacity(fields.len());
    let mut mut_arms = Vec::with_capacity(fields.len());
    let mut ref_arms = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let Some(member) = &field.ident else {
            return Err(Error::new(field.span(), "expected a named field"));
        };
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let name = member.unraw().to_string();
        let ty = &field.ty;

        let rename = attrs.rename.map(|rename| quote! { .rename(#rename) });
        let skip = attrs.skip.then(|| quote! { .skip() });
        shape_fields.push(quote! {
            ::loose_json::Field::new(
                #name,
                ::core::any::TypeId::of::<#ty>,
                ::core::any::type_name::<#ty>,
            ) #rename #skip
        });
        mut_arms.push(quote! {
            #index => ::core::option::Option::Some(&mut self.#member as &mut dyn ::core::any::Any)
        });
        ref_arms.push(quote! {
            #index => ::core::option::Option::Some(&self.#member as &dyn ::core::any::Any)
        });
    }

    Ok(quote! {
        #[automatically_derived]
        impl ::loose_json::Record for #ident {
            const SHAPE: &'static ::loose_json::Shape = &::loose_json::Shape {
                type_identifier: #type_identifier,
                fields: &[#(#shape_fields),*],
            };

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                match index {
                    #(#mut_arms,)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_ref(&self, index: usize) -> ::core::option::Option<&dyn ::core::any::Any> {
                match index {
                    #(#ref_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
