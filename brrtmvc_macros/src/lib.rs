use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Type};

struct FieldDef {
    ident: Ident,
    name: String,
    ty: Type,
}

/// Parse `#[field(name = "...")]` / `#[field(skip)]`; `None` means skipped.
fn field_def(field: &syn::Field) -> syn::Result<Option<FieldDef>> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "Model fields must be named"));
    };
    let mut name = ident.to_string();
    let mut skip = false;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if !lit.value().is_empty() {
                    name = lit.value();
                }
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `skip`"))
            }
        })?;
    }

    if skip {
        return Ok(None);
    }
    Ok(Some(FieldDef {
        ident,
        name,
        ty: field.ty.clone(),
    }))
}

/// Derive `brrtmvc::binding::Model` for a struct with named fields.
///
/// The struct must implement `Default`; every bound field's type must
/// implement `brrtmvc::binding::ScalarParam`.
///
/// - `#[field(name = "years")]` binds the field from `attribute.years`
/// - `#[field(skip)]` leaves the field out of binding
#[proc_macro_derive(Model, attributes(field))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_model(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_model(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "Model can only be derived for structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &data.fields,
            "Model requires a struct with named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        if let Some(def) = field_def(field)? {
            fields.push(def);
        }
    }

    let type_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = fields.iter().map(|f| {
        let ident = f.ident.to_string();
        let name = &f.name;
        let ty = &f.ty;
        quote! {
            ::brrtmvc::binding::ModelField::new(
                #ident,
                #name,
                <#ty as ::brrtmvc::binding::ScalarParam>::SCALAR_TYPE,
            )
        }
    });

    let arms = fields.iter().map(|f| {
        let ident = &f.ident;
        let ident_str = ident.to_string();
        let ty = &f.ty;
        quote! {
            #ident_str => {
                let found = value.scalar_type();
                self.#ident = <#ty as ::brrtmvc::binding::ScalarParam>::from_scalar(value)
                    .ok_or_else(|| ::brrtmvc::anyhow::anyhow!(
                        "field `{}` cannot hold a {} value", #ident_str, found
                    ))?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let type_str = type_name.to_string();

    Ok(quote! {
        impl #impl_generics ::brrtmvc::binding::Model for #type_name #ty_generics #where_clause {
            fn instantiate() -> ::brrtmvc::anyhow::Result<Self> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }

            fn fields() -> ::std::vec::Vec<::brrtmvc::binding::ModelField> {
                ::std::vec![#(#descriptors),*]
            }

            fn assign(
                &mut self,
                ident: &str,
                value: ::brrtmvc::binding::ScalarValue,
            ) -> ::brrtmvc::anyhow::Result<()> {
                match ident {
                    #(#arms)*
                    other => ::core::result::Result::Err(::brrtmvc::anyhow::anyhow!(
                        "{} has no bindable field `{}`", #type_str, other
                    )),
                }
            }
        }
    })
}
