//! `#[derive(Patchable)]` implementation.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Path, Type, Visibility, parse_macro_input};

#[derive(Clone, Copy)]
enum RenameRule {
	Pascal,
	Camel,
	Snake,
	Kebab,
	ScreamingSnake,
}

impl RenameRule {
	fn parse(lit: &LitStr) -> syn::Result<Self> {
		match lit.value().as_str() {
			"PascalCase" => Ok(Self::Pascal),
			"camelCase" => Ok(Self::Camel),
			"snake_case" => Ok(Self::Snake),
			"kebab-case" => Ok(Self::Kebab),
			"SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
			other => Err(syn::Error::new_spanned(
				lit,
				format!(
					"unknown rename_all rule: {other}. Supported: PascalCase, camelCase, snake_case, kebab-case, SCREAMING_SNAKE_CASE"
				),
			)),
		}
	}

	fn apply(self, name: &str) -> String {
		match self {
			Self::Pascal => name.to_upper_camel_case(),
			Self::Camel => name.to_lower_camel_case(),
			Self::Snake => name.to_snake_case(),
			Self::Kebab => name.to_kebab_case(),
			Self::ScreamingSnake => name.to_shouty_snake_case(),
		}
	}
}

struct Property {
	name: LitStr,
	ty: Option<Type>,
	set: Option<Path>,
	private: bool,
}

#[derive(Default)]
struct Container {
	rename_all: Option<RenameRule>,
	properties: Vec<Property>,
}

#[derive(Default)]
struct FieldAttrs {
	rename: Option<String>,
	readonly: bool,
	skip: bool,
}

/// Entry point for the `#[derive(Patchable)]` macro.
pub fn derive_patchable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"Patchable can only be derived for structs",
		));
	};
	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			&data.fields,
			"Patchable requires a struct with named fields",
		));
	};

	let container = parse_container(input)?;
	let mut members = Vec::new();

	// Properties are discovered before fields.
	for prop in &container.properties {
		members.push(property_member(prop)?);
	}

	for field in &fields.named {
		let attrs = parse_field_attrs(field)?;
		if attrs.skip {
			continue;
		}
		let Some(ident) = &field.ident else {
			continue;
		};
		let name = match (&attrs.rename, container.rename_all) {
			(Some(rename), _) => rename.clone(),
			(None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
			(None, None) => ident.unraw().to_string(),
		};
		let public = matches!(field.vis, Visibility::Public(_));
		let ty = &field.ty;

		let def = quote! {
			::patcher::MemberDef::new(#name, ::patcher::MemberKind::Field)
		};
		members.push(match (public, attrs.readonly) {
			(true, false) => quote! {
				#def.with_setter(|target: &mut Self, value: #ty| target.#ident = value)
			},
			(true, true) => def,
			(false, _) => quote! { #def.private() },
		});
	}

	let ident = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics ::patcher::Patchable for #ident #ty_generics #where_clause {
			fn members() -> ::std::vec::Vec<::patcher::MemberDef<Self>> {
				::std::vec![#(#members),*]
			}
		}
	})
}

fn property_member(prop: &Property) -> syn::Result<TokenStream2> {
	let name = &prop.name;
	let def = quote! {
		::patcher::MemberDef::new(#name, ::patcher::MemberKind::Property)
	};
	let def = match (&prop.set, &prop.ty) {
		(Some(set), Some(ty)) => quote! {
			#def.with_setter(|target: &mut Self, value: #ty| #set(target, value))
		},
		(Some(set), None) => {
			return Err(syn::Error::new_spanned(
				set,
				"property with a setter needs `ty = Type`",
			));
		}
		(None, _) => def,
	};
	Ok(if prop.private {
		quote! { #def.private() }
	} else {
		def
	})
}

fn parse_container(input: &DeriveInput) -> syn::Result<Container> {
	let mut container = Container::default();
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("patch")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename_all") {
				let lit: LitStr = meta.value()?.parse()?;
				container.rename_all = Some(RenameRule::parse(&lit)?);
				Ok(())
			} else if meta.path.is_ident("property") {
				let mut name = None;
				let mut ty = None;
				let mut set = None;
				let mut private = false;
				meta.parse_nested_meta(|inner| {
					if inner.path.is_ident("name") {
						name = Some(inner.value()?.parse::<LitStr>()?);
					} else if inner.path.is_ident("ty") {
						ty = Some(inner.value()?.parse::<Type>()?);
					} else if inner.path.is_ident("set") {
						set = Some(inner.value()?.parse::<Path>()?);
					} else if inner.path.is_ident("private") {
						private = true;
					} else {
						return Err(inner.error("unknown property attribute"));
					}
					Ok(())
				})?;
				let Some(name) = name else {
					return Err(meta.error("property is missing `name = \"...\"`"));
				};
				container.properties.push(Property {
					name,
					ty,
					set,
					private,
				});
				Ok(())
			} else {
				Err(meta.error("unknown patch attribute"))
			}
		})?;
	}
	Ok(container)
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
	let mut attrs = FieldAttrs::default();
	for attr in field.attrs.iter().filter(|a| a.path().is_ident("patch")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename") {
				let lit: LitStr = meta.value()?.parse()?;
				attrs.rename = Some(lit.value());
			} else if meta.path.is_ident("readonly") {
				attrs.readonly = true;
			} else if meta.path.is_ident("skip") {
				attrs.skip = true;
			} else {
				return Err(meta.error("unknown patch field attribute"));
			}
			Ok(())
		})?;
	}
	Ok(attrs)
}
