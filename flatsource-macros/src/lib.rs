//! Derive macro backing the `flatsource` crate. Use it through
//! `flatsource::Populate`; this crate is not meant to be depended on
//! directly.

use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::*;

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(flat), supports(struct_named))]
struct FlatArgs {
	ident: syn::Ident,
	generics: syn::Generics,
	data: ast::Data<(), FlatFieldArgs>,

	/// Run the record's `Validate` implementation after top-level
	/// population.
	#[darling(default)]
	validate: bool,
}

#[derive(Debug, FromField)]
#[darling(attributes(flat))]
#[allow(dead_code)]
struct FlatFieldArgs {
	ident: Option<syn::Ident>,
	ty: syn::Type,

	/// Never populate this field.
	#[darling(default)]
	ignore: bool,
}

/// Generates a `Populate` implementation that walks each named field in
/// declaration order, appending the field's name to the key prefix and
/// delegating to the field type's own `Populate` implementation.
///
/// Every field type must implement `flatsource::Populate` (terminals,
/// `Vec`s of coercible elements, options, and other deriving structs do).
/// Fields marked `#[flat(ignore)]` are skipped entirely.
#[proc_macro_derive(Populate, attributes(flat))]
pub fn populate(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	// Parse the input tokens into a syntax tree
	let input = parse_macro_input!(input as DeriveInput);

	let args = match FlatArgs::from_derive_input(&input) {
		Ok(v) => v,
		Err(e) => {
			return e.write_errors().into();
		}
	};

	let name = args.ident;
	let fields = args.data.as_ref().take_struct().unwrap().fields;
	let walk = field_walk(&fields);
	let hook = validation_hook(args.validate);
	let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

	// Build the output, possibly using quasi-quotation
	let expanded = quote! {
		impl #impl_generics ::flatsource::Populate for #name #ty_generics #where_clause {
			fn populate(
				&mut self,
				source: &dyn ::flatsource::Source,
				key: &::flatsource::Key,
			) -> ::flatsource::Result<usize> {
				// Counts every value set anywhere beneath this record.
				// Optional ancestors use it to decide whether to commit.
				let mut count = 0usize;
				#walk
				::flatsource::Result::Ok(count)
			}
			#hook
		}
	};

	// Hand the output tokens back to the compiler
	expanded.into()
}

fn field_walk(fields: &[&FlatFieldArgs]) -> TokenStream {
	let mut tokens = TokenStream::new();

	for field in fields.iter().filter(|x| !x.ignore) {
		let ident = field.ident.clone().unwrap();
		let segment = ident.to_string();

		tokens.extend(quote! {
			{
				let key = key.append(#segment);
				count += ::flatsource::Populate::populate(&mut self.#ident, source, &key)?;
			}
		});
	}

	tokens
}

fn validation_hook(validate: bool) -> TokenStream {
	if !validate {
		return TokenStream::new();
	}

	quote! {
		fn post_populate(&self) -> ::flatsource::Result<()> {
			::flatsource::Validate::validate(self).map_err(::flatsource::Error::Validation)
		}
	}
}
