//! Procedural macros for patcher.
//!
//! * `#[derive(Patchable)]` - generates the member table of a struct

use proc_macro::TokenStream;

/// Patchable derive macro implementation.
mod patchable;

/// Derives `patcher::Patchable` for a struct with named fields.
///
/// ```ignore
/// #[derive(Default, Patchable)]
/// #[patch(rename_all = "PascalCase")]
/// #[patch(property(name = "Total", ty = i64, set = Self::set_total))]
/// #[patch(property(name = "Checksum"))]
/// pub struct Invoice {
///     pub customer_id: uuid::Uuid,
///     #[patch(readonly)]
///     pub number: String,
///     #[patch(rename = "Memo")]
///     pub note: Option<String>,
///     #[patch(skip)]
///     total: i64,
///     created_by: String,
/// }
/// ```
///
/// # Container attributes
///
/// - `rename_all = "..."` - `PascalCase`, `camelCase`, `snake_case`,
///   `kebab-case` or `SCREAMING_SNAKE_CASE` for field member names
/// - `property(name = "..", ty = Type, set = path, private)` - declares a
///   property; without `set` it is get-only
///
/// # Field attributes
///
/// - `rename = ".."` - member name for this field
/// - `readonly` - registered but never written
/// - `skip` - not registered at all
///
/// Only `pub` fields are writable; other visibilities are registered as
/// private members.
#[proc_macro_derive(Patchable, attributes(patch))]
pub fn derive_patchable(input: TokenStream) -> TokenStream {
	patchable::derive_patchable(input)
}
