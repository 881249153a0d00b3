//! Partial updates of struct members by name.
//!
//! A patch is a map from member name to [`PatchValue`]. Applying it:
//! - matches keys to public, writable members regardless of case,
//! - coerces textual identifiers and timestamps to the member's type,
//! - writes the value through the member's setter.
//!
//! Member tables are built once per type and cached for the process.
//!
//! ```ignore
//! use patcher::Patchable;
//!
//! #[derive(Default, Patchable)]
//! #[patch(rename_all = "PascalCase")]
//! pub struct Order {
//!     pub id: uuid::Uuid,
//!     pub note: Option<String>,
//! }
//!
//! let mut order = Order::default();
//! patcher::apply(&mut order, [("ID", "3fa85f64-5717-4562-b3fc-2c963f66afa6")])?;
//! ```

use std::sync::OnceLock;

// Lets the derive's `::patcher::` paths resolve inside this crate's own tests.
extern crate self as patcher;

mod coerce;
mod config;
mod error;
mod field;
mod member;
mod patch;
mod resolver;
mod value;

pub use coerce::{TimestampParser, coerce, parse_uuid};
pub use config::PatchConfig;
pub use error::{CoerceError, PatchError, Result};
pub use field::{MemberType, PatchField, ValueKind};
pub use member::{Access, MemberDef, MemberKind, Patchable, Setter};
#[cfg(feature = "derive")]
pub use patcher_macros::Patchable;
pub use patch::Patcher;
pub use resolver::{MemberCache, MemberTable, fold_key};
pub use value::PatchValue;

/// Process-wide patcher, created on first use.
static GLOBAL: OnceLock<Patcher> = OnceLock::new();

/// Configures the process-wide patcher.
///
/// Must run before the first [`global`] call to take effect. Subsequent
/// calls are no-ops (the first configuration wins).
pub fn init_global(config: PatchConfig) {
	let _ = GLOBAL.set(Patcher::with_config(config));
}

/// The process-wide patcher.
pub fn global() -> &'static Patcher {
	GLOBAL.get_or_init(Patcher::new)
}

/// Applies `patch` to `target` with the process-wide patcher.
///
/// See [`Patcher::apply`].
pub fn apply<T, I, K, V>(target: &mut T, patch: I) -> Result<()>
where
	T: Patchable,
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: Into<PatchValue>,
{
	global().apply(target, patch)
}

/// Applies a JSON object to `target` with the process-wide patcher.
pub fn apply_json<T: Patchable>(target: &mut T, patch: &serde_json::Value) -> Result<()> {
	global().apply_json(target, patch)
}
