//! Patch application.

use std::sync::Arc;

use crate::coerce::{TimestampParser, coerce};
use crate::config::PatchConfig;
use crate::error::{PatchError, Result};
use crate::member::{MemberDef, Patchable};
use crate::resolver::MemberCache;
use crate::value::PatchValue;

/// Applies patch maps to [`Patchable`] values.
///
/// Owns the type member cache; one instance is normally shared for the
/// whole process (see [`crate::global`]).
pub struct Patcher {
	cache: MemberCache,
	timestamps: TimestampParser,
	config: PatchConfig,
}

impl Default for Patcher {
	fn default() -> Self {
		Self::new()
	}
}

impl Patcher {
	/// Creates a patcher with the default configuration and an empty cache.
	pub fn new() -> Self {
		Self::with_config(PatchConfig::default())
	}

	pub fn with_config(config: PatchConfig) -> Self {
		Self {
			cache: MemberCache::new(),
			timestamps: TimestampParser::new(config.timestamp_formats.clone()),
			config,
		}
	}

	pub fn config(&self) -> &PatchConfig {
		&self.config
	}

	/// Writes each entry of `patch` into the matching settable member of `target`.
	///
	/// Keys match member names case-insensitively. Unknown keys are skipped.
	/// The first coercion or assignment failure aborts the remaining entries;
	/// members written before it keep their new values.
	pub fn apply<T, I, K, V>(&self, target: &mut T, patch: I) -> Result<()>
	where
		T: Patchable,
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<PatchValue>,
	{
		let table = self.cache.table::<T>();
		for (key, raw) in patch {
			let key = key.as_ref();
			let Some(member) = table.get(key) else {
				if self.config.log_unknown_keys {
					tracing::trace!(ty = std::any::type_name::<T>(), key, "skipping unknown patch key");
				}
				continue;
			};
			self.write(member, target, raw.into())?;
		}
		Ok(())
	}

	/// Applies a JSON object as a patch map.
	pub fn apply_json<T: Patchable>(&self, target: &mut T, patch: &serde_json::Value) -> Result<()> {
		let serde_json::Value::Object(entries) = patch else {
			return Err(PatchError::NotAnObject {
				got: json_type_name(patch),
			});
		};
		self.apply(target, entries.iter().map(|(k, v)| (k.as_str(), v.clone())))
	}

	/// Resolves `key` to a settable member of `T`.
	pub fn resolve<T: Patchable>(&self, key: &str) -> Option<Arc<MemberDef<T>>> {
		self.cache.resolve::<T>(key)
	}

	/// Settable members of `T`, in declaration order.
	pub fn settable_members<T: Patchable>(&self) -> Vec<Arc<MemberDef<T>>> {
		self.cache.table::<T>().members().to_vec()
	}

	fn write<T>(&self, member: &MemberDef<T>, target: &mut T, raw: PatchValue) -> Result<()> {
		// Settable members always carry a declared type.
		let Some(ty) = member.ty() else {
			return Ok(());
		};
		let value = coerce(&ty, raw, &self.timestamps).map_err(|source| PatchError::Format {
			member: member.name().to_string(),
			source,
		})?;
		tracing::trace!(member = member.name(), value = value.type_name(), "writing member");
		member.write(target, value)
	}
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "bool",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}
