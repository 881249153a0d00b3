//! Patcher configuration.

use serde::Deserialize;

/// Tunables for a [`Patcher`](crate::Patcher).
///
/// Deserializable so hosts can embed it in their own config files:
///
/// ```ignore
/// let config: PatchConfig = serde_json::from_str(r#"{ "timestamp_formats": ["%d.%m.%Y"] }"#)?;
/// patcher::init_global(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
	/// Emit a `trace` event for every skipped unknown key.
	pub log_unknown_keys: bool,
	/// Extra `chrono` strftime formats, tried after the built-in ones.
	pub timestamp_formats: Vec<String>,
}

impl Default for PatchConfig {
	fn default() -> Self {
		Self {
			log_unknown_keys: true,
			timestamp_formats: Vec::new(),
		}
	}
}
