//! Error types for patch application.

use thiserror::Error;

use crate::field::ValueKind;

/// Errors that abort a patch.
///
/// Unknown keys are never reported here: they are skipped silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
	/// A textual value could not be parsed into the member's declared type.
	#[error("invalid value for member '{member}': {source}")]
	Format {
		/// Declared name of the member being written.
		member: String,
		/// The underlying parse failure.
		#[source]
		source: CoerceError,
	},

	/// The value's runtime type cannot be assigned to the member.
	#[error("type mismatch for member '{member}': expected {expected}, got {got}")]
	TypeMismatch {
		/// Declared name of the member being written.
		member: String,
		/// The member's declared Rust type.
		expected: &'static str,
		/// The type name of the rejected value.
		got: &'static str,
	},

	/// A JSON patch document was not an object.
	#[error("patch document must be a JSON object, got {got}")]
	NotAnObject {
		/// JSON type of the document that was supplied.
		got: &'static str,
	},
}

/// A textual value that could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{input}' as {expected}: {reason}")]
pub struct CoerceError {
	/// The semantic type the value was coerced towards.
	pub expected: ValueKind,
	/// The offending input.
	pub input: String,
	/// Human-readable parser message.
	pub reason: String,
}

/// Result type for patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn format_error_names_member_and_input() {
		let err = PatchError::Format {
			member: "GuidProperty".to_string(),
			source: CoerceError {
				expected: ValueKind::Uuid,
				input: "nope".to_string(),
				reason: "invalid length".to_string(),
			},
		};

		let msg = err.to_string();
		assert!(msg.contains("GuidProperty"));
		assert!(msg.contains("'nope'"));
		assert!(std::error::Error::source(&err).is_some());
	}

	#[test]
	fn type_mismatch_display() {
		let err = PatchError::TypeMismatch {
			member: "Count".to_string(),
			expected: "i32",
			got: "string",
		};
		assert_eq!(
			err.to_string(),
			"type mismatch for member 'Count': expected i32, got string"
		);
	}
}
