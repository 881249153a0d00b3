//! Value coercion against a member's declared type.
//!
//! Only textual input is ever converted, and only towards identifier and
//! timestamp members. Everything else passes through untouched and is
//! checked when the member's setter runs.

mod timestamp;

use uuid::Uuid;

pub use self::timestamp::TimestampParser;
use crate::error::CoerceError;
use crate::field::{MemberType, ValueKind};
use crate::value::PatchValue;

/// Length of the hyphenated identifier form.
const HYPHENATED_LEN: usize = 36;

/// Converts `raw` towards `ty` where a well-defined textual coercion exists.
pub fn coerce(ty: &MemberType, raw: PatchValue, timestamps: &TimestampParser) -> Result<PatchValue, CoerceError> {
	match (raw, ty.kind) {
		(PatchValue::Text(s), ValueKind::Uuid) => parse_uuid(&s)
			.map(PatchValue::Uuid)
			.map_err(|reason| CoerceError {
				expected: ValueKind::Uuid,
				input: s,
				reason,
			}),
		(PatchValue::Text(s), ValueKind::Timestamp) => timestamps
			.parse(&s)
			.map(PatchValue::Timestamp)
			.map_err(|reason| CoerceError {
				expected: ValueKind::Timestamp,
				input: s,
				reason,
			}),
		(raw, _) => Ok(raw),
	}
}

/// Parses the canonical `8-4-4-4-12` hex form.
pub fn parse_uuid(s: &str) -> Result<Uuid, String> {
	if s.len() != HYPHENATED_LEN {
		return Err(format!(
			"expected {HYPHENATED_LEN} characters in hyphenated form, found {}",
			s.len()
		));
	}
	Uuid::try_parse(s).map_err(|e| e.to_string())
}
