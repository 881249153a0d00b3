//! Declared member types and the assignment conversion into them.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::PatchValue;

/// Semantic type tag of a member, used to pick a coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// Textual member.
	Text,
	/// Boolean member.
	Bool,
	/// Integer member of any width.
	Integer,
	/// Floating point member.
	Float,
	/// Globally unique identifier.
	Uuid,
	/// Point in calendar time.
	Timestamp,
	/// Opaque structured member.
	Structured,
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ValueKind::Text => "text",
			ValueKind::Bool => "bool",
			ValueKind::Integer => "integer",
			ValueKind::Float => "float",
			ValueKind::Uuid => "uuid",
			ValueKind::Timestamp => "timestamp",
			ValueKind::Structured => "structured",
		})
	}
}

/// The declared type of a settable member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberType {
	/// Semantic tag driving coercion.
	pub kind: ValueKind,
	/// Whether [`PatchValue::Null`] is assignable.
	pub nullable: bool,
	/// Full Rust type name, for diagnostics.
	pub rust_type: &'static str,
}

impl MemberType {
	/// Describes the Rust type `V`.
	pub fn of<V: PatchField>() -> Self {
		Self {
			kind: V::KIND,
			nullable: V::NULLABLE,
			rust_type: std::any::type_name::<V>(),
		}
	}
}

/// A Rust type that can be the declared type of a settable member.
///
/// `from_patch` is the assignment step: it accepts values of a compatible
/// runtime type and hands anything else back so the caller can report a
/// type mismatch. It never parses text; that is the coercer's job.
pub trait PatchField: Sized {
	/// Semantic tag of the type.
	const KIND: ValueKind;
	/// Whether `Null` is assignable.
	const NULLABLE: bool = false;

	/// Converts an already coerced value, or returns it unchanged on mismatch.
	fn from_patch(value: PatchValue) -> Result<Self, PatchValue>;
}

impl<V: PatchField> PatchField for Option<V> {
	const KIND: ValueKind = V::KIND;
	const NULLABLE: bool = true;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		match value {
			PatchValue::Null => Ok(None),
			other => V::from_patch(other).map(Some),
		}
	}
}

impl PatchField for String {
	const KIND: ValueKind = ValueKind::Text;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		match value {
			PatchValue::Text(s) => Ok(s),
			other => Err(other),
		}
	}
}

impl PatchField for bool {
	const KIND: ValueKind = ValueKind::Bool;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		match value {
			PatchValue::Bool(b) => Ok(b),
			other => Err(other),
		}
	}
}

macro_rules! impl_patch_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl PatchField for $ty {
				const KIND: ValueKind = ValueKind::Integer;

				fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
					match value {
						PatchValue::Int(i) => <$ty>::try_from(i).map_err(|_| PatchValue::Int(i)),
						PatchValue::UInt(u) => <$ty>::try_from(u).map_err(|_| PatchValue::UInt(u)),
						other => Err(other),
					}
				}
			}
		)*
	};
}

impl_patch_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl PatchField for f64 {
	const KIND: ValueKind = ValueKind::Float;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		match value {
			PatchValue::Float(f) => Ok(f),
			PatchValue::Int(i) => Ok(i as f64),
			PatchValue::UInt(u) => Ok(u as f64),
			other => Err(other),
		}
	}
}

/// Finite values beyond the `f32` range are rejected rather than saturated.
impl PatchField for f32 {
	const KIND: ValueKind = ValueKind::Float;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		let wide = f64::from_patch(value)?;
		let narrow = wide as f32;
		if wide.is_finite() && narrow.is_infinite() {
			return Err(PatchValue::Float(wide));
		}
		Ok(narrow)
	}
}

impl PatchField for Uuid {
	const KIND: ValueKind = ValueKind::Uuid;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		match value {
			PatchValue::Uuid(id) => Ok(id),
			other => Err(other),
		}
	}
}

impl PatchField for DateTime<FixedOffset> {
	const KIND: ValueKind = ValueKind::Timestamp;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		match value {
			PatchValue::Timestamp(ts) => Ok(ts),
			other => Err(other),
		}
	}
}

impl PatchField for DateTime<Utc> {
	const KIND: ValueKind = ValueKind::Timestamp;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		DateTime::<FixedOffset>::from_patch(value).map(|ts| ts.with_timezone(&Utc))
	}
}

/// Keeps the wall-clock time as written, dropping the offset.
impl PatchField for NaiveDateTime {
	const KIND: ValueKind = ValueKind::Timestamp;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		DateTime::<FixedOffset>::from_patch(value).map(|ts| ts.naive_local())
	}
}

impl PatchField for NaiveDate {
	const KIND: ValueKind = ValueKind::Timestamp;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		DateTime::<FixedOffset>::from_patch(value).map(|ts| ts.date_naive())
	}
}

/// Accepts any value with a JSON form.
impl PatchField for serde_json::Value {
	const KIND: ValueKind = ValueKind::Structured;
	const NULLABLE: bool = true;

	fn from_patch(value: PatchValue) -> Result<Self, PatchValue> {
		value.into_json()
	}
}
