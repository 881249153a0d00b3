//! The tagged payload carried by a patch entry.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// A single patch value.
///
/// Textual input stays [`PatchValue::Text`] until the coercer sees the
/// declared type of the member it is written to.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
	/// Explicit absence. Clears nullable members.
	Null,
	/// Textual value, possibly coerced on write.
	Text(String),
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Unsigned integer above `i64::MAX`.
	UInt(u64),
	/// Floating point value.
	Float(f64),
	/// Native identifier.
	Uuid(Uuid),
	/// Native timestamp.
	Timestamp(DateTime<FixedOffset>),
	/// Arrays, objects and anything else structured.
	Structured(serde_json::Value),
}

impl PatchValue {
	/// Returns true for [`PatchValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, PatchValue::Null)
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			PatchValue::Null => "null",
			PatchValue::Text(_) => "string",
			PatchValue::Bool(_) => "bool",
			PatchValue::Int(_) | PatchValue::UInt(_) => "integer",
			PatchValue::Float(_) => "float",
			PatchValue::Uuid(_) => "uuid",
			PatchValue::Timestamp(_) => "timestamp",
			PatchValue::Structured(_) => "structured",
		}
	}

	/// Converts back into a JSON value.
	///
	/// Non-finite floats have no JSON form and are handed back unchanged.
	pub fn into_json(self) -> Result<serde_json::Value, PatchValue> {
		Ok(match self {
			PatchValue::Null => serde_json::Value::Null,
			PatchValue::Text(s) => serde_json::Value::String(s),
			PatchValue::Bool(b) => serde_json::Value::Bool(b),
			PatchValue::Int(i) => serde_json::Value::from(i),
			PatchValue::UInt(u) => serde_json::Value::from(u),
			PatchValue::Float(f) => match serde_json::Number::from_f64(f) {
				Some(n) => serde_json::Value::Number(n),
				None => return Err(PatchValue::Float(f)),
			},
			PatchValue::Uuid(id) => serde_json::Value::String(id.hyphenated().to_string()),
			PatchValue::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
			PatchValue::Structured(v) => v,
		})
	}
}

impl From<&str> for PatchValue {
	fn from(v: &str) -> Self {
		PatchValue::Text(v.to_string())
	}
}

impl From<String> for PatchValue {
	fn from(v: String) -> Self {
		PatchValue::Text(v)
	}
}

impl From<bool> for PatchValue {
	fn from(v: bool) -> Self {
		PatchValue::Bool(v)
	}
}

macro_rules! impl_from_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for PatchValue {
				fn from(v: $ty) -> Self {
					PatchValue::Int(i64::from(v))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for PatchValue {
	fn from(v: u64) -> Self {
		i64::try_from(v).map_or(PatchValue::UInt(v), PatchValue::Int)
	}
}

impl From<usize> for PatchValue {
	fn from(v: usize) -> Self {
		PatchValue::from(v as u64)
	}
}

impl From<isize> for PatchValue {
	fn from(v: isize) -> Self {
		PatchValue::Int(v as i64)
	}
}

impl From<f32> for PatchValue {
	fn from(v: f32) -> Self {
		PatchValue::Float(f64::from(v))
	}
}

impl From<f64> for PatchValue {
	fn from(v: f64) -> Self {
		PatchValue::Float(v)
	}
}

impl From<Uuid> for PatchValue {
	fn from(v: Uuid) -> Self {
		PatchValue::Uuid(v)
	}
}

impl From<DateTime<FixedOffset>> for PatchValue {
	fn from(v: DateTime<FixedOffset>) -> Self {
		PatchValue::Timestamp(v)
	}
}

impl From<DateTime<Utc>> for PatchValue {
	fn from(v: DateTime<Utc>) -> Self {
		PatchValue::Timestamp(v.fixed_offset())
	}
}

/// Naive timestamps are taken as UTC.
impl From<NaiveDateTime> for PatchValue {
	fn from(v: NaiveDateTime) -> Self {
		PatchValue::Timestamp(v.and_utc().fixed_offset())
	}
}

impl From<NaiveDate> for PatchValue {
	fn from(v: NaiveDate) -> Self {
		PatchValue::Timestamp(v.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
	}
}

impl<V: Into<PatchValue>> From<Option<V>> for PatchValue {
	fn from(v: Option<V>) -> Self {
		v.map_or(PatchValue::Null, Into::into)
	}
}

impl From<serde_json::Value> for PatchValue {
	fn from(v: serde_json::Value) -> Self {
		match v {
			serde_json::Value::Null => PatchValue::Null,
			serde_json::Value::String(s) => PatchValue::Text(s),
			serde_json::Value::Bool(b) => PatchValue::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					PatchValue::Int(i)
				} else if let Some(u) = n.as_u64() {
					PatchValue::UInt(u)
				} else {
					n.as_f64()
						.map(PatchValue::Float)
						.unwrap_or(PatchValue::Structured(serde_json::Value::Number(n)))
				}
			}
			other => PatchValue::Structured(other),
		}
	}
}
