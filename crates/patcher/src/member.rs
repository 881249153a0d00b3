//! Member registration.
//!
//! A [`Patchable`] type lists every member it has, settable or not. The
//! resolver keeps only public members with a setter.

use std::fmt;

use crate::error::PatchError;
use crate::field::{MemberType, PatchField};
use crate::value::PatchValue;

/// Whether a member is a property (setter method) or a plain field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
	/// Written through a setter method.
	Property,
	/// Written by direct assignment.
	Field,
}

/// Visibility of a member to patch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
	/// Reachable by patch keys.
	#[default]
	Public,
	/// Never written, whatever the key.
	Private,
}

type WriteFn<T> = dyn Fn(&mut T, PatchValue) -> Result<(), PatchError> + Send + Sync;

/// Type-erased write operation of a member.
pub struct Setter<T> {
	ty: MemberType,
	write: Box<WriteFn<T>>,
}

impl<T> Setter<T> {
	/// Declared type of the member.
	pub fn ty(&self) -> MemberType {
		self.ty
	}
}

/// Types whose members can be patched by name.
///
/// Usually derived with `#[derive(Patchable)]`; a hand-written impl lists
/// members the same way:
///
/// ```ignore
/// impl Patchable for Account {
///     fn members() -> Vec<MemberDef<Self>> {
///         vec![
///             MemberDef::new("Email", MemberKind::Field)
///                 .with_setter(|a: &mut Self, v: String| a.email = v),
///             MemberDef::new("PasswordHash", MemberKind::Field).private(),
///         ]
///     }
/// }
/// ```
pub trait Patchable: 'static {
	/// Every member of the type, in declaration order.
	fn members() -> Vec<MemberDef<Self>>
	where
		Self: Sized;
}

/// A member of `T` as declared by its [`Patchable`] impl.
pub struct MemberDef<T> {
	name: &'static str,
	kind: MemberKind,
	access: Access,
	setter: Option<Setter<T>>,
}

impl<T> MemberDef<T> {
	/// A public member with no setter (get-only property or read-only field).
	pub fn new(name: &'static str, kind: MemberKind) -> Self {
		Self {
			name,
			kind,
			access: Access::Public,
			setter: None,
		}
	}

	/// Attaches a typed setter.
	///
	/// The value handed to `assign` has already been coerced and converted
	/// to `V`; a value that does not convert is a [`PatchError::TypeMismatch`].
	pub fn with_setter<V>(mut self, assign: impl Fn(&mut T, V) + Send + Sync + 'static) -> Self
	where
		T: 'static,
		V: PatchField + 'static,
	{
		let name = self.name;
		let ty = MemberType::of::<V>();
		self.setter = Some(Setter {
			ty,
			write: Box::new(move |target: &mut T, value: PatchValue| {
				let value = V::from_patch(value).map_err(|rejected| PatchError::TypeMismatch {
					member: name.to_string(),
					expected: ty.rust_type,
					got: rejected.type_name(),
				})?;
				assign(target, value);
				Ok(())
			}),
		});
		self
	}

	/// Marks the member as not reachable by patch keys.
	pub fn private(mut self) -> Self {
		self.access = Access::Private;
		self
	}

	/// Declared name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Property or field.
	pub fn kind(&self) -> MemberKind {
		self.kind
	}

	/// Visibility to patch keys.
	pub fn access(&self) -> Access {
		self.access
	}

	/// Declared type, if the member has a setter.
	pub fn ty(&self) -> Option<MemberType> {
		self.setter.as_ref().map(Setter::ty)
	}

	/// Public and writable.
	pub fn is_settable(&self) -> bool {
		self.access == Access::Public && self.setter.is_some()
	}

	/// Writes an already coerced value into `target`.
	///
	/// Members without a setter ignore the write.
	pub fn write(&self, target: &mut T, value: PatchValue) -> Result<(), PatchError> {
		match &self.setter {
			Some(setter) => (setter.write)(target, value),
			None => Ok(()),
		}
	}
}

impl<T> fmt::Debug for MemberDef<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberDef")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("access", &self.access)
			.field("ty", &self.ty())
			.finish()
	}
}
