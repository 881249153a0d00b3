//! Per-type member tables and the process-scoped cache that holds them.
//!
//! # Invariants
//!
//! - A table only contains public members with a setter.
//! - Keys are Unicode lower-cased; the first member to claim a key wins.
//! - Readers are wait-free (`ArcSwap` load + immutable table reads).
//! - Concurrent first population of one type publishes exactly one table;
//!   the losing writer adopts it.

use std::any::{Any, TypeId};
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;

use crate::member::{MemberDef, Patchable};

/// Case-folded lookup key.
pub fn fold_key(key: &str) -> String {
	key.to_lowercase()
}

/// The settable members of one type.
pub struct MemberTable<T> {
	by_key: HashMap<Box<str>, Arc<MemberDef<T>>>,
	ordered: Vec<Arc<MemberDef<T>>>,
}

impl<T: Patchable> MemberTable<T> {
	/// Builds the table from `T::members()`.
	pub fn build() -> Self {
		let mut by_key: HashMap<Box<str>, Arc<MemberDef<T>>> = HashMap::default();
		let mut ordered = Vec::new();
		let mut skipped = 0usize;

		for def in T::members() {
			if !def.is_settable() {
				skipped += 1;
				continue;
			}
			let def = Arc::new(def);
			let key = fold_key(def.name());
			if let Some(existing) = by_key.get(key.as_str()) {
				tracing::debug!(
					ty = std::any::type_name::<T>(),
					key = %key,
					kept = existing.name(),
					ignored = def.name(),
					"member name collision"
				);
				continue;
			}
			by_key.insert(key.into_boxed_str(), Arc::clone(&def));
			ordered.push(def);
		}

		tracing::debug!(
			ty = std::any::type_name::<T>(),
			settable = ordered.len(),
			skipped,
			"built member table"
		);
		Self { by_key, ordered }
	}
}

impl<T> MemberTable<T> {
	/// Looks up a member by any casing of its name.
	pub fn get(&self, key: &str) -> Option<&Arc<MemberDef<T>>> {
		self.by_key.get(fold_key(key).as_str())
	}

	/// Settable members in declaration order.
	pub fn members(&self) -> &[Arc<MemberDef<T>>] {
		&self.ordered
	}

	pub fn len(&self) -> usize {
		self.ordered.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ordered.is_empty()
	}
}

type ErasedTable = Arc<dyn Any + Send + Sync>;

/// Type member cache keyed by [`TypeId`].
///
/// Entries are derived from `Patchable::members` and never evicted.
pub struct MemberCache {
	tables: ArcSwap<HashMap<TypeId, ErasedTable>>,
}

impl Default for MemberCache {
	fn default() -> Self {
		Self::new()
	}
}

impl MemberCache {
	pub fn new() -> Self {
		Self {
			tables: ArcSwap::from_pointee(HashMap::default()),
		}
	}

	/// Returns the table for `T`, building and publishing it on first use.
	pub fn table<T: Patchable>(&self) -> Arc<MemberTable<T>> {
		let id = TypeId::of::<T>();
		if let Some(table) = self.tables.load().get(&id).and_then(downcast::<T>) {
			return table;
		}

		let built = Arc::new(MemberTable::<T>::build());
		let erased: ErasedTable = built.clone();

		loop {
			let cur = self.tables.load_full();
			if let Some(table) = cur.get(&id).and_then(downcast::<T>) {
				return table;
			}

			let mut next = (*cur).clone();
			next.insert(id, Arc::clone(&erased));
			let prev = self.tables.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				return built;
			}
		}
	}

	/// Resolves `key` against `T`'s settable members.
	pub fn resolve<T: Patchable>(&self, key: &str) -> Option<Arc<MemberDef<T>>> {
		self.table::<T>().get(key).cloned()
	}

	/// Number of types with a published table.
	pub fn len(&self) -> usize {
		self.tables.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.load().is_empty()
	}
}

fn downcast<T: Patchable>(erased: &ErasedTable) -> Option<Arc<MemberTable<T>>> {
	Arc::clone(erased).downcast::<MemberTable<T>>().ok()
}
