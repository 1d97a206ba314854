use crate::position::ColumnPosition;
use rustc_hash::FxHashMap;
use spin::RwLock;
use std::sync::Arc;

/// A column that may be read and modified by several threads at once.
pub type Handle<T> = Arc<RwLock<T>>;

/// A sparse store of columns keyed by their position on the global grid.
///
/// The index itself is guarded by one coarse lock that is only held while looking up or inserting a
/// handle. Each column then carries its own lock, so work on different columns never contends.
pub struct SharedWorld<T> {
	columns: RwLock<FxHashMap<u64, Handle<T>>>
}

impl<T> SharedWorld<T> {
	pub fn new() -> Self {
		SharedWorld {
			columns: RwLock::new(FxHashMap::default())
		}
	}

	/// Returns the column at the position, if one was created or inserted before.
	pub fn get(&self, position: ColumnPosition) -> Option<Handle<T>> {
		self.columns.read().get(&position.key()).cloned()
	}

	/// Returns the column at the position, creating it with `create` if it is absent.
	/// Racing callers for the same position all receive the same column, and `create` runs at most once
	/// for a stored column.
	pub fn get_or_create_with<F>(&self, position: ColumnPosition, create: F) -> Handle<T> where F: FnOnce() -> T {
		let key = position.key();

		if let Some(column) = self.columns.read().get(&key) {
			return column.clone();
		}

		self.columns.write()
			.entry(key)
			.or_insert_with(|| Arc::new(RwLock::new(create())))
			.clone()
	}

	/// Stores a column at the position, returning the column it replaced.
	pub fn insert(&self, position: ColumnPosition, column: T) -> Option<Handle<T>> {
		self.columns.write().insert(position.key(), Arc::new(RwLock::new(column)))
	}

	pub fn remove(&self, position: ColumnPosition) -> Option<Handle<T>> {
		self.columns.write().remove(&position.key())
	}

	pub fn contains(&self, position: ColumnPosition) -> bool {
		self.columns.read().contains_key(&position.key())
	}

	pub fn len(&self) -> usize {
		self.columns.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.read().is_empty()
	}

	/// Returns the positions of every stored column, in no particular order.
	pub fn positions(&self) -> Vec<ColumnPosition> {
		self.columns.read().keys().map(|&key| ColumnPosition::from_key(key)).collect()
	}

	/// Takes a snapshot of every stored column, in no particular order.
	/// Columns inserted after the snapshot is taken are not part of it.
	pub fn snapshot(&self) -> Vec<(ColumnPosition, Handle<T>)> {
		self.columns.read()
			.iter()
			.map(|(&key, column)| (ColumnPosition::from_key(key), column.clone()))
			.collect()
	}
}

impl<T> SharedWorld<T> where T: Default {
	/// Returns the column at the position, creating a default column if it is absent.
	pub fn get_or_create(&self, position: ColumnPosition) -> Handle<T> {
		self.get_or_create_with(position, T::default)
	}
}

impl<T> Default for SharedWorld<T> {
	fn default() -> Self {
		SharedWorld::new()
	}
}

#[cfg(test)]
mod test {
	use crate::position::ColumnPosition;
	use crate::world::SharedWorld;
	use std::sync::Arc;
	use std::thread;

	#[test]
	fn test_get_or_create() {
		let world = SharedWorld::<u32>::new();
		let position = ColumnPosition::new(-4, 9);

		assert!(world.get(position).is_none());

		*world.get_or_create(position).write() = 7;
		*world.get_or_create_with(position, || 99).write() += 1;

		assert_eq!(*world.get(position).unwrap().read(), 8);
		assert_eq!(world.len(), 1);
	}

	#[test]
	fn test_insert_replaces() {
		let world = SharedWorld::new();
		let position = ColumnPosition::new(0, 0);

		assert!(world.insert(position, 'a').is_none());

		let old = world.insert(position, 'b').unwrap();

		assert_eq!(*old.read(), 'a');
		assert_eq!(*world.get(position).unwrap().read(), 'b');
	}

	#[test]
	fn test_snapshot() {
		let world = SharedWorld::new();

		for x in -3..3 {
			world.insert(ColumnPosition::new(x, x * 2), x);
		}

		let mut snapshot: Vec<_> = world.snapshot().into_iter().map(|(position, column)| (position, *column.read())).collect();
		snapshot.sort();

		assert_eq!(snapshot.len(), 6);
		assert_eq!(snapshot[0], (ColumnPosition::new(-3, -6), -3));

		let mut positions = world.positions();
		positions.sort();

		assert_eq!(positions, snapshot.iter().map(|&(position, _)| position).collect::<Vec<_>>());
	}

	#[test]
	fn test_concurrent_creation() {
		let world = Arc::new(SharedWorld::<u32>::new());

		let workers: Vec<_> = (0..8).map(|_| {
			let world = world.clone();

			thread::spawn(move || {
				for x in 0..64 {
					*world.get_or_create(ColumnPosition::new(x, x >> 3)).write() += 1;
				}
			})
		}).collect();

		for worker in workers {
			worker.join().unwrap();
		}

		assert_eq!(world.len(), 64);

		for (_, column) in world.snapshot() {
			assert_eq!(*column.read(), 8);
		}
	}
}
