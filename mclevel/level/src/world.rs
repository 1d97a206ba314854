use crate::properties::WorldProperties;
use mca::{Chunk, Opacity};
use rayon::prelude::*;
use vocs::nibbles::u4;
use vocs::position::{ColumnPosition, RegionPosition};
use vocs::world::{Handle, SharedWorld};

/// The chunks of one dimension, keyed by column position.
///
/// Every method takes `&self`, so region workers on several threads can fill or drain the same world.
pub struct World {
	properties: WorldProperties,
	chunks: SharedWorld<Chunk>
}

impl World {
	pub fn new(properties: WorldProperties) -> Self {
		World {
			properties,
			chunks: SharedWorld::new()
		}
	}

	pub fn properties(&self) -> WorldProperties {
		self.properties
	}

	/// Returns the chunk at the position, creating an empty one if it does not exist yet.
	pub fn get_or_create(&self, position: ColumnPosition) -> Handle<Chunk> {
		let section_count = self.properties.section_count();

		self.chunks.get_or_create_with(position, || Chunk::new(section_count))
	}

	pub fn get_if_present(&self, position: ColumnPosition) -> Option<Handle<Chunk>> {
		self.chunks.get(position)
	}

	/// Stores a chunk, replacing any chunk already at the position.
	pub fn insert(&self, position: ColumnPosition, chunk: Chunk) -> Option<Handle<Chunk>> {
		self.chunks.insert(position, chunk)
	}

	/// Takes a snapshot of every chunk, in no particular order.
	pub fn all_chunks(&self) -> Vec<(ColumnPosition, Handle<Chunk>)> {
		self.chunks.snapshot()
	}

	pub fn len(&self) -> usize {
		self.chunks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chunks.is_empty()
	}

	/// Returns each 32x32 region window holding at least one chunk, sorted.
	pub fn region_windows(&self) -> Vec<RegionPosition> {
		let mut windows: Vec<RegionPosition> = self.chunks.positions().iter().map(ColumnPosition::region).collect();

		windows.sort();
		windows.dedup();

		windows
	}

	/// Returns the block ID at global block coordinates, or `None` if the chunk is absent or `y` is
	/// above the world.
	pub fn block_id(&self, x: i32, y: u32, z: i32) -> Option<u16> {
		if y >= self.properties.height() {
			return None;
		}

		let chunk = self.get_if_present(ColumnPosition::from_block(x, z))?;
		let chunk = chunk.read();

		Some(chunk.block_id((x & 15) as u8, y, (z & 15) as u8))
	}

	/// Sets a block at global block coordinates, creating its chunk if needed. Writes above the world
	/// are ignored and reported by returning false.
	pub fn set_block(&self, x: i32, y: u32, z: i32, id: u16, data: u4) -> bool {
		if y >= self.properties.height() {
			return false;
		}

		let chunk = self.get_or_create(ColumnPosition::from_block(x, z));
		chunk.write().set_block((x & 15) as u8, y, (z & 15) as u8, id, data);

		true
	}

	/// Recomputes the height map of every chunk.
	pub fn refresh_height_map<O>(&self, opacity: &O) where O: Opacity + Sync + ?Sized {
		self.all_chunks().par_iter().for_each(|(_, chunk)| chunk.write().recompute_height_map(opacity));
	}

	/// Sets every sky light value of every chunk to the maximum.
	pub fn fullbright(&self) {
		self.all_chunks().par_iter().for_each(|(_, chunk)| chunk.write().fullbright());
	}
}

impl Default for World {
	fn default() -> Self {
		World::new(WorldProperties::default())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_get_or_create() {
		let world = World::new(WorldProperties::new(64).unwrap());
		let position = ColumnPosition::new(-1, 5);

		assert!(world.get_if_present(position).is_none());

		let created = world.get_or_create(position);

		{
			let chunk = created.read();

			assert_eq!(chunk.section_count(), 4);
			assert!(chunk.heights().iter().all(|&height| height == 0));
			assert!(chunk.biomes().iter().all(|&biome| biome == mca::UNSET_BIOME));
		}

		created.write().set_block(0, 0, 0, 3, u4::new(0));

		assert_eq!(world.get_or_create(position).read().block_id(0, 0, 0), 3);
		assert_eq!(world.len(), 1);
	}

	#[test]
	fn test_global_blocks() {
		let world = World::default();

		assert!(world.set_block(-1, 70, 33, 17, u4::new(2)));
		assert!(!world.set_block(0, 256, 0, 1, u4::new(0)));

		assert_eq!(world.block_id(-1, 70, 33), Some(17));
		assert_eq!(world.block_id(-2, 70, 33), Some(0));
		assert_eq!(world.block_id(100, 70, 100), None);
		assert_eq!(world.block_id(-1, 300, 33), None);

		let chunk = world.get_if_present(ColumnPosition::new(-1, 2)).unwrap();

		assert_eq!(chunk.read().block_data(15, 70, 1), u4::new(2));
	}

	#[test]
	fn test_region_windows() {
		let world = World::default();

		for &(x, z) in &[(0, 0), (31, 31), (32, 0), (-1, -1), (-32, -33)] {
			world.get_or_create(ColumnPosition::new(x, z));
		}

		assert_eq!(world.region_windows(), vec![
			RegionPosition::new(-1, -2),
			RegionPosition::new(-1, -1),
			RegionPosition::new(0, 0),
			RegionPosition::new(1, 0)
		]);
	}

	#[test]
	fn test_refresh_and_fullbright() {
		let world = World::default();
		world.set_block(0, 5, 0, 1, u4::new(0));
		world.set_block(40, 9, 40, 2, u4::new(0));

		world.refresh_height_map(&|id: u16| if id == 1 { 255u8 } else { 0 });
		world.fullbright();

		let first = world.get_if_present(ColumnPosition::new(0, 0)).unwrap();
		let second = world.get_if_present(ColumnPosition::new(2, 2)).unwrap();

		assert_eq!(first.read().height_at(0, 0), 6);
		assert_eq!(second.read().height_at(8, 8), 0);
		assert_eq!(second.read().sky_light(0, 0, 0), u4::MAX);
	}
}
