use std::fmt::{Display, Formatter, Result};

/// The coordinates of a chunk column on the global grid, in units of 16 blocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ColumnPosition {
	x: i32,
	z: i32
}

impl ColumnPosition {
	pub fn new(x: i32, z: i32) -> Self {
		ColumnPosition { x, z }
	}

	/// Returns the column containing the block at the given block coordinates.
	pub fn from_block(x: i32, z: i32) -> Self {
		ColumnPosition::new(x >> 4, z >> 4)
	}

	/// Creates a ColumnPosition from a key produced by `key`.
	pub fn from_key(key: u64) -> Self {
		ColumnPosition::new(key as u32 as i32, (key >> 32) as u32 as i32)
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn z(&self) -> i32 {
		self.z
	}

	/// Packs both coordinates into one 64-bit key, represented as `(Z<<32) | X`.
	pub fn key(&self) -> u64 {
		((self.z as u32 as u64) << 32) | (self.x as u32 as u64)
	}

	/// Returns the 32x32 region window containing this column.
	pub fn region(&self) -> RegionPosition {
		RegionPosition::new(self.x >> 5, self.z >> 5)
	}

	/// Returns the position of this column inside its region window, each component in 0..32.
	pub fn local_in_region(&self) -> (u8, u8) {
		((self.x & 31) as u8, (self.z & 31) as u8)
	}
}

impl Display for ColumnPosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "({}, {})", self.x, self.z)
	}
}

/// The coordinates of a 32x32 window of chunk columns, the unit stored in one region file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct RegionPosition {
	x: i32,
	z: i32
}

impl RegionPosition {
	pub fn new(x: i32, z: i32) -> Self {
		RegionPosition { x, z }
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn z(&self) -> i32 {
		self.z
	}

	/// Returns the global position of the column at the given local position in this window.
	/// ### Out of bounds behavior
	/// Local components are truncated to 0..32.
	pub fn column(&self, local_x: u8, local_z: u8) -> ColumnPosition {
		ColumnPosition::new(
			(self.x << 5) | (local_x & 31) as i32,
			(self.z << 5) | (local_z & 31) as i32
		)
	}
}

impl Display for RegionPosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "({}, {})", self.x, self.z)
	}
}
