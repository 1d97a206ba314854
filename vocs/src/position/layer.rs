/// A position within a 16x16 horizontal layer, stored as its `(Z<<4) | X` index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerPosition(u8);

impl LayerPosition {
	/// Creates a new LayerPosition from the X and Z components.
	/// ### Out of bounds behavior
	/// If the arguments are out of bounds, then they are truncated.
	pub fn new(x: u8, z: u8) -> Self {
		LayerPosition(((z&0xF) << 4) | (x&0xF))
	}

	/// Creates a LayerPosition from block coordinates relative to any 16-aligned origin.
	pub fn from_global(x: i32, z: i32) -> Self {
		LayerPosition::new((x & 15) as u8, (z & 15) as u8)
	}

	/// Creates a new LayerPosition from a ZX index.
	pub fn from_zx(zx: u8) -> Self {
		LayerPosition(zx)
	}

	/// Returns the X component.
	pub fn x(&self) -> u8 {
		self.0 & 0x0F
	}

	/// Returns the Z component.
	pub fn z(&self) -> u8 {
		self.0 >> 4
	}

	/// Returns the index represented as `(Z<<4) | X`.
	pub fn zx(&self) -> u8 {
		self.0
	}

	/// Iterates every position of the layer in ZX order.
	pub fn enumerate() -> impl Iterator<Item=LayerPosition> {
		(0..=255u8).map(LayerPosition)
	}
}
