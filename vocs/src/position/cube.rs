use crate::position::LayerPosition;
use std::fmt::{Debug, Display, Formatter, Result};

/// A position within a 16x16x16 cube, stored as its `(Y<<8) | (Z<<4) | X` index.
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct CubePosition(u16);

impl CubePosition {
	/// Creates a new CubePosition from the X, Y, and Z components.
	/// ### Out of bounds behavior
	/// If the arguments are out of bounds, then they are truncated.
	pub fn new(x: u8, y: u8, z: u8) -> Self {
		CubePosition(
			(((y&0xF) as u16) << 8) |
			(((z&0xF) as u16) << 4) |
			 ((x&0xF) as u16)
		)
	}

	/// Creates a CubePosition from coordinates relative to any origin that is aligned to 16 blocks,
	/// such as the chunk column, region, or world. Only the low 4 bits of each component are kept.
	pub fn from_global(x: i32, y: i32, z: i32) -> Self {
		CubePosition::new((x & 15) as u8, (y & 15) as u8, (z & 15) as u8)
	}

	/// Creates a new CubePosition from the Y component and LayerPosition containing the X and Z components.
	pub fn from_layer(y: u8, layer: LayerPosition) -> Self {
		CubePosition(
			(((y&0xF) as u16) << 8) | (layer.zx() as u16)
		)
	}

	/// Creates a new CubePosition from a YZX index.
	/// ### Out of bounds behavior
	/// If the index is out of bounds, it is truncated.
	pub fn from_yzx(yzx: u16) -> Self {
		CubePosition(yzx % 4096)
	}

	/// Returns the X component.
	pub fn x(&self) -> u8 {
		(self.0 & 0x00F) as u8
	}

	/// Returns the Z component.
	pub fn z(&self) -> u8 {
		((self.0 & 0x0F0) >> 4) as u8
	}

	/// Returns the Y component.
	pub fn y(&self) -> u8 {
		((self.0 & 0xF00) >> 8) as u8
	}

	/// Returns the index represented as `(Y<<8) | (Z<<4) | X`.
	pub fn yzx(&self) -> u16 {
		self.0
	}

	/// Returns the X and Z components as a LayerPosition.
	pub fn layer(&self) -> LayerPosition {
		LayerPosition::from_zx((self.0 & 255) as u8)
	}

	/// Iterates every position of the cube in YZX order.
	pub fn enumerate() -> impl Iterator<Item=CubePosition> {
		(0..4096).map(CubePosition)
	}
}

impl Display for CubePosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
	}
}

impl Debug for CubePosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "CubePosition {{ x: {}, y: {}, z: {}, yzx: {} }}", self.x(), self.y(), self.z(), self.yzx())
	}
}
