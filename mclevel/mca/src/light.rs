//! Per block ID light properties used when recomputing height maps.

/// Looks up how much light a block with the given 12-bit ID absorbs. Zero means fully transparent.
pub trait Opacity {
	fn opacity(&self, id: u16) -> u8;
}

impl<F> Opacity for F where F: Fn(u16) -> u8 {
	fn opacity(&self, id: u16) -> u8 {
		self(id)
	}
}

/// Opacity and light emission for every 12-bit block ID. IDs that were never set are transparent and
/// emit no light.
#[derive(Clone)]
pub struct BlockLightTable {
	opacity: Box<[u8; 4096]>,
	emission: Box<[u8; 4096]>
}

impl BlockLightTable {
	pub fn new() -> Self {
		BlockLightTable {
			opacity: Box::new([0; 4096]),
			emission: Box::new([0; 4096])
		}
	}

	/// Sets both properties of a block. IDs are truncated to 12 bits, and both values to the 0-255 range
	/// used by the game's light tables.
	pub fn set(&mut self, id: u16, opacity: u8, emission: u8) {
		let id = (id & 0xFFF) as usize;

		self.opacity[id] = opacity;
		self.emission[id] = emission;
	}

	pub fn emission(&self, id: u16) -> u8 {
		self.emission[(id & 0xFFF) as usize]
	}
}

impl Opacity for BlockLightTable {
	fn opacity(&self, id: u16) -> u8 {
		self.opacity[(id & 0xFFF) as usize]
	}
}

impl Default for BlockLightTable {
	fn default() -> Self {
		BlockLightTable::new()
	}
}
