use crate::blocks;
use crate::{expect_len, odd_length, optional};
use nbt::Compound;
use vocs::nibbles::{pack, unpack_into, u4};
use vocs::position::CubePosition;

/// One 16x16x16 cube of a chunk. Every array is held at full resolution, one entry per block, indexed
/// by `CubePosition::yzx`.
#[derive(Clone, PartialEq)]
pub struct Section {
	blocks: Box<[u16; 4096]>,
	data: Box<[u8; 4096]>,
	block_light: Box<[u8; 4096]>,
	sky_light: Box<[u8; 4096]>
}

impl Section {
	/// Creates a section of air with no light.
	pub fn new() -> Self {
		Section {
			blocks: Box::new([0; 4096]),
			data: Box::new([0; 4096]),
			block_light: Box::new([0; 4096]),
			sky_light: Box::new([0; 4096])
		}
	}

	pub fn block_id(&self, position: CubePosition) -> u16 {
		self.blocks[position.yzx() as usize]
	}

	/// Sets the block ID at the position. Only the low 12 bits are kept.
	pub fn set_block_id(&mut self, position: CubePosition, id: u16) {
		self.blocks[position.yzx() as usize] = id & 0xFFF;
	}

	pub fn block_data(&self, position: CubePosition) -> u4 {
		u4::new(self.data[position.yzx() as usize])
	}

	pub fn set_block_data(&mut self, position: CubePosition, data: u4) {
		self.data[position.yzx() as usize] = data.raw();
	}

	pub fn block_light(&self, position: CubePosition) -> u4 {
		u4::new(self.block_light[position.yzx() as usize])
	}

	pub fn set_block_light(&mut self, position: CubePosition, light: u4) {
		self.block_light[position.yzx() as usize] = light.raw();
	}

	pub fn sky_light(&self, position: CubePosition) -> u4 {
		u4::new(self.sky_light[position.yzx() as usize])
	}

	pub fn set_sky_light(&mut self, position: CubePosition, light: u4) {
		self.sky_light[position.yzx() as usize] = light.raw();
	}

	pub fn blocks(&self) -> &[u16; 4096] {
		&self.blocks
	}

	/// A section is empty when every block ID is 0. Empty sections are not written to documents.
	pub fn is_empty(&self) -> bool {
		self.blocks.iter().all(|&id| id == 0)
	}

	/// Sets every sky light value to the maximum.
	pub fn fullbright(&mut self) {
		for light in self.sky_light.iter_mut() {
			*light = 15;
		}
	}

	/// Builds the on-disk compound for this section at vertical index `y`.
	pub fn to_compound(&self, y: i8) -> nbt::Result<Compound> {
		let (low, high) = blocks::split(&self.blocks[..]);

		let mut compound = Compound::new()
			.with("Y", y)
			.with("Blocks", low)
			.with("Data", pack(&self.data[..]).map_err(odd_length)?)
			.with("BlockLight", pack(&self.block_light[..]).map_err(odd_length)?)
			.with("SkyLight", pack(&self.sky_light[..]).map_err(odd_length)?);

		if high.iter().any(|&high| high != 0) {
			compound.insert("Add", pack(&high).map_err(odd_length)?);
		}

		Ok(compound)
	}

	/// Reads a section compound, returning its stored vertical index alongside it.
	pub fn from_compound(compound: &Compound) -> nbt::Result<(i8, Section)> {
		let y = compound.i8("Y")?;
		let mut section = Section::new();

		let low = compound.u8_array("Blocks")?;
		expect_len("Blocks", low.len(), 4096)?;

		let merged = match optional(compound.u8_array("Add"))? {
			Some(add) => {
				expect_len("Add", add.len(), 2048)?;

				let mut high = [0u8; 4096];
				unpack_into(add, &mut high);

				blocks::merge(low, &high)
			},
			None => blocks::merge_low(low)
		};

		section.blocks.copy_from_slice(&merged);

		read_nibbles(compound, "Data", &mut section.data)?;
		read_nibbles(compound, "BlockLight", &mut section.block_light)?;
		read_nibbles(compound, "SkyLight", &mut section.sky_light)?;

		Ok((y, section))
	}
}

fn read_nibbles(compound: &Compound, name: &str, target: &mut [u8; 4096]) -> nbt::Result<()> {
	let packed = compound.u8_array(name)?;
	expect_len(name, packed.len(), 2048)?;

	unpack_into(packed, &mut target[..]);

	Ok(())
}

impl Default for Section {
	fn default() -> Self {
		Section::new()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use nbt::{Error, FormatError};

	#[test]
	fn test_empty() {
		let mut section = Section::new();
		assert!(section.is_empty());

		section.set_block_id(CubePosition::new(4, 15, 2), 1);
		assert!(!section.is_empty());

		section.set_block_id(CubePosition::new(4, 15, 2), 0);
		assert!(section.is_empty());
	}

	#[test]
	fn test_masking() {
		let mut section = Section::new();
		let position = CubePosition::new(1, 2, 3);

		section.set_block_id(position, 0xF123);
		assert_eq!(section.block_id(position), 0x123);

		section.set_block_data(position, u4::new(0x1A));
		assert_eq!(section.block_data(position), u4::new(0xA));
	}

	#[test]
	fn test_add_omitted() {
		let mut section = Section::new();
		section.set_block_id(CubePosition::new(0, 0, 0), 255);

		let compound = section.to_compound(3).unwrap();

		assert!(!compound.contains("Add"));
		assert_eq!(compound.i8("Y").unwrap(), 3);
		assert_eq!(compound.u8_array("Blocks").unwrap().len(), 4096);
		assert_eq!(compound.u8_array("SkyLight").unwrap().len(), 2048);

		section.set_block_id(CubePosition::new(1, 0, 0), 0x3FF);

		let compound = section.to_compound(3).unwrap();
		let add = compound.u8_array("Add").unwrap();

		assert_eq!(add.len(), 2048);
		assert_eq!(add[0], 0x30);
	}

	#[test]
	fn test_compound_round_trip() {
		let mut section = Section::new();

		for position in CubePosition::enumerate() {
			let i = position.yzx();

			section.set_block_id(position, ((i as u32 * 31) % 4096) as u16);
			section.set_block_data(position, u4::new(i as u8));
			section.set_block_light(position, u4::new((i >> 4) as u8));
			section.set_sky_light(position, u4::new((i >> 8) as u8));
		}

		let (y, read) = Section::from_compound(&section.to_compound(-2).unwrap()).unwrap();

		assert_eq!(y, -2);
		assert!(read == section);
	}

	#[test]
	fn test_wrong_length() {
		let mut compound = Section::new().to_compound(0).unwrap();
		compound.insert("Data", vec![0u8; 2047]);

		match Section::from_compound(&compound) {
			Err(Error::Format(FormatError::ArrayLength { ref name, expected: 2048, found: 2047 })) => assert_eq!(name, "Data"),
			Err(other) => panic!("unexpected error: {}", other),
			Ok(_) => panic!("accepted a short Data array")
		}
	}

	#[test]
	fn test_missing_blocks() {
		let mut compound = Section::new().to_compound(0).unwrap();
		compound.remove("Blocks");

		assert!(Section::from_compound(&compound).err().unwrap().is_absent());
	}
}
