use crate::light::Opacity;
use crate::section::Section;
use crate::{expect_len, optional};
use nbt::{Compound, List, NamedTag};
use vocs::nibbles::u4;
use vocs::position::{ColumnPosition, CubePosition, LayerPosition};

/// Biome value of a column that has not been assigned a biome.
pub const UNSET_BIOME: u8 = 0xFF;

/// A full height column of sections, along with its biomes, height map, and the entities stored in it.
///
/// Block coordinates are local to the column: `x` and `z` are in 0..16, and `y` is in `0..height()`.
/// Accessors taking a `y` at or above the height of the column panic, the same way slice indexing does.
#[derive(Clone)]
pub struct Chunk {
	sections: Vec<Section>,
	biomes: Box<[u8; 256]>,
	heights: Box<[u32; 256]>,
	/// World tick of the last update, in game ticks.
	pub last_update: i64,
	/// Whether the game considers this column decorated. New columns start out populated so that
	/// the game leaves their contents alone.
	pub terrain_populated: bool,
	/// Cumulative number of ticks players have spent in this column.
	pub inhabited_time: i64,
	pub entities: Vec<Compound>,
	pub tile_entities: Vec<Compound>,
	pub tile_ticks: Vec<Compound>
}

impl Chunk {
	/// Creates a column of air with `section_count` sections, unset biomes, and a zeroed height map.
	pub fn new(section_count: usize) -> Self {
		Chunk {
			sections: (0..section_count).map(|_| Section::new()).collect(),
			biomes: Box::new([UNSET_BIOME; 256]),
			heights: Box::new([0; 256]),
			last_update: 0,
			terrain_populated: true,
			inhabited_time: 0,
			entities: Vec::new(),
			tile_entities: Vec::new(),
			tile_ticks: Vec::new()
		}
	}

	pub fn section_count(&self) -> usize {
		self.sections.len()
	}

	/// Height of the column in blocks.
	pub fn height(&self) -> u32 {
		(self.sections.len() * 16) as u32
	}

	pub fn section(&self, index: usize) -> Option<&Section> {
		self.sections.get(index)
	}

	pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
		self.sections.get_mut(index)
	}

	pub fn sections(&self) -> &[Section] {
		&self.sections
	}

	fn locate(x: u8, y: u32, z: u8) -> (usize, CubePosition) {
		((y >> 4) as usize, CubePosition::new(x, (y & 15) as u8, z))
	}

	pub fn block_id(&self, x: u8, y: u32, z: u8) -> u16 {
		let (index, position) = Chunk::locate(x, y, z);

		self.sections[index].block_id(position)
	}

	pub fn block_data(&self, x: u8, y: u32, z: u8) -> u4 {
		let (index, position) = Chunk::locate(x, y, z);

		self.sections[index].block_data(position)
	}

	/// Sets the block ID and metadata at a position. The ID is truncated to 12 bits.
	/// The height map is not updated.
	pub fn set_block(&mut self, x: u8, y: u32, z: u8, id: u16, data: u4) {
		let (index, position) = Chunk::locate(x, y, z);
		let section = &mut self.sections[index];

		section.set_block_id(position, id);
		section.set_block_data(position, data);
	}

	pub fn block_light(&self, x: u8, y: u32, z: u8) -> u4 {
		let (index, position) = Chunk::locate(x, y, z);

		self.sections[index].block_light(position)
	}

	pub fn set_block_light(&mut self, x: u8, y: u32, z: u8, light: u4) {
		let (index, position) = Chunk::locate(x, y, z);

		self.sections[index].set_block_light(position, light)
	}

	pub fn sky_light(&self, x: u8, y: u32, z: u8) -> u4 {
		let (index, position) = Chunk::locate(x, y, z);

		self.sections[index].sky_light(position)
	}

	pub fn set_sky_light(&mut self, x: u8, y: u32, z: u8, light: u4) {
		let (index, position) = Chunk::locate(x, y, z);

		self.sections[index].set_sky_light(position, light)
	}

	/// Returns the biome of the column at `x`, `z`, or `UNSET_BIOME`.
	pub fn biome(&self, x: u8, z: u8) -> u8 {
		self.biomes[LayerPosition::new(x, z).zx() as usize]
	}

	pub fn set_biome(&mut self, x: u8, z: u8, biome: u8) {
		self.biomes[LayerPosition::new(x, z).zx() as usize] = biome;
	}

	pub fn biomes(&self) -> &[u8; 256] {
		&self.biomes
	}

	/// Returns the height map entry at `x`, `z`: one above the highest block that absorbs light, or 0.
	pub fn height_at(&self, x: u8, z: u8) -> u32 {
		self.heights[LayerPosition::new(x, z).zx() as usize]
	}

	pub fn set_height_at(&mut self, x: u8, z: u8, height: u32) {
		self.heights[LayerPosition::new(x, z).zx() as usize] = height;
	}

	pub fn heights(&self) -> &[u32; 256] {
		&self.heights
	}

	/// Rebuilds the height map, scanning each column from the top down for the first block with a
	/// nonzero opacity.
	pub fn recompute_height_map<O>(&mut self, opacity: &O) where O: Opacity + ?Sized {
		// Sections of pure air cannot stop the scan unless air itself is opaque.
		let skip_empty = opacity.opacity(0) == 0;
		let empty: Vec<bool> = self.sections.iter().map(|section| skip_empty && section.is_empty()).collect();

		for layer in LayerPosition::enumerate() {
			let mut height = 0;

			'column: for (index, section) in self.sections.iter().enumerate().rev() {
				if empty[index] {
					continue;
				}

				for y in (0..16).rev() {
					let id = section.block_id(CubePosition::from_layer(y, layer));

					if opacity.opacity(id) != 0 {
						height = ((index as u32) << 4) + y as u32 + 1;
						break 'column;
					}
				}
			}

			self.heights[layer.zx() as usize] = height;
		}
	}

	/// Sets every sky light value in every section to the maximum.
	pub fn fullbright(&mut self) {
		for section in &mut self.sections {
			section.fullbright();
		}
	}

	/// Builds the document stored for this column in a region file.
	pub fn to_document(&self, position: ColumnPosition) -> nbt::Result<NamedTag> {
		let mut sections = Vec::new();

		for (index, section) in self.sections.iter().enumerate() {
			if section.is_empty() {
				continue;
			}

			sections.push(section.to_compound(index as i8)?);
		}

		let heights: Vec<i32> = self.heights.iter().map(|&height| height as i32).collect();

		let mut level = Compound::new()
			.with("xPos", position.x())
			.with("zPos", position.z())
			.with("LastUpdate", self.last_update)
			.with("TerrainPopulated", self.terrain_populated)
			.with("InhabitedTime", self.inhabited_time)
			.with("HeightMap", heights)
			.with("Sections", List::from_compounds(sections))
			.with("Entities", List::from_compounds(self.entities.iter().cloned()))
			.with("TileEntities", List::from_compounds(self.tile_entities.iter().cloned()))
			.with("TileTicks", List::from_compounds(self.tile_ticks.iter().cloned()));

		if self.biomes.iter().any(|&biome| biome != UNSET_BIOME) {
			level.insert("Biomes", &self.biomes[..]);
		}

		Ok(NamedTag::new("", Compound::new().with("Level", level)))
	}

	/// Reads a column document, returning the position it records alongside the column.
	///
	/// Fields other than the position are optional, and keep their defaults when absent. Sections whose
	/// index does not fit in `section_count` are dropped.
	pub fn from_document(document: &NamedTag, section_count: usize) -> nbt::Result<(ColumnPosition, Chunk)> {
		let level = document.compound()?.compound("Level")?;
		let position = ColumnPosition::new(level.i32("xPos")?, level.i32("zPos")?);

		let mut chunk = Chunk::new(section_count);

		if let Some(last_update) = optional(level.i64("LastUpdate"))? {
			chunk.last_update = last_update;
		}

		if let Some(populated) = optional(level.bool("TerrainPopulated"))? {
			chunk.terrain_populated = populated;
		}

		if let Some(inhabited) = optional(level.i64("InhabitedTime"))? {
			chunk.inhabited_time = inhabited;
		}

		if let Some(biomes) = optional(level.u8_array("Biomes"))? {
			expect_len("Biomes", biomes.len(), 256)?;
			chunk.biomes.copy_from_slice(biomes);
		}

		if let Some(heights) = optional(level.i32_array("HeightMap"))? {
			if heights.len() == 256 {
				for (target, &height) in chunk.heights.iter_mut().zip(heights) {
					*target = height as u32;
				}
			} else {
				debug!("column {} has a height map of {} entries, ignoring it", position, heights.len());
			}
		}

		if let Some(sections) = optional(level.list("Sections"))? {
			for tag in sections {
				let (y, section) = Section::from_compound(tag.as_compound()?)?;
				let index = y as u8 as usize;

				if index >= section_count {
					warn!("column {} has a section at index {}, beyond the {} sections of this world", position, y, section_count);
					continue;
				}

				chunk.sections[index] = section;
			}
		}

		chunk.entities = compounds(level, "Entities")?;
		chunk.tile_entities = compounds(level, "TileEntities")?;
		chunk.tile_ticks = compounds(level, "TileTicks")?;

		Ok((position, chunk))
	}
}

fn compounds(level: &Compound, name: &str) -> nbt::Result<Vec<Compound>> {
	match optional(level.list(name))? {
		Some(list) => list.compounds(),
		None => Ok(Vec::new())
	}
}
