//! Position fields of the opaque entity, tile entity, and tile tick compounds carried by a chunk.
//!
//! Tile entities and tile ticks store their block position as the integers `x`, `y`, and `z`. Entities
//! store a `Pos` list of three doubles.

use crate::chunk::Chunk;
use nbt::{Compound, FormatError, List, Tag};

pub fn block_position(compound: &Compound) -> nbt::Result<(i32, i32, i32)> {
	Ok((compound.i32("x")?, compound.i32("y")?, compound.i32("z")?))
}

pub fn set_block_position(compound: &mut Compound, (x, y, z): (i32, i32, i32)) {
	compound.insert("x", x);
	compound.insert("y", y);
	compound.insert("z", z);
}

/// Shifts the block position of a tile entity or tile tick.
pub fn translate_block(compound: &mut Compound, dx: i32, dy: i32, dz: i32) -> nbt::Result<()> {
	let (x, y, z) = block_position(compound)?;

	set_block_position(compound, (x.wrapping_add(dx), y.wrapping_add(dy), z.wrapping_add(dz)));

	Ok(())
}

pub fn entity_position(compound: &Compound) -> nbt::Result<(f64, f64, f64)> {
	let pos = compound.list("Pos")?;

	if pos.len() != 3 {
		return Err(FormatError::ArrayLength { name: "Pos".to_owned(), expected: 3, found: pos.len() }.into());
	}

	let components = pos.iter().map(Tag::as_f64).collect::<nbt::Result<Vec<f64>>>()?;

	Ok((components[0], components[1], components[2]))
}

pub fn set_entity_position(compound: &mut Compound, (x, y, z): (f64, f64, f64)) {
	compound.insert("Pos", List::from_doubles(&[x, y, z]));
}

/// Shifts the position of an entity.
pub fn translate_entity(compound: &mut Compound, dx: f64, dy: f64, dz: f64) -> nbt::Result<()> {
	let (x, y, z) = entity_position(compound)?;

	set_entity_position(compound, (x + dx, y + dy, z + dz));

	Ok(())
}

impl Chunk {
	/// Shifts every entity, tile entity, and tile tick by the given number of blocks, for moving the
	/// contents of a column to another place in the world.
	pub fn translate_contents(&mut self, dx: i32, dy: i32, dz: i32) -> nbt::Result<()> {
		for entity in &mut self.entities {
			translate_entity(entity, dx as f64, dy as f64, dz as f64)?;
		}

		for compound in self.tile_entities.iter_mut().chain(self.tile_ticks.iter_mut()) {
			translate_block(compound, dx, dy, dz)?;
		}

		Ok(())
	}
}
