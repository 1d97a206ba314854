//! Moving the chunks of one region window between a `World` and a region file.

use crate::error::Result;
use crate::world::World;
use mca::Chunk;
use rayon::prelude::*;
use region::{ChunkTimestamp, RegionReader, RegionWriter, ZlibBuffer};
use std::io::{Read, Write};
use vocs::position::RegionPosition;

type Compressed = Option<(u8, u8, ZlibBuffer, ChunkTimestamp)>;

/// Writes every chunk of `world` inside the window to `out`, returning the number of chunks written.
///
/// Chunks are encoded and compressed in parallel. If any of them fails, nothing is written and the
/// error of the first failing slot is returned once every chunk has been attempted.
pub fn write_region<W: Write>(world: &World, window: RegionPosition, out: W) -> Result<usize> {
	let compressed: Vec<Result<Compressed>> = (0..1024usize)
		.into_par_iter()
		.map(|index| -> Result<Compressed> {
			let (x, z) = ((index & 31) as u8, (index >> 5) as u8);
			let position = window.column(x, z);

			let chunk = match world.get_if_present(position) {
				Some(chunk) => chunk,
				None => return Ok(None)
			};

			let chunk = chunk.read();
			let buffer = ZlibBuffer::compress(&chunk.to_document(position)?)?;

			Ok(Some((x, z, buffer, ChunkTimestamp::from_millis(chunk.last_update))))
		})
		.collect();

	let mut writer = RegionWriter::new();

	for slot in compressed {
		if let Some((x, z, buffer, timestamp)) = slot? {
			writer.column(x, z, buffer, timestamp);
		}
	}

	let count = writer.len();
	let sectors = writer.finish(out)?;

	debug!("wrote region {} with {} chunks in {} sectors", window, count, sectors);

	Ok(count)
}

/// Reads every chunk stored in a region file into `world`, returning the number of chunks read.
///
/// The container is read front to back first, then the chunks are decompressed and decoded in
/// parallel. Each chunk is stored at the position of its slot in `window`. Chunks that decode
/// successfully are inserted even if another chunk of the file fails, and the first error in file
/// order is returned.
pub fn read_region<R: Read>(world: &World, window: RegionPosition, input: R) -> Result<usize> {
	let mut payloads = Vec::new();
	let mut container_error = None;

	for chunk in RegionReader::new(input)?.chunks() {
		match chunk {
			Ok(chunk) => payloads.push(chunk),
			Err(e) => {
				container_error = Some(e);
				break;
			}
		}
	}

	let section_count = world.properties().section_count();

	let results: Vec<Result<()>> = payloads
		.into_par_iter()
		.map(|stored| -> Result<()> {
			let position = window.column(stored.x, stored.z);
			let document = stored.payload.decode()?;
			let (recorded, chunk) = Chunk::from_document(&document, section_count)?;

			if recorded != position {
				warn!("chunk in slot {}, {} of region {} records position {}, storing it at {}", stored.x, stored.z, window, recorded, position);
			}

			world.insert(position, chunk);

			Ok(())
		})
		.collect();

	let read = results.iter().filter(|result| result.is_ok()).count();

	for result in results {
		result?;
	}

	if let Some(e) = container_error {
		return Err(e.into());
	}

	debug!("read region {} with {} chunks", window, read);

	Ok(read)
}
