use crate::error::{Error, Result};
use crate::header::{ChunkHeader, ChunkLocation, ChunkTimestamp, Compression, RegionHeaderMut};
use crate::zlib::ZlibBuffer;
use crate::{padding, sector_count, slot_index, HEADER_SECTORS};
use std::io::{self, Read, Write};

/// Collects the compressed chunks of one region, then lays them out in a single sequential pass.
///
/// Sectors are assigned in slot order (Z outer, X inner) when the region is written, so the output only
/// depends on which chunks are present, not on the order they were added in.
pub struct RegionWriter {
	slots: Vec<Option<(ZlibBuffer, ChunkTimestamp)>>
}

impl RegionWriter {
	pub fn new() -> Self {
		RegionWriter {
			slots: (0..1024).map(|_| None).collect()
		}
	}

	/// Places a chunk at a slot, replacing any chunk already there.
	/// # Panics
	/// If X or Z is greater than or equal to 32, the function will panic.
	pub fn column(&mut self, x: u8, z: u8, buffer: ZlibBuffer, timestamp: ChunkTimestamp) {
		self.slots[slot_index(x, z)] = Some((buffer, timestamp));
	}

	pub fn len(&self) -> usize {
		self.slots.iter().filter(|slot| slot.is_some()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.iter().all(Option::is_none)
	}

	/// Writes the header tables followed by every payload, returning the number of sectors in the file.
	pub fn finish<W: Write>(self, mut out: W) -> Result<u32> {
		let mut header = Box::new([0u8; 8192]);
		let mut offset = HEADER_SECTORS;
		let mut layout = Vec::new();

		for (index, slot) in self.slots.iter().enumerate() {
			let (buffer, timestamp) = match slot {
				Some(slot) => slot,
				None => continue
			};

			let (x, z) = ((index & 31) as u8, (index >> 5) as u8);

			let count = sector_count(buffer.compressed_len())
				.ok_or(Error::TooLarge { x, z, compressed_len: buffer.compressed_len() })?;

			let mut tables = RegionHeaderMut::new(&mut header);
			tables.location(x, z, ChunkLocation::from_parts(offset, count));
			tables.timestamp(x, z, *timestamp);

			layout.push((buffer, count));
			offset += count as u32;
		}

		out.write_all(&header[..])?;

		for (buffer, count) in layout {
			let chunk_header = ChunkHeader {
				len: buffer.compressed_len() as u32 + 1,
				compression: Compression::Zlib.id()
			};

			out.write_all(&chunk_header.into_bytes())?;
			out.write_all(buffer.as_bytes())?;

			let zeros = padding(buffer.compressed_len(), count) as u64;
			io::copy(&mut io::repeat(0).take(zeros), &mut out)?;
		}

		Ok(offset)
	}
}

impl Default for RegionWriter {
	fn default() -> Self {
		RegionWriter::new()
	}
}
