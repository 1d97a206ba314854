//! The Anvil region file: up to 32x32 compressed chunk documents stored in 4096 byte sectors, behind a
//! header holding the location and timestamp of every slot.
//!
//! ```text
//! sector 0     1024 locations, (first sector << 8) | sector count, 0 for an empty slot
//! sector 1     1024 timestamps, Unix seconds
//! sector 2..   payloads: length (u32, includes the compression byte), compression (u8), data, padding
//! ```
//!
//! Slots are indexed as `(z << 5) | x`, with both coordinates relative to the region.

#[macro_use]
extern crate log;

mod error;
mod header;
mod reader;
mod writer;
mod zlib;

pub use self::error::{Error, Result};
pub use self::header::{ChunkHeader, ChunkLocation, ChunkTimestamp, Compression, RegionHeader, RegionHeaderMut};
pub use self::reader::{ChunkPayload, Chunks, RegionChunk, RegionReader};
pub use self::writer::RegionWriter;
pub use self::zlib::{ZlibBuffer, ZlibOutput};

/// Size of one sector in bytes.
pub const SECTOR_BYTES: usize = 4096;

/// Sectors taken by the location and timestamp tables at the start of every file.
pub const HEADER_SECTORS: u32 = 2;

/// Bytes written before each compressed payload: the length and the compression type.
pub const CHUNK_HEADER_BYTES: usize = 5;

/// Number of sectors allocated to a payload of `compressed_len` bytes, or `None` if it needs more than
/// the 255 sectors a location entry can describe.
///
/// The allocation is always one sector larger than the framed payload needs.
pub fn sector_count(compressed_len: usize) -> Option<u8> {
	let framed = compressed_len + CHUNK_HEADER_BYTES;
	let count = (framed + SECTOR_BYTES - 1) / SECTOR_BYTES + 1;

	if count > 255 {
		None
	} else {
		Some(count as u8)
	}
}

/// Zero bytes written after a framed payload to fill out its sectors.
pub fn padding(compressed_len: usize, count: u8) -> usize {
	(count as usize) * SECTOR_BYTES - CHUNK_HEADER_BYTES - compressed_len
}

/// Index of a slot in the header tables.
/// # Panics
/// If X or Z is greater than or equal to 32, the function will panic.
pub(crate) fn slot_index(x: u8, z: u8) -> usize {
	if x >= 32 || z >= 32 {
		panic!("Chunk location out of bounds in region file: {}, {}", x, z)
	}

	(x as usize) | ((z as usize) << 5)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_sector_count() {
		assert_eq!(sector_count(0), Some(2));
		assert_eq!(sector_count(4091), Some(2));
		assert_eq!(sector_count(4092), Some(3));
		assert_eq!(sector_count(8187), Some(3));
		assert_eq!(sector_count(8188), Some(4));
		assert_eq!(sector_count(254 * 4096 - 5), Some(255));
		assert_eq!(sector_count(254 * 4096 - 4), None);
	}

	#[test]
	fn test_padding() {
		assert_eq!(padding(4091, 2), 4096);
		assert_eq!(padding(4092, 3), 8191);
		assert_eq!(padding(0, 2), 8187);
	}

	#[test]
	fn test_slot_index() {
		assert_eq!(slot_index(0, 0), 0);
		assert_eq!(slot_index(31, 0), 31);
		assert_eq!(slot_index(0, 1), 32);
		assert_eq!(slot_index(31, 31), 1023);
	}

	#[test]
	#[should_panic]
	fn test_slot_out_of_bounds() {
		slot_index(32, 0);
	}
}
