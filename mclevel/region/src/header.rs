use crate::slot_index;
use byteorder::{BigEndian, ByteOrder};
use std::fmt::{self, Debug, Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Read access to the 8192 byte header of a region file.
pub struct RegionHeader<'a>(&'a [u8; 8192]);

impl<'a> RegionHeader<'a> {
	pub fn new(data: &'a [u8; 8192]) -> Self {
		RegionHeader(data)
	}

	/// Gets the location of this chunk in the file, or `None` if the slot is empty.
	/// # Panics
	/// If X or Z is greater than or equal to 32, the function will panic.
	pub fn location(&self, x: u8, z: u8) -> Option<ChunkLocation> {
		let idx = slot_index(x, z) * 4;

		ChunkLocation::new(BigEndian::read_u32(&self.0[idx..idx+4]))
	}

	/// Gets the timestamp this chunk was saved at.
	/// # Panics
	/// If X or Z is greater than or equal to 32, the function will panic.
	pub fn timestamp(&self, x: u8, z: u8) -> ChunkTimestamp {
		let idx = slot_index(x, z) * 4 + 4096;

		ChunkTimestamp::from_unix_seconds(BigEndian::read_u32(&self.0[idx..idx+4]))
	}
}

/// Write access to the 8192 byte header of a region file.
pub struct RegionHeaderMut<'a>(&'a mut [u8; 8192]);

impl<'a> RegionHeaderMut<'a> {
	pub fn new(data: &'a mut [u8; 8192]) -> Self {
		RegionHeaderMut(data)
	}

	/// Sets the location of this chunk in the file.
	/// # Panics
	/// If X or Z is greater than or equal to 32, the function will panic.
	pub fn location(&mut self, x: u8, z: u8, location: ChunkLocation) {
		let idx = slot_index(x, z) * 4;

		BigEndian::write_u32(&mut self.0[idx..idx+4], location.inner());
	}

	/// Sets the timestamp this chunk was saved at.
	/// # Panics
	/// If X or Z is greater than or equal to 32, the function will panic.
	pub fn timestamp(&mut self, x: u8, z: u8, timestamp: ChunkTimestamp) {
		let idx = slot_index(x, z) * 4 + 4096;

		BigEndian::write_u32(&mut self.0[idx..idx+4], timestamp.into_unix_seconds());
	}
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct ChunkLocation(u32);
impl ChunkLocation {
	pub fn from_parts(offset: u32, len: u8) -> Self {
		ChunkLocation((offset << 8) | (len as u32))
	}

	pub fn new(loc: u32) -> Option<Self> {
		if loc == 0 {
			None
		} else {
			Some(ChunkLocation(loc))
		}
	}

	/// Returns the contained raw value, which is guaranteed to be non-zero.
	pub fn inner(&self) -> u32 {
		self.0
	}

	/// Returns the offset in sectors (4096 bytes) of this chunk from the start of the file.
	pub fn offset(&self) -> u32 {
		self.0 >> 8
	}

	/// Returns the offset in bytes of this chunk from the start of the file.
	pub fn offset_bytes(&self) -> u64 {
		(self.offset() as u64) * 4096
	}

	/// Returns the size of the chunk in sectors (4096 bytes).
	pub fn len(&self) -> u8 {
		(self.0 & 0xFF) as u8
	}

	/// Returns the size of the chunk in bytes.
	pub fn len_bytes(&self) -> u32 {
		(self.0 & 0xFF) * 4096
	}

	/// Returns the sector just past the end of this chunk.
	pub fn end(&self) -> u32 {
		self.offset() + (self.len() as u32)
	}

	pub fn end_bytes(&self) -> u64 {
		(self.end() as u64) * 4096
	}
}

impl Display for ChunkLocation {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "at {}, len {} sectors", self.offset(), self.len())
	}
}

impl Debug for ChunkLocation {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "ChunkLocation {{ offset: {}, len: {} }}", self.offset(), self.len())
	}
}

/// Unix time in seconds when the chunk was last saved.
/// Susceptible to the Year 2038 problem, and relatively useless.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ChunkTimestamp(u32);
impl ChunkTimestamp {
	pub fn from_unix_seconds(seconds: u32) -> Self {
		ChunkTimestamp(seconds)
	}

	/// Converts a millisecond count, saturating at the bounds of the 32-bit seconds field.
	pub fn from_millis(millis: i64) -> Self {
		let seconds = millis / 1000;

		if seconds < 0 {
			ChunkTimestamp(0)
		} else if seconds > u32::max_value() as i64 {
			ChunkTimestamp(u32::max_value())
		} else {
			ChunkTimestamp(seconds as u32)
		}
	}

	pub fn now() -> Option<Self> {
		let seconds = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);

		if seconds < u32::max_value() as u64 {
			Some(ChunkTimestamp(seconds as u32))
		} else {
			None
		}
	}

	pub fn into_unix_seconds(self) -> u32 {
		self.0
	}
}

/// How a chunk payload is compressed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Compression {
	Gzip,
	Zlib
}

impl Compression {
	pub fn from_id(id: u8) -> Option<Self> {
		match id {
			1 => Some(Compression::Gzip),
			2 => Some(Compression::Zlib),
			_ => None
		}
	}

	pub fn id(self) -> u8 {
		match self {
			Compression::Gzip => 1,
			Compression::Zlib => 2
		}
	}
}

/// The 5 bytes in front of every payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ChunkHeader {
	/// Length of the compressed data plus the compression byte.
	pub len: u32,
	pub compression: u8
}

impl ChunkHeader {
	pub fn from_bytes(bytes: [u8; 5]) -> Self {
		ChunkHeader {
			len: BigEndian::read_u32(&bytes[0..4]),
			compression: bytes[4]
		}
	}

	pub fn into_bytes(self) -> [u8; 5] {
		let mut bytes = [0u8; 5];

		BigEndian::write_u32(&mut bytes[0..4], self.len);
		bytes[4] = self.compression;

		bytes
	}
}
