use crate::header::ChunkLocation;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

pub type Result<T> = ::std::result::Result<T, Error>;

/// Errors in the region container itself. Errors inside a chunk document are reported by `nbt`.
#[derive(Debug)]
pub enum Error {
	Io(io::Error),
	/// A location points into the header tables, or claims zero sectors.
	InvalidLocation { x: u8, z: u8, location: ChunkLocation },
	/// A location starts inside the sectors of an earlier chunk.
	Overlap { x: u8, z: u8, location: ChunkLocation },
	/// The length before a payload is zero, or does not fit in the sectors of its location.
	Oversized { x: u8, z: u8, len: u32 },
	UnknownCompression { x: u8, z: u8, compression: u8 },
	/// A compressed chunk needs more sectors than a location entry can describe.
	TooLarge { x: u8, z: u8, compressed_len: usize }
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Error::Io(e) => write!(f, "I/O error: {}", e),
			Error::InvalidLocation { x, z, location } => write!(f, "chunk {}, {} has an invalid location ({})", x, z, location),
			Error::Overlap { x, z, location } => write!(f, "chunk {}, {} overlaps an earlier chunk ({})", x, z, location),
			Error::Oversized { x, z, len } => write!(f, "chunk {}, {} has a payload length of {} bytes that does not fit its sectors", x, z, len),
			Error::UnknownCompression { x, z, compression } => write!(f, "chunk {}, {} uses unknown compression type {}", x, z, compression),
			Error::TooLarge { x, z, compressed_len } => write!(f, "chunk {}, {} is too large to store: {} compressed bytes", x, z, compressed_len)
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			Error::Io(e) => Some(e),
			_ => None
		}
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Error::Io(e)
	}
}
