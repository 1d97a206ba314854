use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// A chunk or level document could not be encoded or decoded.
	Nbt(nbt::Error),
	/// A region file is malformed.
	Region(region::Error),
	Io(io::Error),
	/// A world height that is zero, not a multiple of 16, or above 4096.
	InvalidHeight(u32)
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Error::Nbt(e) => write!(f, "NBT error: {}", e),
			Error::Region(e) => write!(f, "region file error: {}", e),
			Error::Io(e) => write!(f, "I/O error: {}", e),
			Error::InvalidHeight(height) => write!(f, "invalid world height {}, must be a positive multiple of 16 no larger than 4096", height)
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			Error::Nbt(e) => Some(e),
			Error::Region(e) => Some(e),
			Error::Io(e) => Some(e),
			Error::InvalidHeight(_) => None
		}
	}
}

impl From<nbt::Error> for Error {
	fn from(e: nbt::Error) -> Self {
		Error::Nbt(e)
	}
}

impl From<region::Error> for Error {
	fn from(e: region::Error) -> Self {
		match e {
			region::Error::Io(e) => Error::Io(e),
			e => Error::Region(e)
		}
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Error::Io(e)
	}
}
