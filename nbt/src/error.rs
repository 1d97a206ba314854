use crate::kind::Kind;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The bytes do not form a valid document, or a packed array broke its layout rules.
	Format(FormatError),
	/// A compound has no entry under the requested name.
	Absent(String),
	/// An entry exists, but holds a different kind of tag than requested.
	TypeMismatch { expected: &'static str, found: Kind },
	Io(io::Error)
}

impl Error {
	/// Returns true if this error only reports a missing compound entry.
	pub fn is_absent(&self) -> bool {
		match self {
			Error::Absent(_) => true,
			_ => false
		}
	}
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormatError {
	UnknownKind(u8),
	Truncated,
	NegativeLength(i32),
	ArrayTooLong(usize),
	InvalidString,
	StringTooLong(usize),
	TooDeep,
	MixedList { expected: Kind, found: Kind },
	OddNibbleLength(usize),
	ArrayLength { name: String, expected: usize, found: usize }
}

impl Display for FormatError {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			FormatError::UnknownKind(id) => write!(f, "unknown tag type id {}", id),
			FormatError::Truncated => f.write_str("unexpected end of stream"),
			FormatError::NegativeLength(len) => write!(f, "negative length {}", len),
			FormatError::ArrayTooLong(len) => write!(f, "{} entries do not fit a 32-bit length", len),
			FormatError::InvalidString => f.write_str("string is not valid modified UTF-8"),
			FormatError::StringTooLong(len) => write!(f, "string of {} bytes does not fit a 16-bit length", len),
			FormatError::TooDeep => f.write_str("tags are nested too deeply"),
			FormatError::MixedList { expected, found } => write!(f, "list of {} cannot hold a {}", expected, found),
			FormatError::OddNibbleLength(len) => write!(f, "cannot pack {} values into nibbles, length must be even", len),
			FormatError::ArrayLength { name, expected, found } => {
				write!(f, "array {:?} has {} entries, expected {}", name, found, expected)
			}
		}
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Error::Format(format) => write!(f, "malformed NBT: {}", format),
			Error::Absent(name) => write!(f, "no tag named {:?}", name),
			Error::TypeMismatch { expected, found } => write!(f, "expected {}, found {}", expected, found),
			Error::Io(err) => write!(f, "I/O error: {}", err)
		}
	}
}

impl error::Error for Error {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None
		}
	}
}

impl From<FormatError> for Error {
	fn from(err: FormatError) -> Self {
		Error::Format(err)
	}
}

impl From<io::Error> for Error {
	fn from(err: io::Error) -> Self {
		if err.kind() == io::ErrorKind::UnexpectedEof {
			Error::Format(FormatError::Truncated)
		} else {
			Error::Io(err)
		}
	}
}
