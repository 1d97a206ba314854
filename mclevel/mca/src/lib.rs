//! Anvil chunk columns: sections of 12-bit block IDs with nibble packed metadata and light, plus the
//! per column biome and height arrays, and their conversion to and from NBT documents.

#[macro_use]
extern crate log;

pub mod blocks;
pub mod entity;
pub mod light;

mod chunk;
mod section;

pub use self::chunk::{Chunk, UNSET_BIOME};
pub use self::light::{BlockLightTable, Opacity};
pub use self::section::Section;

use nbt::{Error, FormatError};
use vocs::nibbles::OddLength;

/// Turns an absent entry into `None`, keeping every other error.
pub(crate) fn optional<T>(result: nbt::Result<T>) -> nbt::Result<Option<T>> {
	match result {
		Ok(value) => Ok(Some(value)),
		Err(ref e) if e.is_absent() => Ok(None),
		Err(e) => Err(e)
	}
}

pub(crate) fn odd_length(OddLength(len): OddLength) -> Error {
	Error::Format(FormatError::OddNibbleLength(len))
}

/// Checks the length of an array read from a document.
pub(crate) fn expect_len(name: &str, found: usize, expected: usize) -> nbt::Result<()> {
	if found != expected {
		Err(Error::Format(FormatError::ArrayLength { name: name.to_owned(), expected, found }))
	} else {
		Ok(())
	}
}
