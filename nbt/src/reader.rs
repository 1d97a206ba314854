use byteorder::{BigEndian, ReadBytesExt};
use crate::compound::Compound;
use crate::error::{FormatError, Result};
use crate::kind::{Kind, END};
use crate::mutf8;
use crate::tag::{List, NamedTag, Tag};
use crate::MAX_DEPTH;
use std::io::Read;

/// Upper bound on speculative preallocation, so a corrupt length cannot reserve gigabytes up front.
const MAX_PREALLOCATE: usize = 65536;

pub struct Reader<R: Read> {
	input: R
}

impl<R: Read> Reader<R> {
	pub fn new(input: R) -> Self {
		Reader { input }
	}

	pub fn into_inner(self) -> R {
		self.input
	}

	/// Reads one full document: type ID, name, then payload.
	pub fn read(&mut self) -> Result<NamedTag> {
		let id = self.input.read_u8()?;
		let kind = Kind::from_id(id).ok_or(FormatError::UnknownKind(id))?;

		let name = self.string()?;
		let tag = self.payload(kind, 0)?;

		Ok(NamedTag { name, tag })
	}

	fn string(&mut self) -> Result<String> {
		let len = self.input.read_u16::<BigEndian>()? as usize;
		let bytes = self.bytes(len)?;

		Ok(mutf8::decode(&bytes)?)
	}

	fn array_length(&mut self) -> Result<usize> {
		let len = self.input.read_i32::<BigEndian>()?;

		if len < 0 {
			return Err(FormatError::NegativeLength(len).into());
		}

		Ok(len as usize)
	}

	fn bytes(&mut self, len: usize) -> Result<Vec<u8>> {
		let mut buffer = Vec::with_capacity(len.min(MAX_PREALLOCATE));

		(&mut self.input).take(len as u64).read_to_end(&mut buffer)?;

		if buffer.len() != len {
			return Err(FormatError::Truncated.into());
		}

		Ok(buffer)
	}

	fn payload(&mut self, kind: Kind, depth: usize) -> Result<Tag> {
		if depth > MAX_DEPTH {
			return Err(FormatError::TooDeep.into());
		}

		Ok(match kind {
			Kind::I8 => Tag::I8(self.input.read_i8()?),
			Kind::I16 => Tag::I16(self.input.read_i16::<BigEndian>()?),
			Kind::I32 => Tag::I32(self.input.read_i32::<BigEndian>()?),
			Kind::I64 => Tag::I64(self.input.read_i64::<BigEndian>()?),
			Kind::F32 => Tag::F32(self.input.read_f32::<BigEndian>()?),
			Kind::F64 => Tag::F64(self.input.read_f64::<BigEndian>()?),
			Kind::U8Array => {
				let len = self.array_length()?;

				Tag::U8Array(self.bytes(len)?)
			},
			Kind::String => Tag::String(self.string()?),
			Kind::List => Tag::List(self.list(depth)?),
			Kind::Compound => Tag::Compound(self.compound(depth)?),
			Kind::I32Array => {
				let len = self.array_length()?;
				let mut values = Vec::with_capacity(len.min(MAX_PREALLOCATE));

				for _ in 0..len {
					values.push(self.input.read_i32::<BigEndian>()?);
				}

				Tag::I32Array(values)
			}
		})
	}

	fn list(&mut self, depth: usize) -> Result<List> {
		let id = self.input.read_u8()?;

		// Some writers tag empty lists with END instead of a real kind.
		let kind = if id == END {
			Kind::I8
		} else {
			Kind::from_id(id).ok_or(FormatError::UnknownKind(id))?
		};

		let len = self.array_length()?;
		let mut list = List::with_capacity(kind, len.min(MAX_PREALLOCATE));

		for _ in 0..len {
			list.push_unchecked(self.payload(kind, depth + 1)?);
		}

		Ok(list)
	}

	fn compound(&mut self, depth: usize) -> Result<Compound> {
		let mut compound = Compound::new();

		loop {
			let id = self.input.read_u8()?;

			if id == END {
				return Ok(compound);
			}

			let kind = Kind::from_id(id).ok_or(FormatError::UnknownKind(id))?;
			let name = self.string()?;
			let tag = self.payload(kind, depth + 1)?;

			compound.insert(name, tag);
		}
	}
}

#[cfg(test)]
mod test {
	use crate::error::{Error, FormatError};
	use crate::kind::Kind;
	use super::Reader;

	fn read(bytes: &[u8]) -> Result<crate::NamedTag, Error> {
		Reader::new(bytes).read()
	}

	#[test]
	fn test_unknown_kind() {
		match read(&[0x0C, 0x00, 0x00]) {
			Err(Error::Format(FormatError::UnknownKind(12))) => (),
			other => panic!("expected an unknown kind error, got {:?}", other)
		}

		// An END where a root tag should be is just as unknown.
		match read(&[0x00]) {
			Err(Error::Format(FormatError::UnknownKind(0))) => (),
			other => panic!("expected an unknown kind error, got {:?}", other)
		}
	}

	#[test]
	fn test_truncated() {
		let cases: &[&[u8]] = &[
			&[],
			&[0x03, 0x00],
			&[0x03, 0x00, 0x00, 0x00, 0x00],
			&[0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x01, 0x02],
			&[0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, b'a', 0x05]
		];

		for case in cases {
			match read(case) {
				Err(Error::Format(FormatError::Truncated)) => (),
				other => panic!("expected truncation for {:?}, got {:?}", case, other)
			}
		}
	}

	#[test]
	fn test_negative_length() {
		match read(&[0x07, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]) {
			Err(Error::Format(FormatError::NegativeLength(-1))) => (),
			other => panic!("expected a negative length error, got {:?}", other)
		}
	}

	#[test]
	fn test_end_typed_empty_list() {
		let named = read(&[0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
		let list = named.tag.as_list().unwrap();

		assert!(list.is_empty());
		assert_eq!(list.kind(), Kind::I8);
	}

	#[test]
	fn test_nesting_limit() {
		// A list of lists, nested far beyond the limit, each holding one element.
		let mut bytes = vec![0x09, 0x00, 0x00];

		for _ in 0..1000 {
			bytes.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
		}

		match read(&bytes) {
			Err(Error::Format(FormatError::TooDeep)) => (),
			other => panic!("expected a nesting error, got {:?}", other)
		}
	}
}
