use crate::compound::Compound;
use crate::error::{FormatError, Result};
use crate::kind::{Kind, END};
use crate::mutf8;
use crate::tag::{List, NamedTag, Tag};
use crate::MAX_DEPTH;

/// A byte sink without an error channel, such as a `Vec<u8>` or an in-memory compressor.
pub trait Output {
	fn push(&mut self, value: u8);
	fn extend_from_slice(&mut self, slice: &[u8]);
}

impl<T> Output for &mut T where T: Output {
	fn push(&mut self, value: u8) {
		T::push(self, value)
	}

	fn extend_from_slice(&mut self, slice: &[u8]) {
		T::extend_from_slice(self, slice);
	}
}

impl Output for Vec<u8> {
	fn push(&mut self, value: u8) {
		Vec::push(self, value)
	}

	fn extend_from_slice(&mut self, slice: &[u8]) {
		Vec::extend_from_slice(self, slice)
	}
}

pub struct Writer<T: Output> {
	out: T
}

impl<T: Output> Writer<T> {
	pub fn new(out: T) -> Self {
		Writer { out }
	}

	/// Writes a full document: type ID, name, then payload.
	pub fn write(mut self, named: &NamedTag) -> Result<T> {
		self.header(named.tag.kind(), &named.name)?;
		self.payload(&named.tag, 0)?;

		Ok(self.out)
	}

	fn header(&mut self, kind: Kind, name: &str) -> Result<()> {
		self.out.push(kind.id());
		self.string(name)
	}

	fn string(&mut self, value: &str) -> Result<()> {
		let encoded = mutf8::encode(value);

		if encoded.len() > u16::max_value() as usize {
			return Err(FormatError::StringTooLong(encoded.len()).into());
		}

		self.out.extend_from_slice(&u16::to_be_bytes(encoded.len() as u16));
		self.out.extend_from_slice(&encoded);

		Ok(())
	}

	fn array_length(&mut self, len: usize) -> Result<()> {
		if len > i32::max_value() as usize {
			return Err(FormatError::ArrayTooLong(len).into());
		}

		self.out.extend_from_slice(&u32::to_be_bytes(len as u32));

		Ok(())
	}

	fn payload(&mut self, tag: &Tag, depth: usize) -> Result<()> {
		if depth > MAX_DEPTH {
			return Err(FormatError::TooDeep.into());
		}

		match tag {
			Tag::I8(value) => self.out.push(*value as u8),
			Tag::I16(value) => self.out.extend_from_slice(&value.to_be_bytes()),
			Tag::I32(value) => self.out.extend_from_slice(&value.to_be_bytes()),
			Tag::I64(value) => self.out.extend_from_slice(&value.to_be_bytes()),
			Tag::F32(value) => self.out.extend_from_slice(&value.to_bits().to_be_bytes()),
			Tag::F64(value) => self.out.extend_from_slice(&value.to_bits().to_be_bytes()),
			Tag::U8Array(value) => {
				self.array_length(value.len())?;
				self.out.extend_from_slice(value);
			},
			Tag::String(value) => self.string(value)?,
			Tag::List(list) => self.list(list, depth)?,
			Tag::Compound(compound) => self.compound(compound, depth)?,
			Tag::I32Array(value) => {
				self.array_length(value.len())?;

				for &entry in value {
					self.out.extend_from_slice(&entry.to_be_bytes());
				}
			}
		}

		Ok(())
	}

	fn list(&mut self, list: &List, depth: usize) -> Result<()> {
		let kind = if list.is_empty() { Kind::I8 } else { list.kind() };

		self.out.push(kind.id());
		self.array_length(list.len())?;

		for entry in list {
			if entry.kind() != kind {
				return Err(FormatError::MixedList { expected: kind, found: entry.kind() }.into());
			}

			self.payload(entry, depth + 1)?;
		}

		Ok(())
	}

	fn compound(&mut self, compound: &Compound, depth: usize) -> Result<()> {
		for (name, entry) in compound {
			self.header(entry.kind(), name)?;
			self.payload(entry, depth + 1)?;
		}

		self.out.push(END);

		Ok(())
	}
}
