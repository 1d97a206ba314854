use crate::compound::Compound;
use crate::error::{Error, FormatError, Result};
use crate::kind::Kind;
use std::fmt::{self, Display, Formatter};
use std::slice;
use std::vec;

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	F32(f32),
	F64(f64),
	U8Array(Vec<u8>),
	String(String),
	List(List),
	Compound(Compound),
	I32Array(Vec<i32>)
}

macro_rules! accessor {
	($name:ident, $name_mut:ident, $variant:ident, $ty:ty) => {
		pub fn $name(&self) -> Result<&$ty> {
			match self {
				Tag::$variant(value) => Ok(value),
				other => Err(other.mismatch(Kind::$variant))
			}
		}

		pub fn $name_mut(&mut self) -> Result<&mut $ty> {
			match self {
				Tag::$variant(value) => Ok(value),
				other => Err(other.mismatch(Kind::$variant))
			}
		}
	};
}

macro_rules! scalar {
	($name:ident, $variant:ident, $ty:ty) => {
		pub fn $name(&self) -> Result<$ty> {
			match *self {
				Tag::$variant(value) => Ok(value),
				ref other => Err(other.mismatch(Kind::$variant))
			}
		}
	};
}

impl Tag {
	pub fn kind(&self) -> Kind {
		match self {
			Tag::I8(_) => Kind::I8,
			Tag::I16(_) => Kind::I16,
			Tag::I32(_) => Kind::I32,
			Tag::I64(_) => Kind::I64,
			Tag::F32(_) => Kind::F32,
			Tag::F64(_) => Kind::F64,
			Tag::U8Array(_) => Kind::U8Array,
			Tag::String(_) => Kind::String,
			Tag::List(_) => Kind::List,
			Tag::Compound(_) => Kind::Compound,
			Tag::I32Array(_) => Kind::I32Array
		}
	}

	fn mismatch(&self, expected: Kind) -> Error {
		Error::TypeMismatch { expected: expected.name(), found: self.kind() }
	}

	scalar!(as_i8, I8, i8);
	scalar!(as_i16, I16, i16);
	scalar!(as_i32, I32, i32);
	scalar!(as_i64_exact, I64, i64);
	scalar!(as_f32, F32, f32);
	scalar!(as_f64_exact, F64, f64);

	pub fn as_bool(&self) -> Result<bool> {
		self.as_i8().map(|value| value != 0)
	}

	/// Widens any integer tag to an `i64`.
	pub fn as_i64(&self) -> Result<i64> {
		match *self {
			Tag::I8(value) => Ok(value as i64),
			Tag::I16(value) => Ok(value as i64),
			Tag::I32(value) => Ok(value as i64),
			Tag::I64(value) => Ok(value),
			ref other => Err(Error::TypeMismatch { expected: "an integer tag", found: other.kind() })
		}
	}

	/// Widens any numeric tag to an `f64`.
	pub fn as_f64(&self) -> Result<f64> {
		match *self {
			Tag::F32(value) => Ok(value as f64),
			Tag::F64(value) => Ok(value),
			ref other => other.as_i64()
				.map(|value| value as f64)
				.map_err(|_| Error::TypeMismatch { expected: "a numeric tag", found: other.kind() })
		}
	}

	pub fn as_str(&self) -> Result<&str> {
		match self {
			Tag::String(value) => Ok(value),
			other => Err(other.mismatch(Kind::String))
		}
	}

	accessor!(as_u8_array, as_u8_array_mut, U8Array, Vec<u8>);
	accessor!(as_i32_array, as_i32_array_mut, I32Array, Vec<i32>);
	accessor!(as_list, as_list_mut, List, List);
	accessor!(as_compound, as_compound_mut, Compound, Compound);

	pub fn into_compound(self) -> Result<Compound> {
		match self {
			Tag::Compound(compound) => Ok(compound),
			other => Err(other.mismatch(Kind::Compound))
		}
	}

	pub fn into_list(self) -> Result<List> {
		match self {
			Tag::List(list) => Ok(list),
			other => Err(other.mismatch(Kind::List))
		}
	}
}

macro_rules! from_value {
	($ty:ty, $variant:ident) => {
		impl From<$ty> for Tag {
			fn from(value: $ty) -> Self {
				Tag::$variant(value)
			}
		}
	};
}

from_value!(i8, I8);
from_value!(i16, I16);
from_value!(i32, I32);
from_value!(i64, I64);
from_value!(f32, F32);
from_value!(f64, F64);
from_value!(Vec<u8>, U8Array);
from_value!(String, String);
from_value!(List, List);
from_value!(Compound, Compound);
from_value!(Vec<i32>, I32Array);

impl From<bool> for Tag {
	fn from(value: bool) -> Self {
		Tag::I8(value as i8)
	}
}

impl<'a> From<&'a str> for Tag {
	fn from(value: &'a str) -> Self {
		Tag::String(value.to_owned())
	}
}

impl<'a> From<&'a [u8]> for Tag {
	fn from(value: &'a [u8]) -> Self {
		Tag::U8Array(value.to_vec())
	}
}

impl<'a> From<&'a [i32]> for Tag {
	fn from(value: &'a [i32]) -> Self {
		Tag::I32Array(value.to_vec())
	}
}

/// A homogeneous sequence of tags. The element kind is fixed when the list is created.
#[derive(Debug, Clone)]
pub struct List {
	kind: Kind,
	tags: Vec<Tag>
}

impl List {
	pub fn new(kind: Kind) -> Self {
		List { kind, tags: Vec::new() }
	}

	/// Builds a list from existing tags, taking the element kind from the first one.
	/// An empty list gets the byte kind as a placeholder.
	pub fn from_tags(tags: Vec<Tag>) -> Result<Self> {
		let kind = tags.first().map(Tag::kind).unwrap_or(Kind::I8);

		for tag in &tags {
			if tag.kind() != kind {
				return Err(FormatError::MixedList { expected: kind, found: tag.kind() }.into());
			}
		}

		Ok(List { kind, tags })
	}

	pub fn from_compounds<I>(compounds: I) -> Self where I: IntoIterator<Item=Compound> {
		List {
			kind: Kind::Compound,
			tags: compounds.into_iter().map(Tag::Compound).collect()
		}
	}

	pub fn from_doubles(values: &[f64]) -> Self {
		List {
			kind: Kind::F64,
			tags: values.iter().map(|&value| Tag::F64(value)).collect()
		}
	}

	pub(crate) fn with_capacity(kind: Kind, capacity: usize) -> Self {
		List { kind, tags: Vec::with_capacity(capacity) }
	}

	pub(crate) fn push_unchecked(&mut self, tag: Tag) {
		self.tags.push(tag);
	}

	pub fn kind(&self) -> Kind {
		self.kind
	}

	pub fn push<T>(&mut self, tag: T) -> Result<()> where T: Into<Tag> {
		let tag = tag.into();

		if tag.kind() != self.kind {
			return Err(FormatError::MixedList { expected: self.kind, found: tag.kind() }.into());
		}

		self.tags.push(tag);

		Ok(())
	}

	pub fn get(&self, index: usize) -> Option<&Tag> {
		self.tags.get(index)
	}

	/// Mutable element access. Replacing an element through this reference with a tag of another
	/// kind is caught when the list is encoded.
	pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
		self.tags.get_mut(index)
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	pub fn iter(&self) -> slice::Iter<Tag> {
		self.tags.iter()
	}

	/// Clones every element out as a compound, failing if this is not a list of compounds.
	pub fn compounds(&self) -> Result<Vec<Compound>> {
		if self.tags.is_empty() {
			return Ok(Vec::new());
		}

		self.tags.iter().map(|tag| tag.as_compound().map(Compound::clone)).collect()
	}

	pub fn into_tags(self) -> Vec<Tag> {
		self.tags
	}
}

/// Two lists are equal when their elements are. Empty lists compare equal whatever their kind,
/// since an empty list always decodes with the placeholder kind.
impl PartialEq for List {
	fn eq(&self, other: &Self) -> bool {
		self.tags == other.tags
	}
}

impl<'a> IntoIterator for &'a List {
	type Item = &'a Tag;
	type IntoIter = slice::Iter<'a, Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.tags.iter()
	}
}

impl IntoIterator for List {
	type Item = Tag;
	type IntoIter = vec::IntoIter<Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.tags.into_iter()
	}
}

/// The root of a document: one tag and its name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
	pub name: String,
	pub tag: Tag
}

impl NamedTag {
	pub fn new<N, T>(name: N, tag: T) -> Self where N: Into<String>, T: Into<Tag> {
		NamedTag { name: name.into(), tag: tag.into() }
	}

	/// Returns the root compound, the usual shape of a document.
	pub fn compound(&self) -> Result<&Compound> {
		self.tag.as_compound()
	}

	pub fn into_compound(self) -> Result<Compound> {
		self.tag.into_compound()
	}
}

impl Display for NamedTag {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write_tree(f, Some(self.name.as_str()), &self.tag, 0)
	}
}

impl Display for Tag {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write_tree(f, None, self, 0)
	}
}

fn write_tree(f: &mut Formatter, name: Option<&str>, tag: &Tag, depth: usize) -> fmt::Result {
	write!(f, "{:indent$}{}", "", tag.kind(), indent = depth * 2)?;

	if let Some(name) = name {
		write!(f, "({:?})", name)?;
	}

	f.write_str(": ")?;

	match tag {
		Tag::I8(value) => writeln!(f, "{}", value),
		Tag::I16(value) => writeln!(f, "{}", value),
		Tag::I32(value) => writeln!(f, "{}", value),
		Tag::I64(value) => writeln!(f, "{}", value),
		Tag::F32(value) => writeln!(f, "{}", value),
		Tag::F64(value) => writeln!(f, "{}", value),
		Tag::String(value) => writeln!(f, "{:?}", value),
		Tag::U8Array(value) => writeln!(f, "[{} bytes]", value.len()),
		Tag::I32Array(value) => writeln!(f, "[{} ints]", value.len()),
		Tag::List(list) => {
			writeln!(f, "{} entries of {}", list.len(), list.kind())?;

			for entry in list {
				write_tree(f, None, entry, depth + 1)?;
			}

			Ok(())
		},
		Tag::Compound(compound) => {
			writeln!(f, "{} entries", compound.len())?;

			for (name, entry) in compound {
				write_tree(f, Some(name.as_str()), entry, depth + 1)?;
			}

			Ok(())
		}
	}
}
