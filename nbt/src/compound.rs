use crate::error::{Error, Result};
use crate::tag::{List, Tag};
use std::collections::btree_map::{self, BTreeMap};

/// A bag of uniquely named tags. Inserting under an existing name replaces the old tag.
///
/// Entries are kept sorted by name, so encoding the same compound always yields the same bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
	tags: BTreeMap<String, Tag>
}

macro_rules! getter {
	($name:ident, $convert:ident, $ty:ty) => {
		pub fn $name(&self, name: &str) -> Result<$ty> {
			self.tag(name)?.$convert()
		}
	};
}

impl Compound {
	pub fn new() -> Self {
		Compound::default()
	}

	pub fn insert<N, T>(&mut self, name: N, tag: T) -> Option<Tag> where N: Into<String>, T: Into<Tag> {
		self.tags.insert(name.into(), tag.into())
	}

	/// Chained form of `insert`, for building documents in one expression.
	pub fn with<N, T>(mut self, name: N, tag: T) -> Self where N: Into<String>, T: Into<Tag> {
		self.insert(name, tag);
		self
	}

	pub fn remove(&mut self, name: &str) -> Option<Tag> {
		self.tags.remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.tags.contains_key(name)
	}

	/// Probes for an entry without treating absence as an error.
	pub fn get(&self, name: &str) -> Option<&Tag> {
		self.tags.get(name)
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
		self.tags.get_mut(name)
	}

	/// Returns the entry under `name`, or `Error::Absent`.
	pub fn tag(&self, name: &str) -> Result<&Tag> {
		self.tags.get(name).ok_or_else(|| Error::Absent(name.to_owned()))
	}

	pub fn tag_mut(&mut self, name: &str) -> Result<&mut Tag> {
		self.tags.get_mut(name).ok_or_else(|| Error::Absent(name.to_owned()))
	}

	/// Follows a path of nested compounds. `get_deep(&["a", "b"])` is `tag("a")?.as_compound()?.tag("b")`.
	/// An empty path is rejected as absent, since a compound is not itself a named entry.
	pub fn get_deep(&self, path: &[&str]) -> Result<&Tag> {
		let (last, parents) = match path.split_last() {
			Some(split) => split,
			None => return Err(Error::Absent(String::new()))
		};

		let mut current = self;

		for name in parents {
			current = current.tag(name)?.as_compound()?;
		}

		current.tag(last)
	}

	getter!(i8, as_i8, i8);
	getter!(i16, as_i16, i16);
	getter!(i32, as_i32, i32);
	getter!(i64, as_i64_exact, i64);
	getter!(f32, as_f32, f32);
	getter!(f64, as_f64_exact, f64);
	getter!(bool, as_bool, bool);
	getter!(string, as_str, &str);
	getter!(u8_array, as_u8_array, &Vec<u8>);
	getter!(i32_array, as_i32_array, &Vec<i32>);
	getter!(list, as_list, &List);
	getter!(compound, as_compound, &Compound);

	pub fn compound_mut(&mut self, name: &str) -> Result<&mut Compound> {
		self.tag_mut(name)?.as_compound_mut()
	}

	pub fn list_mut(&mut self, name: &str) -> Result<&mut List> {
		self.tag_mut(name)?.as_list_mut()
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<String, Tag> {
		self.tags.iter()
	}
}

impl<'a> IntoIterator for &'a Compound {
	type Item = (&'a String, &'a Tag);
	type IntoIter = btree_map::Iter<'a, String, Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.tags.iter()
	}
}

impl IntoIterator for Compound {
	type Item = (String, Tag);
	type IntoIter = btree_map::IntoIter<String, Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.tags.into_iter()
	}
}
