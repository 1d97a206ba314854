use crate::error::{Error, Result};

/// Properties shared by every chunk of a world.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WorldProperties {
	height: u32
}

impl WorldProperties {
	/// Highest supported world height, in blocks.
	pub const MAX_HEIGHT: u32 = 4096;

	/// Creates properties for a world `height` blocks tall, which must be a positive multiple of 16
	/// no larger than `MAX_HEIGHT`.
	pub fn new(height: u32) -> Result<Self> {
		if height == 0 || height % 16 != 0 || height > WorldProperties::MAX_HEIGHT {
			return Err(Error::InvalidHeight(height));
		}

		Ok(WorldProperties { height })
	}

	/// Height of the world in blocks.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Height of the world in sections.
	pub fn section_count(&self) -> usize {
		(self.height >> 4) as usize
	}
}

impl Default for WorldProperties {
	fn default() -> Self {
		WorldProperties { height: 256 }
	}
}

/// Options for writing a save folder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SaveOptions {
	/// Removes the whole folder before writing, so no stale region files survive.
	pub delete_old: bool
}

impl Default for SaveOptions {
	fn default() -> Self {
		SaveOptions { delete_old: true }
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_height() {
		assert_eq!(WorldProperties::new(128).unwrap().section_count(), 8);
		assert_eq!(WorldProperties::new(4096).unwrap().section_count(), 256);
		assert_eq!(WorldProperties::default().section_count(), 16);

		for &height in &[0, 8, 100, 4112] {
			match WorldProperties::new(height) {
				Err(Error::InvalidHeight(h)) => assert_eq!(h, height),
				other => panic!("accepted height {}: {:?}", height, other)
			}
		}
	}
}
