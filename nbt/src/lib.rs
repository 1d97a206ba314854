#![forbid(unsafe_code)]

//! # `nbt`: Named Binary Tags
//!
//! An in-memory tree for the tagged binary format used by Minecraft save data, and a codec for it.
//!
//! A document is a single [`NamedTag`], almost always a compound. Compounds hold uniquely named
//! entries, lists hold entries of one fixed [`Kind`], and everything else is a leaf. All numbers are
//! big endian, strings are length prefixed modified UTF-8.
//!
//! Documents are built and consumed on one thread; there is no interior locking anywhere in the tree.

extern crate byteorder;
extern crate deflate;
extern crate flate2;

mod compound;
mod error;
mod kind;
mod mutf8;
mod tag;

pub mod reader;
pub mod stream;
pub mod writer;

pub use self::compound::Compound;
pub use self::error::{Error, FormatError, Result};
pub use self::kind::{Kind, END};
pub use self::stream::{decode, encode, read_from, write_to, Framing};
pub use self::tag::{List, NamedTag, Tag};

/// Deepest nesting of lists and compounds accepted by the reader and writer.
pub const MAX_DEPTH: usize = 512;

#[cfg(test)]
mod test {
	use super::{decode, encode, Compound, Kind, List, NamedTag, Tag};

	fn small() -> NamedTag {
		NamedTag::new("hello world", Compound::new().with("name", "Bananrama"))
	}

	fn big() -> NamedTag {
		let egg = Compound::new().with("name", "Eggbert").with("value", 0.5f32);
		let ham = Compound::new().with("name", "Hampus").with("value", 0.75f32);

		let mut longs = List::new(Kind::I64);
		for value in 11..16i64 {
			longs.push(value).unwrap();
		}

		let compounds = List::from_compounds((0..2).map(|index| Compound::new()
			.with("created-on", 1264099775885i64)
			.with("name", format!("Compound tag #{}", index))
		));

		let bytes: Vec<u8> = (0..1000u32).map(|n| ((n * n * 255 + n * 7) % 100) as u8).collect();

		NamedTag::new("Level", Compound::new()
			.with("nested compound test", Compound::new().with("egg", egg).with("ham", ham))
			.with("intTest", 2147483647i32)
			.with("longTest", 9223372036854775807i64)
			.with("byteTest", 127i8)
			.with("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!")
			.with("listTest (long)", longs)
			.with("doubleTest", 0.49312871321823148f64)
			.with("floatTest", 0.49823147058486938f32)
			.with("listTest (compound)", compounds)
			.with("byteArrayTest", bytes)
			.with("shortTest", 32767i16)
			.with("intArrayTest", vec![i32::min_value(), -1, 0, 1, i32::max_value()])
			.with("emptyList", List::new(Kind::Compound))
		)
	}

	#[test]
	fn test_round_trip_small() {
		let document = small();

		assert_eq!(decode(&encode(&document).unwrap()).unwrap(), document);
	}

	#[test]
	fn test_round_trip_big() {
		let document = big();
		let decoded = decode(&encode(&document).unwrap()).unwrap();

		assert_eq!(decoded, document);

		let root = decoded.compound().unwrap();
		assert_eq!(root.get_deep(&["nested compound test", "ham", "value"]).unwrap().as_f32().unwrap(), 0.75);
		assert_eq!(root.list("listTest (long)").unwrap().get(4), Some(&Tag::I64(15)));
		assert_eq!(root.u8_array("byteArrayTest").unwrap()[1], 62);
	}

	#[test]
	fn test_float_precision_survives() {
		let document = NamedTag::new("", Compound::new()
			.with("nan-free", f64::from_bits(0x3FD5_5555_5555_5555))
			.with("tiny", f32::from_bits(1))
		);

		let decoded = decode(&encode(&document).unwrap()).unwrap();
		let root = decoded.compound().unwrap();

		assert_eq!(root.f64("nan-free").unwrap().to_bits(), 0x3FD5_5555_5555_5555);
		assert_eq!(root.f32("tiny").unwrap().to_bits(), 1);
	}
}
