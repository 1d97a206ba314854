use std::fmt::{self, Display, Formatter};

/// Type ID written before every named tag and once at the head of every list.
pub const END: u8 = 0;

/// The eleven value kinds. `END` is not a kind: it only terminates compounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Kind {
	I8 = 1,
	I16 = 2,
	I32 = 3,
	I64 = 4,
	F32 = 5,
	F64 = 6,
	U8Array = 7,
	String = 8,
	List = 9,
	Compound = 10,
	I32Array = 11
}

impl Kind {
	pub fn from_id(id: u8) -> Option<Self> {
		Some(match id {
			1 => Kind::I8,
			2 => Kind::I16,
			3 => Kind::I32,
			4 => Kind::I64,
			5 => Kind::F32,
			6 => Kind::F64,
			7 => Kind::U8Array,
			8 => Kind::String,
			9 => Kind::List,
			10 => Kind::Compound,
			11 => Kind::I32Array,
			_ => return None
		})
	}

	pub fn id(self) -> u8 {
		self as u8
	}

	pub fn name(self) -> &'static str {
		match self {
			Kind::I8 => "TAG_Byte",
			Kind::I16 => "TAG_Short",
			Kind::I32 => "TAG_Int",
			Kind::I64 => "TAG_Long",
			Kind::F32 => "TAG_Float",
			Kind::F64 => "TAG_Double",
			Kind::U8Array => "TAG_Byte_Array",
			Kind::String => "TAG_String",
			Kind::List => "TAG_List",
			Kind::Compound => "TAG_Compound",
			Kind::I32Array => "TAG_Int_Array"
		}
	}
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod test {
	use super::{Kind, END};

	#[test]
	fn test_id_table() {
		for id in 1..=11 {
			assert_eq!(Kind::from_id(id).map(Kind::id), Some(id));
		}

		assert_eq!(Kind::from_id(END), None);
		assert_eq!(Kind::from_id(12), None);
		assert_eq!(Kind::from_id(255), None);
	}
}
