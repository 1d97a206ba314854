use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// The 4-bit unsigned integer type.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Default)]
pub struct u4(u8);
impl u4 {
	pub const MAX: u4 = u4(15);

	/// Casts a u8 to a u4, truncating the value in the process.
	pub fn new(x: u8) -> Self {
		u4(x & 0xF)
	}

	/// Casts a u4 to an u8, returning a value in the range 0-15 (inclusive).
	///
	/// # Examples
	///
	/// ```
	/// # use vocs::nibbles::u4;
	/// assert_eq!(u4::new(15).raw(), 15u8);
	/// assert_eq!(u4::new(0x1F).raw(), 15u8);
	/// ```
	pub fn raw(self) -> u8 {
		self.0
	}
}

/// Returned when asked to pack an odd number of values, which cannot fill a whole number of bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OddLength(pub usize);

impl Display for OddLength {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "cannot pack {} values into nibbles, length must be even", self.0)
	}
}

impl Error for OddLength {}

/// Packs values held one per byte into two per byte. Byte `i` of the output holds
/// `full[2i]` in its low half and `full[2i + 1]` in its high half. Only the low 4 bits of each
/// input value are kept.
///
/// # Examples
///
/// ```
/// # use vocs::nibbles::pack;
/// assert_eq!(pack(&[0xE, 0xF, 0x6, 0xC]).unwrap(), vec![0xFE, 0xC6]);
/// assert!(pack(&[1, 2, 3]).is_err());
/// ```
pub fn pack(full: &[u8]) -> Result<Vec<u8>, OddLength> {
	if full.len() % 2 != 0 {
		return Err(OddLength(full.len()));
	}

	Ok(full.chunks(2).map(|pair| ((pair[1] & 0xF) << 4) | (pair[0] & 0xF)).collect())
}

/// Unpacks two values per byte into one value per byte, low half first. The inverse of `pack`.
///
/// # Examples
///
/// ```
/// # use vocs::nibbles::unpack;
/// assert_eq!(unpack(&[0xFE, 0xC6]), vec![0xE, 0xF, 0x6, 0xC]);
/// ```
pub fn unpack(packed: &[u8]) -> Vec<u8> {
	let mut full = Vec::with_capacity(packed.len() * 2);

	for &ba in packed {
		full.push(ba & 0xF);
		full.push(ba >> 4);
	}

	full
}

/// Unpacks into an existing buffer, which must be exactly twice as long as the packed data.
pub fn unpack_into(packed: &[u8], full: &mut [u8]) {
	assert_eq!(packed.len() * 2, full.len(), "nibble buffer size mismatch");

	for (pair, &ba) in full.chunks_mut(2).zip(packed) {
		pair[0] = ba & 0xF;
		pair[1] = ba >> 4;
	}
}
