//! Java's "modified UTF-8": NUL is written as two bytes, and characters outside the BMP are
//! written as a UTF-16 surrogate pair, each half encoded as its own three byte sequence.

use crate::error::FormatError;

pub fn encode(value: &str) -> Vec<u8> {
	let mut out = Vec::with_capacity(value.len());

	for unit in value.encode_utf16() {
		match unit {
			0x0001..=0x007F => out.push(unit as u8),
			0x0000 | 0x0080..=0x07FF => {
				out.push(0xC0 | (unit >> 6) as u8);
				out.push(0x80 | (unit & 0x3F) as u8);
			},
			_ => {
				out.push(0xE0 | (unit >> 12) as u8);
				out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
				out.push(0x80 | (unit & 0x3F) as u8);
			}
		}
	}

	out
}

pub fn decode(bytes: &[u8]) -> Result<String, FormatError> {
	// Fast path: plain ASCII is identical in both encodings.
	if bytes.iter().all(|&byte| byte != 0 && byte < 0x80) {
		return String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidString);
	}

	let mut units = Vec::with_capacity(bytes.len());
	let mut index = 0;

	let continuation = |index: usize| -> Result<u16, FormatError> {
		match bytes.get(index) {
			Some(&byte) if byte & 0xC0 == 0x80 => Ok((byte & 0x3F) as u16),
			_ => Err(FormatError::InvalidString)
		}
	};

	while index < bytes.len() {
		let lead = bytes[index];

		if lead & 0x80 == 0 {
			units.push(lead as u16);
			index += 1;
		} else if lead & 0xE0 == 0xC0 {
			units.push((((lead & 0x1F) as u16) << 6) | continuation(index + 1)?);
			index += 2;
		} else if lead & 0xF0 == 0xE0 {
			units.push((((lead & 0x0F) as u16) << 12) | (continuation(index + 1)? << 6) | continuation(index + 2)?);
			index += 3;
		} else {
			return Err(FormatError::InvalidString);
		}
	}

	String::from_utf16(&units).map_err(|_| FormatError::InvalidString)
}

#[cfg(test)]
mod test {
	use super::{decode, encode};

	#[test]
	fn test_ascii() {
		assert_eq!(encode("Bananrama"), b"Bananrama".to_vec());
		assert_eq!(decode(b"hello world").unwrap(), "hello world");
	}

	#[test]
	fn test_nul_uses_two_bytes() {
		assert_eq!(encode("a\0b"), vec![b'a', 0xC0, 0x80, b'b']);
		assert_eq!(decode(&[b'a', 0xC0, 0x80, b'b']).unwrap(), "a\0b");
	}

	#[test]
	fn test_latin_and_supplementary() {
		let text = "ÅÄÖ! \u{1F600}";
		let encoded = encode(text);

		// The emoji becomes a surrogate pair of two 3 byte sequences, not one 4 byte sequence.
		assert_eq!(encoded.len(), 3 * 2 + 2 + 6);
		assert_eq!(decode(&encoded).unwrap(), text);
	}

	#[test]
	fn test_invalid() {
		assert!(decode(&[0xC3]).is_err());
		assert!(decode(&[0xF0, 0x9F, 0x98, 0x80]).is_err());
		assert!(decode(&[0xED, 0xA0, 0xBD]).is_err());
	}
}
