use deflate::Compression;
use deflate::write::ZlibEncoder;
use nbt::writer::{Output, Writer};
use nbt::NamedTag;
use std::io::{self, Write};

/// A zlib compressed chunk document, ready to be placed in a region file.
pub struct ZlibBuffer(pub(crate) Vec<u8>);

impl ZlibBuffer {
	/// Encodes and compresses a document.
	pub fn compress(document: &NamedTag) -> nbt::Result<Self> {
		let output = Writer::new(ZlibOutput::new()).write(document)?;

		Ok(output.finish()?)
	}

	pub fn compressed_len(&self) -> usize {
		self.0.len()
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

/// An NBT output that compresses as it goes.
///
/// The writer cannot report I/O errors through `Output`, so the first one is kept and returned by
/// `finish`. Everything written after it is discarded.
pub struct ZlibOutput {
	buffer: Vec<u8>,
	writer: ZlibEncoder<Vec<u8>>,
	error: Option<io::Error>
}

impl ZlibOutput {
	pub fn new() -> Self {
		Self::with_capacity(4096)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		ZlibOutput {
			buffer: Vec::with_capacity(256),
			writer: ZlibEncoder::new(Vec::with_capacity(capacity), Compression::Default),
			error: None
		}
	}

	fn write_through(&mut self, slice: &[u8]) {
		if self.error.is_some() {
			return;
		}

		if let Err(e) = self.writer.write_all(slice) {
			self.error = Some(e);
		}
	}

	fn flush(&mut self) {
		let buffer = std::mem::replace(&mut self.buffer, Vec::new());

		self.write_through(&buffer);

		self.buffer = buffer;
		self.buffer.clear();
	}

	fn maybe_flush(&mut self) {
		if self.buffer.len() > 255 {
			self.flush();
		}
	}

	pub fn finish(mut self) -> io::Result<ZlibBuffer> {
		self.flush();

		if let Some(e) = self.error {
			return Err(e);
		}

		Ok(ZlibBuffer(self.writer.finish()?))
	}
}

impl Output for ZlibOutput {
	fn push(&mut self, byte: u8) {
		self.buffer.push(byte);
		self.maybe_flush();
	}

	fn extend_from_slice(&mut self, slice: &[u8]) {
		if slice.len() < 128 {
			self.buffer.extend_from_slice(slice);
			self.maybe_flush();
		} else {
			self.flush();
			self.write_through(slice);
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use flate2::read::ZlibDecoder;
	use nbt::{Compound, NamedTag};
	use std::io::Read;

	#[test]
	fn test_compress() {
		let document = NamedTag::new("", Compound::new()
			.with("Blocks", vec![7u8; 4096])
			.with("Name", "region"));

		let buffer = ZlibBuffer::compress(&document).unwrap();

		assert!(buffer.compressed_len() < 4096);

		let mut raw = Vec::new();
		ZlibDecoder::new(buffer.as_bytes()).read_to_end(&mut raw).unwrap();

		assert_eq!(raw, nbt::encode(&document).unwrap());
	}
}
