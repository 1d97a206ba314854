use crate::error::{Error, Result};
use crate::header::{ChunkHeader, ChunkLocation, ChunkTimestamp, Compression, RegionHeader};
use crate::{CHUNK_HEADER_BYTES, HEADER_SECTORS, SECTOR_BYTES};
use flate2::read::ZlibDecoder;
use nbt::{Framing, NamedTag};
use std::io::{self, ErrorKind, Read};
use std::vec;

/// The still compressed document of one chunk.
#[derive(Debug, Clone)]
pub struct ChunkPayload {
	pub compression: Compression,
	pub data: Vec<u8>
}

impl ChunkPayload {
	/// Decompresses and decodes the document.
	pub fn decode(&self) -> nbt::Result<NamedTag> {
		match self.compression {
			Compression::Gzip => nbt::read_from(&self.data[..], Framing::Gzip),
			Compression::Zlib => nbt::read_from(ZlibDecoder::new(&self.data[..]), Framing::Plain)
		}
	}
}

/// A chunk read from a region file, with its slot and header entries.
#[derive(Debug, Clone)]
pub struct RegionChunk {
	pub x: u8,
	pub z: u8,
	pub location: ChunkLocation,
	pub timestamp: ChunkTimestamp,
	pub payload: ChunkPayload
}

/// Reads a region file front to back, without seeking.
pub struct RegionReader<R: Read> {
	input: R,
	header: Box<[u8; 8192]>
}

impl<R: Read> RegionReader<R> {
	/// Reads the location and timestamp tables.
	pub fn new(mut input: R) -> Result<Self> {
		let mut header = Box::new([0u8; 8192]);
		input.read_exact(&mut header[..])?;

		Ok(RegionReader { input, header })
	}

	pub fn header(&self) -> RegionHeader {
		RegionHeader::new(&self.header)
	}

	/// Returns every occupied slot, ordered by the sector its chunk starts at.
	pub fn locations(&self) -> Vec<(u8, u8, ChunkLocation)> {
		let header = self.header();
		let mut locations = Vec::new();

		for z in 0..32 {
			for x in 0..32 {
				if let Some(location) = header.location(x, z) {
					locations.push((x, z, location));
				}
			}
		}

		locations.sort_by_key(|&(_, _, location)| location.offset());
		locations
	}

	/// Reads the chunks in the order they are laid out in the file. Iteration stops after the first error.
	pub fn chunks(self) -> Chunks<R> {
		let header = self.header();

		let pending: Vec<_> = self.locations()
			.into_iter()
			.map(|(x, z, location)| (x, z, location, header.timestamp(x, z)))
			.collect();

		Chunks {
			input: self.input,
			pending: pending.into_iter(),
			cursor: (HEADER_SECTORS as u64) * (SECTOR_BYTES as u64),
			end: HEADER_SECTORS,
			failed: false
		}
	}
}

pub struct Chunks<R: Read> {
	input: R,
	pending: vec::IntoIter<(u8, u8, ChunkLocation, ChunkTimestamp)>,
	/// Bytes consumed from the input so far.
	cursor: u64,
	/// First sector not claimed by a chunk that was already read.
	end: u32,
	failed: bool
}

impl<R: Read> Chunks<R> {
	fn read(&mut self, x: u8, z: u8, location: ChunkLocation, timestamp: ChunkTimestamp) -> Result<RegionChunk> {
		if location.offset() < HEADER_SECTORS || location.len() == 0 {
			return Err(Error::InvalidLocation { x, z, location });
		}

		if location.offset() < self.end {
			return Err(Error::Overlap { x, z, location });
		}

		let skip = location.offset_bytes() - self.cursor;

		if skip > 0 {
			trace!("skipping {} bytes to chunk {}, {}", skip, x, z);

			let skipped = io::copy(&mut (&mut self.input).take(skip), &mut io::sink())?;

			if skipped < skip {
				return Err(io::Error::new(ErrorKind::UnexpectedEof, "region file ends before a chunk").into());
			}

			self.cursor += skip;
		}

		let mut bytes = [0u8; CHUNK_HEADER_BYTES];
		self.input.read_exact(&mut bytes)?;

		let header = ChunkHeader::from_bytes(bytes);

		if header.len == 0 || (header.len as u64) + 4 > location.len_bytes() as u64 {
			return Err(Error::Oversized { x, z, len: header.len });
		}

		let compression = Compression::from_id(header.compression)
			.ok_or(Error::UnknownCompression { x, z, compression: header.compression })?;

		let mut data = vec![0; header.len as usize - 1];
		self.input.read_exact(&mut data)?;

		self.cursor += (CHUNK_HEADER_BYTES + data.len()) as u64;
		self.end = location.end();

		Ok(RegionChunk { x, z, location, timestamp, payload: ChunkPayload { compression, data } })
	}
}

impl<R: Read> Iterator for Chunks<R> {
	type Item = Result<RegionChunk>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		let (x, z, location, timestamp) = self.pending.next()?;
		let result = self.read(x, z, location, timestamp);

		self.failed = result.is_err();

		Some(result)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::header::RegionHeaderMut;
	use crate::writer::RegionWriter;
	use crate::zlib::ZlibBuffer;
	use nbt::Compound;

	fn document(value: i32) -> NamedTag {
		NamedTag::new("", Compound::new().with("Level", Compound::new().with("value", value)))
	}

	fn value_of(chunk: &RegionChunk) -> i32 {
		chunk.payload.decode().unwrap().compound().unwrap().compound("Level").unwrap().i32("value").unwrap()
	}

	/// Builds a file by hand: each entry is a slot, its location, and the bytes at that location.
	fn build(entries: &[(u8, u8, ChunkLocation, Vec<u8>)]) -> Vec<u8> {
		let mut header = [0u8; 8192];

		for &(x, z, location, _) in entries {
			RegionHeaderMut::new(&mut header).location(x, z, location);
		}

		let mut file = header.to_vec();

		for &(_, _, location, ref bytes) in entries {
			let start = location.offset_bytes() as usize;

			if file.len() < start + bytes.len() {
				file.resize(start + bytes.len(), 0);
			}

			file[start..start + bytes.len()].copy_from_slice(bytes);
		}

		file
	}

	fn framed(compression: u8, data: &[u8]) -> Vec<u8> {
		let mut bytes = ChunkHeader { len: data.len() as u32 + 1, compression }.into_bytes().to_vec();
		bytes.extend_from_slice(data);

		bytes
	}

	#[test]
	fn test_round_trip() {
		let mut writer = RegionWriter::new();

		for &(x, z) in &[(0, 0), (31, 31), (5, 17)] {
			let buffer = ZlibBuffer::compress(&document((x as i32) * 100 + z as i32)).unwrap();
			writer.column(x, z, buffer, ChunkTimestamp::from_unix_seconds(x as u32));
		}

		let mut file = Vec::new();
		writer.finish(&mut file).unwrap();

		let chunks: Vec<_> = RegionReader::new(&file[..]).unwrap().chunks().collect::<Result<_>>().unwrap();

		assert_eq!(chunks.len(), 3);

		for chunk in &chunks {
			assert_eq!(value_of(chunk), (chunk.x as i32) * 100 + chunk.z as i32);
			assert_eq!(chunk.timestamp.into_unix_seconds(), chunk.x as u32);
			assert_eq!(chunk.payload.compression, Compression::Zlib);
		}
	}

	#[test]
	fn test_empty_slots() {
		let file = vec![0u8; 8192];
		let reader = RegionReader::new(&file[..]).unwrap();

		assert!(reader.locations().is_empty());
		assert_eq!(reader.chunks().count(), 0);
	}

	#[test]
	fn test_out_of_order_layout() {
		let first = ZlibBuffer::compress(&document(1)).unwrap();
		let second = ZlibBuffer::compress(&document(2)).unwrap();

		// Slot 0 is stored after slot 1, with a gap between them.
		let file = build(&[
			(0, 0, ChunkLocation::from_parts(5, 1), framed(2, first.as_bytes())),
			(1, 0, ChunkLocation::from_parts(2, 1), framed(2, second.as_bytes()))
		]);

		let reader = RegionReader::new(&file[..]).unwrap();
		let order: Vec<_> = reader.locations().iter().map(|&(x, z, _)| (x, z)).collect();

		assert_eq!(order, vec![(1, 0), (0, 0)]);

		let chunks: Vec<_> = reader.chunks().collect::<Result<_>>().unwrap();

		assert_eq!((chunks[0].x, value_of(&chunks[0])), (1, 2));
		assert_eq!((chunks[1].x, value_of(&chunks[1])), (0, 1));
	}

	#[test]
	fn test_gzip_payload() {
		let data = nbt::stream::encode(&document(7)).unwrap();
		let mut gzip = Vec::new();
		nbt::write_to(&mut gzip, &document(7), Framing::Gzip).unwrap();

		assert_ne!(gzip, data);

		let file = build(&[(3, 3, ChunkLocation::from_parts(2, 1), framed(1, &gzip))]);
		let chunk = RegionReader::new(&file[..]).unwrap().chunks().next().unwrap().unwrap();

		assert_eq!(chunk.payload.compression, Compression::Gzip);
		assert_eq!(value_of(&chunk), 7);
	}

	#[test]
	fn test_overlap() {
		let buffer = ZlibBuffer::compress(&document(1)).unwrap();

		let file = build(&[
			(0, 0, ChunkLocation::from_parts(2, 2), framed(2, buffer.as_bytes())),
			(1, 0, ChunkLocation::from_parts(3, 1), framed(2, buffer.as_bytes()))
		]);

		let results: Vec<_> = RegionReader::new(&file[..]).unwrap().chunks().collect();

		assert_eq!(results.len(), 2);
		assert!(results[0].is_ok());

		match results[1] {
			Err(Error::Overlap { x: 1, z: 0, .. }) => (),
			ref other => panic!("unexpected result: {:?}", other.as_ref().map(|chunk| (chunk.x, chunk.z)))
		}
	}

	#[test]
	fn test_location_in_header() {
		let file = build(&[(0, 0, ChunkLocation::from_parts(1, 1), Vec::new())]);

		match RegionReader::new(&file[..]).unwrap().chunks().next() {
			Some(Err(Error::InvalidLocation { x: 0, z: 0, .. })) => (),
			_ => panic!("accepted a chunk inside the header")
		}
	}

	#[test]
	fn test_zero_sectors() {
		let file = build(&[(4, 0, ChunkLocation::from_parts(2, 0), framed(2, &[0; 16]))]);

		match RegionReader::new(&file[..]).unwrap().chunks().next() {
			Some(Err(Error::InvalidLocation { x: 4, z: 0, .. })) => (),
			_ => panic!("accepted a chunk with no sectors")
		}
	}

	#[test]
	fn test_unknown_compression() {
		let file = build(&[(0, 2, ChunkLocation::from_parts(2, 1), framed(3, &[0; 16]))]);

		match RegionReader::new(&file[..]).unwrap().chunks().next() {
			Some(Err(Error::UnknownCompression { compression: 3, .. })) => (),
			_ => panic!("accepted compression type 3")
		}
	}

	#[test]
	fn test_oversized() {
		let mut bytes = framed(2, &[0; 16]);
		bytes[0..4].copy_from_slice(&[0, 0, 0x10, 0x00]);

		let file = build(&[(0, 0, ChunkLocation::from_parts(2, 1), bytes)]);

		match RegionReader::new(&file[..]).unwrap().chunks().next() {
			Some(Err(Error::Oversized { len: 4096, .. })) => (),
			_ => panic!("accepted a payload longer than its sectors")
		}
	}

	#[test]
	fn test_truncated() {
		let buffer = ZlibBuffer::compress(&document(1)).unwrap();
		let mut file = build(&[(0, 0, ChunkLocation::from_parts(2, 1), framed(2, buffer.as_bytes()))]);
		file.truncate(8192 + 10);

		match RegionReader::new(&file[..]).unwrap().chunks().next() {
			Some(Err(Error::Io(ref e))) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
			_ => panic!("accepted a truncated payload")
		}

		assert!(RegionReader::new(&file[..100]).is_err());
	}
}
