use crate::error::Result;
use crate::reader::Reader;
use crate::tag::NamedTag;
use crate::writer::Writer;
use flate2::read::GzDecoder;
use std::io::{BufReader, Read, Write};

/// How a standalone document is framed on disk. The caller picks; content is never sniffed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Framing {
	/// The raw encoded bytes.
	Plain,
	/// The encoded bytes inside a GZIP member, as used by `level.dat`.
	Gzip
}

/// Encodes a document to raw bytes.
pub fn encode(named: &NamedTag) -> Result<Vec<u8>> {
	Writer::new(Vec::new()).write(named)
}

/// Decodes a document from raw bytes.
pub fn decode(bytes: &[u8]) -> Result<NamedTag> {
	Reader::new(bytes).read()
}

pub fn write_to<W: Write>(mut out: W, named: &NamedTag, framing: Framing) -> Result<()> {
	let encoded = encode(named)?;

	match framing {
		Framing::Plain => out.write_all(&encoded)?,
		Framing::Gzip => out.write_all(&deflate::deflate_bytes_gzip(&encoded))?
	}

	out.flush()?;

	Ok(())
}

pub fn read_from<R: Read>(input: R, framing: Framing) -> Result<NamedTag> {
	match framing {
		Framing::Plain => Reader::new(BufReader::new(input)).read(),
		Framing::Gzip => Reader::new(BufReader::new(GzDecoder::new(input))).read()
	}
}
