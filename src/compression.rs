use crate::error::Error;
use flate2::{bufread::GzDecoder, write::GzEncoder, Compression};
use std::io::{self, Read, Write};

/// Leading bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_compressed(payload: &[u8]) -> bool {
    payload.starts_with(&GZIP_MAGIC)
}

pub fn encoder() -> GzEncoder<Vec<u8>> {
    GzEncoder::new(Vec::new(), Compression::default())
}

pub fn compress(payload: &[u8]) -> Result<Vec<u8>, Error> {
    let mut encoder = encoder();
    encoder.write_all(payload)?;
    Ok(encoder.finish()?)
}

pub fn decompress(payload: &[u8]) -> Result<Vec<u8>, Error> {
    let mut output = Vec::with_capacity(payload.len() * 2);
    let mut decoder = GzDecoder::new(payload);
    decoder.read_to_end(&mut output).map_err(Error::Corruption)?;
    let trailing = decoder.into_inner();
    if !trailing.is_empty() {
        return Err(Error::Corruption(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} bytes after the end of the gzip member", trailing.len()),
        )));
    }
    Ok(output)
}

/// Decompresses `payload` when it carries the gzip magic number, otherwise
/// hands it back untouched.
pub fn sniff(payload: Vec<u8>) -> Result<Vec<u8>, Error> {
    if !is_compressed(&payload) {
        return Ok(payload);
    }
    log::debug!("Payload carries gzip magic, decompressing {} bytes", payload.len());
    decompress(&payload)
}
