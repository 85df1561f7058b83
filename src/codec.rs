use crate::{base64::encode::ascii_string, compression, error::Error, options::Options};

/// Standard alphabet, single line, no compression.
pub fn encode(input: impl AsRef<[u8]>) -> String {
    crate::base64::encode(input)
}

pub fn encode_with(input: impl AsRef<[u8]>, options: &Options) -> Result<String, Error> {
    let encoder = options.variant().encoder(options.line_wrap());
    if options.compress() {
        let compressed = compression::compress(input.as_ref())?;
        return Ok(ascii_string(encoder.encode_bytes(compressed)));
    }
    Ok(encoder.encode(input))
}

/// Standard alphabet, strict. A gzip payload is decompressed.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    decode_with(input, &Options::default())
}

pub fn decode_with(input: impl AsRef<[u8]>, options: &Options) -> Result<Vec<u8>, Error> {
    let payload = options.variant().decoder(options.lenient()).decode(input)?;
    if options.gunzip() {
        compression::sniff(payload)
    } else {
        Ok(payload)
    }
}
