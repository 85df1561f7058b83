pub mod decode;
pub mod encode;

use crate::options::Options;
use std::io::Write;

pub use decode::DecodeStream;
pub use encode::EncodeStream;

pub fn open_encode_stream<W: Write>(sink: W, options: Options) -> EncodeStream<W> {
    EncodeStream::new(sink, &options)
}

pub fn open_decode_stream<W: Write>(sink: W, options: Options) -> DecodeStream<W> {
    DecodeStream::new(sink, &options)
}
