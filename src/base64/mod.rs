pub mod decode;
pub mod encode;

pub use decode::{decode, DecodeState, Decoder};
pub use encode::{encode, encode_into, encoded_len, EncodeState, Encoder, MAX_LINE_LENGTH};
