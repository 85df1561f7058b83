//! Base64 transfer encoding with optional gzip compression and line wrapping.
//!
//! ```
//! use base64_transfer::{decode, encode, encode_with, Options};
//!
//! assert_eq!(encode(b"this is a test"), "dGhpcyBpcyBhIHRlc3Q=");
//! assert_eq!(decode("dGhpcyBp\ncyBhIHRlc3Q=").unwrap(), b"this is a test");
//!
//! let text = encode_with(b"this is a test", &Options::new().with_compress(true)).unwrap();
//! assert_eq!(decode(&text).unwrap(), b"this is a test");
//! ```

pub mod alphabet;
pub mod base64;
pub mod codec;
pub mod compression;
pub mod error;
pub mod object;
pub mod options;
pub mod stream;

pub use self::{
    codec::{decode, decode_with, encode, encode_with},
    error::{Error, ErrorKind},
    object::{decode_value, decode_value_with, encode_value, encode_value_with},
    options::{Options, Variant},
    stream::{open_decode_stream, open_encode_stream, DecodeStream, EncodeStream},
};
