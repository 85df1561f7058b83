//! One-call conversion between serializable values and transfer text.
//!
//! Values are serialized as JSON, gzipped, and encoded with line wrapping,
//! which is what mail-style transports expect.

use crate::{codec, error::Error, options::Options};
use serde::{de::DeserializeOwned, Serialize};

pub const OBJECT_OPTIONS: Options = Options::new().with_compress(true).with_line_wrap(true);

pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    encode_value_with(value, &OBJECT_OPTIONS)
}

pub fn encode_value_with<T: Serialize + ?Sized>(value: &T, options: &Options) -> Result<String, Error> {
    let bytes = serde_json::to_vec(value)?;
    codec::encode_with(bytes, options)
}

pub fn decode_value<T: DeserializeOwned>(text: impl AsRef<[u8]>) -> Result<T, Error> {
    decode_value_with(text, &OBJECT_OPTIONS)
}

pub fn decode_value_with<T: DeserializeOwned>(text: impl AsRef<[u8]>, options: &Options) -> Result<T, Error> {
    let bytes = codec::decode_with(text, options)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, options::Variant};
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Envelope {
        sender: String,
        recipients: Vec<String>,
        attempts: u32,
        headers: BTreeMap<String, String>,
    }

    fn envelope() -> Envelope {
        Envelope {
            sender: "noreply@example.com".to_string(),
            recipients: (0..40).map(|index| format!("user{}@example.com", index)).collect(),
            attempts: 3,
            headers: [("Subject".to_string(), "Weekly digest".to_string())].into_iter().collect(),
        }
    }

    #[test]
    fn round_trip() {
        let text = encode_value(&envelope()).unwrap();
        assert!(text.starts_with("H4sI"));
        assert!(text.contains('\n'));
        assert_eq!(decode_value::<Envelope>(&text).unwrap(), envelope());
    }

    #[test]
    fn explicit_options() {
        let options = Options::new().with_variant(Variant::UrlSafe);
        let text = encode_value_with(&envelope(), &options).unwrap();
        assert!(!text.contains('+') && !text.contains('/'));
        assert_eq!(decode_value_with::<Envelope>(&text, &options).unwrap(), envelope());
    }

    #[test]
    fn uncompressed_text_is_accepted() {
        let text = codec::encode(br#"{"a":[1,2,3]}"#);
        let value: HashMap<String, Vec<u8>> = decode_value(text).unwrap();
        assert_eq!(value["a"], vec![1, 2, 3]);
    }

    #[test]
    fn serialization_errors() {
        let unserializable: HashMap<(u8, u8), u8> = [((1, 2), 3)].into_iter().collect();
        assert_eq!(encode_value(&unserializable).unwrap_err().kind(), ErrorKind::Serialization);

        let text = encode_value(&vec!["not", "an", "envelope"]).unwrap();
        assert_eq!(decode_value::<Envelope>(&text).unwrap_err().kind(), ErrorKind::Serialization);
    }

    #[test]
    fn codec_errors_are_distinct() {
        assert_eq!(decode_value::<Envelope>("H4sI*").unwrap_err().kind(), ErrorKind::Malformed);
        assert_eq!(decode_value::<Envelope>("H4sIAA").unwrap_err().kind(), ErrorKind::Truncated);
        assert_eq!(decode_value::<Envelope>("H4sIAAAA").unwrap_err().kind(), ErrorKind::Corruption);
    }
}
