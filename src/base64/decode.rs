use crate::alphabet::{Alphabet, Symbol, STANDARD};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("Invalid character '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },
    #[error("Non-ascii character {character:#04x} at index {index}")]
    NonAsciiCharacter { character: u8, index: usize },
    #[error("Misplaced padding at index {index}")]
    MisplacedPadding { index: usize },
    #[error("Data after padding at index {index}")]
    DataAfterPadding { index: usize },
    #[error("Truncated input: {symbols} trailing symbol(s) do not form a complete group")]
    Truncated { symbols: usize },
}

impl Error {
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

fn invalid(character: u8, index: usize) -> Error {
    if character >= 128 {
        Error::NonAsciiCharacter { character, index }
    } else {
        Error::InvalidCharacter {
            character: character as char,
            index,
        }
    }
}

/// Resumable unpacker. Ignorable characters never count toward a group, and
/// error indexes are offsets into everything pushed so far.
#[derive(Clone, Debug)]
pub struct DecodeState {
    group: [u8; 4],
    symbols: usize,
    pads: usize,
    padded: bool,
    position: usize,
    lenient: bool,
}

impl DecodeState {
    pub const fn new(lenient: bool) -> Self {
        Self {
            group: [0; 4],
            symbols: 0,
            pads: 0,
            padded: false,
            position: 0,
            lenient,
        }
    }

    /// Symbols (pads included) of the group currently being collected.
    pub fn pending(&self) -> usize {
        self.symbols
    }

    pub fn push(&mut self, alphabet: &Alphabet, input: &[u8], output: &mut Vec<u8>) -> Result<(), Error> {
        for &character in input {
            let index = self.position;
            self.position += 1;
            match alphabet.decode(character) {
                Symbol::Ignorable => {}
                Symbol::Invalid if self.lenient => {}
                Symbol::Invalid => return Err(invalid(character, index)),
                Symbol::Value(value) => {
                    if self.padded || self.pads > 0 {
                        return Err(Error::DataAfterPadding { index });
                    }
                    self.group[self.symbols] = value;
                    self.symbols += 1;
                    if self.symbols == 4 {
                        self.flush(output);
                    }
                }
                Symbol::Pad => {
                    if self.padded || self.symbols < 2 {
                        return Err(Error::MisplacedPadding { index });
                    }
                    self.group[self.symbols] = 0;
                    self.symbols += 1;
                    self.pads += 1;
                    if self.symbols == 4 {
                        self.flush(output);
                        self.padded = true;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), Error> {
        if self.symbols > 0 {
            return Err(Error::Truncated { symbols: self.symbols });
        }
        Ok(())
    }

    fn flush(&mut self, output: &mut Vec<u8>) {
        let value = (self.group[0] as u32) << 18 | (self.group[1] as u32) << 12 | (self.group[2] as u32) << 6 | self.group[3] as u32;
        let bytes = [(value >> 16) as u8, (value >> 8) as u8, value as u8];
        output.extend_from_slice(&bytes[..3 - self.pads]);
        self.symbols = 0;
        self.pads = 0;
    }
}

pub struct Decoder<'a> {
    alphabet: &'a Alphabet,
    lenient: bool,
}

impl<'a> Decoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet, lenient: false }
    }

    pub const fn with_lenient(self, lenient: bool) -> Self {
        Self { lenient, ..self }
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn state(&self) -> DecodeState {
        DecodeState::new(self.lenient)
    }

    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
        let input = input.as_ref();
        let mut output = Vec::with_capacity(input.len() / 4 * 3 + 3);
        let mut state = self.state();
        state.push(self.alphabet, input, &mut output)?;
        state.finish()?;
        Ok(output)
    }

    pub fn standard() -> &'static Self {
        &DECODER
    }
}

const DECODER: Decoder = Decoder::new(&STANDARD);

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    Decoder::standard().decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{ORDERED, URL_SAFE};
    use crate::base64::encode::{encode, Encoder};
    use proptest::prelude::*;

    #[test]
    fn decode() {
        assert_eq!(super::decode("FPucA9l+"), Ok(vec![0x14, 0xfb, 0x9c, 0x03, 0xd9, 0x7e]));
        assert_eq!(super::decode("FPucA9k="), Ok(vec![0x14, 0xfb, 0x9c, 0x03, 0xd9]));
        assert_eq!(super::decode("FPucAw=="), Ok(vec![0x14, 0xfb, 0x9c, 0x03]));
        assert_eq!(super::decode(""), Ok(b"".to_vec()));
        assert_eq!(super::decode("Zg=="), Ok(b"f".to_vec()));
        assert_eq!(super::decode("Zm8="), Ok(b"fo".to_vec()));
        assert_eq!(super::decode("Zm9v"), Ok(b"foo".to_vec()));
        assert_eq!(super::decode("Zm9vYg=="), Ok(b"foob".to_vec()));
        assert_eq!(super::decode("Zm9vYmE="), Ok(b"fooba".to_vec()));
        assert_eq!(super::decode("Zm9vYmFy"), Ok(b"foobar".to_vec()));
        assert_eq!(super::decode("dGhpcyBpcyBhIHRlc3Q="), Ok(b"this is a test".to_vec()));
    }

    #[test]
    fn whitespace() {
        assert_eq!(super::decode(" Zm9v\r\nYmFy\n"), Ok(b"foobar".to_vec()));
        assert_eq!(super::decode("Z m 9 v Y g = ="), Ok(b"foob".to_vec()));
        assert_eq!(super::decode("Zg==\n\n"), Ok(b"f".to_vec()));
        assert_eq!(super::decode("\t \r\n"), Ok(vec![]));
    }

    #[test]
    fn invalid_characters() {
        assert_eq!(super::decode("Zm9v*mFy"), Err(Error::InvalidCharacter { character: '*', index: 4 }));
        assert_eq!(super::decode("Zm9v\u{e9}"), Err(Error::NonAsciiCharacter { character: 0xc3, index: 4 }));
        assert_eq!(super::decode("Zm9v-_"), Err(Error::InvalidCharacter { character: '-', index: 4 }));

        let lenient = Decoder::new(&STANDARD).with_lenient(true);
        assert_eq!(lenient.decode("Zm9v*mFy"), Err(Error::Truncated { symbols: 3 }));
        assert_eq!(lenient.decode("Zm*9v!Y\u{e9}mFy"), Ok(b"foobar".to_vec()));
    }

    #[test]
    fn padding() {
        assert_eq!(super::decode("Z==="), Err(Error::MisplacedPadding { index: 1 }));
        assert_eq!(super::decode("===="), Err(Error::MisplacedPadding { index: 0 }));
        assert_eq!(super::decode("Zg=a"), Err(Error::DataAfterPadding { index: 3 }));
        assert_eq!(super::decode("Zg==Zg=="), Err(Error::DataAfterPadding { index: 4 }));
        assert_eq!(super::decode("Zm8=="), Err(Error::MisplacedPadding { index: 4 }));
        assert_eq!(super::decode("Zg= ="), Ok(b"f".to_vec()));
        // A pad that opens a group wins over the incomplete symbol count.
        assert_eq!(super::decode("Zm9v="), Err(Error::MisplacedPadding { index: 4 }));
    }

    #[test]
    fn truncated() {
        assert_eq!(super::decode("Z"), Err(Error::Truncated { symbols: 1 }));
        assert_eq!(super::decode("Zm9vY"), Err(Error::Truncated { symbols: 1 }));
        assert_eq!(super::decode("Zm9vYg"), Err(Error::Truncated { symbols: 2 }));
        assert_eq!(super::decode("Zm9vYmE"), Err(Error::Truncated { symbols: 3 }));
        assert_eq!(super::decode("Zg="), Err(Error::Truncated { symbols: 3 }));
        assert!(super::decode("Zm8").unwrap_err().is_truncated());
        assert!(!super::decode("Zm8*").unwrap_err().is_truncated());
    }

    #[test]
    fn alphabet_isolation() {
        let input = b"\xfb\xff\xbf\x00\x10\x83";
        let ordered = Encoder::new(&ORDERED).encode(input);
        assert_ne!(super::decode(&ordered).ok(), Some(input.to_vec()));

        let url_safe = Encoder::new(&URL_SAFE).encode(input);
        assert_eq!(super::decode(&url_safe), Err(Error::InvalidCharacter { character: '-', index: 0 }));
        assert_eq!(Decoder::new(&URL_SAFE).decode(&url_safe), Ok(input.to_vec()));
        assert_eq!(Decoder::new(&ORDERED).decode(&ordered), Ok(input.to_vec()));
    }

    #[test]
    fn resumable() {
        let mut state = Decoder::standard().state();
        let mut output = Vec::new();
        state.push(&STANDARD, b"Zm", &mut output).unwrap();
        assert!(output.is_empty());
        assert_eq!(state.pending(), 2);
        state.push(&STANDARD, b"9vY", &mut output).unwrap();
        assert_eq!(output, b"foo");
        assert_eq!(state.finish(), Err(Error::Truncated { symbols: 1 }));
        state.push(&STANDARD, b"g=\n=", &mut output).unwrap();
        assert_eq!(state.finish(), Ok(()));
        assert_eq!(output, b"foob");
        assert_eq!(state.push(&STANDARD, b"*", &mut output), Err(Error::InvalidCharacter { character: '*', index: 9 }));
    }

    proptest! {
        #[test]
        fn round_trip(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(super::decode(encode(&input)), Ok(input));
        }

        #[test]
        fn whitespace_tolerance(
            input in proptest::collection::vec(any::<u8>(), 0..256),
            insertions in proptest::collection::vec((any::<usize>(), prop::sample::select(vec![' ', '\t', '\r', '\n'])), 0..32),
        ) {
            let mut text: Vec<char> = encode(&input).chars().collect();
            for (position, whitespace) in insertions {
                text.insert(position % (text.len() + 1), whitespace);
            }
            let text: String = text.into_iter().collect();
            prop_assert_eq!(super::decode(text), Ok(input));
        }

        #[test]
        fn truncation(input in proptest::collection::vec(any::<u8>(), 1..256), cut in 1usize..4) {
            let text = encode(&input);
            let text = &text[..text.len() - cut];
            prop_assert!(super::decode(text).unwrap_err().is_truncated());
        }
    }
}
