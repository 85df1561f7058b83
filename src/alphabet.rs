use thiserror::Error;

pub const PAD: u8 = b'=';

const WHITESPACE: [u8; 5] = [b' ', b'\t', b'\n', b'\r', 0x0c];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("Duplicate character '{character}' at indexes {first} and {second}")]
    DuplicateCharacter { character: char, first: usize, second: usize },
    #[error("Non-ascii character {character:#04x} at index {index}")]
    NonAsciiCharacter { character: u8, index: usize },
    #[error("Reserved character {character:?} at index {index}")]
    ReservedCharacter { character: char, index: usize },
}

/// Classification of a single input byte during decoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Symbol {
    Value(u8),
    Pad,
    Ignorable,
    Invalid,
}

pub struct Alphabet {
    encode: [u8; 64],
    decode: [Symbol; 256],
}

impl Alphabet {
    pub const fn new(characters: &[u8; 64]) -> Result<Self, Error> {
        let mut encode = [0u8; 64];
        let mut decode = [Symbol::Invalid; 256];

        let mut index = 0;
        while index < WHITESPACE.len() {
            decode[WHITESPACE[index] as usize] = Symbol::Ignorable;
            index += 1;
        }
        decode[PAD as usize] = Symbol::Pad;

        let mut index = 0;
        while index < encode.len() {
            let character = characters[index];
            if character >= 128 {
                return Err(Error::NonAsciiCharacter { index, character });
            }
            match decode[character as usize] {
                Symbol::Value(first) => {
                    return Err(Error::DuplicateCharacter {
                        character: character as char,
                        first: first as usize,
                        second: index,
                    })
                }
                Symbol::Pad | Symbol::Ignorable => {
                    return Err(Error::ReservedCharacter {
                        character: character as char,
                        index,
                    })
                }
                Symbol::Invalid => {}
            }
            encode[index] = character;
            decode[character as usize] = Symbol::Value(index as u8);
            index += 1;
        }

        Ok(Self { encode, decode })
    }

    pub fn encode(&self, value: u8) -> u8 {
        self.encode[(value & 0x3f) as usize]
    }

    pub fn decode(&self, character: u8) -> Symbol {
        self.decode[character as usize]
    }

    pub fn characters(&self) -> &[u8; 64] {
        &self.encode
    }
}

pub const STANDARD: Alphabet = match Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/") {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("Could not build standard alphabet"),
};

pub const URL_SAFE: Alphabet = match Alphabet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_") {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("Could not build url-safe alphabet"),
};

// Symbols sorted by ASCII value, so encoded strings sort like their input.
pub const ORDERED: Alphabet = match Alphabet::new(b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz") {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("Could not build ordered alphabet"),
};
