use crate::alphabet::{Alphabet, PAD, STANDARD};
use thiserror::Error;

pub const MAX_LINE_LENGTH: usize = 76;

const NEW_LINE: u8 = b'\n';

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("Output buffer too small")]
    BufferTooSmall,
}

/// Exact length of the text produced for `len` input bytes.
pub fn encoded_len(len: usize, line_wrap: bool) -> usize {
    let symbols = len.div_ceil(3) * 4;
    if line_wrap && symbols > 0 {
        symbols + (symbols - 1) / MAX_LINE_LENGTH
    } else {
        symbols
    }
}

pub trait Output {
    fn put(&mut self, byte: u8);
}

impl Output for Vec<u8> {
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }
}

struct SliceOutput<'a> {
    buffer: &'a mut [u8],
    index: usize,
}

// Callers size `buffer` with `encoded_len` before packing into it.
impl Output for SliceOutput<'_> {
    fn put(&mut self, byte: u8) {
        self.buffer[self.index] = byte;
        self.index += 1;
    }
}

/// Resumable packer: holds up to two bytes of an incomplete group and the
/// current line column between calls.
#[derive(Clone, Debug)]
pub struct EncodeState {
    pending: [u8; 3],
    pending_len: usize,
    column: usize,
    line_wrap: bool,
}

impl EncodeState {
    pub const fn new(line_wrap: bool) -> Self {
        Self {
            pending: [0; 3],
            pending_len: 0,
            column: 0,
            line_wrap,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending_len
    }

    pub fn push(&mut self, alphabet: &Alphabet, input: &[u8], output: &mut impl Output) {
        let mut input = input;
        if self.pending_len > 0 {
            let take = (3 - self.pending_len).min(input.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&input[..take]);
            self.pending_len += take;
            input = &input[take..];
            if self.pending_len < 3 {
                return;
            }
            self.pending_len = 0;
            self.group(alphabet, self.pending, 3, output);
        }

        let mut groups = input.chunks_exact(3);
        for group in &mut groups {
            self.group(alphabet, [group[0], group[1], group[2]], 3, output);
        }
        let remainder = groups.remainder();
        self.pending[..remainder.len()].copy_from_slice(remainder);
        self.pending_len = remainder.len();
    }

    pub fn finish(&mut self, alphabet: &Alphabet, output: &mut impl Output) {
        if self.pending_len == 0 {
            return;
        }
        let mut bytes = [0u8; 3];
        bytes[..self.pending_len].copy_from_slice(&self.pending[..self.pending_len]);
        let significant = self.pending_len;
        self.pending_len = 0;
        self.group(alphabet, bytes, significant, output);
    }

    fn group(&mut self, alphabet: &Alphabet, bytes: [u8; 3], significant: usize, output: &mut impl Output) {
        let value = (bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32;
        for index in 0..4 {
            let symbol = if index <= significant {
                alphabet.encode((value >> (18 - 6 * index)) as u8)
            } else {
                PAD
            };
            self.emit(symbol, output);
        }
    }

    fn emit(&mut self, symbol: u8, output: &mut impl Output) {
        if self.line_wrap && self.column == MAX_LINE_LENGTH {
            output.put(NEW_LINE);
            self.column = 0;
        }
        output.put(symbol);
        self.column += 1;
    }
}

pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
    line_wrap: bool,
}

impl<'a> Encoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            line_wrap: false,
        }
    }

    pub const fn with_line_wrap(self, line_wrap: bool) -> Self {
        Self { line_wrap, ..self }
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn state(&self) -> EncodeState {
        EncodeState::new(self.line_wrap)
    }

    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        let input = input.as_ref();
        let buffer = output.as_mut();
        let len = encoded_len(input.len(), self.line_wrap);
        if buffer.len() < len {
            return Err(Error::BufferTooSmall);
        }
        let mut output = SliceOutput { buffer, index: 0 };
        let mut state = self.state();
        state.push(self.alphabet, input, &mut output);
        state.finish(self.alphabet, &mut output);
        Ok(output.index)
    }

    pub fn encode_bytes(&self, input: impl AsRef<[u8]>) -> Vec<u8> {
        let input = input.as_ref();
        let mut output = Vec::with_capacity(encoded_len(input.len(), self.line_wrap));
        let mut state = self.state();
        state.push(self.alphabet, input, &mut output);
        state.finish(self.alphabet, &mut output);
        output
    }

    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        ascii_string(self.encode_bytes(input))
    }

    pub fn standard() -> &'static Self {
        &ENCODER
    }
}

const ENCODER: Encoder = Encoder::new(&STANDARD);

pub(crate) fn ascii_string(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

pub fn encode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    Encoder::standard().encode_into(input, output)
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    Encoder::standard().encode(input)
}
