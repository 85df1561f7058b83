use crate::{
    base64::{EncodeState, Encoder},
    compression,
    error::Error,
    options::Options,
};
use flate2::write::GzEncoder;
use std::{
    io::{self, Write},
    mem,
};

/// Incremental encoder writing text to `sink`.
///
/// Every call writes the symbols of all complete groups straight through; at
/// most two input bytes stay buffered until `finalize`. Dropping the stream
/// without finalizing leaves the sink exactly as the last call left it.
pub struct EncodeStream<W: Write> {
    sink: W,
    encoder: Encoder<'static>,
    state: EncodeState,
    gzip: Option<GzEncoder<Vec<u8>>>,
    buffer: Vec<u8>,
}

impl<W: Write> EncodeStream<W> {
    pub fn new(sink: W, options: &Options) -> Self {
        let encoder = options.variant().encoder(options.line_wrap());
        Self {
            sink,
            state: encoder.state(),
            encoder,
            gzip: options.compress().then(compression::encoder),
            buffer: Vec::new(),
        }
    }

    pub fn write(&mut self, chunk: &[u8]) -> Result<(), Error> {
        match &mut self.gzip {
            Some(gzip) => {
                gzip.write_all(chunk)?;
                let compressed = mem::take(gzip.get_mut());
                self.pack(&compressed)
            }
            None => self.pack(chunk),
        }
    }

    pub fn finalize(mut self) -> Result<W, Error> {
        if let Some(gzip) = self.gzip.take() {
            let compressed = gzip.finish()?;
            self.pack(&compressed)?;
        }
        self.state.finish(self.encoder.alphabet(), &mut self.buffer);
        self.drain()?;
        self.sink.flush()?;
        log::trace!("Encode stream finalized");
        Ok(self.sink)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    fn pack(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.state.push(self.encoder.alphabet(), bytes, &mut self.buffer);
        self.drain()
    }

    fn drain(&mut self) -> Result<(), Error> {
        let result = self.sink.write_all(&self.buffer);
        self.buffer.clear();
        Ok(result?)
    }
}

impl<W: Write> Write for EncodeStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        EncodeStream::write(self, buf).map_err(Error::into_io)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
