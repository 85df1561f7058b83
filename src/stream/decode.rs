use crate::{
    base64::{DecodeState, Decoder},
    compression::{self, GZIP_MAGIC},
    error::Error,
    options::Options,
};
use flate2::write::GzDecoder;
use std::{
    io::{self, Write},
    mem,
};

enum Payload {
    Sniffing(Vec<u8>),
    Plain,
    Gzip(GzDecoder<Vec<u8>>),
}

/// Incremental decoder writing bytes to `sink`.
///
/// Decoded bytes are forwarded as soon as their group is complete, except for
/// the first two bytes which are held back until it is known whether they
/// start a gzip member. A stream that returned an error must be discarded.
pub struct DecodeStream<W: Write> {
    sink: W,
    decoder: Decoder<'static>,
    state: DecodeState,
    payload: Payload,
    buffer: Vec<u8>,
}

impl<W: Write> DecodeStream<W> {
    pub fn new(sink: W, options: &Options) -> Self {
        let decoder = options.variant().decoder(options.lenient());
        let payload = if options.gunzip() {
            Payload::Sniffing(Vec::with_capacity(GZIP_MAGIC.len()))
        } else {
            Payload::Plain
        };
        Self {
            sink,
            state: decoder.state(),
            decoder,
            payload,
            buffer: Vec::new(),
        }
    }

    /// Decodes `chunk`. Bytes of groups completed before a malformed
    /// character are still forwarded before the error is returned.
    pub fn write(&mut self, chunk: &[u8]) -> Result<(), Error> {
        let result = self.state.push(self.decoder.alphabet(), chunk, &mut self.buffer);
        self.forward()?;
        Ok(result?)
    }

    pub fn finalize(mut self) -> Result<W, Error> {
        self.state.finish()?;
        match mem::replace(&mut self.payload, Payload::Plain) {
            Payload::Sniffing(head) => self.sink.write_all(&head)?,
            Payload::Gzip(gzip) => {
                let decompressed = gzip.finish().map_err(Error::from_gzip)?;
                self.sink.write_all(&decompressed)?;
            }
            Payload::Plain => {}
        }
        self.sink.flush()?;
        log::trace!("Decode stream finalized");
        Ok(self.sink)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    fn forward(&mut self) -> Result<(), Error> {
        if let Payload::Sniffing(head) = &mut self.payload {
            head.append(&mut self.buffer);
            if head.len() < GZIP_MAGIC.len() {
                return Ok(());
            }
            let head = mem::take(head);
            self.payload = if compression::is_compressed(&head) {
                log::debug!("Stream carries gzip magic, decompressing");
                Payload::Gzip(GzDecoder::new(Vec::new()))
            } else {
                Payload::Plain
            };
            self.buffer = head;
        }

        let result = match &mut self.payload {
            Payload::Gzip(gzip) => match gzip.write_all(&self.buffer) {
                Ok(()) => {
                    let decompressed = mem::take(gzip.get_mut());
                    self.sink.write_all(&decompressed).map_err(Error::Io)
                }
                Err(error) => Err(Error::from_gzip(error)),
            },
            _ => self.sink.write_all(&self.buffer).map_err(Error::Io),
        };
        self.buffer.clear();
        result
    }
}

impl<W: Write> Write for DecodeStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        DecodeStream::write(self, buf).map_err(Error::into_io)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
