use std::io::{self, Read, Write};

use base64::engine::GeneralPurpose;
use base64::read::DecoderReader;
use base64::write::EncoderWriter;

use super::Alphabet;
use crate::close::Close;

/// Wrap `sink` so that bytes written to it reach `sink` Base64-encoded.
pub fn encode_wrap<W: Write>(sink: W) -> Base64Encoder<W> {
    Base64Encoder::new(sink)
}

/// Wrap `source` so that reading from it yields the decoded bytes of the
/// Base64 text it contains.
pub fn decode_wrap<R: Read>(source: R) -> Base64Decoder<R> {
    Base64Decoder::new(source)
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "base64 stream is closed")
}

/// Streaming Base64 encoder.
///
/// Input is encoded in groups of 3 bytes, which may span several writes.
/// The last 1 or 2 bytes of input are held back until [`Close::close`] or
/// [`Base64Encoder::finish`], which write them together with the `=`
/// padding. An encoder dropped without being closed still writes the held
/// back group, but any error doing so is lost.
pub struct Base64Encoder<W: Write> {
    encoder: Option<EncoderWriter<'static, GeneralPurpose, W>>,
    // Takes over the sink once the trailing group is written.
    sink: Option<W>,
    closed: bool,
}

impl<W: Write> Base64Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self::with_alphabet(sink, Alphabet::Standard)
    }

    pub fn with_alphabet(sink: W, alphabet: Alphabet) -> Self {
        Self {
            encoder: Some(EncoderWriter::new(sink, alphabet.engine())),
            sink: None,
            closed: false,
        }
    }

    /// Write the trailing group and padding, flush, and return the sink
    /// without closing it.
    pub fn finish(mut self) -> io::Result<W> {
        self.write_trailing_group()?;
        let mut sink = self.sink.take().ok_or_else(closed_error)?;
        sink.flush()?;
        Ok(sink)
    }

    fn write_trailing_group(&mut self) -> io::Result<()> {
        if let Some(encoder) = self.encoder.as_mut() {
            let sink = encoder.finish()?;
            self.encoder = None;
            self.sink = Some(sink);
            log::trace!("base64 trailing group written");
        }
        Ok(())
    }

    fn open_encoder(
        &mut self,
    ) -> io::Result<&mut EncoderWriter<'static, GeneralPurpose, W>> {
        self.encoder.as_mut().ok_or_else(closed_error)
    }
}

impl<W: Write> Write for Base64Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open_encoder()?.write(buf)
    }

    /// Flushes the complete groups only. The trailing group is written by
    /// closing.
    fn flush(&mut self) -> io::Result<()> {
        self.open_encoder()?.flush()
    }
}

impl<W: Write + Close> Close for Base64Encoder<W> {
    /// Write the trailing group and padding, then flush and close the sink.
    /// Closing twice is a no-op.
    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.write_trailing_group()?;
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
            sink.close()?;
        }
        self.closed = true;
        Ok(())
    }
}

/// Streaming Base64 decoder.
///
/// Reads fail with [`io::ErrorKind::InvalidData`], carrying a
/// [`base64::DecodeError`], as soon as a byte outside the alphabet is met.
pub struct Base64Decoder<R: Read> {
    decoder: Option<DecoderReader<'static, GeneralPurpose, R>>,
    // Takes over the source once closed.
    source: Option<R>,
}

impl<R: Read> Base64Decoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_alphabet(source, Alphabet::Standard)
    }

    pub fn with_alphabet(source: R, alphabet: Alphabet) -> Self {
        Self {
            decoder: Some(DecoderReader::new(source, alphabet.engine())),
            source: None,
        }
    }

    /// Return the wrapped source. Decoded bytes not yet read are lost.
    pub fn into_inner(self) -> R {
        match (self.decoder, self.source) {
            (Some(decoder), _) => decoder.into_inner(),
            (None, Some(source)) => source,
            (None, None) => unreachable!("the source is held in one place"),
        }
    }
}

impl<R: Read> Read for Base64Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder.as_mut().ok_or_else(closed_error)?.read(buf)
    }
}

impl<R: Read + Close> Close for Base64Decoder<R> {
    fn close(&mut self) -> io::Result<()> {
        if let Some(decoder) = self.decoder.take() {
            self.source = Some(decoder.into_inner());
        }
        match self.source.as_mut() {
            Some(source) => source.close(),
            None => Ok(()),
        }
    }
}
