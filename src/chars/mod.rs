//! Character streams and buffered character transfers.
//!
//! Byte streams are turned into character streams by [`CharReader`] and
//! [`CharWriter`], which own the decoding and encoding. The transfer loop
//! itself only sees `char`s.

mod charset;

pub use charset::Charset;

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use crate::close::Close;
use crate::config::validate_buffer_size;
use crate::copy::read_retrying;
use crate::{Result, TransferConfig, DEFAULT_BUFFER_SIZE};

/// A source of characters. `Ok(0)` for a non-empty buffer means the
/// source is exhausted.
pub trait CharRead {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize>;
}

/// A sink of characters.
pub trait CharWrite {
    /// Write all of `buf`.
    fn write_chars(&mut self, buf: &[char]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

impl<R: CharRead + ?Sized> CharRead for &mut R {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_chars(buf)
    }
}

impl<W: CharWrite + ?Sized> CharWrite for &mut W {
    fn write_chars(&mut self, buf: &[char]) -> io::Result<()> {
        (**self).write_chars(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl CharRead for std::str::Chars<'_> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut read = 0;
        for (slot, c) in buf.iter_mut().zip(self) {
            *slot = c;
            read += 1;
        }
        Ok(read)
    }
}

impl CharWrite for String {
    fn write_chars(&mut self, buf: &[char]) -> io::Result<()> {
        self.extend(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Decodes the bytes of a [`Read`] source into characters.
pub struct CharReader<R> {
    inner: R,
    charset: Charset,
    raw: Vec<u8>,
    pending: Vec<u8>,
    decoded: VecDeque<char>,
}

impl<R: Read> CharReader<R> {
    pub fn new(inner: R, charset: Charset) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, inner, charset)
    }

    /// `capacity` is the size of the byte buffer used to read from `inner`.
    pub fn with_capacity(capacity: usize, inner: R, charset: Charset) -> Self {
        Self {
            inner,
            charset,
            raw: vec![0u8; capacity.max(1)],
            pending: Vec::new(),
            decoded: VecDeque::new(),
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read and decode one buffer of bytes. Returns `false` at the end of
    /// the byte stream.
    fn fill(&mut self) -> io::Result<bool> {
        let read = read_retrying(&mut self.inner, &mut self.raw)?;
        if read == 0 {
            if !self.pending.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "stream ended inside a {} sequence",
                        self.charset.name()
                    ),
                ));
            }
            return Ok(false);
        }
        self.charset
            .decode(&mut self.pending, &self.raw[..read], &mut self.decoded)?;
        Ok(true)
    }
}

impl<R: Read> CharRead for CharReader<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.decoded.is_empty() {
            if !self.fill()? {
                return Ok(0);
            }
        }

        let n = buf.len().min(self.decoded.len());
        for (slot, c) in buf.iter_mut().zip(self.decoded.drain(..n)) {
            *slot = c;
        }
        Ok(n)
    }
}

impl<R: Close> Close for CharReader<R> {
    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
}

/// Encodes characters into the bytes of a [`Write`] sink.
pub struct CharWriter<W> {
    inner: W,
    charset: Charset,
    encoded: Vec<u8>,
}

impl<W: Write> CharWriter<W> {
    pub fn new(inner: W, charset: Charset) -> Self {
        Self {
            inner,
            charset,
            encoded: Vec::new(),
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> CharWrite for CharWriter<W> {
    fn write_chars(&mut self, buf: &[char]) -> io::Result<()> {
        self.encoded.clear();
        for &c in buf {
            self.charset.encode_char(c, &mut self.encoded)?;
        }
        self.inner.write_all(&self.encoded)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write + Close> Close for CharWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        self.inner.close()
    }
}

/// Copy all characters from `reader` to `writer` with the default
/// character buffer. Neither stream is closed.
pub fn copy_chars<R, W>(reader: &mut R, writer: &mut W) -> Result<u64>
where
    R: CharRead + ?Sized,
    W: CharWrite + ?Sized,
{
    TransferConfig::default().copy_chars(reader, writer)
}

pub fn copy_chars_with_buffer<R, W>(
    reader: &mut R,
    writer: &mut W,
    char_buffer_size: usize,
) -> Result<u64>
where
    R: CharRead + ?Sized,
    W: CharWrite + ?Sized,
{
    TransferConfig {
        char_buffer_size,
        ..Default::default()
    }
    .copy_chars(reader, writer)
}

/// Decode a whole byte source into a string. An absent source yields an
/// empty string.
pub fn copy_to_string<R: Read>(
    reader: Option<R>,
    charset: Charset,
) -> Result<String> {
    TransferConfig::default().copy_to_string(reader, charset)
}

/// Encode `text` with `charset` and write it to `writer`, then flush.
pub fn copy_str<W: Write + ?Sized>(
    text: &str,
    charset: Charset,
    writer: &mut W,
) -> Result<()> {
    let bytes = charset.encode(text)?;
    crate::copy::copy_bytes(&bytes, writer)
}

impl TransferConfig {
    pub fn copy_chars<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<u64>
    where
        R: CharRead + ?Sized,
        W: CharWrite + ?Sized,
    {
        validate_buffer_size(self.char_buffer_size)?;

        let mut buffer = vec!['\0'; self.char_buffer_size];
        let mut total: u64 = 0;
        loop {
            let read = match reader.read_chars(&mut buffer) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => result?,
            };
            if read == 0 {
                break;
            }
            writer.write_chars(&buffer[..read])?;
            total += read as u64;
        }
        writer.flush()?;

        log::trace!(
            "{} chars copied through a {} chars buffer",
            total,
            self.char_buffer_size
        );
        Ok(total)
    }

    pub fn copy_to_string<R: Read>(
        &self,
        reader: Option<R>,
        charset: Charset,
    ) -> Result<String> {
        let reader = match reader {
            Some(reader) => reader,
            None => return Ok(String::new()),
        };
        validate_buffer_size(self.buffer_size)?;

        let mut reader =
            CharReader::with_capacity(self.buffer_size, reader, charset);
        let mut text = String::new();
        self.copy_chars(&mut reader, &mut text)?;
        Ok(text)
    }
}
