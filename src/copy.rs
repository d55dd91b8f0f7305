//! Buffered byte transfers between [`Read`] sources and [`Write`] sinks.
//!
//! None of these functions close the streams they are given. A source can
//! be handed to several operations in a row, e.g. [`copy_range`] followed
//! by [`drain`] to release the rest of a response body.

use std::cmp::min;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::config::validate_buffer_size;
use crate::{Result, StreamError, TransferConfig};

/// Copy everything from `reader` to `writer` with the default buffer size.
///
/// Returns the number of bytes copied. The writer is flushed once, after the
/// last write.
pub fn copy<R, W>(reader: &mut R, writer: &mut W) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    TransferConfig::default().copy(reader, writer)
}

/// Same as [`copy`] with an explicit buffer size, which must be positive.
pub fn copy_with_buffer<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    TransferConfig::with_buffer_size(buffer_size).copy(reader, writer)
}

/// Copy the inclusive byte range `start..=end` of `reader` to `writer`.
///
/// See [`TransferConfig::copy_range`].
pub fn copy_range<R, W>(
    reader: &mut R,
    writer: &mut W,
    start: u64,
    end: u64,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    TransferConfig::default().copy_range(reader, writer, start, end)
}

/// Like [`copy_range`], but positions a seekable reader instead of reading
/// through the skipped prefix.
pub fn copy_range_seekable<R, W>(
    reader: &mut R,
    writer: &mut W,
    start: u64,
    end: u64,
) -> Result<u64>
where
    R: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    TransferConfig::default().copy_range_seekable(reader, writer, start, end)
}

/// Discard up to `n` bytes, returning how many were actually skipped.
pub fn skip<R: Read + ?Sized>(reader: &mut R, n: u64) -> Result<u64> {
    TransferConfig::default().skip(reader, n)
}

/// Read and discard everything left in `reader`.
pub fn drain<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    TransferConfig::default().drain(reader)
}

/// Collect a source into memory. An absent source yields an empty vector.
pub fn copy_to_bytes<R: Read>(reader: Option<R>) -> Result<Vec<u8>> {
    TransferConfig::default().copy_to_bytes(reader)
}

/// Write the whole of `bytes` to `writer` and flush it.
pub fn copy_bytes<W: Write + ?Sized>(
    bytes: &[u8],
    writer: &mut W,
) -> Result<()> {
    writer.write_all(bytes)?;
    writer.flush()?;
    log::trace!("{} bytes written from memory", bytes.len());
    Ok(())
}

impl TransferConfig {
    pub fn copy<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        validate_buffer_size(self.buffer_size)?;

        let mut buffer = vec![0u8; self.buffer_size];
        let mut total: u64 = 0;
        loop {
            let read = read_retrying(reader, &mut buffer)?;
            if read == 0 {
                break;
            }
            writer.write_all(&buffer[..read])?;
            total += read as u64;
        }
        writer.flush()?;

        log::trace!(
            "{} bytes copied through a {} bytes buffer",
            total,
            self.buffer_size
        );
        Ok(total)
    }

    /// Copy the inclusive byte range `start..=end` of `reader` to `writer`.
    ///
    /// The first `start` bytes are skipped through `reader` itself. If the
    /// source is shorter than `start`, an [`io::ErrorKind::UnexpectedEof`]
    /// error is returned. Running out of data inside the range is not an
    /// error: the returned count is simply smaller than `end - start + 1`.
    /// Nothing past `end` is consumed from `reader`.
    pub fn copy_range<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        start: u64,
        end: u64,
    ) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        validate_range(start, end)?;
        validate_buffer_size(self.buffer_size)?;

        let skipped = self.skip(reader, start)?;
        if skipped < start {
            return Err(skip_error(skipped, start));
        }
        self.copy_limited(reader, writer, range_len(start, end))
    }

    pub fn copy_range_seekable<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        start: u64,
        end: u64,
    ) -> Result<u64>
    where
        R: Read + Seek + ?Sized,
        W: Write + ?Sized,
    {
        validate_range(start, end)?;
        validate_buffer_size(self.buffer_size)?;

        let position = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?;
        let available = len.saturating_sub(position);
        if available < start {
            reader.seek(SeekFrom::Start(position))?;
            return Err(skip_error(available, start));
        }
        reader.seek(SeekFrom::Start(position + start))?;
        log::debug!("seeked over {} bytes", start);

        self.copy_limited(reader, writer, range_len(start, end))
    }

    pub fn skip<R: Read + ?Sized>(&self, reader: &mut R, n: u64) -> Result<u64> {
        validate_buffer_size(self.buffer_size)?;
        if n == 0 {
            return Ok(0);
        }

        let mut buffer = vec![0u8; clamp_to_buffer(self.buffer_size, n)];
        let mut skipped: u64 = 0;
        while skipped < n {
            let wanted = clamp_to_buffer(buffer.len(), n - skipped);
            let read = read_retrying(reader, &mut buffer[..wanted])?;
            if read == 0 {
                break;
            }
            skipped += read as u64;
        }

        log::debug!("skipped {} of {} requested bytes", skipped, n);
        Ok(skipped)
    }

    pub fn drain<R: Read + ?Sized>(&self, reader: &mut R) -> Result<u64> {
        validate_buffer_size(self.buffer_size)?;

        let mut buffer = vec![0u8; self.buffer_size];
        let mut total: u64 = 0;
        loop {
            let read = read_retrying(reader, &mut buffer)?;
            if read == 0 {
                break;
            }
            total += read as u64;
        }

        log::trace!("{} bytes drained", total);
        Ok(total)
    }

    pub fn copy_to_bytes<R: Read>(&self, reader: Option<R>) -> Result<Vec<u8>> {
        let mut reader = match reader {
            Some(reader) => reader,
            None => return Ok(Vec::new()),
        };
        let mut bytes = Vec::with_capacity(self.buffer_size);
        self.copy(&mut reader, &mut bytes)?;
        Ok(bytes)
    }

    /// Copy at most `limit` bytes, never asking `reader` for more than
    /// what is still missing.
    fn copy_limited<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        limit: u64,
    ) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut buffer = vec![0u8; clamp_to_buffer(self.buffer_size, limit)];
        let mut remaining = limit;
        while remaining > 0 {
            let wanted = clamp_to_buffer(buffer.len(), remaining);
            let read = read_retrying(reader, &mut buffer[..wanted])?;
            if read == 0 {
                break;
            }
            writer.write_all(&buffer[..read])?;
            remaining -= read as u64;
        }
        writer.flush()?;

        let copied = limit - remaining;
        if remaining > 0 {
            log::debug!(
                "source ended after {} of {} requested bytes",
                copied,
                limit
            );
        }
        Ok(copied)
    }
}

/// `Interrupted` is transient, every other error aborts the operation.
pub(crate) fn read_retrying<R: Read + ?Sized>(
    reader: &mut R,
    buffer: &mut [u8],
) -> io::Result<usize> {
    loop {
        match reader.read(buffer) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

fn validate_range(start: u64, end: u64) -> Result<()> {
    if start > end {
        return Err(StreamError::invalid_argument(format!(
            "range start {start} is after range end {end}"
        )));
    }
    Ok(())
}

fn range_len(start: u64, end: u64) -> u64 {
    (end - start).saturating_add(1)
}

fn clamp_to_buffer(buffer_size: usize, wanted: u64) -> usize {
    min(buffer_size as u64, wanted) as usize
}

fn skip_error(skipped: u64, required: u64) -> StreamError {
    StreamError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("Skipped only {skipped} bytes out of {required} required"),
    ))
}
