//! Stream doubles shared by the unit tests.

use std::io::{self, Cursor, Read, Write};

use crate::close::Close;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Content `0, 1, 2, ...` wrapping at 256.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Hands out at most `chunk` bytes per read, and reports `Interrupted`
/// before the first read when asked to.
pub struct ChunkedReader<R> {
    inner: R,
    chunk: usize,
    interrupt_once: bool,
}

impl<R: Read> ChunkedReader<R> {
    pub fn new(inner: R, chunk: usize) -> Self {
        Self {
            inner,
            chunk,
            interrupt_once: false,
        }
    }

    pub fn interrupted(inner: R, chunk: usize) -> Self {
        Self {
            inner,
            chunk,
            interrupt_once: true,
        }
    }
}

impl<R: Read> Read for ChunkedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_once {
            self.interrupt_once = false;
            return Err(io::ErrorKind::Interrupted.into());
        }
        let len = buf.len().min(self.chunk);
        self.inner.read(&mut buf[..len])
    }
}

/// An in-memory stream which remembers whether it was closed and flushed,
/// and refuses any I/O once closed.
#[derive(Default)]
pub struct TrackedStream {
    data: Cursor<Vec<u8>>,
    pub closed: bool,
    pub flushes: usize,
}

impl TrackedStream {
    pub fn with_content(content: &[u8]) -> Self {
        Self {
            data: Cursor::new(content.to_vec()),
            ..Default::default()
        }
    }

    pub fn written(&self) -> &[u8] {
        self.data.get_ref()
    }

    fn ensure_open(&self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "stream is closed",
            ));
        }
        Ok(())
    }
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_open()?;
        self.data.read(buf)
    }
}

impl Write for TrackedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        self.data.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ensure_open()?;
        self.flushes += 1;
        Ok(())
    }
}

impl Close for TrackedStream {
    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Accepts `capacity` bytes, then fails every write.
pub struct FailingWriter {
    pub capacity: usize,
    pub written: Vec<u8>,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity - self.written.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let n = buf.len().min(room);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
