//! Explicit closing of streams.
//!
//! Dropping a stream releases it, but some streams have a meaningful
//! "close" step that callers may want to trigger, and observe the failure
//! of, before the value goes away: a Base64 encoder writes its last group,
//! a socket shuts down. [`Close`] names that step so wrappers can forward
//! it to the stream they wrap, and [`crate::NonClosing`] can suppress it.

use std::io::{self, BufWriter, Cursor, Write};
use std::net::{Shutdown, TcpStream};

pub trait Close {
    /// Finish the stream and release what it holds. Using the stream for
    /// I/O afterwards is an error for implementations that hold a resource.
    fn close(&mut self) -> io::Result<()>;
}

/// Close `stream`, logging a failure instead of returning it.
pub fn close_quietly<C: Close + ?Sized>(stream: &mut C) {
    if let Err(e) = stream.close() {
        log::warn!("Failed to close stream because of error: {}", e);
    }
}

impl<C: Close + ?Sized> Close for &mut C {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<C: Close + ?Sized> Close for Box<C> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<W: Write + Close> Close for BufWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().close()
    }
}

impl Close for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            result => result,
        }
    }
}

#[cfg(unix)]
impl Close for std::os::unix::net::UnixStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            result => result,
        }
    }
}

// In-memory streams hold nothing to release.

impl Close for Vec<u8> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T> Close for Cursor<T> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Close for &[u8] {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Close for io::Sink {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Close for io::Empty {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Close for String {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}
