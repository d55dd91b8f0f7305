use std::fmt;
use std::io::{
    self, BufRead, IoSlice, IoSliceMut, Read, Seek, SeekFrom, Write,
};

use crate::chars::{CharRead, CharWrite};
use crate::close::Close;

/// Wrap `stream` so that [`Close::close`] becomes a no-op.
///
/// Useful when a shared stream is handed to code that closes whatever it
/// receives, e.g. a [`crate::codec::Base64Encoder`] writing into a socket
/// that must stay open for the next message.
pub fn non_closing<T>(stream: T) -> NonClosing<T> {
    NonClosing::new(stream)
}

/// A stream decorator delegating everything to the wrapped stream except
/// closing. Bulk operations are forwarded to the wrapped stream's own bulk
/// methods rather than being split into single calls.
#[derive(Debug, Default)]
pub struct NonClosing<T> {
    inner: T,
}

impl<T> NonClosing<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Close for NonClosing<T> {
    fn close(&mut self) -> io::Result<()> {
        log::trace!("close suppressed");
        Ok(())
    }
}

impl<R: Read> Read for NonClosing<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn read_vectored(
        &mut self,
        bufs: &mut [IoSliceMut<'_>],
    ) -> io::Result<usize> {
        self.inner.read_vectored(bufs)
    }

    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.inner.read_to_end(buf)
    }

    fn read_to_string(&mut self, buf: &mut String) -> io::Result<usize> {
        self.inner.read_to_string(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }
}

impl<R: BufRead> BufRead for NonClosing<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }

    fn read_until(
        &mut self,
        byte: u8,
        buf: &mut Vec<u8>,
    ) -> io::Result<usize> {
        self.inner.read_until(byte, buf)
    }

    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.inner.read_line(buf)
    }
}

impl<W: Write> Write for NonClosing<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        self.inner.write_vectored(bufs)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        self.inner.write_fmt(fmt)
    }
}

impl<S: Seek> Seek for NonClosing<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }
}

impl<R: CharRead> CharRead for NonClosing<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        self.inner.read_chars(buf)
    }
}

impl<W: CharWrite> CharWrite for NonClosing<W> {
    fn write_chars(&mut self, buf: &[char]) -> io::Result<()> {
        self.inner.write_chars(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        CharWrite::flush(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::close::close_quietly;
    use crate::test_utils::TrackedStream;
    use std::io::Cursor;

    #[test]
    fn close_leaves_wrapped_stream_usable() {
        let mut stream = TrackedStream::with_content(b"shared");
        {
            let mut wrapped = non_closing(&mut stream);
            let mut head = [0u8; 3];
            wrapped.read_exact(&mut head).unwrap();
            assert_eq!(&head, b"sha");
            wrapped.close().unwrap();
            close_quietly(&mut wrapped);
        }

        assert!(!stream.closed);
        let mut rest = String::new();
        stream.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "red");
        stream.write_all(b"!").unwrap();
    }

    #[test]
    fn owned_stream_is_recovered_open() {
        let mut wrapped = non_closing(TrackedStream::default());
        wrapped.write_all(b"data").unwrap();
        wrapped.close().unwrap();

        let stream = wrapped.into_inner();
        assert!(!stream.closed);
        assert_eq!(stream.written(), b"data");
    }

    #[derive(Default)]
    struct CallLog {
        calls: Vec<&'static str>,
    }

    impl Write for CallLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls.push("write");
            Ok(buf.len())
        }

        fn write_all(&mut self, _buf: &[u8]) -> io::Result<()> {
            self.calls.push("write_all");
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.calls.push("flush");
            Ok(())
        }
    }

    #[test]
    fn bulk_writes_reach_the_wrapped_bulk_method() {
        let mut wrapped = non_closing(CallLog::default());
        wrapped.write_all(&[0u8; 1000]).unwrap();
        Write::flush(&mut wrapped).unwrap();

        assert_eq!(wrapped.get_ref().calls, ["write_all", "flush"]);
    }

    #[test]
    fn seek_and_buffered_reads_are_delegated() {
        let content = b"line one\nline two\n".to_vec();
        let mut wrapped = non_closing(Cursor::new(content));
        wrapped.seek(SeekFrom::Start(9)).unwrap();

        let mut line = String::new();
        wrapped.read_line(&mut line).unwrap();
        assert_eq!(line, "line two\n");
        assert_eq!(wrapped.stream_position().unwrap(), 18);
    }

    #[test]
    fn char_streams_are_delegated() {
        let mut sink = non_closing(String::new());
        sink.write_chars(&['o', 'k']).unwrap();
        CharWrite::flush(&mut sink).unwrap();
        sink.close().unwrap();

        let mut source = non_closing("ab".chars());
        let mut buf = ['\0'; 4];
        assert_eq!(source.read_chars(&mut buf).unwrap(), 2);
        assert_eq!(sink.into_inner(), "ok");
    }
}
