use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::{Result, StreamError};

/// Text encodings understood by [`super::CharReader`] and
/// [`super::CharWriter`]. UTF-8 is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value.
    Latin1,
    /// US-ASCII, bytes above `0x7f` are malformed.
    Ascii,
}

static CHARSETS_BY_NAME: Lazy<HashMap<&'static str, Charset>> =
    Lazy::new(|| {
        [
            ("utf-8", Charset::Utf8),
            ("utf8", Charset::Utf8),
            ("iso-8859-1", Charset::Latin1),
            ("iso8859-1", Charset::Latin1),
            ("iso_8859-1", Charset::Latin1),
            ("latin1", Charset::Latin1),
            ("l1", Charset::Latin1),
            ("us-ascii", Charset::Ascii),
            ("ascii", Charset::Ascii),
            ("iso646-us", Charset::Ascii),
        ]
        .into_iter()
        .collect()
    });

impl Charset {
    /// Resolve a charset by one of its names, ignoring case.
    pub fn for_name(name: &str) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();
        let charset = CHARSETS_BY_NAME.get(key.as_str()).copied();
        log::debug!("charset {:?} resolved to {:?}", name, charset);

        charset.ok_or_else(|| {
            StreamError::invalid_argument(format!("Unsupported charset {name}"))
        })
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    pub fn encode(&self, text: &str) -> io::Result<Vec<u8>> {
        if *self == Charset::Utf8 {
            return Ok(text.as_bytes().to_vec());
        }
        let mut bytes = Vec::with_capacity(text.len());
        for c in text.chars() {
            self.encode_char(c, &mut bytes)?;
        }
        Ok(bytes)
    }

    pub(crate) fn encode_char(
        &self,
        c: char,
        out: &mut Vec<u8>,
    ) -> io::Result<()> {
        match self {
            Charset::Utf8 => {
                let mut utf8 = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
            Charset::Latin1 => {
                let byte = u8::try_from(c).map_err(|_| self.unmappable(c))?;
                out.push(byte);
            }
            Charset::Ascii => {
                if !c.is_ascii() {
                    return Err(self.unmappable(c));
                }
                out.push(c as u8);
            }
        }
        Ok(())
    }

    /// Decode `input` into `out`.
    ///
    /// `pending` holds the bytes of a UTF-8 sequence cut by the previous
    /// read; it is prepended to `input` and whatever is incomplete at the
    /// end of `input` is left in it.
    pub(crate) fn decode(
        &self,
        pending: &mut Vec<u8>,
        input: &[u8],
        out: &mut VecDeque<char>,
    ) -> io::Result<()> {
        match self {
            Charset::Latin1 => {
                out.extend(input.iter().map(|&byte| char::from(byte)))
            }
            Charset::Ascii => {
                for &byte in input {
                    if !byte.is_ascii() {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("byte {byte:#04x} is not valid US-ASCII"),
                        ));
                    }
                    out.push_back(char::from(byte));
                }
            }
            Charset::Utf8 => {
                pending.extend_from_slice(input);
                let decoded = match std::str::from_utf8(&pending[..]) {
                    Ok(text) => {
                        out.extend(text.chars());
                        text.len()
                    }
                    Err(e) if e.error_len().is_none() => {
                        let valid = e.valid_up_to();
                        let text = std::str::from_utf8(&pending[..valid])
                            .map_err(invalid_utf8)?;
                        out.extend(text.chars());
                        valid
                    }
                    Err(e) => return Err(invalid_utf8(e)),
                };
                pending.drain(..decoded);
            }
        }
        Ok(())
    }

    fn unmappable(&self, c: char) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("character {c:?} cannot be encoded as {}", self.name()),
        )
    }
}

fn invalid_utf8(e: std::str::Utf8Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

impl FromStr for Charset {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self> {
        Self::for_name(s)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
