//! Composable stream transfer and encoding primitives.
//!
//! * [`copy`]: buffered byte copy, byte ranges, draining, and collecting a
//!   source into memory
//! * [`chars`]: the same for character streams, with charset decoding
//! * [`codec`]: Base64, whole-buffer and as stream wrappers
//! * [`NonClosing`]: a decorator that keeps a shared stream open
//! * [`files`]: files as transfer destinations
//!
//! All operations are synchronous and blocking. The transfer primitives
//! never close the streams passed to them.

pub mod chars;
pub mod close;
pub mod codec;
mod config;
pub mod copy;
pub mod errors;
pub mod files;
mod non_closing;

#[cfg(test)]
mod test_utils;

pub use chars::{
    copy_chars, copy_chars_with_buffer, copy_str, copy_to_string, CharRead,
    CharReader, CharWrite, CharWriter, Charset,
};
pub use close::{close_quietly, Close};
pub use codec::{decode_wrap, encode_wrap, Alphabet, Base64Decoder, Base64Encoder};
pub use config::{TransferConfig, DEFAULT_BUFFER_SIZE, DEFAULT_CHAR_BUFFER_SIZE};
pub use copy::{
    copy, copy_bytes, copy_range, copy_range_seekable, copy_to_bytes,
    copy_with_buffer, drain, skip,
};
pub use errors::{Result, StreamError};
pub use non_closing::{non_closing, NonClosing};
