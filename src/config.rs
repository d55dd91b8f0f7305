use serde::{Deserialize, Serialize};

use crate::{Result, StreamError};

/// Default size of the byte transfer buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;
/// Default size of the character transfer buffer, half of the byte one.
pub const DEFAULT_CHAR_BUFFER_SIZE: usize = DEFAULT_BUFFER_SIZE / 2;

const KILOBYTE: usize = 1024;

/// Buffer sizing for the transfer operations.
///
/// Every operation of [`crate::copy`] and [`crate::chars`] is available as a
/// method on this struct; the free functions use [`TransferConfig::default`].
/// Buffers are allocated fresh for each call and never shared.
///
/// Fields missing from a serialized config fall back to the defaults, so
/// the struct can be embedded into a host application's own config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Capacity of the byte buffer, in bytes.
    pub buffer_size: usize,
    /// Capacity of the character buffer, in `char`s.
    pub char_buffer_size: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            char_buffer_size: DEFAULT_CHAR_BUFFER_SIZE,
        }
    }
}

impl TransferConfig {
    pub fn low_memory() -> Self {
        Self {
            buffer_size: 512,
            char_buffer_size: 256,
        }
    }

    pub fn high_throughput() -> Self {
        Self {
            buffer_size: 64 * KILOBYTE,
            char_buffer_size: 32 * KILOBYTE,
        }
    }

    /// Byte buffer of `buffer_size`, character buffer of half that.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            char_buffer_size: (buffer_size / 2).max(1),
        }
    }

    /// Both buffers must have a positive capacity.
    pub fn validate(&self) -> Result<()> {
        validate_buffer_size(self.buffer_size)?;
        validate_buffer_size(self.char_buffer_size)
    }
}

pub(crate) fn validate_buffer_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(StreamError::invalid_argument(
            "buffer size must be positive",
        ));
    }
    Ok(())
}
