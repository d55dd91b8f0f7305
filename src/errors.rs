use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StreamError>;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(io::Error),
    #[error("Base64 decoding error: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StreamError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// The streaming Base64 decoder can only report failures through
/// [`io::Error`], so a decode error travelling inside one is unwrapped
/// back into [`StreamError::Decode`].
impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        let is_decode = e
            .get_ref()
            .map(|inner| inner.is::<base64::DecodeError>())
            .unwrap_or(false);
        if !is_decode {
            return Self::Io(e);
        }

        match e.into_inner().map(|inner| inner.downcast::<base64::DecodeError>())
        {
            Some(Ok(decode)) => Self::Decode(*decode),
            Some(Err(other)) => {
                Self::Io(io::Error::new(io::ErrorKind::InvalidData, other))
            }
            None => Self::Io(io::ErrorKind::InvalidData.into()),
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(e) => e,
            StreamError::InvalidArgument(message) => {
                io::Error::new(io::ErrorKind::InvalidInput, message)
            }
            StreamError::Decode(e) => {
                io::Error::new(io::ErrorKind::InvalidData, e)
            }
            StreamError::Other(e) => {
                io::Error::new(io::ErrorKind::Other, e.to_string())
            }
        }
    }
}
