//! Base64 (RFC 4648) encoding, whole-buffer and streaming.
//!
//! Encoding always pads with `=`. Decoding accepts padded and unpadded
//! input but nothing outside the alphabet.

mod stream;

pub use stream::{decode_wrap, encode_wrap, Base64Decoder, Base64Encoder};

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::Result;

const CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(true)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

static STANDARD: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, CONFIG);
static URL_SAFE: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, CONFIG);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alphabet {
    /// `A-Z a-z 0-9 + /`
    #[default]
    Standard,
    /// `A-Z a-z 0-9 - _`, safe in URLs and file names.
    UrlSafe,
}

impl Alphabet {
    pub(crate) fn engine(&self) -> &'static GeneralPurpose {
        match self {
            Alphabet::Standard => &STANDARD,
            Alphabet::UrlSafe => &URL_SAFE,
        }
    }
}

pub fn encode(data: impl AsRef<[u8]>) -> String {
    encode_with(data, Alphabet::Standard)
}

pub fn encode_url_safe(data: impl AsRef<[u8]>) -> String {
    encode_with(data, Alphabet::UrlSafe)
}

pub fn encode_with(data: impl AsRef<[u8]>, alphabet: Alphabet) -> String {
    alphabet.engine().encode(data)
}

pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    decode_with(text, Alphabet::Standard)
}

pub fn decode_url_safe(text: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    decode_with(text, Alphabet::UrlSafe)
}

pub fn decode_with(
    text: impl AsRef<[u8]>,
    alphabet: Alphabet,
) -> Result<Vec<u8>> {
    Ok(alphabet.engine().decode(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamError;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    #[rstest]
    #[case(b"", "")]
    #[case(b"f", "Zg==")]
    #[case(b"fo", "Zm8=")]
    #[case(b"foo", "Zm9v")]
    #[case(b"foob", "Zm9vYg==")]
    #[case(b"fooba", "Zm9vYmE=")]
    #[case(b"foobar", "Zm9vYmFy")]
    #[case(b"0123456789", "MDEyMzQ1Njc4OQ==")]
    fn rfc4648_vectors(#[case] data: &[u8], #[case] expected: &str) {
        assert_eq!(encode(data), expected);
        assert_eq!(decode(expected).unwrap(), data);
    }

    #[test]
    fn url_safe_alphabet() {
        let data = [0xfb, 0xff, 0xbf];
        assert_eq!(encode(data), "+/+/");
        assert_eq!(encode_url_safe(data), "-_-_");
        assert_eq!(decode_url_safe("-_-_").unwrap(), data);
        assert!(decode("-_-_").is_err());
    }

    #[test]
    fn url_safe_output_is_padded() {
        assert_eq!(encode_url_safe(b"f"), "Zg==");
    }

    #[test]
    fn padding_is_optional_when_decoding() {
        assert_eq!(decode("Zm8").unwrap(), b"fo");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
    }

    #[rstest]
    #[case("Zm9v*mFy")]
    #[case("Zm9v YmFy")]
    #[case("Z")]
    fn invalid_input_is_a_decode_error(#[case] text: &str) {
        assert!(matches!(decode(text), Err(StreamError::Decode(_))));
    }

    #[quickcheck]
    fn prop_decode_inverts_encode(data: Vec<u8>) -> bool {
        decode(encode(&data)).unwrap() == data
            && decode_url_safe(encode_url_safe(&data)).unwrap() == data
    }
}
