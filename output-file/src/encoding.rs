// standard library
use std::fmt;
use std::str::FromStr;

// internal crates
use crate::errors::{
    Base64DecodeErr, HexDecodeErr, OutputFileErr, UnknownEncodingErr, UnmappableCharErr,
};
use crate::trace;

// external crates
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};

/// Text encoding applied when the data to write is text. The names and
/// aliases match the encodings the write capability exposes; bytes data is
/// written verbatim and never re-encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Latin1,
    Ascii,
    Hex,
    Base64,
    Base64Url,
}

impl FromStr for Encoding {
    type Err = OutputFileErr;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "latin1" | "binary" => Ok(Self::Latin1),
            "ascii" => Ok(Self::Ascii),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            _ => Err(OutputFileErr::UnknownEncodingErr(UnknownEncodingErr {
                name: name.to_string(),
                trace: trace!(),
            })),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
        }
    }

    /// Decode `text` into the bytes this encoding writes to disk. Hex and
    /// base64 payloads that do not decode are rejected rather than silently
    /// truncated, and latin1/ascii rejects code points above U+00FF rather
    /// than masking them to the low byte.
    pub fn decode_text(&self, text: &str) -> Result<Vec<u8>, OutputFileErr> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16Le => {
                let mut buf = Vec::with_capacity(text.len() * 2);
                for unit in text.encode_utf16() {
                    buf.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(buf)
            }
            Self::Latin1 => decode_byte_chars(text, "latin1"),
            Self::Ascii => decode_byte_chars(text, "ascii"),
            Self::Hex => hex::decode(text).map_err(|e| {
                OutputFileErr::HexDecodeErr(HexDecodeErr {
                    source: e,
                    trace: trace!(),
                })
            }),
            Self::Base64 => STANDARD.decode(text).map_err(|e| {
                OutputFileErr::Base64DecodeErr(Base64DecodeErr {
                    source: e,
                    trace: trace!(),
                })
            }),
            Self::Base64Url => URL_SAFE_NO_PAD.decode(text).map_err(|e| {
                OutputFileErr::Base64DecodeErr(Base64DecodeErr {
                    source: e,
                    trace: trace!(),
                })
            }),
        }
    }
}

// One byte per char; the write path for ascii is identical to latin1.
fn decode_byte_chars(text: &str, encoding: &'static str) -> Result<Vec<u8>, OutputFileErr> {
    let mut buf = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code_point = ch as u32;
        if code_point > 0xFF {
            return Err(OutputFileErr::UnmappableCharErr(UnmappableCharErr {
                encoding,
                ch,
                trace: trace!(),
            }));
        }
        buf.push(code_point as u8);
    }
    Ok(buf)
}
