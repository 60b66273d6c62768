// standard library
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

// external crates
use url::Url;

/// Failure taxonomy for the write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    InvalidArgument,
    InvalidOptions,
    UnsupportedEncoding,
    MissingPathComponent,
    IsADirectory,
    NotADirectory,
    PermissionDenied,
    Io,
}

impl Code {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidOptions => "invalid_options",
            Self::UnsupportedEncoding => "unsupported_encoding",
            Self::MissingPathComponent => "missing_path_component",
            Self::IsADirectory => "is_a_directory",
            Self::NotADirectory => "not_a_directory",
            Self::PermissionDenied => "permission_denied",
            Self::Io => "io_error",
        }
    }

    pub fn from_io(e: &std::io::Error) -> Code {
        match e.kind() {
            ErrorKind::NotFound => Code::MissingPathComponent,
            ErrorKind::IsADirectory => Code::IsADirectory,
            ErrorKind::NotADirectory => Code::NotADirectory,
            ErrorKind::PermissionDenied => Code::PermissionDenied,
            _ => Code::Io,
        }
    }
}

pub trait Error: std::error::Error {
    fn code(&self) -> Code {
        Code::Io
    }
    fn is_missing_path_component(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct Trace {
    pub file: &'static str,
    pub line: u32,
}

#[macro_export]
macro_rules! trace {
    () => {
        Box::new($crate::errors::Trace {
            file: file!(),
            line: line!(),
        })
    };
}

#[macro_export]
macro_rules! impl_error {
    ($enum_name:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::errors::Error for $enum_name {
            fn code(&self) -> $crate::errors::Code {
                match self {
                    $(Self::$variant(e) => e.code(),)+
                }
            }
            fn is_missing_path_component(&self) -> bool {
                match self {
                    $(Self::$variant(e) => e.is_missing_path_component(),)+
                }
            }
        }
    };
}

#[derive(Debug, thiserror::Error)]
#[error("path must not be empty (received an empty {form} path)")]
pub struct EmptyPathErr {
    pub form: &'static str,
    pub trace: Box<Trace>,
}

impl Error for EmptyPathErr {
    fn code(&self) -> Code {
        Code::InvalidArgument
    }
}

#[derive(Debug, thiserror::Error)]
#[error("path must not contain NUL bytes: {path}")]
pub struct NulBytePathErr {
    pub path: String,
    pub trace: Box<Trace>,
}

impl Error for NulBytePathErr {
    fn code(&self) -> Code {
        Code::InvalidArgument
    }
}

#[derive(Debug, thiserror::Error)]
#[error("path must not end with a path separator: {path}")]
pub struct TrailingSeparatorErr {
    pub path: String,
    pub trace: Box<Trace>,
}

impl Error for TrailingSeparatorErr {
    fn code(&self) -> Code {
        Code::InvalidArgument
    }
}

#[derive(Debug, thiserror::Error)]
#[error("URL scheme must be 'file': {url}")]
pub struct InvalidUrlSchemeErr {
    pub url: Url,
    pub trace: Box<Trace>,
}

impl Error for InvalidUrlSchemeErr {
    fn code(&self) -> Code {
        Code::InvalidArgument
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to convert file URL to a local path: {url}")]
pub struct UrlToPathErr {
    pub url: Url,
    pub trace: Box<Trace>,
}

impl Error for UrlToPathErr {
    fn code(&self) -> Code {
        Code::InvalidArgument
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to determine current directory: {source}")]
pub struct UnknownCurrentDirErr {
    pub source: std::io::Error,
    pub trace: Box<Trace>,
}

impl Error for UnknownCurrentDirErr {}

#[derive(Debug, thiserror::Error)]
pub struct UnknownParentDirErr {
    pub path: PathBuf,
    pub trace: Box<Trace>,
}

impl fmt::Display for UnknownParentDirErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to determine parent directory for path: {}",
            self.path.to_str().unwrap_or("unknown")
        )
    }
}

impl Error for UnknownParentDirErr {
    fn code(&self) -> Code {
        Code::InvalidArgument
    }
}

#[derive(Debug, thiserror::Error)]
#[error("options must be an encoding string or an options record, received {received}")]
pub struct InvalidOptionsTypeErr {
    pub received: &'static str,
    pub trace: Box<Trace>,
}

impl Error for InvalidOptionsTypeErr {
    fn code(&self) -> Code {
        Code::InvalidOptions
    }
}

#[derive(Debug, thiserror::Error)]
#[error("the 'mode' option is ambiguous: use 'dirMode' and/or 'fileMode' instead")]
pub struct AmbiguousModeErr {
    pub trace: Box<Trace>,
}

impl Error for AmbiguousModeErr {
    fn code(&self) -> Code {
        Code::InvalidOptions
    }
}

#[derive(Debug, thiserror::Error)]
#[error("the 'recursive' option is not configurable: directories are always created recursively")]
pub struct ExplicitRecursiveErr {
    pub trace: Box<Trace>,
}

impl Error for ExplicitRecursiveErr {
    fn code(&self) -> Code {
        Code::InvalidOptions
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid '{key}' value {value}: expected a 32-bit unsigned integer or an octal string")]
pub struct InvalidModeErr {
    pub key: &'static str,
    pub value: String,
    pub trace: Box<Trace>,
}

impl Error for InvalidModeErr {
    fn code(&self) -> Code {
        Code::InvalidOptions
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid '{key}' value {value}: expected {expected}")]
pub struct InvalidOptionValueErr {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
    pub trace: Box<Trace>,
}

impl Error for InvalidOptionValueErr {
    fn code(&self) -> Code {
        Code::InvalidOptions
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown encoding: {name}")]
pub struct UnknownEncodingErr {
    pub name: String,
    pub trace: Box<Trace>,
}

impl Error for UnknownEncodingErr {
    fn code(&self) -> Code {
        Code::UnsupportedEncoding
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid hex data: {source}")]
pub struct HexDecodeErr {
    pub source: hex::FromHexError,
    pub trace: Box<Trace>,
}

impl Error for HexDecodeErr {
    fn code(&self) -> Code {
        Code::UnsupportedEncoding
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid base64 data: {source}")]
pub struct Base64DecodeErr {
    pub source: base64::DecodeError,
    pub trace: Box<Trace>,
}

impl Error for Base64DecodeErr {
    fn code(&self) -> Code {
        Code::UnsupportedEncoding
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cannot encode {ch:?} as {encoding}: code point above U+00FF")]
pub struct UnmappableCharErr {
    pub encoding: &'static str,
    pub ch: char,
    pub trace: Box<Trace>,
}

impl Error for UnmappableCharErr {
    fn code(&self) -> Code {
        Code::UnsupportedEncoding
    }
}

#[derive(Debug, thiserror::Error)]
pub struct CreateDirErr {
    pub dir: PathBuf,
    pub source: std::io::Error,
    pub trace: Box<Trace>,
}

impl fmt::Display for CreateDirErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to create directory '{}': {}",
            self.dir.to_str().unwrap_or("unknown"),
            self.source
        )
    }
}

impl Error for CreateDirErr {
    fn code(&self) -> Code {
        Code::from_io(&self.source)
    }

    fn is_missing_path_component(&self) -> bool {
        self.source.kind() == ErrorKind::NotFound
    }
}

#[derive(Debug, thiserror::Error)]
pub struct SetPermissionsErr {
    pub path: PathBuf,
    pub source: std::io::Error,
    pub trace: Box<Trace>,
}

impl fmt::Display for SetPermissionsErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to set permissions on '{}': {}",
            self.path.to_str().unwrap_or("unknown"),
            self.source
        )
    }
}

impl Error for SetPermissionsErr {
    fn code(&self) -> Code {
        Code::from_io(&self.source)
    }

    fn is_missing_path_component(&self) -> bool {
        self.source.kind() == ErrorKind::NotFound
    }
}

#[derive(Debug, thiserror::Error)]
pub struct WriteFileErr {
    pub path: PathBuf,
    pub source: std::io::Error,
    pub trace: Box<Trace>,
}

impl fmt::Display for WriteFileErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to write to file '{}': {}",
            self.path.to_str().unwrap_or("unknown"),
            self.source
        )
    }
}

impl Error for WriteFileErr {
    fn code(&self) -> Code {
        Code::from_io(&self.source)
    }

    fn is_missing_path_component(&self) -> bool {
        self.source.kind() == ErrorKind::NotFound
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputFileErr {
    #[error(transparent)]
    EmptyPathErr(EmptyPathErr),
    #[error(transparent)]
    NulBytePathErr(NulBytePathErr),
    #[error(transparent)]
    TrailingSeparatorErr(TrailingSeparatorErr),
    #[error(transparent)]
    InvalidUrlSchemeErr(InvalidUrlSchemeErr),
    #[error(transparent)]
    UrlToPathErr(UrlToPathErr),
    #[error(transparent)]
    UnknownCurrentDirErr(UnknownCurrentDirErr),
    #[error(transparent)]
    UnknownParentDirErr(UnknownParentDirErr),
    #[error(transparent)]
    InvalidOptionsTypeErr(InvalidOptionsTypeErr),
    #[error(transparent)]
    AmbiguousModeErr(AmbiguousModeErr),
    #[error(transparent)]
    ExplicitRecursiveErr(ExplicitRecursiveErr),
    #[error(transparent)]
    InvalidModeErr(InvalidModeErr),
    #[error(transparent)]
    InvalidOptionValueErr(InvalidOptionValueErr),
    #[error(transparent)]
    UnknownEncodingErr(UnknownEncodingErr),
    #[error(transparent)]
    HexDecodeErr(HexDecodeErr),
    #[error(transparent)]
    Base64DecodeErr(Base64DecodeErr),
    #[error(transparent)]
    UnmappableCharErr(UnmappableCharErr),
    #[error(transparent)]
    CreateDirErr(CreateDirErr),
    #[error(transparent)]
    SetPermissionsErr(SetPermissionsErr),
    #[error(transparent)]
    WriteFileErr(WriteFileErr),
}

crate::impl_error!(OutputFileErr {
    EmptyPathErr,
    NulBytePathErr,
    TrailingSeparatorErr,
    InvalidUrlSchemeErr,
    UrlToPathErr,
    UnknownCurrentDirErr,
    UnknownParentDirErr,
    InvalidOptionsTypeErr,
    AmbiguousModeErr,
    ExplicitRecursiveErr,
    InvalidModeErr,
    InvalidOptionValueErr,
    UnknownEncodingErr,
    HexDecodeErr,
    Base64DecodeErr,
    UnmappableCharErr,
    CreateDirErr,
    SetPermissionsErr,
    WriteFileErr,
});
