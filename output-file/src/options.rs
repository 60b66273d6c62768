// standard library
use std::fmt;

// internal crates
use crate::encoding::Encoding;
use crate::errors::{
    AmbiguousModeErr, ExplicitRecursiveErr, InvalidModeErr, InvalidOptionValueErr,
    InvalidOptionsTypeErr, OutputFileErr,
};
use crate::trace;

// external crates
use serde::Deserialize;
use serde_json::{Map, Value};

/// Permission bits for created directories or the written file, accepted as
/// a 32-bit unsigned integer or an octal string such as `"0745"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode(u32);

impl Mode {
    pub fn new(bits: u32) -> Mode {
        Mode(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    fn from_value(key: &'static str, value: &Value) -> Result<Mode, OutputFileErr> {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(bits) if bits <= u32::MAX as u64 => Ok(Mode(bits as u32)),
                _ => Err(Mode::invalid(key, value)),
            },
            Value::String(s) => {
                u32::from_str_radix(s, 8).map(Mode).map_err(|_| Mode::invalid(key, value))
            }
            _ => Err(Mode::invalid(key, value)),
        }
    }

    fn invalid(key: &'static str, value: &Value) -> OutputFileErr {
        OutputFileErr::InvalidModeErr(InvalidModeErr {
            key,
            value: value.to_string(),
            trace: trace!(),
        })
    }
}

impl From<u32> for Mode {
    fn from(bits: u32) -> Mode {
        Mode(bits)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0o{:o}", self.0)
    }
}

/// Settings record for [`output_file_with`](crate::output::output_file_with).
/// Recursion is mandatory and has no field; a unified mode is ambiguous and
/// has no field either — directory and file modes are always separate.
#[derive(Clone, Debug, Default)]
pub struct OutputOptions {
    pub dir_mode: Option<Mode>,
    pub file_mode: Option<Mode>,
    pub encoding: Option<Encoding>,
    /// Unrecognized settings, carried verbatim into both derived option sets.
    pub extra: Map<String, Value>,
}

impl OutputOptions {
    fn from_map(map: Map<String, Value>) -> Result<OutputOptions, OutputFileErr> {
        if map.contains_key("mode") {
            return Err(OutputFileErr::AmbiguousModeErr(AmbiguousModeErr {
                trace: trace!(),
            }));
        }
        if map.contains_key("recursive") {
            return Err(OutputFileErr::ExplicitRecursiveErr(ExplicitRecursiveErr {
                trace: trace!(),
            }));
        }

        let mut opts = OutputOptions::default();
        for (key, value) in map {
            match key.as_str() {
                "dirMode" => opts.dir_mode = parse_mode("dirMode", value)?,
                "fileMode" => opts.file_mode = parse_mode("fileMode", value)?,
                "encoding" => opts.encoding = parse_encoding(value)?,
                _ => {
                    opts.extra.insert(key, value);
                }
            }
        }
        Ok(opts)
    }
}

fn parse_mode(key: &'static str, value: Value) -> Result<Option<Mode>, OutputFileErr> {
    match value {
        Value::Null => Ok(None),
        value => Mode::from_value(key, &value).map(Some),
    }
}

fn parse_encoding(value: Value) -> Result<Option<Encoding>, OutputFileErr> {
    match value {
        Value::Null => Ok(None),
        Value::String(name) => name.parse::<Encoding>().map(Some),
        other => Err(OutputFileErr::InvalidOptionValueErr(InvalidOptionValueErr {
            key: "encoding",
            value: other.to_string(),
            expected: "an encoding string",
            trace: trace!(),
        })),
    }
}

/// Caller settings: either a bare encoding name (the shorthand form) or a
/// full settings record.
#[derive(Clone, Debug)]
pub enum Options {
    Encoding(String),
    Record(OutputOptions),
}

impl Default for Options {
    fn default() -> Options {
        Options::Record(OutputOptions::default())
    }
}

impl From<&str> for Options {
    fn from(encoding: &str) -> Options {
        Options::Encoding(encoding.to_string())
    }
}

impl From<String> for Options {
    fn from(encoding: String) -> Options {
        Options::Encoding(encoding)
    }
}

impl From<Encoding> for Options {
    fn from(encoding: Encoding) -> Options {
        Options::Record(OutputOptions {
            encoding: Some(encoding),
            ..OutputOptions::default()
        })
    }
}

impl From<OutputOptions> for Options {
    fn from(record: OutputOptions) -> Options {
        Options::Record(record)
    }
}

impl Options {
    /// Build settings from a dynamic value: a string is an encoding name, an
    /// object is a settings record, null means defaults and anything else is
    /// rejected. Record validation happens here, before any I/O: the
    /// ambiguous `mode` key and the explicit `recursive` key fail regardless
    /// of the other keys present.
    pub fn from_value(value: Value) -> Result<Options, OutputFileErr> {
        match value {
            Value::Null => Ok(Options::default()),
            Value::String(name) => Ok(Options::Encoding(name)),
            Value::Object(map) => Ok(Options::Record(OutputOptions::from_map(map)?)),
            other => Err(OutputFileErr::InvalidOptionsTypeErr(InvalidOptionsTypeErr {
                received: json_type_name(&other),
                trace: trace!(),
            })),
        }
    }

    /// Derive the directory-creation and file-write option values. The pair
    /// is built once per call and never mutated.
    pub fn split(&self) -> Result<(MkdirOptions, WriteOptions), OutputFileErr> {
        match self {
            Options::Encoding(name) => {
                let encoding = name.parse::<Encoding>()?;
                Ok((
                    MkdirOptions::default(),
                    WriteOptions {
                        encoding,
                        ..WriteOptions::default()
                    },
                ))
            }
            Options::Record(record) => Ok((
                MkdirOptions {
                    mode: record.dir_mode,
                    extra: record.extra.clone(),
                },
                WriteOptions {
                    mode: record.file_mode,
                    encoding: record.encoding.unwrap_or_default(),
                    extra: record.extra.clone(),
                },
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Options {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Options::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Options handed to the directory-creation capability. Recursion is implied.
#[derive(Clone, Debug, Default)]
pub struct MkdirOptions {
    pub mode: Option<Mode>,
    pub extra: Map<String, Value>,
}

/// Options handed to the write capability.
#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    pub mode: Option<Mode>,
    pub encoding: Encoding,
    pub extra: Map<String, Value>,
}
