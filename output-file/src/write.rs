// standard library
use std::path::{Path, PathBuf};

// internal crates
use crate::errors::{InvalidOptionValueErr, OutputFileErr, WriteFileErr};
use crate::options::{Mode, WriteOptions};
use crate::trace;

// external crates
use serde_json::Value;
use tokio::io::AsyncWriteExt;
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Data to write: text is converted to bytes with the selected encoding,
/// bytes are written verbatim and ignore the encoding entirely.
#[derive(Clone, Debug)]
pub enum Contents {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<&str> for Contents {
    fn from(text: &str) -> Contents {
        Contents::Text(text.to_string())
    }
}

impl From<String> for Contents {
    fn from(text: String) -> Contents {
        Contents::Text(text)
    }
}

impl From<&[u8]> for Contents {
    fn from(bytes: &[u8]) -> Contents {
        Contents::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Contents {
    fn from(bytes: Vec<u8>) -> Contents {
        Contents::Bytes(bytes)
    }
}

/// A fully validated write, ready to commit. Building the plan performs all
/// of the write half's non-I/O work up front: the text conversion and the
/// `flush` setting are resolved here, so their failures surface before the
/// filesystem is touched and a plan can be committed more than once.
#[derive(Clone, Debug)]
pub struct WritePlan {
    path: PathBuf,
    bytes: Vec<u8>,
    mode: Option<Mode>,
    flush: bool,
}

impl WritePlan {
    pub fn new(
        path: PathBuf,
        contents: &Contents,
        opts: &WriteOptions,
    ) -> Result<WritePlan, OutputFileErr> {
        let bytes = match contents {
            Contents::Text(text) => opts.encoding.decode_text(text)?,
            Contents::Bytes(bytes) => bytes.clone(),
        };
        let flush = match opts.extra.get("flush") {
            None => false,
            Some(Value::Bool(flush)) => *flush,
            Some(other) => {
                return Err(OutputFileErr::InvalidOptionValueErr(InvalidOptionValueErr {
                    key: "flush",
                    value: other.to_string(),
                    expected: "a boolean",
                    trace: trace!(),
                }));
            }
        };
        Ok(WritePlan {
            path,
            bytes,
            mode: opts.mode,
            flush,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the planned bytes, truncating any existing file. A file mode
    /// applies through `open(2)` and so only to a newly created file, with
    /// the process umask masking it the usual way.
    pub async fn commit(&self) -> Result<(), OutputFileErr> {
        let mut open_opts = tokio::fs::OpenOptions::new();
        open_opts.write(true).create(true).truncate(true);
        if let Some(mode) = self.mode {
            open_opts.mode(mode.bits());
        }

        let mut file = open_opts
            .open(&self.path)
            .await
            .map_err(|e| self.write_err(e))?;
        file.write_all(&self.bytes)
            .await
            .map_err(|e| self.write_err(e))?;
        // write_all only queues the bytes with the runtime; flush waits
        // until they have reached the file
        file.flush().await.map_err(|e| self.write_err(e))?;
        if self.flush {
            file.sync_all().await.map_err(|e| self.write_err(e))?;
        }
        Ok(())
    }

    fn write_err(&self, e: std::io::Error) -> OutputFileErr {
        OutputFileErr::WriteFileErr(WriteFileErr {
            path: self.path.clone(),
            source: e,
            trace: trace!(),
        })
    }
}
