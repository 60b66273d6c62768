// standard library
use std::env;
use std::ffi::OsString;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Component, Path, PathBuf};

// internal crates
use crate::errors::{
    EmptyPathErr, InvalidUrlSchemeErr, NulBytePathErr, OutputFileErr, TrailingSeparatorErr,
    UnknownCurrentDirErr, UrlToPathErr,
};
use crate::trace;

// external crates
use url::Url;

/// The accepted forms of a target path: a text path, a raw byte sequence, or
/// a file URL. All three normalize to one canonical absolute path via
/// [`TargetPath::resolve`].
#[derive(Clone, Debug)]
pub enum TargetPath {
    Text(String),
    Bytes(Vec<u8>),
    Url(Url),
}

impl From<&str> for TargetPath {
    fn from(path: &str) -> Self {
        TargetPath::Text(path.to_string())
    }
}

impl From<String> for TargetPath {
    fn from(path: String) -> Self {
        TargetPath::Text(path)
    }
}

impl From<&[u8]> for TargetPath {
    fn from(path: &[u8]) -> Self {
        TargetPath::Bytes(path.to_vec())
    }
}

impl From<Vec<u8>> for TargetPath {
    fn from(path: Vec<u8>) -> Self {
        TargetPath::Bytes(path)
    }
}

impl From<&Path> for TargetPath {
    fn from(path: &Path) -> Self {
        TargetPath::Bytes(path.as_os_str().as_bytes().to_vec())
    }
}

impl From<PathBuf> for TargetPath {
    fn from(path: PathBuf) -> Self {
        TargetPath::Bytes(path.into_os_string().into_vec())
    }
}

impl From<Url> for TargetPath {
    fn from(url: Url) -> Self {
        TargetPath::Url(url)
    }
}

impl TargetPath {
    fn form(&self) -> &'static str {
        match self {
            TargetPath::Text(_) => "text",
            TargetPath::Bytes(_) => "byte",
            TargetPath::Url(_) => "URL",
        }
    }

    /// Validate the path's shape and normalize it to one canonical absolute
    /// path. The checks are purely syntactic; the filesystem is not touched.
    pub fn resolve(&self) -> Result<PathBuf, OutputFileErr> {
        let raw = match self {
            TargetPath::Text(text) => {
                self.check_shape(text.as_bytes())?;
                PathBuf::from(text)
            }
            TargetPath::Bytes(bytes) => {
                self.check_shape(bytes)?;
                PathBuf::from(OsString::from_vec(bytes.clone()))
            }
            TargetPath::Url(url) => {
                let path = url_to_path(url)?;
                self.check_shape(path.as_os_str().as_bytes())?;
                path
            }
        };
        abs_path(&raw)
    }

    fn check_shape(&self, bytes: &[u8]) -> Result<(), OutputFileErr> {
        if bytes.is_empty() {
            return Err(OutputFileErr::EmptyPathErr(EmptyPathErr {
                form: self.form(),
                trace: trace!(),
            }));
        }
        if bytes.contains(&0) {
            return Err(OutputFileErr::NulBytePathErr(NulBytePathErr {
                path: String::from_utf8_lossy(bytes).escape_debug().to_string(),
                trace: trace!(),
            }));
        }
        if bytes.ends_with(b"/") {
            return Err(OutputFileErr::TrailingSeparatorErr(TrailingSeparatorErr {
                path: String::from_utf8_lossy(bytes).to_string(),
                trace: trace!(),
            }));
        }
        Ok(())
    }
}

fn url_to_path(url: &Url) -> Result<PathBuf, OutputFileErr> {
    if url.scheme() != "file" {
        return Err(OutputFileErr::InvalidUrlSchemeErr(InvalidUrlSchemeErr {
            url: url.clone(),
            trace: trace!(),
        }));
    }
    url.to_file_path()
        .map_err(|_| {
            OutputFileErr::UrlToPathErr(UrlToPathErr {
                url: url.clone(),
                trace: trace!(),
            })
        })
}

/// Absolutize `path` against the current working directory and lexically
/// normalize it.
fn abs_path(path: &Path) -> Result<PathBuf, OutputFileErr> {
    let path = match path.is_absolute() {
        true => path.to_path_buf(),
        false => {
            let current_dir = env::current_dir().map_err(|e| {
                OutputFileErr::UnknownCurrentDirErr(UnknownCurrentDirErr {
                    source: e,
                    trace: trace!(),
                })
            })?;
            current_dir.join(path)
        }
    };
    Ok(clean(path))
}

/// Source code was taken from path-clean crate
/// https://github.com/danreeves/path-clean/blob/3876d7cb5367997bcda17ce165bf69c4f434cb93/src/lib.rs#L57
///
/// The core implementation. It performs the following, lexically:
/// 1. Reduce multiple slashes to a single slash.
/// 2. Eliminate `.` path name elements (the current directory).
/// 3. Eliminate `..` path name elements (the parent directory) and the non-`.` non-`..`, element that precedes them.
/// 4. Eliminate `..` elements that begin a rooted path, that is, replace `/..` by `/` at the beginning of a path.
/// 5. Leave intact `..` elements that begin a non-rooted path.
///
/// If the result of this process is an empty string, return the string `"."`, representing the current directory.
fn clean<P>(path: P) -> PathBuf
where
    P: AsRef<Path>,
{
    let mut abs_path = Vec::new();

    for comp in path.as_ref().components() {
        match comp {
            Component::CurDir => (),
            Component::ParentDir => match abs_path.last() {
                Some(Component::RootDir) => (),
                Some(Component::Normal(_)) => {
                    abs_path.pop();
                }
                None
                | Some(Component::CurDir)
                | Some(Component::ParentDir)
                | Some(Component::Prefix(_)) => abs_path.push(comp),
            },
            comp => abs_path.push(comp),
        }
    }

    if !abs_path.is_empty() {
        abs_path.iter().collect()
    } else {
        PathBuf::from(".")
    }
}
