// standard library
use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};

// internal crates
use crate::errors::{CreateDirErr, OutputFileErr, SetPermissionsErr};
use crate::options::MkdirOptions;
use crate::trace;

// external crates
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Create the directory at `dir` and any missing parent directories, returning
/// the first (shallowest) directory that did not exist beforehand, or `None`
/// when the whole chain was already present.
///
/// Directories are created one component at a time so the shallowest creation
/// can be observed. When a mode is set, each created directory receives
/// exactly those permission bits, unaffected by the process umask.
pub async fn make_dirs(
    dir: &Path,
    opts: &MkdirOptions,
) -> Result<Option<PathBuf>, OutputFileErr> {
    let mut first_created: Option<PathBuf> = None;
    let mut prefix = PathBuf::new();

    for component in dir.components() {
        prefix.push(component);
        if matches!(component, Component::RootDir | Component::Prefix(_)) {
            continue;
        }

        match tokio::fs::create_dir(&prefix).await {
            Ok(()) => {
                if let Some(mode) = opts.mode {
                    let perms = std::fs::Permissions::from_mode(mode.bits());
                    tokio::fs::set_permissions(&prefix, perms)
                        .await
                        .map_err(|e| {
                            OutputFileErr::SetPermissionsErr(SetPermissionsErr {
                                path: prefix.clone(),
                                source: e,
                                trace: trace!(),
                            })
                        })?;
                }
                if first_created.is_none() {
                    first_created = Some(prefix.clone());
                }
            }
            // a component that already exists is fine, even when it is not a
            // directory: the failure then surfaces on the next component or
            // on the write itself
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(OutputFileErr::CreateDirErr(CreateDirErr {
                    dir: prefix.clone(),
                    source: e,
                    trace: trace!(),
                }));
            }
        }
    }

    Ok(first_created)
}
