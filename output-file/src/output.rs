// standard library
use std::env;
use std::path::PathBuf;

// internal crates
use crate::errors::{Error, OutputFileErr, UnknownCurrentDirErr, UnknownParentDirErr};
use crate::mkdir::make_dirs;
use crate::options::Options;
use crate::path::TargetPath;
use crate::trace;
use crate::write::{Contents, WritePlan};

// external crates
#[allow(unused_imports)]
use tracing::{debug, error, info, warn};

/// Write `data` to `path` with default options, creating any missing parent
/// directories. Returns the first directory that had to be created, or `None`
/// when the whole parent chain already existed.
pub async fn output_file(
    path: impl Into<TargetPath>,
    data: impl Into<Contents>,
) -> Result<Option<PathBuf>, OutputFileErr> {
    output_file_with(path, data, Options::default()).await
}

/// Write `data` to `path`, creating any missing parent directories. Options
/// are either a bare encoding name or a full [`OutputOptions`] record; see
/// [`Options`] for the accepted forms.
///
/// All validation happens before any filesystem access: the path is checked
/// and resolved, the options are parsed, and the data is converted to bytes.
/// Only then does I/O start.
///
/// [`OutputOptions`]: crate::options::OutputOptions
pub async fn output_file_with(
    path: impl Into<TargetPath>,
    data: impl Into<Contents>,
    options: impl Into<Options>,
) -> Result<Option<PathBuf>, OutputFileErr> {
    let target = path.into().resolve()?;
    let contents = data.into();
    let (mkdir_opts, write_opts) = options.into().split()?;
    let plan = WritePlan::new(target.clone(), &contents, &write_opts)?;

    let parent = match target.parent() {
        Some(parent) => parent.to_path_buf(),
        None => {
            return Err(OutputFileErr::UnknownParentDirErr(UnknownParentDirErr {
                path: target,
                trace: trace!(),
            }));
        }
    };

    let current_dir = env::current_dir().map_err(|e| {
        OutputFileErr::UnknownCurrentDirErr(UnknownCurrentDirErr {
            source: e,
            trace: trace!(),
        })
    })?;

    // the working directory always exists, so a file directly inside it
    // needs no directory handling at all
    if parent == current_dir {
        debug!("writing {:?} directly into the working directory", plan.path());
        plan.commit().await?;
        return Ok(None);
    }

    debug!("writing {:?} with directory creation", plan.path());

    // Run an optimistic write concurrently with the create-directories-then-
    // write attempt. When the parent chain already exists the optimistic
    // write saves the directory walk; when it is missing, that write fails
    // with a missing-path error and the full attempt supplies the outcome.
    let ensure_then_write = async {
        let created = make_dirs(&parent, &mkdir_opts).await?;
        plan.commit().await?;
        Ok::<Option<PathBuf>, OutputFileErr>(created)
    };
    let (full, eager) = tokio::join!(ensure_then_write, plan.commit());

    // any non-missing-path failure of the optimistic write (the target is a
    // directory, a parent component is a regular file, ...) is the real
    // outcome of the operation and is reported no matter what the full
    // attempt produced
    match eager {
        Err(e) if !e.is_missing_path_component() => Err(e),
        _ => full,
    }
}
