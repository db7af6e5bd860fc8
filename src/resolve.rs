//! Task resolution
//!
//! Turns a raw [`BindTask`] into the immutable [`ResolvedTask`] handed to
//! the dispatcher: type map layers flattened into one map, every relative
//! path absolutized against the config file's directory, and the name
//! container checked against the task's target platforms. The base
//! directory is threaded explicitly instead of mutating the process working
//! directory, so repeated dispatch in one process stays safe.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::task::{BindTask, OutputOptions};
use crate::typemap::{self, IncludeLoader};

/// A task after resolution. Immutable from here on; the conversion engine
/// receives it as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTask {
    pub task: BindTask,
    /// Directory the config file came from; every path below is already
    /// absolute with respect to it.
    pub base_dir: PathBuf,
    /// The flat, conflict-resolved native -> target type map.
    pub type_map: BTreeMap<String, String>,
}

impl ResolvedTask {
    pub fn name(&self) -> &str {
        &self.task.name
    }
}

/// Resolve one task against the directory its config was loaded from.
pub fn resolve_task(
    task: &BindTask,
    base_dir: &Path,
    loader: &dyn IncludeLoader,
) -> Result<ResolvedTask> {
    let type_map = typemap::resolve(&task.type_maps, loader)?;

    if let Some(container) = &task.name_container {
        container.validate(task.target_platforms())?;
    }

    let mut task = task.clone();
    for source in &mut task.sources {
        *source = absolutize(base_dir, source);
    }
    if let Some(folder) = &mut task.cache_folder {
        *folder = absolutize(base_dir, folder);
    }
    if let Some(OutputOptions {
        folder,
        license,
        props,
    }) = &mut task.output_opts
    {
        *folder = absolutize(base_dir, folder);
        if let Some(license) = license {
            *license = absolutize(base_dir, license);
        }
        if let Some(props) = props {
            *props = absolutize(base_dir, props);
        }
    }

    Ok(ResolvedTask {
        task,
        base_dir: base_dir.to_path_buf(),
        type_map,
    })
}

fn absolutize(base_dir: &Path, path: &str) -> String {
    let candidate = Path::new(path);
    if candidate.is_absolute() || path.is_empty() {
        path.to_string()
    } else {
        base_dir.join(candidate).display().to_string()
    }
}
