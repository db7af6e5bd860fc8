//! Generator config persistence
//!
//! A [`GeneratorConfig`] is a collection of bind tasks persisted as
//! pretty-printed JSON. Saving omits every default/empty field; loading
//! treats an absent field as the type's default. Malformed JSON is a
//! `ConfigParseError`; a structurally broken collection (empty task name,
//! empty sources, duplicate names) is a `ConfigSchemaError`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};
use crate::task::BindTask;

/// A persisted collection of binding-generation tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GeneratorConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<BindTask>,
}

impl GeneratorConfig {
    /// Load and schema-check a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: GeneratorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty-printed JSON with default fields omitted.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.to_pretty_json()?;
        fs::write(path.as_ref(), text)?;
        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural requirements that parsing alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(schema_error("config contains no tasks"));
        }

        let mut seen = HashSet::new();
        for task in &self.tasks {
            if task.name.is_empty() {
                return Err(schema_error("task is missing a Name"));
            }
            if !seen.insert(task.name.as_str()) {
                return Err(schema_error(format!(
                    "duplicate task name '{}'",
                    task.name
                )));
            }
            if task.sources.is_empty() {
                return Err(schema_error(format!(
                    "task '{}' has no Sources",
                    task.name
                )));
            }
        }
        Ok(())
    }
}

/// Directory containing the config file; relative task paths resolve
/// against it so a config stays relocatable.
pub fn base_dir(config_path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = config_path.as_ref();
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    match absolute.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Err(ForgeError::WorkingDirectory {
            path: path.display().to_string(),
        }),
    }
}

fn schema_error(reason: impl Into<String>) -> ForgeError {
    ForgeError::ConfigSchema {
        reason: reason.into(),
    }
}
