//! Error types with fix suggestions

use thiserror::Error;

use crate::platform::Platform;

pub type Result<T> = std::result::Result<T, ForgeError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All failures this tool can surface. None are recovered locally: a
/// partially-applied binding-generation task is worse than a hard stop, so
/// every variant aborts the current task with a non-zero exit.
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("config schema error: {reason}")]
    ConfigSchema { reason: String },

    #[error("type map include '{name}' could not be resolved")]
    UnresolvedInclude { name: String },

    #[error("cyclic type map include: {chain}")]
    CyclicInclude { chain: String },

    #[error("name container '{class_name}' has no native library name for {platform}")]
    MissingPlatformName {
        class_name: String,
        platform: Platform,
    },

    #[error("cannot determine a working directory from '{path}'")]
    WorkingDirectory { path: String },

    #[error("conversion engine failed: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for ForgeError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ForgeError::ConfigParse(_) => {
                Some("Check the config file is valid JSON (run `bindforge example` for a template)")
            }
            ForgeError::ConfigSchema { .. } => {
                Some("Every task needs a Name and a non-empty Sources array")
            }
            ForgeError::UnresolvedInclude { .. } => {
                Some("Place the included type map file next to the config file, or fix the $include name")
            }
            ForgeError::CyclicInclude { .. } => {
                Some("Remove the circular $include chain - a type map cannot include itself")
            }
            ForgeError::MissingPlatformName { .. } => {
                Some("Add the platform's library file name to NameContainer, or narrow the task's Platforms list")
            }
            ForgeError::WorkingDirectory { .. } => {
                Some("Pass a path that has a parent directory (relative paths resolve against it)")
            }
            ForgeError::Engine(_) => None,
            ForgeError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
