//! The binding-generation task model
//!
//! One [`BindTask`] describes a single request: which headers to parse,
//! which front-end parses them, how names and types map into the target
//! namespace, and where output goes. Wire names are PascalCase to match the
//! persisted `generator.json` format; every optional or empty field is
//! omitted when saved so config files stay minimal and diff-friendly.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::platform::{NameContainer, Platform};
use crate::typemap::TypeMapLayer;

/// Which parsing front-end handles the task's sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConverterMode {
    /// Parse C/C++ headers with the clang front-end.
    #[default]
    Clang,
    /// Consume a pre-parsed AST dump instead of raw headers.
    Ast,
}

impl ConverterMode {
    pub fn is_default(&self) -> bool {
        *self == ConverterMode::Clang
    }
}

impl fmt::Display for ConverterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterMode::Clang => write!(f, "Clang"),
            ConverterMode::Ast => write!(f, "Ast"),
        }
    }
}

/// Target container for one header, parsed eagerly from the `[Group]Name`
/// wire encoding. Group and name stay independently addressable; the
/// encoded string is only reconstructed at the serialization boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    pub group: Option<String>,
    pub name: String,
}

impl ClassMapping {
    pub fn new(group: Option<impl Into<String>>, name: impl Into<String>) -> Self {
        Self {
            group: group.map(Into::into),
            name: name.into(),
        }
    }
}

impl FromStr for ClassMapping {
    type Err = std::convert::Infallible;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = encoded.strip_prefix('[') {
            if let Some((group, name)) = rest.split_once(']') {
                return Ok(ClassMapping {
                    group: Some(group.to_string()),
                    name: name.to_string(),
                });
            }
        }
        // No bracketed group; the whole string is the container name.
        Ok(ClassMapping {
            group: None,
            name: encoded.to_string(),
        })
    }
}

impl fmt::Display for ClassMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "[{group}]{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Serialize for ClassMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClassMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        match encoded.parse() {
            Ok(mapping) => Ok(mapping),
            Err(never) => match never {},
        }
    }
}

/// Options meaningful when [`ConverterMode::Clang`] is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ClangOptions {
    /// Raw compiler arguments, carried verbatim to the front-end. May
    /// contain `$variable` placeholders; the engine resolves those from its
    /// execution environment, this tool does not expand them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clang_args: Vec<String>,

    /// Header file name -> target container.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub class_mappings: BTreeMap<String, ClassMapping>,
}

/// Bakery transformation profiles carried to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BakeryOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// Where generated output lands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OutputOptions {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub folder: String,

    /// License header file prepended to generated sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Build-metadata file written alongside the generated output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<String>,
}

/// One binding-generation task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BindTask {
    /// Identifier, unique within a config collection.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "ConverterMode::is_default")]
    pub mode: ConverterMode,

    /// Header paths to process, in order. Relative paths resolve against
    /// the directory containing the config file, never the directory the
    /// process was launched from, so tasks stay relocatable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,

    /// Prefix stripped when generating wrapper method names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions_namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clang_opts: Option<ClangOptions>,

    /// Open set of behavioral switches for downstream codegen. Unknown
    /// entries are carried through untouched; this tool does not interpret
    /// them, so new switches never break old configs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<String>,

    /// Caching coordinates the engine may use to skip redundant parsing.
    /// Carried only; no caching happens here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_folder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bakery_opts: Option<BakeryOptions>,

    /// Type map layers, applied in array order (later wins).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_maps: Vec<TypeMapLayer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_container: Option<NameContainer>,

    /// Target platforms for this task. Empty means all platforms, in which
    /// case the name container must cover every one of them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<Platform>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_opts: Option<OutputOptions>,
}

impl BindTask {
    /// The platforms the engine may query for this task.
    pub fn target_platforms(&self) -> &[Platform] {
        if self.platforms.is_empty() {
            &Platform::ALL
        } else {
            &self.platforms
        }
    }

    /// Whether a behavioral switch is set.
    pub fn has_control(&self, name: &str) -> bool {
        self.controls.iter().any(|control| control == name)
    }
}
