//! Type map layers and their flattening resolver
//!
//! A task carries an ordered list of type map layers, each mapping a native
//! type spelling to a target-language spelling. On the wire a layer is a
//! plain JSON object, but a key of the form `$include.<name>` is a directive
//! pulling in another named layer, so in memory each entry is a tagged
//! variant: [`TypeMapEntry::Literal`] or [`TypeMapEntry::Include`]. That
//! keeps an actual native type that happens to start with `$include.` from
//! ever being mistaken for a directive once parsed.
//!
//! [`resolve`] flattens the layers into one map with last-write-wins
//! semantics, expanding includes in place (as if textually substituted at
//! the directive's position) and rejecting cyclic include chains.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ForgeError, Result};

/// Key prefix marking an include directive inside a layer.
pub const INCLUDE_PREFIX: &str = "$include.";

/// One entry of a type map layer, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMapEntry {
    /// `"HWND": "nint"` - substitute a native spelling with a target one.
    Literal { native: String, target: String },

    /// `"$include.<name>": "<source hint>"` - expand the named layer here.
    /// The source hint is the side file the config author pointed at; the
    /// resolver keys loading off `name`, but the hint is preserved so a
    /// save/load round trip is lossless and so file-backed loaders can
    /// register it.
    Include { name: String, source: String },
}

/// An ordered type map layer. Duplicate keys are kept in declared order so
/// last-write-wins applies within a single layer too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMapLayer {
    pub entries: Vec<TypeMapEntry>,
}

impl TypeMapLayer {
    /// Build a layer of plain literal entries. Test and example convenience.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| TypeMapEntry::Literal {
                    native: k.into(),
                    target: v.into(),
                })
                .collect(),
        }
    }

    /// Build a layer containing a single include directive.
    pub fn include(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            entries: vec![TypeMapEntry::Include {
                name: name.into(),
                source: source.into(),
            }],
        }
    }
}

impl Serialize for TypeMapLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            match entry {
                TypeMapEntry::Literal { native, target } => {
                    map.serialize_entry(native, target)?;
                }
                TypeMapEntry::Include { name, source } => {
                    map.serialize_entry(&format!("{INCLUDE_PREFIX}{name}"), source)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeMapLayer {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        // A hand-rolled map visitor keeps entry order and duplicate keys,
        // both of which are semantic here; serde_json's Map would sort and
        // deduplicate.
        struct LayerVisitor;

        impl<'de> Visitor<'de> for LayerVisitor {
            type Value = TypeMapLayer;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of native type spellings to target spellings")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    let entry = match key.strip_prefix(INCLUDE_PREFIX) {
                        Some(name) => TypeMapEntry::Include {
                            name: name.to_string(),
                            source: value,
                        },
                        None => TypeMapEntry::Literal {
                            native: key,
                            target: value,
                        },
                    };
                    entries.push(entry);
                }
                Ok(TypeMapLayer { entries })
            }
        }

        deserializer.deserialize_map(LayerVisitor)
    }
}

/// Lookup for named layers referenced by include directives.
pub trait IncludeLoader {
    /// Fetch the layer registered under `name`, or `None` if unknown.
    fn load(&self, name: &str) -> Result<Option<TypeMapLayer>>;
}

/// In-memory loader backed by a name -> layer table.
#[derive(Debug, Default)]
pub struct MemoryIncludeLoader {
    layers: HashMap<String, TypeMapLayer>,
}

impl MemoryIncludeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, layer: TypeMapLayer) {
        self.layers.insert(name.into(), layer);
    }
}

impl IncludeLoader for MemoryIncludeLoader {
    fn load(&self, name: &str) -> Result<Option<TypeMapLayer>> {
        Ok(self.layers.get(name).cloned())
    }
}

/// Loader reading named layers from JSON files next to the config file.
///
/// An include's source hint can register an explicit file for its name;
/// otherwise `<name>.json` in the base directory is tried.
#[derive(Debug)]
pub struct FileIncludeLoader {
    base_dir: PathBuf,
    registry: HashMap<String, PathBuf>,
}

impl FileIncludeLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            registry: HashMap::new(),
        }
    }

    /// Map an include name to an explicit file path (relative paths resolve
    /// against the base directory).
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.registry.insert(name.into(), path.into());
    }

    /// Register the source hints of every include directive in `layers`.
    pub fn register_sources(&mut self, layers: &[TypeMapLayer]) {
        for layer in layers {
            for entry in &layer.entries {
                if let TypeMapEntry::Include { name, source } = entry {
                    if !source.is_empty() {
                        self.register(name.clone(), source);
                    }
                }
            }
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        let path = self
            .registry
            .get(name)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(format!("{name}.json")));
        self.base_dir.join(path)
    }
}

impl IncludeLoader for FileIncludeLoader {
    fn load(&self, name: &str) -> Result<Option<TypeMapLayer>> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        let layer = serde_json::from_str(&text)?;
        Ok(Some(layer))
    }
}

/// Flatten ordered layers into one conflict-resolved map.
///
/// Layers apply in order and a later entry overwrites an earlier one at the
/// same key. Includes are expanded at the position the directive occupies,
/// recursively; an include chain that reaches a name already on the current
/// resolution path fails with `CyclicIncludeError`. An empty input yields an
/// empty map. The result is a `BTreeMap`, so iterating it is deterministic.
pub fn resolve(
    layers: &[TypeMapLayer],
    loader: &dyn IncludeLoader,
) -> Result<BTreeMap<String, String>> {
    let mut flat = BTreeMap::new();
    let mut path = Vec::new();
    for layer in layers {
        merge_layer(layer, loader, &mut path, &mut flat)?;
    }
    Ok(flat)
}

fn merge_layer(
    layer: &TypeMapLayer,
    loader: &dyn IncludeLoader,
    path: &mut Vec<String>,
    flat: &mut BTreeMap<String, String>,
) -> Result<()> {
    for entry in &layer.entries {
        match entry {
            TypeMapEntry::Literal { native, target } => {
                flat.insert(native.clone(), target.clone());
            }
            TypeMapEntry::Include { name, .. } => {
                if path.iter().any(|seen| seen == name) {
                    let mut chain = path.clone();
                    chain.push(name.clone());
                    return Err(ForgeError::CyclicInclude {
                        chain: chain.join(" -> "),
                    });
                }
                let included = loader
                    .load(name)?
                    .ok_or_else(|| ForgeError::UnresolvedInclude { name: name.clone() })?;
                path.push(name.clone());
                merge_layer(&included, loader, path, flat)?;
                path.pop();
            }
        }
    }
    Ok(())
}
