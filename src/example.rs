//! Example config generation
//!
//! `bindforge example` writes three starter files into the target
//! directory: a pretty-printed task collection, the default shared type map
//! it includes, and a build-metadata snippet referenced by the task's
//! output options. The config literal lives here so the example and the
//! serializer can never drift apart.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::platform::NameContainer;
use crate::task::{
    BakeryOptions, BindTask, ClangOptions, ClassMapping, ConverterMode, OutputOptions,
};
use crate::typemap::TypeMapLayer;

pub const EXAMPLE_CONFIG_FILE: &str = "generator.json";
pub const DEFAULT_TYPEMAP_FILE: &str = "common_typemap.json";
pub const BUILD_PROPS_FILE: &str = "build.props";

static EXAMPLE_CONFIG: Lazy<GeneratorConfig> = Lazy::new(|| GeneratorConfig {
    tasks: vec![BindTask {
        name: "webgpu".into(),
        mode: ConverterMode::Clang,
        sources: vec!["/path/to/webgpu.h".into()],
        function_prefix: Some("wgpu".into()),
        namespace: Some("Bindings.WebGPU".into()),
        extensions_namespace: Some("Bindings.WebGPU.Extensions".into()),
        clang_opts: Some(ClangOptions {
            clang_args: [
                "--language=c++",
                "--std=c++17",
                "-m64",
                "-Wno-expansion-to-defined",
                "-Wno-ignored-attributes",
                "-Wno-ignored-pragma-intrinsic",
                "-Wno-nonportable-include-path",
                "-Wno-pragma-pack",
                "-I$windowsSdkIncludes",
                "-Ipath/to/library/include/",
            ]
            .map(String::from)
            .to_vec(),
            class_mappings: BTreeMap::from([(
                "webgpu.h".to_string(),
                ClassMapping::new(Some("Core"), "WebGPU"),
            )]),
        }),
        controls: ["convert-windows-only", "no-obsolete-enum"]
            .map(String::from)
            .to_vec(),
        cache_folder: Some("/build/cache".into()),
        cache_key: Some("webgpu".into()),
        bakery_opts: Some(BakeryOptions {
            include: vec!["webgpu".into()],
        }),
        type_maps: vec![
            TypeMapLayer::from_pairs([("HWND", "nint")]),
            TypeMapLayer::include("commonTypeMap", DEFAULT_TYPEMAP_FILE),
        ],
        name_container: Some(NameContainer {
            class_name: "WebGPULibraryNameContainer".into(),
            android: Some("libwgpu_native.so".into()),
            ios: Some("libwgpu_native.dylib".into()),
            linux: Some("libwgpu_native.so".into()),
            mac_os: Some("libwgpu_native.dylib".into()),
            windows64: Some("wgpu_native.dll".into()),
            windows86: Some("wgpu_native.dll".into()),
        }),
        platforms: vec![],
        output_opts: Some(OutputOptions {
            folder: "generated".into(),
            license: Some("LICENSE.txt".into()),
            props: Some(BUILD_PROPS_FILE.into()),
        }),
    }],
});

const DEFAULT_TYPEMAP: &str = r#"{
    "void": "void",
    "void*": "nint",
    "char": "byte",
    "const char*": "string",
    "bool": "bool",
    "float": "float",
    "double": "double",
    "int8_t": "sbyte",
    "uint8_t": "byte",
    "int16_t": "short",
    "uint16_t": "ushort",
    "int32_t": "int",
    "uint32_t": "uint",
    "int64_t": "long",
    "uint64_t": "ulong",
    "size_t": "nuint",
    "intptr_t": "nint",
    "uintptr_t": "nuint"
}
"#;

const BUILD_PROPS: &str = r#"<Project>
    <ItemGroup>
        <PackageReference Include="BindForge.Interop" Version="0.1.0" />
        <PackageReference Include="BindForge.Core" Version="0.1.0" />
    </ItemGroup>
</Project>
"#;

/// Files written by [`write_example_files`].
pub struct ExampleResult {
    pub files_created: Vec<String>,
}

/// Write the example config and its side files into `dir`.
pub fn write_example_files(dir: &Path) -> Result<ExampleResult> {
    let config_text = EXAMPLE_CONFIG.to_pretty_json()?;
    fs::write(dir.join(EXAMPLE_CONFIG_FILE), config_text)?;
    fs::write(dir.join(DEFAULT_TYPEMAP_FILE), DEFAULT_TYPEMAP)?;
    fs::write(dir.join(BUILD_PROPS_FILE), BUILD_PROPS)?;

    Ok(ExampleResult {
        files_created: vec![
            EXAMPLE_CONFIG_FILE.to_string(),
            DEFAULT_TYPEMAP_FILE.to_string(),
            BUILD_PROPS_FILE.to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_task;
    use crate::typemap::FileIncludeLoader;
    use tempfile::tempdir;

    #[test]
    fn test_example_files_written() {
        let dir = tempdir().unwrap();
        let result = write_example_files(dir.path()).unwrap();

        assert_eq!(result.files_created.len(), 3);
        assert!(dir.path().join(EXAMPLE_CONFIG_FILE).exists());
        assert!(dir.path().join(DEFAULT_TYPEMAP_FILE).exists());
        assert!(dir.path().join(BUILD_PROPS_FILE).exists());
    }

    #[test]
    fn test_example_config_loads_back() {
        let dir = tempdir().unwrap();
        write_example_files(dir.path()).unwrap();

        let loaded = GeneratorConfig::load(dir.path().join(EXAMPLE_CONFIG_FILE)).unwrap();
        assert_eq!(loaded, *EXAMPLE_CONFIG);
    }

    #[test]
    fn test_example_task_resolves_with_its_side_files() {
        let dir = tempdir().unwrap();
        write_example_files(dir.path()).unwrap();

        let config = GeneratorConfig::load(dir.path().join(EXAMPLE_CONFIG_FILE)).unwrap();
        let task = &config.tasks[0];

        let mut loader = FileIncludeLoader::new(dir.path());
        loader.register_sources(&task.type_maps);

        let resolved = resolve_task(task, dir.path(), &loader).unwrap();
        // The override layer wins over the included common map.
        assert_eq!(resolved.type_map["HWND"], "nint");
        assert_eq!(resolved.type_map["size_t"], "nuint");
    }

    #[test]
    fn test_example_config_omits_defaults() {
        let text = EXAMPLE_CONFIG.to_pretty_json().unwrap();
        // Mode is Clang (the default) and Platforms is empty, so neither
        // appears in the persisted form.
        assert!(!text.contains("\"Mode\""));
        assert!(!text.contains("\"Platforms\""));
        assert!(text.contains("\"$include.commonTypeMap\""));
    }
}
