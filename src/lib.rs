//! bindforge - configuration-driven orchestrator for native binding generation

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod example;
pub mod platform;
pub mod resolve;
pub mod task;
pub mod typemap;

pub use config::GeneratorConfig;
pub use dispatch::{Dispatcher, RunReport};
pub use engine::{ConversionEngine, MockEngine};
pub use error::{FixSuggestion, ForgeError, Result};
pub use platform::{NameContainer, Platform};
pub use resolve::{resolve_task, ResolvedTask};
pub use task::{BindTask, ClassMapping, ConverterMode};
pub use typemap::{FileIncludeLoader, IncludeLoader, TypeMapEntry, TypeMapLayer};
