pub mod cli;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod generate;
pub mod report;
pub mod resolve;
pub mod substitute;
pub mod target;
pub mod tasks;
pub mod validate;

pub use context::ContextEnv;
pub use descriptor::{Descriptor, TokenMap};
pub use error::{GenCfgError, GenCfgResult, MissingToken};
pub use generate::{check, generate, GeneratedFile, GenerationParams};
pub use substitute::{derive_map, substitute_line};
pub use target::derive_target_path;
pub use tasks::{TaskConfig, TaskFile};
pub use validate::validate_parameters;
