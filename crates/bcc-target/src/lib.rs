//! Target configuration for the bcc ahead-of-time bitcode compiler.
//!
//! A [`CompilerConfig`] packages everything the code generation pipeline needs
//! to know about the target before it invokes the backend:
//! - **Triple:** the platform identifier, stored exactly as given
//! - **Tuning:** CPU, feature string, code/relocation model, optimization level
//! - **Resolution:** the backend target and architecture, derived by `initialize`
//!
//! Backend lookup goes through the [`TargetRegistry`] trait. [`BuiltinRegistry`]
//! mirrors LLVM's backend table without linking LLVM; with the `llvm` feature,
//! [`llvm::LlvmRegistry`] asks LLVM directly.

pub mod config;
pub mod defaults;
pub mod error;
pub mod features;
pub mod options;
pub mod parse;
pub mod registry;
pub mod triple;

#[cfg(feature = "llvm")]
pub mod llvm;

/// Whether this build can construct LLVM target machines.
pub const LLVM_AVAILABLE: bool = cfg!(feature = "llvm");

pub use config::CompilerConfig;
pub use defaults::ArchDefaults;
pub use error::{Result, TargetError};
pub use features::{join_features, validate_features, ValidationIssue};
pub use options::{CodeModel, FloatAbi, OptimizationLevel, RelocationModel, TargetOptions};
pub use parse::{
    config_to_toml, generate_template, load_config_toml, parse_config_toml, ConfigFile,
    CONFIG_FILE_NAME,
};
pub use registry::{BuiltinRegistry, TargetDescriptor, TargetHandle, TargetRegistry};
pub use triple::{arch_of, ArchType, Endianness, Triple};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn config_is_send_and_sync() {
        assert_send_sync::<CompilerConfig>();
        assert_send_sync::<BuiltinRegistry>();
    }
}
