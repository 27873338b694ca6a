//! LLVM backend bridge.
//!
//! Only available with the `llvm` feature. Provides a registry backed by
//! LLVM's own target registry and builds `TargetMachine`s from a resolved
//! [`CompilerConfig`].

use std::sync::Once;

use inkwell::targets::{
    CodeModel as LlvmCodeModel, InitializationConfig, RelocMode, Target, TargetMachine,
    TargetTriple,
};
use inkwell::OptimizationLevel as LlvmOptLevel;

use crate::config::CompilerConfig;
use crate::error::{Result, TargetError};
use crate::options::{CodeModel, OptimizationLevel, RelocationModel};
use crate::registry::{TargetHandle, TargetRegistry};

static INIT: Once = Once::new();

/// Register every backend compiled into the linked LLVM.
fn init_targets() {
    INIT.call_once(|| {
        Target::initialize_all(&InitializationConfig::default());
        log::debug!("initialized LLVM targets");
    });
}

/// Registry that resolves triples through LLVM's `TargetRegistry`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LlvmRegistry;

impl LlvmRegistry {
    pub fn new() -> Self {
        init_targets();
        Self
    }
}

impl TargetRegistry for LlvmRegistry {
    fn lookup(&self, triple: &str) -> Option<TargetHandle> {
        init_targets();
        let target = Target::from_triple(&TargetTriple::create(triple)).ok()?;
        Some(TargetHandle::new(
            target.get_name().to_string_lossy(),
            target.get_description().to_string_lossy(),
            triple,
        ))
    }

    fn targets(&self) -> Vec<(String, String)> {
        init_targets();
        let mut targets = Vec::new();
        let mut next = Target::get_first();
        while let Some(target) = next {
            targets.push((
                target.get_name().to_string_lossy().into_owned(),
                target.get_description().to_string_lossy().into_owned(),
            ));
            next = target.get_next();
        }
        targets.sort();
        targets
    }
}

pub fn to_llvm_code_model(model: CodeModel) -> LlvmCodeModel {
    match model {
        CodeModel::Default => LlvmCodeModel::Default,
        CodeModel::Small => LlvmCodeModel::Small,
        CodeModel::Kernel => LlvmCodeModel::Kernel,
        CodeModel::Medium => LlvmCodeModel::Medium,
        CodeModel::Large => LlvmCodeModel::Large,
    }
}

pub fn to_llvm_reloc_mode(model: RelocationModel) -> RelocMode {
    match model {
        RelocationModel::Default => RelocMode::Default,
        RelocationModel::Static => RelocMode::Static,
        RelocationModel::Pic => RelocMode::PIC,
        RelocationModel::DynamicNoPic => RelocMode::DynamicNoPic,
    }
}

pub fn to_llvm_opt_level(level: OptimizationLevel) -> LlvmOptLevel {
    match level {
        OptimizationLevel::None => LlvmOptLevel::None,
        OptimizationLevel::Less => LlvmOptLevel::Less,
        OptimizationLevel::Default => LlvmOptLevel::Default,
        OptimizationLevel::Aggressive => LlvmOptLevel::Aggressive,
    }
}

/// Build a `TargetMachine` for a resolved configuration.
pub fn create_target_machine(config: &CompilerConfig) -> Result<TargetMachine> {
    let handle = config.target().ok_or_else(|| TargetError::Unresolved {
        triple: config.triple().to_string(),
    })?;
    init_targets();

    let unsupported = || TargetError::UnsupportedTriple {
        triple: config.triple().to_string(),
    };
    let target = Target::from_name(handle.name()).ok_or_else(unsupported)?;
    target
        .create_target_machine(
            &TargetTriple::create(config.triple()),
            config.cpu(),
            config.feature_string(),
            to_llvm_opt_level(config.optimization_level()),
            to_llvm_reloc_mode(config.relocation_model()),
            to_llvm_code_model(config.code_model()),
        )
        .ok_or_else(unsupported)
}

/// What LLVM reports back about a constructed machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineInfo {
    pub triple: String,
    pub cpu: String,
    pub features: String,
    pub data_layout: String,
}

pub fn describe_machine(machine: &TargetMachine) -> MachineInfo {
    MachineInfo {
        triple: machine.get_triple().as_str().to_string_lossy().into_owned(),
        cpu: machine.get_cpu().to_string(),
        features: machine.get_feature_string().to_string_lossy().into_owned(),
        data_layout: machine
            .get_target_data()
            .get_data_layout()
            .as_str()
            .to_string_lossy()
            .into_owned(),
    }
}
