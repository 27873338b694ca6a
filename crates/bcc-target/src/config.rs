//! Compiler configuration for one compilation job.
//!
//! A [`CompilerConfig`] is built in two phases. [`CompilerConfig::new`] stores
//! the triple and never fails. [`CompilerConfig::initialize`] then resolves the
//! backend target through a [`TargetRegistry`] and classifies the
//! architecture. Only the second phase can fail, so a driver can construct the
//! config unconditionally and report an unsupported triple cleanly.

use crate::defaults::ArchDefaults;
use crate::error::{Result, TargetError};
use crate::features::{has_toggle_prefix, join_features};
use crate::options::{CodeModel, OptimizationLevel, RelocationModel, TargetOptions};
use crate::registry::{TargetHandle, TargetRegistry};
use crate::triple::{arch_of, ArchType};

/// Target parameters consumed by the code generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    triple: String,
    cpu: String,
    target_options: TargetOptions,
    code_model: CodeModel,
    optimization_level: OptimizationLevel,
    relocation_model: RelocationModel,
    feature_string: String,
    target: Option<TargetHandle>,
    arch: Option<ArchType>,
}

impl CompilerConfig {
    /// Create an unresolved configuration for `triple` with backend defaults.
    pub fn new(triple: impl Into<String>) -> Self {
        Self {
            triple: triple.into(),
            cpu: String::new(),
            target_options: TargetOptions::default(),
            code_model: CodeModel::Default,
            optimization_level: OptimizationLevel::Default,
            relocation_model: RelocationModel::Default,
            feature_string: String::new(),
            target: None,
            arch: None,
        }
    }

    /// Resolve the backend target and architecture for the triple.
    ///
    /// The architecture is recorded even when the lookup fails. On failure the
    /// resolved target is unset, including one left by an earlier successful
    /// call, and no other field changes.
    pub fn initialize<R>(&mut self, registry: &R) -> Result<&TargetHandle>
    where
        R: TargetRegistry + ?Sized,
    {
        let arch = arch_of(&self.triple);
        self.arch = Some(arch);
        self.target = None;

        let handle = registry
            .lookup(&self.triple)
            .ok_or_else(|| TargetError::UnsupportedTriple {
                triple: self.triple.clone(),
            })?;

        log::debug!(
            "resolved triple '{}' to target '{}' (arch {arch})",
            self.triple,
            handle.name()
        );
        let handle: &TargetHandle = self.target.insert(handle);
        Ok(handle)
    }

    /// Whether `initialize` has resolved a backend target.
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }

    /// Fill in architecture-specific defaults for knobs the caller left unset.
    ///
    /// Features apply only when the feature string is empty; the relocation
    /// model only when it is still `Default`. Does nothing before `initialize`.
    pub fn apply_arch_defaults(&mut self) {
        let Some(arch) = self.arch else {
            return;
        };
        let defaults = ArchDefaults::for_arch(arch);

        if self.feature_string.is_empty() && !defaults.features.is_empty() {
            log::debug!("applying {arch} default features {:?}", defaults.features);
            self.feature_string = join_features(&defaults.features);
        }
        if let Some(reloc) = defaults.relocation_model {
            if self.relocation_model == RelocationModel::Default {
                log::debug!("applying {arch} default relocation model {reloc}");
                self.relocation_model = reloc;
            }
        }
    }

    pub fn triple(&self) -> &str {
        &self.triple
    }

    /// Target CPU name; empty selects the triple's default CPU.
    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    pub fn set_cpu(&mut self, cpu: impl Into<String>) {
        self.cpu = cpu.into();
    }

    pub fn target_options(&self) -> &TargetOptions {
        &self.target_options
    }

    pub fn target_options_mut(&mut self) -> &mut TargetOptions {
        &mut self.target_options
    }

    pub fn code_model(&self) -> CodeModel {
        self.code_model
    }

    pub fn set_code_model(&mut self, code_model: CodeModel) {
        self.code_model = code_model;
    }

    pub fn optimization_level(&self) -> OptimizationLevel {
        self.optimization_level
    }

    pub fn set_optimization_level(&mut self, level: OptimizationLevel) {
        self.optimization_level = level;
    }

    pub fn relocation_model(&self) -> RelocationModel {
        self.relocation_model
    }

    pub fn set_relocation_model(&mut self, model: RelocationModel) {
        self.relocation_model = model;
    }

    pub fn feature_string(&self) -> &str {
        &self.feature_string
    }

    /// Replace the feature string with `features` joined by commas.
    ///
    /// Entries are expected to carry a `+` or `-` prefix already. They are
    /// stored as given; unprefixed entries only produce a warning.
    pub fn set_features<I, S>(&mut self, features: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let features: Vec<S> = features.into_iter().collect();
        for feature in &features {
            if !has_toggle_prefix(feature.as_ref()) {
                log::warn!(
                    "target feature '{}' has no '+' or '-' prefix",
                    feature.as_ref()
                );
            }
        }
        self.feature_string = join_features(&features);
    }

    /// Resolved backend target, set by a successful `initialize`.
    pub fn target(&self) -> Option<&TargetHandle> {
        self.target.as_ref()
    }

    /// Architecture family of the triple, set by `initialize`.
    pub fn arch(&self) -> Option<ArchType> {
        self.arch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FloatAbi;
    use crate::registry::BuiltinRegistry;

    #[test]
    fn new_uses_backend_defaults() {
        let config = CompilerConfig::new("x86_64-unknown-linux");
        assert_eq!(config.triple(), "x86_64-unknown-linux");
        assert_eq!(config.cpu(), "");
        assert_eq!(config.feature_string(), "");
        assert_eq!(config.code_model(), CodeModel::Default);
        assert_eq!(config.optimization_level(), OptimizationLevel::Default);
        assert_eq!(config.relocation_model(), RelocationModel::Default);
        assert_eq!(config.target_options(), &TargetOptions::default());
        assert!(config.target().is_none());
        assert!(config.arch().is_none());
    }

    #[test]
    fn triple_is_not_normalized() {
        let config = CompilerConfig::new("ARMv7-None-Linux");
        assert_eq!(config.triple(), "ARMv7-None-Linux");
    }

    #[test]
    fn initialize_known_triple() {
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        let handle = config.initialize(&BuiltinRegistry::new()).unwrap();
        assert_eq!(handle.name(), "arm");
        assert!(config.is_resolved());
        assert_eq!(config.arch(), Some(ArchType::Arm));
    }

    #[test]
    fn initialize_unknown_triple() {
        let mut config = CompilerConfig::new("bogus-unknown-unknown");
        config.set_cpu("generic");
        config.set_features(["+a"]);
        let before = config.clone();

        let err = config.initialize(&BuiltinRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            TargetError::UnsupportedTriple { ref triple } if triple == "bogus-unknown-unknown"
        ));
        assert_eq!(err.to_string(), "unsupported target triple 'bogus-unknown-unknown'");

        assert!(config.target().is_none());
        assert_eq!(config.arch(), Some(ArchType::Unknown));
        assert_eq!(config.cpu(), before.cpu());
        assert_eq!(config.feature_string(), before.feature_string());
        assert_eq!(config.code_model(), before.code_model());
        assert_eq!(config.relocation_model(), before.relocation_model());
        assert_eq!(config.optimization_level(), before.optimization_level());
    }

    #[test]
    fn arch_is_recorded_when_backend_is_missing() {
        let registry = BuiltinRegistry::only(&[ArchType::X86_64]);
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        assert!(config.initialize(&registry).is_err());
        assert!(config.target().is_none());
        assert_eq!(config.arch(), Some(ArchType::Arm));
    }

    #[test]
    fn failed_reinitialize_clears_previous_target() {
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        config.initialize(&BuiltinRegistry::new()).unwrap();
        assert!(config.is_resolved());

        let err = config
            .initialize(&BuiltinRegistry::only(&[ArchType::X86_64]))
            .unwrap_err();
        assert!(matches!(err, TargetError::UnsupportedTriple { .. }));
        assert!(config.target().is_none());
        assert!(!config.is_resolved());
        assert_eq!(config.arch(), Some(ArchType::Arm));
    }

    #[test]
    fn initialize_through_trait_object() {
        let registry = BuiltinRegistry::new();
        let dynamic: &dyn TargetRegistry = &registry;
        let mut config = CompilerConfig::new("aarch64-linux-android");
        config.initialize(dynamic).unwrap();
        assert_eq!(config.target().unwrap().name(), "aarch64");
    }

    #[test]
    fn feature_list_is_joined() {
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        config.set_features(["+neon", "-vfp"]);
        assert_eq!(config.feature_string(), "+neon,-vfp");
    }

    #[test]
    fn empty_feature_list_replaces_previous() {
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        config.set_features(vec!["+neon".to_string()]);
        config.set_features(Vec::<String>::new());
        assert_eq!(config.feature_string(), "");
    }

    #[test]
    fn unprefixed_features_pass_through() {
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        config.set_features(["neon", "+vfp3"]);
        assert_eq!(config.feature_string(), "neon,+vfp3");
    }

    #[test]
    fn setters_are_idempotent_and_independent() {
        let mut once = CompilerConfig::new("x86_64-unknown-linux");
        once.set_cpu("haswell");
        once.set_code_model(CodeModel::Small);
        once.set_optimization_level(OptimizationLevel::Aggressive);
        once.set_relocation_model(RelocationModel::Pic);

        let mut twice = once.clone();
        twice.set_cpu("haswell");
        twice.set_code_model(CodeModel::Small);
        twice.set_optimization_level(OptimizationLevel::Aggressive);
        twice.set_relocation_model(RelocationModel::Pic);
        assert_eq!(once, twice);

        let mut only_cpu = CompilerConfig::new("x86_64-unknown-linux");
        only_cpu.set_cpu("haswell");
        assert_eq!(only_cpu.code_model(), CodeModel::Default);
        assert_eq!(only_cpu.optimization_level(), OptimizationLevel::Default);
        assert_eq!(only_cpu.relocation_model(), RelocationModel::Default);
        assert_eq!(only_cpu.feature_string(), "");
    }

    #[test]
    fn target_options_are_mutable_in_place() {
        let mut config = CompilerConfig::new("armv7-none-linux-gnueabihf");
        config.target_options_mut().float_abi = FloatAbi::Hard;
        config.target_options_mut().data_sections = true;
        assert_eq!(config.target_options().float_abi, FloatAbi::Hard);
        assert!(config.target_options().data_sections);
    }

    #[test]
    fn arch_defaults_for_arm() {
        let mut config = CompilerConfig::new("armv7a-none-linux-gnueabi");
        config.initialize(&BuiltinRegistry::new()).unwrap();
        config.apply_arch_defaults();
        assert_eq!(config.feature_string(), "+vfp3,+neon");
    }

    #[test]
    fn arch_defaults_keep_explicit_choices() {
        let mut config = CompilerConfig::new("mipsel-linux-android");
        config.set_relocation_model(RelocationModel::Pic);
        config.initialize(&BuiltinRegistry::new()).unwrap();
        config.apply_arch_defaults();
        assert_eq!(config.relocation_model(), RelocationModel::Pic);

        let mut config = CompilerConfig::new("arm-linux-androideabi");
        config.set_features(["-neon"]);
        config.initialize(&BuiltinRegistry::new()).unwrap();
        config.apply_arch_defaults();
        assert_eq!(config.feature_string(), "-neon");
    }

    #[test]
    fn arch_defaults_for_mips() {
        let mut config = CompilerConfig::new("mipsel-linux-android");
        config.initialize(&BuiltinRegistry::new()).unwrap();
        config.apply_arch_defaults();
        assert_eq!(config.relocation_model(), RelocationModel::Static);
    }

    #[test]
    fn arch_defaults_before_initialize_do_nothing() {
        let mut config = CompilerConfig::new("arm-linux-androideabi");
        let before = config.clone();
        config.apply_arch_defaults();
        assert_eq!(config, before);
    }
}
