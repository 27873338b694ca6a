//! Per-architecture tuning applied when the caller left a knob unset.

use crate::options::RelocationModel;
use crate::triple::ArchType;

/// Defaults the compiler prefers for an architecture family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchDefaults {
    /// Feature toggles used when no features were configured.
    pub features: Vec<&'static str>,
    /// Relocation model used when the configured one is `Default`.
    pub relocation_model: Option<RelocationModel>,
}

impl ArchDefaults {
    /// Defaults for an architecture family.
    ///
    /// Every 32-bit ARM and Thumb triple gets `+vfp3,+neon`, whatever the
    /// sub-architecture. Cores without NEON (e.g. `thumbv6m`, `armv5te`) must
    /// set their features explicitly or skip arch defaults.
    pub fn for_arch(arch: ArchType) -> Self {
        match arch {
            arch if arch.is_arm() => Self {
                features: vec!["+vfp3", "+neon"],
                relocation_model: None,
            },
            ArchType::Mips | ArchType::Mipsel => Self {
                features: Vec::new(),
                relocation_model: Some(RelocationModel::Static),
            },
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.relocation_model.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_gets_fpu_features() {
        let d = ArchDefaults::for_arch(ArchType::Arm);
        assert_eq!(d.features, vec!["+vfp3", "+neon"]);
        assert!(d.relocation_model.is_none());
        assert_eq!(ArchDefaults::for_arch(ArchType::Thumb), d);
    }

    #[test]
    fn sub_architecture_does_not_narrow_arm_defaults() {
        let v6m = ArchDefaults::for_arch(crate::triple::arch_of("thumbv6m-none-eabi"));
        let v5te = ArchDefaults::for_arch(crate::triple::arch_of("armv5te-none-eabi"));
        assert_eq!(v6m.features, vec!["+vfp3", "+neon"]);
        assert_eq!(v5te.features, vec!["+vfp3", "+neon"]);
    }

    #[test]
    fn mips_is_static() {
        let d = ArchDefaults::for_arch(ArchType::Mipsel);
        assert_eq!(d.relocation_model, Some(RelocationModel::Static));
        assert!(d.features.is_empty());
    }

    #[test]
    fn others_are_empty() {
        assert!(ArchDefaults::for_arch(ArchType::X86_64).is_empty());
        assert!(ArchDefaults::for_arch(ArchType::Unknown).is_empty());
    }
}
