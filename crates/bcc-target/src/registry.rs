//! Backend target registry.
//!
//! A registry maps a triple to the backend target that generates code for it.
//! Handles returned from a lookup only name the registry entry; the entry
//! itself stays owned by the registry for the life of the process.

use crate::triple::{arch_of, ArchType};

/// A registered backend target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Backend name (e.g. "x86-64", "arm").
    pub name: &'static str,
    /// Short human-readable description.
    pub description: &'static str,
    /// Architecture family the target generates code for.
    pub arch: ArchType,
}

/// Non-owning reference to a registry entry, produced by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHandle {
    name: String,
    description: String,
    triple: String,
}

impl TargetHandle {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        triple: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            triple: triple.into(),
        }
    }

    /// Registry key of the backend target.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Triple the handle was resolved for.
    pub fn triple(&self) -> &str {
        &self.triple
    }
}

/// A source of backend targets keyed by triple.
pub trait TargetRegistry {
    /// Find the target that generates code for `triple`.
    fn lookup(&self, triple: &str) -> Option<TargetHandle>;

    /// Names and descriptions of every target this registry can resolve.
    fn targets(&self) -> Vec<(String, String)>;
}

/// Targets LLVM ships backends for, one entry per architecture family.
#[rustfmt::skip]
static BUILTIN_TARGETS: &[TargetDescriptor] = &[
    TargetDescriptor { name: "aarch64", description: "AArch64 (little endian)", arch: ArchType::Aarch64 },
    TargetDescriptor { name: "aarch64_be", description: "AArch64 (big endian)", arch: ArchType::Aarch64Be },
    TargetDescriptor { name: "aarch64_32", description: "AArch64 (little endian ILP32)", arch: ArchType::Aarch64_32 },
    TargetDescriptor { name: "arm", description: "ARM", arch: ArchType::Arm },
    TargetDescriptor { name: "armeb", description: "ARM (big endian)", arch: ArchType::Armeb },
    TargetDescriptor { name: "thumb", description: "Thumb", arch: ArchType::Thumb },
    TargetDescriptor { name: "thumbeb", description: "Thumb (big endian)", arch: ArchType::Thumbeb },
    TargetDescriptor { name: "x86", description: "32-bit X86: Pentium-Pro and above", arch: ArchType::X86 },
    TargetDescriptor { name: "x86-64", description: "64-bit X86: EM64T and AMD64", arch: ArchType::X86_64 },
    TargetDescriptor { name: "mips", description: "MIPS (32-bit big endian)", arch: ArchType::Mips },
    TargetDescriptor { name: "mipsel", description: "MIPS (32-bit little endian)", arch: ArchType::Mipsel },
    TargetDescriptor { name: "mips64", description: "MIPS (64-bit big endian)", arch: ArchType::Mips64 },
    TargetDescriptor { name: "mips64el", description: "MIPS (64-bit little endian)", arch: ArchType::Mips64el },
    TargetDescriptor { name: "ppc32", description: "PowerPC 32", arch: ArchType::Ppc },
    TargetDescriptor { name: "ppc32le", description: "PowerPC 32 LE", arch: ArchType::Ppcle },
    TargetDescriptor { name: "ppc64", description: "PowerPC 64", arch: ArchType::Ppc64 },
    TargetDescriptor { name: "ppc64le", description: "PowerPC 64 LE", arch: ArchType::Ppc64le },
    TargetDescriptor { name: "riscv32", description: "32-bit RISC-V", arch: ArchType::Riscv32 },
    TargetDescriptor { name: "riscv64", description: "64-bit RISC-V", arch: ArchType::Riscv64 },
    TargetDescriptor { name: "sparc", description: "Sparc", arch: ArchType::Sparc },
    TargetDescriptor { name: "sparcel", description: "Sparc LE", arch: ArchType::Sparcel },
    TargetDescriptor { name: "sparcv9", description: "Sparc V9", arch: ArchType::Sparcv9 },
    TargetDescriptor { name: "systemz", description: "SystemZ", arch: ArchType::SystemZ },
    TargetDescriptor { name: "wasm32", description: "WebAssembly 32-bit", arch: ArchType::Wasm32 },
    TargetDescriptor { name: "wasm64", description: "WebAssembly 64-bit", arch: ArchType::Wasm64 },
    TargetDescriptor { name: "hexagon", description: "Hexagon", arch: ArchType::Hexagon },
    TargetDescriptor { name: "bpfel", description: "BPF (little endian)", arch: ArchType::Bpfel },
    TargetDescriptor { name: "bpfeb", description: "BPF (big endian)", arch: ArchType::Bpfeb },
    TargetDescriptor { name: "nvptx", description: "NVIDIA PTX 32-bit", arch: ArchType::Nvptx },
    TargetDescriptor { name: "nvptx64", description: "NVIDIA PTX 64-bit", arch: ArchType::Nvptx64 },
    TargetDescriptor { name: "amdgcn", description: "AMD GCN GPUs", arch: ArchType::Amdgcn },
    TargetDescriptor { name: "r600", description: "AMD GPUs HD2XXX-HD6XXX", arch: ArchType::R600 },
    TargetDescriptor { name: "avr", description: "Atmel AVR Microcontroller", arch: ArchType::Avr },
    TargetDescriptor { name: "msp430", description: "MSP430 [experimental]", arch: ArchType::Msp430 },
    TargetDescriptor { name: "loongarch32", description: "32-bit LoongArch", arch: ArchType::Loongarch32 },
    TargetDescriptor { name: "loongarch64", description: "64-bit LoongArch", arch: ArchType::Loongarch64 },
];

/// Registry backed by a static table of LLVM's backend targets.
///
/// Lookup classifies the triple's architecture and returns the target for that
/// family, the same way LLVM's registry matches on the parsed arch.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    targets: Vec<&'static TargetDescriptor>,
}

impl BuiltinRegistry {
    /// A registry with every backend linked in.
    pub fn new() -> Self {
        Self {
            targets: BUILTIN_TARGETS.iter().collect(),
        }
    }

    /// A registry with only the backends for `arches` linked in.
    pub fn only(arches: &[ArchType]) -> Self {
        Self {
            targets: BUILTIN_TARGETS
                .iter()
                .filter(|t| arches.contains(&t.arch))
                .collect(),
        }
    }

    /// The descriptor a handle refers to, if it came from this registry.
    pub fn descriptor(&self, handle: &TargetHandle) -> Option<&'static TargetDescriptor> {
        self.targets
            .iter()
            .find(|t| t.name == handle.name())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetRegistry for BuiltinRegistry {
    fn lookup(&self, triple: &str) -> Option<TargetHandle> {
        let arch = arch_of(triple);
        if arch == ArchType::Unknown {
            return None;
        }
        self.targets
            .iter()
            .find(|t| t.arch == arch)
            .map(|t| TargetHandle::new(t.name, t.description, triple))
    }

    fn targets(&self) -> Vec<(String, String)> {
        self.targets
            .iter()
            .map(|t| (t.name.to_string(), t.description.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_arch_has_a_target() {
        let registry = BuiltinRegistry::new();
        for triple in [
            "x86_64-unknown-linux-gnu",
            "i686-pc-linux-gnu",
            "arm-linux-androideabi",
            "armv7a-none-linux-gnueabi",
            "aarch64-linux-android",
            "mipsel-linux-android",
            "riscv64-unknown-elf",
            "wasm32-unknown-unknown",
        ] {
            assert!(registry.lookup(triple).is_some(), "{triple}");
        }
    }

    #[test]
    fn lookup_names_the_backend() {
        let registry = BuiltinRegistry::new();
        let handle = registry.lookup("x86_64-unknown-linux").unwrap();
        assert_eq!(handle.name(), "x86-64");
        assert_eq!(handle.triple(), "x86_64-unknown-linux");
        assert_eq!(registry.descriptor(&handle).unwrap().arch, ArchType::X86_64);
    }

    #[test]
    fn unknown_arch_does_not_resolve() {
        let registry = BuiltinRegistry::new();
        assert!(registry.lookup("bogus-unknown-unknown").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn subset_registry_rejects_unlinked_backends() {
        let registry = BuiltinRegistry::only(&[ArchType::Arm, ArchType::Thumb]);
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("arm-linux-androideabi").is_some());
        assert!(registry.lookup("thumbv7-linux-androideabi").is_some());
        assert!(registry.lookup("x86_64-unknown-linux-gnu").is_none());
    }

    #[test]
    fn descriptor_from_foreign_handle() {
        let registry = BuiltinRegistry::only(&[ArchType::X86]);
        let handle = TargetHandle::new("arm", "ARM", "arm-linux-androideabi");
        assert!(registry.descriptor(&handle).is_none());
    }

    #[test]
    fn registry_through_reference() {
        let registry = BuiltinRegistry::new();
        let by_ref: &dyn TargetRegistry = &registry;
        assert!(by_ref.lookup("aarch64-linux-gnu").is_some());
        assert_eq!(by_ref.targets().len(), registry.len());
    }

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<_> = BUILTIN_TARGETS.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TARGETS.len());
    }
}
