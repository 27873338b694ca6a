//! Target triple parsing and architecture classification.
//!
//! A triple has the shape `arch-vendor-os[-environment]`. Parsing never fails:
//! missing components are left empty and an unrecognized architecture maps to
//! [`ArchType::Unknown`]. The input string is never normalized.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte ordering of a target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endianness {
    Little,
    Big,
}

/// Architecture family of a target, following LLVM's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchType {
    Unknown,
    Arm,
    Armeb,
    Aarch64,
    Aarch64Be,
    Aarch64_32,
    Thumb,
    Thumbeb,
    X86,
    X86_64,
    Mips,
    Mipsel,
    Mips64,
    Mips64el,
    Ppc,
    Ppcle,
    Ppc64,
    Ppc64le,
    Riscv32,
    Riscv64,
    Sparc,
    Sparcel,
    Sparcv9,
    SystemZ,
    Wasm32,
    Wasm64,
    Hexagon,
    Bpfel,
    Bpfeb,
    Nvptx,
    Nvptx64,
    Amdgcn,
    R600,
    Avr,
    Msp430,
    Loongarch32,
    Loongarch64,
}

impl ArchType {
    /// Classify the architecture component of a triple.
    pub fn parse(arch: &str) -> Self {
        match arch {
            "i386" | "i486" | "i586" | "i686" | "i786" | "i886" | "i986" | "x86" => ArchType::X86,
            "amd64" | "x86_64" | "x86_64h" => ArchType::X86_64,
            "aarch64" | "arm64" | "arm64e" => ArchType::Aarch64,
            "aarch64_be" => ArchType::Aarch64Be,
            "aarch64_32" | "arm64_32" => ArchType::Aarch64_32,
            "xscale" => ArchType::Arm,
            "xscaleeb" => ArchType::Armeb,
            "mips" | "mipseb" | "mipsallegrex" | "mipsisa32r6" | "mipsr6" => ArchType::Mips,
            "mipsel" | "mipsallegrexel" | "mipsisa32r6el" | "mipsr6el" => ArchType::Mipsel,
            "mips64" | "mips64eb" | "mipsn32" | "mipsisa64r6" | "mips64r6" | "mipsn32r6" => {
                ArchType::Mips64
            }
            "mips64el" | "mipsn32el" | "mipsisa64r6el" | "mips64r6el" | "mipsn32r6el" => {
                ArchType::Mips64el
            }
            "powerpc" | "ppc" | "ppc32" => ArchType::Ppc,
            "powerpcle" | "ppcle" | "ppc32le" => ArchType::Ppcle,
            "powerpc64" | "ppu" | "ppc64" => ArchType::Ppc64,
            "powerpc64le" | "ppc64le" => ArchType::Ppc64le,
            "riscv32" => ArchType::Riscv32,
            "riscv64" => ArchType::Riscv64,
            "sparc" => ArchType::Sparc,
            "sparcel" => ArchType::Sparcel,
            "sparcv9" | "sparc64" => ArchType::Sparcv9,
            "s390x" | "systemz" => ArchType::SystemZ,
            "wasm32" => ArchType::Wasm32,
            "wasm64" => ArchType::Wasm64,
            "hexagon" => ArchType::Hexagon,
            "bpf" | "bpfel" => ArchType::Bpfel,
            "bpfeb" => ArchType::Bpfeb,
            "nvptx" => ArchType::Nvptx,
            "nvptx64" => ArchType::Nvptx64,
            "amdgcn" => ArchType::Amdgcn,
            "r600" => ArchType::R600,
            "avr" => ArchType::Avr,
            "msp430" => ArchType::Msp430,
            "loongarch32" => ArchType::Loongarch32,
            "loongarch64" => ArchType::Loongarch64,
            _ => parse_arm_family(arch),
        }
    }

    /// LLVM's canonical name for the architecture.
    pub fn name(self) -> &'static str {
        match self {
            ArchType::Unknown => "unknown",
            ArchType::Arm => "arm",
            ArchType::Armeb => "armeb",
            ArchType::Aarch64 => "aarch64",
            ArchType::Aarch64Be => "aarch64_be",
            ArchType::Aarch64_32 => "aarch64_32",
            ArchType::Thumb => "thumb",
            ArchType::Thumbeb => "thumbeb",
            ArchType::X86 => "i386",
            ArchType::X86_64 => "x86_64",
            ArchType::Mips => "mips",
            ArchType::Mipsel => "mipsel",
            ArchType::Mips64 => "mips64",
            ArchType::Mips64el => "mips64el",
            ArchType::Ppc => "powerpc",
            ArchType::Ppcle => "powerpcle",
            ArchType::Ppc64 => "powerpc64",
            ArchType::Ppc64le => "powerpc64le",
            ArchType::Riscv32 => "riscv32",
            ArchType::Riscv64 => "riscv64",
            ArchType::Sparc => "sparc",
            ArchType::Sparcel => "sparcel",
            ArchType::Sparcv9 => "sparcv9",
            ArchType::SystemZ => "s390x",
            ArchType::Wasm32 => "wasm32",
            ArchType::Wasm64 => "wasm64",
            ArchType::Hexagon => "hexagon",
            ArchType::Bpfel => "bpfel",
            ArchType::Bpfeb => "bpfeb",
            ArchType::Nvptx => "nvptx",
            ArchType::Nvptx64 => "nvptx64",
            ArchType::Amdgcn => "amdgcn",
            ArchType::R600 => "r600",
            ArchType::Avr => "avr",
            ArchType::Msp430 => "msp430",
            ArchType::Loongarch32 => "loongarch32",
            ArchType::Loongarch64 => "loongarch64",
        }
    }

    /// Pointer width in bits, or `None` for [`ArchType::Unknown`].
    pub fn pointer_width(self) -> Option<u32> {
        match self {
            ArchType::Unknown => None,
            ArchType::Avr | ArchType::Msp430 => Some(16),
            ArchType::Arm
            | ArchType::Armeb
            | ArchType::Aarch64_32
            | ArchType::Thumb
            | ArchType::Thumbeb
            | ArchType::X86
            | ArchType::Mips
            | ArchType::Mipsel
            | ArchType::Ppc
            | ArchType::Ppcle
            | ArchType::Riscv32
            | ArchType::Sparc
            | ArchType::Sparcel
            | ArchType::Wasm32
            | ArchType::Hexagon
            | ArchType::Nvptx
            | ArchType::R600
            | ArchType::Loongarch32 => Some(32),
            ArchType::Aarch64
            | ArchType::Aarch64Be
            | ArchType::X86_64
            | ArchType::Mips64
            | ArchType::Mips64el
            | ArchType::Ppc64
            | ArchType::Ppc64le
            | ArchType::Riscv64
            | ArchType::Sparcv9
            | ArchType::SystemZ
            | ArchType::Wasm64
            | ArchType::Bpfel
            | ArchType::Bpfeb
            | ArchType::Nvptx64
            | ArchType::Amdgcn
            | ArchType::Loongarch64 => Some(64),
        }
    }

    /// Byte ordering, or `None` for [`ArchType::Unknown`].
    pub fn endianness(self) -> Option<Endianness> {
        match self {
            ArchType::Unknown => None,
            ArchType::Armeb
            | ArchType::Aarch64Be
            | ArchType::Thumbeb
            | ArchType::Mips
            | ArchType::Mips64
            | ArchType::Ppc
            | ArchType::Ppc64
            | ArchType::Sparc
            | ArchType::Sparcv9
            | ArchType::SystemZ
            | ArchType::Bpfeb => Some(Endianness::Big),
            _ => Some(Endianness::Little),
        }
    }

    /// Whether this is one of the 32-bit ARM or Thumb variants.
    pub fn is_arm(self) -> bool {
        matches!(
            self,
            ArchType::Arm | ArchType::Armeb | ArchType::Thumb | ArchType::Thumbeb
        )
    }
}

impl fmt::Display for ArchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Versioned ARM spellings such as `armv7a`, `armebv7`, `thumbv7em` or `armv8eb`.
fn parse_arm_family(arch: &str) -> ArchType {
    let (rest, little, big) = if let Some(rest) = arch.strip_prefix("thumb") {
        (rest, ArchType::Thumb, ArchType::Thumbeb)
    } else if let Some(rest) = arch.strip_prefix("arm") {
        (rest, ArchType::Arm, ArchType::Armeb)
    } else {
        return ArchType::Unknown;
    };

    let (rest, big_endian) = match rest.strip_prefix("eb") {
        Some(r) => (r, true),
        None => match rest.strip_suffix("eb") {
            Some(r) => (r, true),
            None => (rest, false),
        },
    };

    // Anything left must be a version suffix: "v" followed by a digit.
    if !rest.is_empty() {
        let mut chars = rest.chars();
        if chars.next() != Some('v') || !chars.next().is_some_and(|c| c.is_ascii_digit()) {
            return ArchType::Unknown;
        }
    }

    if big_endian {
        big
    } else {
        little
    }
}

/// A target triple split into its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// Architecture family parsed from the first component.
    pub arch: ArchType,
    /// Architecture component exactly as written (e.g. "armv7a").
    pub arch_name: String,
    /// Vendor component (e.g. "unknown", "apple", "none").
    pub vendor: String,
    /// Operating system component (e.g. "linux", "darwin").
    pub os: String,
    /// Environment/ABI component, if present (e.g. "gnu", "androideabi").
    pub environment: Option<String>,
}

impl Triple {
    /// Split a triple into components. Never fails.
    ///
    /// Three-component triples whose last part names an environment keep it in
    /// `os`; only a fourth component populates `environment`. Anything past the
    /// fourth dash stays part of the environment.
    pub fn parse(triple: &str) -> Self {
        let mut parts = triple.splitn(4, '-');
        let arch_name = parts.next().unwrap_or_default().to_string();
        let vendor = parts.next().unwrap_or_default().to_string();
        let os = parts.next().unwrap_or_default().to_string();
        let environment = parts.next().map(str::to_string);
        Self {
            arch: ArchType::parse(&arch_name),
            arch_name,
            vendor,
            os,
            environment,
        }
    }
}

/// Architecture family of a triple string.
pub fn arch_of(triple: &str) -> ArchType {
    let arch = triple.split('-').next().unwrap_or_default();
    ArchType::parse(arch)
}
