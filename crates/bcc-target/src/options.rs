//! Code generation knobs handed to the backend: code model, optimization
//! level, relocation model and the pass-through `TargetOptions` bag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// Addressing range the generated code and data may assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeModel {
    /// Let the backend choose.
    #[default]
    Default,
    Small,
    Kernel,
    Medium,
    Large,
}

/// Backend optimization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationLevel {
    /// -O0
    None,
    /// -O1
    Less,
    /// -O2
    #[default]
    Default,
    /// -O3
    Aggressive,
}

/// Whether generated code must be position independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelocationModel {
    /// Let the backend choose.
    #[default]
    Default,
    Static,
    Pic,
    DynamicNoPic,
}

/// Floating point ABI selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FloatAbi {
    #[default]
    Default,
    Soft,
    Hard,
}

/// Backend tuning flags carried alongside a configuration.
///
/// Nothing in this crate interprets these; they are handed to the code
/// generation pipeline as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TargetOptions {
    pub float_abi: FloatAbi,
    pub no_frame_pointer_elim: bool,
    pub unsafe_fp_math: bool,
    pub no_infs_fp_math: bool,
    pub no_nans_fp_math: bool,
    pub use_init_array: bool,
    pub function_sections: bool,
    pub data_sections: bool,
    pub emulated_tls: bool,
}

impl CodeModel {
    pub fn as_str(self) -> &'static str {
        match self {
            CodeModel::Default => "default",
            CodeModel::Small => "small",
            CodeModel::Kernel => "kernel",
            CodeModel::Medium => "medium",
            CodeModel::Large => "large",
        }
    }
}

impl OptimizationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizationLevel::None => "none",
            OptimizationLevel::Less => "less",
            OptimizationLevel::Default => "default",
            OptimizationLevel::Aggressive => "aggressive",
        }
    }

    /// The numeric `-O` level this corresponds to.
    pub fn as_number(self) -> u8 {
        match self {
            OptimizationLevel::None => 0,
            OptimizationLevel::Less => 1,
            OptimizationLevel::Default => 2,
            OptimizationLevel::Aggressive => 3,
        }
    }
}

impl RelocationModel {
    pub fn as_str(self) -> &'static str {
        match self {
            RelocationModel::Default => "default",
            RelocationModel::Static => "static",
            RelocationModel::Pic => "pic",
            RelocationModel::DynamicNoPic => "dynamic-no-pic",
        }
    }
}

impl FromStr for CodeModel {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(CodeModel::Default),
            "small" => Ok(CodeModel::Small),
            "kernel" => Ok(CodeModel::Kernel),
            "medium" => Ok(CodeModel::Medium),
            "large" => Ok(CodeModel::Large),
            _ => Err(TargetError::InvalidValue {
                field: "code model",
                value: s.into(),
            }),
        }
    }
}

impl FromStr for OptimizationLevel {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "none" => Ok(OptimizationLevel::None),
            "1" | "less" => Ok(OptimizationLevel::Less),
            "2" | "default" => Ok(OptimizationLevel::Default),
            "3" | "aggressive" => Ok(OptimizationLevel::Aggressive),
            _ => Err(TargetError::InvalidValue {
                field: "optimization level",
                value: s.into(),
            }),
        }
    }
}

impl FromStr for RelocationModel {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(RelocationModel::Default),
            "static" => Ok(RelocationModel::Static),
            "pic" => Ok(RelocationModel::Pic),
            "dynamic-no-pic" | "dynamic_no_pic" => Ok(RelocationModel::DynamicNoPic),
            _ => Err(TargetError::InvalidValue {
                field: "relocation model",
                value: s.into(),
            }),
        }
    }
}

impl fmt::Display for CodeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RelocationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(CodeModel::default(), CodeModel::Default);
        assert_eq!(OptimizationLevel::default(), OptimizationLevel::Default);
        assert_eq!(RelocationModel::default(), RelocationModel::Default);
        assert_eq!(TargetOptions::default().float_abi, FloatAbi::Default);
    }

    #[test]
    fn opt_level_accepts_numbers_and_names() {
        assert_eq!("0".parse::<OptimizationLevel>().unwrap(), OptimizationLevel::None);
        assert_eq!("3".parse::<OptimizationLevel>().unwrap(), OptimizationLevel::Aggressive);
        assert_eq!("Less".parse::<OptimizationLevel>().unwrap(), OptimizationLevel::Less);
        assert_eq!(OptimizationLevel::Default.as_number(), 2);
    }

    #[test]
    fn reloc_spellings() {
        assert_eq!("pic".parse::<RelocationModel>().unwrap(), RelocationModel::Pic);
        assert_eq!(
            "dynamic-no-pic".parse::<RelocationModel>().unwrap(),
            RelocationModel::DynamicNoPic
        );
        assert_eq!(RelocationModel::DynamicNoPic.to_string(), "dynamic-no-pic");
    }

    #[test]
    fn rejects_unknown_values() {
        let err = "huge".parse::<CodeModel>().unwrap_err();
        assert!(matches!(err, TargetError::InvalidValue { field: "code model", .. }));
        assert!("4".parse::<OptimizationLevel>().is_err());
        assert!("pie".parse::<RelocationModel>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for model in [
            CodeModel::Default,
            CodeModel::Small,
            CodeModel::Kernel,
            CodeModel::Medium,
            CodeModel::Large,
        ] {
            assert_eq!(model.to_string().parse::<CodeModel>().unwrap(), model);
        }
    }
}
