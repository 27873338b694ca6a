//! `bcc target` — backend listing, triple inspection and configuration resolution.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use bcc_target::{
    arch_of, config_to_toml, generate_template, validate_features, CodeModel,
    CompilerConfig, ConfigFile, OptimizationLevel, RelocationModel, TargetRegistry, Triple,
    CONFIG_FILE_NAME,
};

use crate::manifest;

/// Flags accepted by `bcc target resolve`.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub config: Option<PathBuf>,
    pub triple: Option<String>,
    pub cpu: Option<String>,
    /// Comma-separated feature toggles, e.g. "+neon,-vfp".
    pub features: Option<String>,
    pub opt_level: Option<String>,
    pub code_model: Option<String>,
    pub reloc: Option<String>,
    pub no_arch_defaults: bool,
    pub format: Option<String>,
}

/// Machine-readable view of a resolved configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedSummary {
    pub triple: String,
    pub arch: String,
    pub pointer_width: Option<u32>,
    pub target: Option<String>,
    pub target_description: Option<String>,
    pub cpu: String,
    pub features: String,
    pub code_model: CodeModel,
    pub optimization_level: OptimizationLevel,
    pub relocation_model: RelocationModel,
}

impl ResolvedSummary {
    pub fn from_config(config: &CompilerConfig) -> Self {
        let arch = config.arch().unwrap_or_else(|| arch_of(config.triple()));
        Self {
            triple: config.triple().to_string(),
            arch: arch.name().to_string(),
            pointer_width: arch.pointer_width(),
            target: config.target().map(|t| t.name().to_string()),
            target_description: config.target().map(|t| t.description().to_string()),
            cpu: config.cpu().to_string(),
            features: config.feature_string().to_string(),
            code_model: config.code_model(),
            optimization_level: config.optimization_level(),
            relocation_model: config.relocation_model(),
        }
    }
}

/// The registry this build resolves against.
pub fn registry() -> Box<dyn TargetRegistry> {
    #[cfg(feature = "llvm")]
    {
        Box::new(bcc_target::llvm::LlvmRegistry::new())
    }
    #[cfg(not(feature = "llvm"))]
    {
        Box::new(bcc_target::BuiltinRegistry::new())
    }
}

/// List every backend target the registry can resolve.
pub fn list() -> Result<()> {
    println!("Registered targets:");
    println!();
    for (name, description) in registry().targets() {
        println!("  {name:<14} {description}");
    }
    println!();
    println!("Use 'bcc target arch <triple>' to classify a triple.");
    Ok(())
}

/// Print how a triple is classified, and whether a backend exists for it.
pub fn arch(triple: &str) -> Result<()> {
    let parsed = Triple::parse(triple);
    println!("Triple:       {triple}");
    println!("Architecture: {}", parsed.arch);
    match parsed.arch.pointer_width() {
        Some(width) => println!("Pointer:      {width} bits"),
        None => println!("Pointer:      unknown"),
    }
    match parsed.arch.endianness() {
        Some(endianness) => println!("Endianness:   {endianness:?}"),
        None => println!("Endianness:   unknown"),
    }
    println!("Vendor:       {}", or_dash(&parsed.vendor));
    println!("OS:           {}", or_dash(&parsed.os));
    println!(
        "Environment:  {}",
        parsed.environment.as_deref().map_or("-", or_dash)
    );
    match registry().lookup(triple) {
        Some(handle) => println!("Backend:      {} ({})", handle.name(), handle.description()),
        None => println!("Backend:      none registered"),
    }
    Ok(())
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Build, initialize and print a configuration.
pub fn resolve(cwd: &Path, options: &ResolveOptions) -> Result<()> {
    let registry = registry();
    let config = resolve_config(cwd, options, registry.as_ref())?;
    let output = render(&config, options.format.as_deref())?;
    print!("{output}");
    Ok(())
}

/// Assemble a configuration from a config file and flag overrides, then resolve it.
pub fn resolve_config(
    cwd: &Path,
    options: &ResolveOptions,
    registry: &dyn TargetRegistry,
) -> Result<CompilerConfig> {
    let mut file = base_file(cwd, options)?;

    if let Some(cpu) = &options.cpu {
        file.cpu = cpu.clone();
    }
    if let Some(features) = &options.features {
        file.features = features
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(level) = &options.opt_level {
        file.optimization_level = level.parse()?;
    }
    if let Some(model) = &options.code_model {
        file.code_model = model.parse()?;
    }
    if let Some(model) = &options.reloc {
        file.relocation_model = model.parse()?;
    }

    if let Err(issues) = validate_features(&file.features) {
        let details: Vec<String> = issues.into_iter().map(|i| i.message).collect();
        bail!("invalid target features: {}", details.join("; "));
    }

    let mut config = file.into_config();
    config.initialize(registry)?;
    if !options.no_arch_defaults {
        config.apply_arch_defaults();
    }
    Ok(config)
}

/// Pick the starting point: an explicit file, a bare triple, or a discovered `bcc.toml`.
fn base_file(cwd: &Path, options: &ResolveOptions) -> Result<ConfigFile> {
    let mut file = if let Some(path) = &options.config {
        Some(manifest::load(path)?)
    } else if options.triple.is_some() {
        None
    } else {
        match manifest::find_and_load(cwd)? {
            Some((file, dir)) => {
                log::debug!("using {} from {}", CONFIG_FILE_NAME, dir.display());
                Some(file)
            }
            None => None,
        }
    };

    if let Some(triple) = &options.triple {
        let base = file
            .get_or_insert_with(|| ConfigFile::from_config(&CompilerConfig::new(triple.as_str())));
        base.triple = triple.clone();
    }

    file.context("no target triple given; pass --triple or create a bcc.toml")
}

/// Render a resolved configuration as text, TOML or JSON.
pub fn render(config: &CompilerConfig, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("text") {
        "text" => Ok(render_text(config)),
        "toml" => Ok(config_to_toml(&ConfigFile::from_config(config))?),
        "json" => {
            let summary = ResolvedSummary::from_config(config);
            Ok(serde_json::to_string_pretty(&summary)? + "\n")
        }
        other => bail!("unknown format '{other}' (expected text, toml or json)"),
    }
}

fn render_text(config: &CompilerConfig) -> String {
    let summary = ResolvedSummary::from_config(config);
    let mut out = String::new();
    out.push_str(&format!("=== Target: {} ===\n", summary.triple));
    out.push_str(&format!(
        "  Backend:      {}\n",
        summary.target.as_deref().unwrap_or("unresolved")
    ));
    out.push_str(&format!("  Architecture: {}\n", summary.arch));
    out.push_str(&format!("  CPU:          {}\n", or_dash(&summary.cpu)));
    out.push_str(&format!("  Features:     {}\n", or_dash(&summary.features)));
    out.push_str(&format!("  Code model:   {}\n", summary.code_model));
    out.push_str(&format!(
        "  Opt level:    {} (-O{})\n",
        summary.optimization_level,
        summary.optimization_level.as_number()
    ));
    out.push_str(&format!("  Relocation:   {}\n", summary.relocation_model));

    #[cfg(feature = "llvm")]
    if let Ok(machine) = bcc_target::llvm::create_target_machine(config) {
        let info = bcc_target::llvm::describe_machine(&machine);
        out.push_str(&format!("  Data layout:  {}\n", info.data_layout));
    }

    out
}

/// Write a starter `bcc.toml`.
pub fn template(cwd: &Path, triple: Option<&str>, output: Option<&Path>) -> Result<()> {
    let triple = triple.unwrap_or("x86_64-unknown-linux-gnu");
    let contents = generate_template(triple)?;
    let path = output.map_or_else(|| cwd.join(CONFIG_FILE_NAME), Path::to_path_buf);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
