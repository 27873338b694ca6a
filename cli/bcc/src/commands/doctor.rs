//! `bcc doctor` — toolchain diagnostics.

use std::path::Path;

use anyhow::Result;

use bcc_target::{CompilerConfig, TargetRegistry};

use super::target::registry;
use crate::manifest;

/// Print toolchain diagnostic information.
pub fn run(cwd: &Path, triple: Option<&str>) -> Result<()> {
    println!("=== bcc doctor ===");
    println!();

    println!("bcc version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Backend ---");
    println!(
        "  LLVM target machines: {}",
        if bcc_target::LLVM_AVAILABLE {
            "available"
        } else {
            "not compiled (rebuild with --features llvm)"
        }
    );
    let registry = registry();
    println!("  Registered targets:   {}", registry.targets().len());
    println!();

    println!("--- Configuration ---");
    match manifest::find_and_load(cwd) {
        Ok(Some((file, dir))) => {
            println!("  bcc.toml: found at {}", dir.display());
            println!("  Triple:   {}", file.triple);
            report_triple(registry.as_ref(), &file.triple);
        }
        Ok(None) => println!("  bcc.toml: not found"),
        Err(e) => println!("  bcc.toml: error: {e:#}"),
    }

    if let Some(triple) = triple {
        println!();
        println!("--- Target: {triple} ---");
        report_triple(registry.as_ref(), triple);
    }

    Ok(())
}

fn report_triple(registry: &dyn TargetRegistry, triple: &str) {
    let mut config = CompilerConfig::new(triple);
    match config.initialize(registry) {
        Ok(handle) => println!("  Backend:  {}", handle.name()),
        Err(e) => println!("  Backend:  {e}"),
    }
    if let Some(arch) = config.arch() {
        println!("  Arch:     {arch}");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        super::run(dir.path(), Some("bogus-unknown-unknown")).unwrap();
    }

    #[test]
    fn doctor_reports_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(bcc_target::CONFIG_FILE_NAME),
            "triple = \"aarch64-linux-android\"\n",
        )
        .unwrap();
        super::run(dir.path(), None).unwrap();
    }
}
