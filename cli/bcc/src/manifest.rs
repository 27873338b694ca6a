//! Discovery of `bcc.toml` config files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bcc_target::{parse_config_toml, ConfigFile, CONFIG_FILE_NAME};

/// Search `start_dir` and its ancestors for a `bcc.toml`.
///
/// Returns the parsed file and the directory it was found in.
pub fn find_and_load(start_dir: &Path) -> Result<Option<(ConfigFile, PathBuf)>> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            let content = std::fs::read_to_string(&candidate)
                .with_context(|| format!("reading {}", candidate.display()))?;
            let file = parse_config_toml(&content)
                .with_context(|| format!("parsing {}", candidate.display()))?;
            return Ok(Some((file, dir)));
        }
        if !dir.pop() {
            break;
        }
    }
    Ok(None)
}

/// Load an explicitly named config file.
pub fn load(path: &Path) -> Result<ConfigFile> {
    bcc_target::load_config_toml(path).with_context(|| format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "triple = \"arm-linux-androideabi\"\n",
        )
        .unwrap();

        let (file, found_dir) = find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(file.triple, "arm-linux-androideabi");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn find_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "triple = \"x86_64-unknown-linux-gnu\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (file, found_dir) = find_and_load(&nested).unwrap().unwrap();
        assert_eq!(file.triple, "x86_64-unknown-linux-gnu");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "triple = [").unwrap();
        let err = find_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("missing.toml")).is_err());
    }
}
