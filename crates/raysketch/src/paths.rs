//! Resolves where raysketch looks for its configuration file.
//!
//! `RAYSKETCH_CONFIG_DIR` overrides the platform config directory; an explicit
//! `--config` (or `RAYSKETCH_CONFIG`) bypasses directory lookup entirely.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories_next::ProjectDirs;

pub const ENV_CONFIG_DIR: &str = "RAYSKETCH_CONFIG_DIR";
pub const CONFIG_FILE_NAME: &str = "sketch.toml";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "raysketch";
const APPLICATION: &str = "raysketch";

/// Where the configuration came from; decides how a missing file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Named with `--config` or `RAYSKETCH_CONFIG`; must exist.
    Explicit,
    /// The per-user default location; may be absent.
    Default,
}

#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub origin: ConfigOrigin,
}

impl ConfigLocation {
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self {
                path: path.to_path_buf(),
                origin: ConfigOrigin::Explicit,
            });
        }
        Ok(Self {
            path: config_dir()?.join(CONFIG_FILE_NAME),
            origin: ConfigOrigin::Default,
        })
    }
}

pub fn config_dir() -> Result<PathBuf> {
    if let Some(value) = env_override(ENV_CONFIG_DIR) {
        return Ok(value);
    }
    let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
        .ok_or_else(|| anyhow!("failed to determine user directories"))?;
    Ok(project_dirs.config_dir().to_path_buf())
}

fn env_override(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let location = ConfigLocation::resolve(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(location.path, PathBuf::from("/tmp/custom.toml"));
        assert_eq!(location.origin, ConfigOrigin::Explicit);
    }
}
