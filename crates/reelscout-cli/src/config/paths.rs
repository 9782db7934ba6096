//! Config file location.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolves the config file path.
///
/// `--dir` wins; otherwise `$XDG_CONFIG_HOME/reelscout/config.toml`, falling
/// back to `~/.config/reelscout/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE_NAME));
    }

    let base = config_home(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
    .context("neither XDG_CONFIG_HOME nor HOME is set")?;
    Ok(base.join("reelscout").join(CONFIG_FILE_NAME))
}

/// Base config directory; a relative `XDG_CONFIG_HOME` is ignored.
fn config_home(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg_config_home
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".config")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/srv/reelscout");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/reelscout/config.toml"));
    }

    #[test]
    fn test_config_home_prefers_xdg() {
        // Arrange & Act
        let base = config_home(Some(PathBuf::from("/xdg/cfg")), Some(PathBuf::from("/home/u")));

        // Assert
        assert_eq!(base, Some(PathBuf::from("/xdg/cfg")));
    }

    #[test]
    fn test_config_home_falls_back_to_home() {
        // Arrange & Act
        let base = config_home(Some(PathBuf::new()), Some(PathBuf::from("/home/u")));

        // Assert
        assert_eq!(base, Some(PathBuf::from("/home/u/.config")));
    }

    #[test]
    fn test_config_home_without_env() {
        // Arrange & Act & Assert
        assert_eq!(config_home(None, None), None);
    }
}
