//! Config file location.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Application directory name under the config root.
const APP_DIR: &str = "whatmovie";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - `{dir}/config.toml` when `--dir` is given.
/// - `$XDG_CONFIG_HOME/whatmovie/config.toml` when that variable is set.
/// - `~/.config/whatmovie/config.toml` otherwise.
///
/// # Errors
///
/// Returns an error if neither `--dir`, `XDG_CONFIG_HOME` nor `HOME` is available.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir,
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Resolves the config file path from explicit inputs.
fn config_path_from(
    dir: Option<&PathBuf>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let root = match (xdg_config_home.filter(|v| !v.is_empty()), home) {
        (Some(xdg), _) => PathBuf::from(xdg),
        (None, Some(home)) => PathBuf::from(home).join(".config"),
        (None, None) => bail!("HOME environment variable is not set; pass --dir"),
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_dir_wins() {
        // Arrange
        let dir = PathBuf::from("/srv/whatmovie");

        // Act
        let path = config_path_from(
            Some(&dir),
            Some(OsString::from("/xdg")),
            Some(OsString::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/whatmovie/config.toml"));
    }

    #[test]
    fn test_xdg_config_home() {
        // Arrange & Act
        let path = config_path_from(
            None,
            Some(OsString::from("/xdg")),
            Some(OsString::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/whatmovie/config.toml"));
    }

    #[test]
    fn test_home_fallback_ignores_empty_xdg() {
        // Arrange & Act
        let path = config_path_from(
            None,
            Some(OsString::new()),
            Some(OsString::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/user/.config/whatmovie/config.toml"));
    }

    #[test]
    fn test_no_home_is_error() {
        // Arrange & Act
        let result = config_path_from(None, None, None);

        // Assert
        assert!(result.is_err());
    }
}
