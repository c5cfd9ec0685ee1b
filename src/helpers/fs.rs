//! File System Utilities
//!
//! Configuration and data directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "secrets-gui", "secrets-gui").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/secrets-gui/` or `$XDG_CONFIG_HOME/secrets-gui/`
/// - **macOS**: `~/Library/Application Support/dev.secrets-gui.secrets-gui/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\secrets-gui\secrets-gui\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Get the data directory for logs and key material
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/secrets-gui/`
/// - **macOS**: `~/Library/Application Support/dev.secrets-gui.secrets-gui/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\secrets-gui\secrets-gui\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let data_dir = project_dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

/// Create `path` with `contents`, readable and writable by the owner only.
///
/// Fails if `path` already exists. On Unix the file never exists with a
/// wider mode than 0600.
pub fn create_private_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}

/// Replace `path` with `contents` through a private sibling temp file and a
/// rename, so readers see either the old or the new file.
pub fn replace_private_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    // Left over from an interrupted write
    if tmp.exists() {
        fs::remove_file(&tmp)?;
    }

    create_private_file(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
