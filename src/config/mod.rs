mod company;

pub use company::{Company, Config, SlipSettings};

use crate::error::{PayslipError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.payslip/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "payslip") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.payslip/
    let home = dirs_home().ok_or_else(|| {
        PayslipError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".payslip"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output directory; relative paths are taken
/// relative to the config directory.
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        return Err(PayslipError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(PayslipError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| PayslipError::ConfigParse { path, source: e })?;

    if config.slip.workers == 0 {
        return Err(PayslipError::InvalidWorkerCount);
    }
    Ok(config)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Company identity printed under the slip title
[company]
name = "24X7 Moneyworks Consulting Private Limited"
address = [
  "Registered Office: 205-206, Corner Point, Jetalpur Road",
  "Development Location: 509, Midtown Complex, Jetalpur Road",
  "Vadodara-390007",
]

[slip]
# Local path or http(s) URL; remove to print slips without a logo
# logo = "~/.payslip/logo.png"
output_dir = "output"   # relative to this directory, or absolute / ~/...
workers = 4
logo_timeout_secs = 10
"#;
