use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{env_subst::substitute_env, schema::HeraldConfig};

/// Config file names looked up during discovery, in order.
const CONFIG_FILENAMES: &[&str] = &["herald.toml", "herald.yaml", "herald.yml", "herald.json"];

/// Load, env-substitute, parse and validate the config at `path`.
pub fn load_config(path: &Path) -> anyhow::Result<HeraldConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    let value = parse_config_value(&raw, path)?;
    let config: HeraldConfig = serde_json::from_value(value)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
    debug!(path = %path.display(), outputs = config.outputs.len(), "loaded config");
    Ok(config)
}

/// Load `path` if given, otherwise the first config found in the standard
/// locations.
pub fn discover_and_load(path: Option<&Path>) -> anyhow::Result<(PathBuf, HeraldConfig)> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config_file().ok_or_else(|| {
            anyhow::anyhow!(
                "no config file found (looked for {} in . and {})",
                CONFIG_FILENAMES.join(", "),
                config_dir()
                    .map_or_else(|| String::from("<no config dir>"), |d| d.display().to_string())
            )
        })?,
    };
    let config = load_config(&path)?;
    Ok((path, config))
}

/// First existing config file, checking the working directory and then
/// the user config dir (`~/.config/herald/` on Linux).
pub fn find_config_file() -> Option<PathBuf> {
    find_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_in(&dir)))
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// The user-global config directory.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "herald").map(|d| d.config_dir().to_path_buf())
}

fn parse_config_value(raw: &str, path: &Path) -> anyhow::Result<serde_json::Value> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => {
            let v: toml::Value = toml::from_str(raw)?;
            Ok(serde_json::to_value(v)?)
        },
        "yaml" | "yml" => {
            let v: serde_yaml::Value = serde_yaml::from_str(raw)?;
            Ok(serde_json::to_value(v)?)
        },
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
