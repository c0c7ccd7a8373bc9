use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults shared by the rc files and the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub compact: bool,
    pub plain: bool,
    pub perf: bool,
    pub catalog: Option<PathBuf>,
    pub custom_emojis: Option<PathBuf>,
    pub limit: Option<usize>,
}

impl ConfigFlags {
    /// Merge two flag sets; options in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            compact: self.compact || other.compact,
            plain: self.plain || other.plain,
            perf: self.perf || other.perf,
            catalog: other.catalog.clone().or_else(|| self.catalog.clone()),
            custom_emojis: other
                .custom_emojis
                .clone()
                .or_else(|| self.custom_emojis.clone()),
            limit: other.limit.or(self.limit),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("chatmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("chatmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("chatmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("chatmark")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".chatmarkrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    tracing::debug!(path = %path.display(), tokens = tokens.len(), "loaded config");
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# chatmark defaults (saved with --save)".to_string());
    if flags.compact {
        lines.push("--compact".to_string());
    }
    if flags.plain {
        lines.push("--plain".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.catalog {
        lines.push(format!("--catalog {}", path.display()));
    }
    if let Some(path) = &flags.custom_emojis {
        lines.push(format!("--custom-emojis {}", path.display()));
    }
    if let Some(limit) = flags.limit {
        lines.push(format!("--limit {limit}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this module knows out of a token list.
///
/// Unknown tokens (positional arguments, one-shot flags like `--search`)
/// are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--compact" {
            flags.compact = true;
        } else if token == "--plain" {
            flags.plain = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--catalog" {
            if let Some(next) = tokens.get(i + 1) {
                flags.catalog = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--catalog=") {
            flags.catalog = Some(PathBuf::from(value));
        } else if token == "--custom-emojis" {
            if let Some(next) = tokens.get(i + 1) {
                flags.custom_emojis = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--custom-emojis=") {
            flags.custom_emojis = Some(PathBuf::from(value));
        } else if token == "--limit" {
            if let Some(next) = tokens.get(i + 1) {
                flags.limit = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--limit=") {
            flags.limit = value.parse().ok();
        }
        i += 1;
    }
    flags
}
