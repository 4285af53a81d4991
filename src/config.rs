use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diff::DiffAlgorithm;
use crate::error::{DocError, Result};

/// Default directory name for doccheck settings.
const DOCCHECK_DIR: &str = ".doccheck";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";

/// Default chat-completion endpoint for compliance analysis.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";
/// Default model requested from the endpoint.
pub const DEFAULT_MODEL: &str = "deepseek-reasoner";
/// Characters of contract and regulation text embedded in a prompt.
pub const DEFAULT_MAX_CHARS: usize = 30_000;

/// Configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tool was invoked from.
    pub project_root: PathBuf,
    /// Path to the `.doccheck/` directory.
    pub doccheck_dir: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .doccheck/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Compliance endpoint configuration.
    pub compliance: ComplianceSettings,
    /// Alignment configuration.
    pub diff: DiffSettings,
    /// Highlight markup configuration.
    pub render: RenderSettings,
}

/// Settings for the chat-completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceSettings {
    /// Chat-completion URL.
    pub endpoint: String,
    /// Model name sent in the request body.
    pub model: String,
    /// Sampling temperature sent in the request body.
    pub temperature: f64,
    /// Truncation limit (in characters) for contract and regulation text.
    pub max_chars: usize,
    /// Request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            temperature: 0.2,
            max_chars: DEFAULT_MAX_CHARS,
            timeout_secs: 0,
        }
    }
}

/// Alignment settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    /// Opcode generator: "ratcliff" (default), "myers" or "patience".
    pub algorithm: DiffAlgorithm,
}

/// Highlight markup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Background color of deleted or replaced text in the old view.
    pub delete_color: String,
    /// Background color of inserted or replaced text in the new view.
    pub insert_color: String,
    /// Font family of the whitespace-preserving wrapper block.
    pub font_family: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            delete_color: "#ffcccc".into(),
            insert_color: "#ccffcc".into(),
            font_family: "SimSun".into(),
        }
    }
}

impl Config {
    /// Create config for a given root directory.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let doccheck_dir = project_root.join(DOCCHECK_DIR);
        let config_path = doccheck_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            project_root,
            doccheck_dir,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| DocError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Resolve a user-supplied path against the invocation directory.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.project_root.join(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, content: &str) {
        let dir = tmp.path().join(".doccheck");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), content).unwrap();
    }

    #[test]
    fn config_new_sets_paths() {
        let cfg = Config::new("/tmp/work");
        assert_eq!(cfg.project_root, PathBuf::from("/tmp/work"));
        assert_eq!(cfg.doccheck_dir, PathBuf::from("/tmp/work/.doccheck"));
        assert_eq!(
            cfg.config_path,
            PathBuf::from("/tmp/work/.doccheck/config.toml")
        );
    }

    #[test]
    fn default_settings() {
        let settings = UserSettings::default();

        assert_eq!(settings.compliance.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.compliance.model, "deepseek-reasoner");
        assert!((settings.compliance.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(settings.compliance.max_chars, 30_000);
        assert_eq!(settings.compliance.timeout_secs, 0);

        assert_eq!(settings.diff.algorithm, DiffAlgorithm::Ratcliff);

        assert_eq!(settings.render.delete_color, "#ffcccc");
        assert_eq!(settings.render.insert_color, "#ccffcc");
        assert_eq!(settings.render.font_family, "SimSun");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        write_config(
            &tmp,
            "[compliance]\nmodel = \"deepseek-chat\"\n\n[diff]\nalgorithm = \"patience\"\n",
        );

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.compliance.model, "deepseek-chat");
        assert_eq!(cfg.settings.compliance.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.settings.diff.algorithm, DiffAlgorithm::Patience);
        assert_eq!(cfg.settings.render.font_family, "SimSun");
    }

    #[test]
    fn load_invalid_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "invalid toml {{{{");

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.compliance.max_chars, 30_000);
        assert_eq!(cfg.settings.diff.algorithm, DiffAlgorithm::Ratcliff);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = Config::new(tmp.path());
        assert!(!cfg.config_path.exists());
        assert_eq!(cfg.settings.render.delete_color, "#ffcccc");
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let cfg = Config::new("/tmp/work");
        assert_eq!(cfg.resolve("a.txt"), PathBuf::from("/tmp/work/a.txt"));
        assert_eq!(cfg.resolve("/etc/b.txt"), PathBuf::from("/etc/b.txt"));
    }
}
