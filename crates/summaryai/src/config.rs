use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use summaryai_core::gemini::{DEFAULT_HOST, DEFAULT_MODEL};

/// Shown when no API key can be found in any layer.
pub const MISSING_KEY_MESSAGE: &str =
    "API Key not set. Please run `summaryai config set-key <KEY>` or export SUMMARYAI_API_KEY.";

/// Configuration consulted at the start of every invocation.
pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Result<Option<String>, GenerateError>;

    fn endpoint(&self) -> Result<Endpoint, GenerateError>;
}

/// Model location and request limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line or through the environment. They win
/// over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Effective settings after merging overrides, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub host: String,
    pub timeout: Option<Duration>,
}

/// Default location: `<config dir>/summaryai/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs_next::config_dir()
        .ok_or_eyre("Unable to determine configuration directory")?
        .join("summaryai");

    Ok(config_dir.join("config.toml"))
}

/// Read the config file. A missing file is an empty config.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| eyre!("Failed to read config file '{}': {}", path.display(), e))?;

    toml::from_str(&raw)
        .map_err(|e| eyre!("Failed to parse config file '{}': {}", path.display(), e))
}

pub fn save_file(path: &Path, config: &FileConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
    }

    let raw = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, raw)
        .map_err(|e| eyre!("Failed to write config file '{}': {}", path.display(), e))?;

    // The file holds a secret
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .context("Failed to restrict config file permissions")?;
    }

    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if key.chars().count() <= 4 {
        "*".repeat(key.chars().count())
    } else {
        format!("****{visible}")
    }
}

/// Overrides layered on top of the config file. The file is re-read on every
/// lookup so edits take effect without restarting anything.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    path: PathBuf,
    overrides: Overrides,
}

impl LayeredConfig {
    pub fn new(path: PathBuf, overrides: Overrides) -> Self {
        Self { path, overrides }
    }

    /// Build from the global CLI flags.
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let path = match &global.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };

        Ok(Self::new(
            path,
            Overrides {
                api_key: global.api_key.clone(),
                model: global.model.clone(),
                host: global.host.clone(),
                timeout_secs: global.timeout,
            },
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> Result<Settings> {
        let file = load_file(&self.path)?;

        Ok(Settings {
            api_key: non_empty(self.overrides.api_key.clone()).or(non_empty(file.api_key)),
            model: non_empty(self.overrides.model.clone())
                .or(non_empty(file.model))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: non_empty(self.overrides.host.clone())
                .or(non_empty(file.host))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            timeout: self
                .overrides
                .timeout_secs
                .or(file.timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}

impl ConfigProvider for LayeredConfig {
    fn api_key(&self) -> Result<Option<String>, GenerateError> {
        if let Some(key) = non_empty(self.overrides.api_key.clone()) {
            return Ok(Some(key));
        }

        let file =
            load_file(&self.path).map_err(|e| GenerateError::Configuration(e.to_string()))?;
        Ok(non_empty(file.api_key))
    }

    fn endpoint(&self) -> Result<Endpoint, GenerateError> {
        let settings = self
            .settings()
            .map_err(|e| GenerateError::Configuration(e.to_string()))?;

        Ok(Endpoint {
            host: settings.host,
            model: settings.model,
            timeout: settings.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "api_key = ");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn test_save_then_load_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = FileConfig {
            api_key: Some("key-1234".to_string()),
            model: Some("gemini-pro".to_string()),
            host: None,
            timeout_secs: Some(30),
        };

        save_file(&path, &config).unwrap();
        assert_eq!(load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_api_key_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "api_key = \"from-file\"\n");
        let config = LayeredConfig::new(path, Overrides::default());

        assert_eq!(config.api_key().unwrap(), Some("from-file".to_string()));
    }

    #[test]
    fn test_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "api_key = \"from-file\"\n");
        let config = LayeredConfig::new(
            path,
            Overrides {
                api_key: Some("from-flag".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(config.api_key().unwrap(), Some("from-flag".to_string()));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "api_key = \"   \"\n");
        let config = LayeredConfig::new(
            path,
            Overrides {
                api_key: Some(String::new()),
                ..Default::default()
            },
        );

        assert_eq!(config.api_key().unwrap(), None);
    }

    #[test]
    fn test_api_key_is_reread_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "");
        let config = LayeredConfig::new(path.clone(), Overrides::default());
        assert_eq!(config.api_key().unwrap(), None);

        fs::write(&path, "api_key = \"added-later\"\n").unwrap();
        assert_eq!(config.api_key().unwrap(), Some("added-later".to_string()));
    }

    #[test]
    fn test_broken_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[[[");
        let config = LayeredConfig::new(path, Overrides::default());

        assert!(matches!(
            config.api_key(),
            Err(GenerateError::Configuration(_))
        ));
    }

    #[test]
    fn test_broken_file_fails_endpoint_as_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "timeout_secs = \"soon\"\n");
        let config = LayeredConfig::new(path, Overrides::default());

        let err = config.endpoint().unwrap_err();
        assert!(matches!(err, GenerateError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_endpoint_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "model = \"file-model\"\ntimeout_secs = 5\n");
        let config = LayeredConfig::new(path, Overrides::default());

        assert_eq!(
            config.endpoint().unwrap(),
            Endpoint {
                host: DEFAULT_HOST.to_string(),
                model: "file-model".to_string(),
                timeout: Some(Duration::from_secs(5)),
            }
        );
    }

    #[test]
    fn test_settings_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LayeredConfig::new(dir.path().join("config.toml"), Overrides::default());

        let settings = config.settings().unwrap();
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn test_settings_merge_layers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "model = \"file-model\"\nhost = \"file.host\"\ntimeout_secs = 10\n",
        );
        let config = LayeredConfig::new(
            path,
            Overrides {
                host: Some("flag.host".to_string()),
                ..Default::default()
            },
        );

        let settings = config.settings().unwrap();
        assert_eq!(settings.model, "file-model");
        assert_eq!(settings.host, "flag.host");
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "timeout_secs = 0\n");
        let config = LayeredConfig::new(path, Overrides::default());

        assert_eq!(config.settings().unwrap().timeout, None);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("AIzaSyExample1234"), "****1234");
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key(""), "");
    }
}
