use std::collections::HashMap;

use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config_manager::stateless_llm::{default_chat_llm, default_translation_llm, StatelessLLMConfig};
use crate::config_manager::system::{ConsoleConfig, SystemConfig};
use crate::config_manager::utils::read_config_text_with;
use crate::error::ConfigurationError;

/// Prefix for environment overrides, e.g. `PROMPT_RELAY__SYSTEM_CONFIG__PORT=9000`
pub const ENV_PREFIX: &str = "PROMPT_RELAY";

/// Credential for the hosted translation model; always wins over the file
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Main configuration shared by both binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "system_config")]
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(rename = "translation_llm")]
    #[serde(default = "default_translation_llm")]
    pub translation_llm: StatelessLLMConfig,

    #[serde(rename = "chat_llm")]
    #[serde(default = "default_chat_llm")]
    pub chat_llm: StatelessLLMConfig,

    #[serde(rename = "console_config")]
    #[serde(default)]
    pub console_config: ConsoleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system_config: SystemConfig::default(),
            translation_llm: default_translation_llm(),
            chat_llm: default_chat_llm(),
            console_config: ConsoleConfig::default(),
        }
    }
}

impl Config {
    /// Load from the first existing candidate file, or defaults when none exists.
    ///
    /// `CONFIG_PATH` is tried first and must exist when set.
    pub fn load() -> Result<Self, ConfigurationError> {
        if let Ok(path) = std::env::var("CONFIG_PATH") {
            return Self::load_from(Some(&path));
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        let mut candidates = vec!["conf.yaml".to_string(), "conf.json".to_string()];
        if let Some(dir) = exe_dir {
            candidates.extend(
                ["conf.yaml", "conf.json"]
                    .iter()
                    .filter_map(|name| dir.join(name).to_str().map(str::to_string)),
            );
        }

        let found = candidates
            .into_iter()
            .find(|path| std::path::Path::new(path).exists());
        if found.is_none() {
            debug!("No configuration file found, using defaults");
        }
        Self::load_from(found.as_deref())
    }

    /// Layer: defaults, then the file (if any), then `PROMPT_RELAY__*` env vars
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigurationError> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Same as [`Config::load_from`], reading variables from `env` instead of the process
    pub fn load_with_env(
        path: Option<&str>,
        env: HashMap<String, String>,
    ) -> Result<Self, ConfigurationError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            let text = read_config_text_with(path, |name| env.get(name).cloned())?;
            builder = builder.add_source(File::from_str(&text, file_format(path)));
            info!("Loaded configuration from: {}", path);
        }

        let groq_api_key = env.get(GROQ_API_KEY_VAR).cloned();

        let mut config: Config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .build()?
            .try_deserialize()?;

        if let Some(key) = groq_api_key {
            config.translation_llm.llm_api_key = Some(key);
        }

        Ok(config)
    }
}

fn file_format(path: &str) -> FileFormat {
    let lower = path.to_lowercase();
    if lower.ends_with(".json") || lower.ends_with(".jsonld") {
        FileFormat::Json
    } else {
        FileFormat::Yaml
    }
}
