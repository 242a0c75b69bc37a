use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_engine::games::tictactoe::GameSettings;

pub const DEFAULT_CONFIG_FILE: &str = "tictactoe_config.yaml";
const MAX_BOT_DELAY_MS: u64 = 5000;

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub game: GameSettings,
    /// Pause before each bot move so the reply does not appear instantly.
    pub bot_delay_ms: u64,
    pub seed: Option<u64>,
    pub use_log_prefix: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms must not exceed {}",
                MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            bot_delay_ms: 300,
            seed: None,
            use_log_prefix: false,
        }
    }
}
