/// Application configuration
///
/// Read once at startup and handed to the engine by reference; nothing in
/// the core mutates it

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name of the optional config file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Tunables for the engine and the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Longest habit name the shell accepts
    pub max_habit_name_length: usize,
    /// How long error/success notices stay visible, in milliseconds
    pub notice_delay_ms: u64,
    /// Earliest date the cursor may move to
    pub min_date: NaiveDate,
    /// BCP 47 locale tag, e.g. `en-US`
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_habit_name_length: 30,
            notice_delay_ms: 3000,
            min_date: default_min_date(),
            locale: system_locale(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`
    ///
    /// A missing file gives the defaults. A file that exists but does not
    /// parse is logged and also gives the defaults.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Ignoring malformed config file {}: {}", path.display(), e);
                Ok(Self::default())
            }
        }
    }

    /// Default config file location for a given data directory
    pub fn default_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.notice_delay_ms)
    }
}

fn default_min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Locale from `LANG` (`en_US.UTF-8` becomes `en-US`), or `en-US`
fn system_locale() -> String {
    std::env::var("LANG")
        .ok()
        .and_then(|lang| locale_from_lang(&lang))
        .unwrap_or_else(|| "en-US".to_string())
}

fn locale_from_lang(lang: &str) -> Option<String> {
    let tag = lang.split('.').next()?.trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}
