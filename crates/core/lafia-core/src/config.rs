//! Configuration management and environment variable loading

use crate::{LafiaError, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delay before a bot reply is shown, matching the widget's "thinking" pause
pub const DEFAULT_REPLY_DELAY_MS: u64 = 500;

/// Load environment variables from a .env file
///
/// Looks in the current directory and its parents and returns the file that
/// was loaded. A missing file is `Ok(None)`; a file that fails to parse is an
/// error. Nothing is logged, so this can run before logging is set up.
///
/// # Example
///
/// ```no_run
/// use lafia_core::load_env;
///
/// let loaded = load_env().ok().flatten();
/// let key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
/// ```
pub fn load_env() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::LineParse(line, pos)) => Err(LafiaError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => Ok(None),
        Err(e) => Err(LafiaError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(_) => {
            tracing::info!("Loaded environment from: {}", path.as_ref().display());
            Ok(())
        }
        Err(e) => Err(LafiaError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))),
    }
}

/// Get environment variable, treating blank values as unset
pub fn get_optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get environment variable as boolean
pub fn get_env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Presentation-independent chat behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Pause between resolution and showing the bot reply
    pub reply_delay: Duration,
    /// Show a removable "typing" bubble while a resolution is outstanding
    pub typing_indicator: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            typing_indicator: true,
        }
    }
}

impl ChatConfig {
    /// Read `LAFIA_REPLY_DELAY_MS` and `LAFIA_TYPING_INDICATOR`
    pub fn from_env() -> Self {
        Self {
            reply_delay: Duration::from_millis(get_env_int(
                "LAFIA_REPLY_DELAY_MS",
                DEFAULT_REPLY_DELAY_MS,
            )),
            typing_indicator: get_env_bool("LAFIA_TYPING_INDICATOR", true),
        }
    }

    /// No delay, no placeholder
    pub fn immediate() -> Self {
        Self {
            reply_delay: Duration::ZERO,
            typing_indicator: false,
        }
    }
}
