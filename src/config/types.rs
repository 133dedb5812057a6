use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote user API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://5e510330f2c0d300147c034c.mockapi.io/").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the user list, relative to `base_url`.
    #[serde(default = "default_users_path")]
    pub users_path: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Screen behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw tick in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How long an error notification stays on screen.
    #[serde(default = "default_toast_millis")]
    pub toast_millis: u64,
    /// Stop the screen lifecycle while the terminal window is unfocused.
    #[serde(default = "default_pause_on_focus_loss")]
    pub pause_on_focus_loss: bool,
    /// Bound of the intent queue.
    #[serde(default = "default_intent_capacity")]
    pub intent_capacity: usize,
    /// Broadcast buffer for state emissions per subscriber.
    #[serde(default = "default_state_buffer")]
    pub state_buffer: usize,
}

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; defaults to `<cache_dir>/mvi-users/mvi-users.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://5e510330f2c0d300147c034c.mockapi.io/".to_string()
}

fn default_users_path() -> String {
    "users".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_toast_millis() -> u64 {
    3500
}

fn default_pause_on_focus_loss() -> bool {
    true
}

fn default_intent_capacity() -> usize {
    16
}

fn default_state_buffer() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            users_path: default_users_path(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            toast_millis: default_toast_millis(),
            pause_on_focus_loss: default_pause_on_focus_loss(),
            intent_capacity: default_intent_capacity(),
            state_buffer: default_state_buffer(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_millis)
    }
}

impl LoggingConfig {
    /// Resolved log file path.
    pub fn file_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            let cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
            cache_dir.join("mvi-users").join("mvi-users.log")
        })
    }
}
