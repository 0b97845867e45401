use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the upstream monitoring API.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    #[serde(default = "default_dashboard_secs")]
    pub dashboard_secs: u64,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    /// The designated installation whose alerts feed the global digest.
    /// The digest deliberately tracks one site, not the active selection.
    #[serde(default = "default_notification_source")]
    pub source_installation: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            dashboard_secs: default_dashboard_secs(),
            notification_secs: default_notification_secs(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            source_installation: default_notification_source(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_dashboard_secs() -> u64 {
    15
}

fn default_notification_secs() -> u64 {
    30
}

fn default_notification_source() -> String {
    "INST_001".to_string()
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
