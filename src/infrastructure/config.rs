use crate::domain::home::HomeRouteTable;
use crate::domain::navigation::ProtectedRoute;
use serde::Deserialize;

pub const DEFAULT_PREFERENCE_KEY: &str = "pagina_principal";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub preferences: PreferencesSettings,
    #[serde(default)]
    pub home: HomeRouteTable,
    #[serde(default)]
    pub navigation: NavigationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferencesSettings {
    pub base_url: String,
    #[serde(default = "default_preference_key")]
    pub key: String,
    /// Request timeout; the HTTP client default applies when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_preference_key() -> String {
    DEFAULT_PREFERENCE_KEY.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationSettings {
    #[serde(default = "default_login_route")]
    pub login_route: String,
    #[serde(default)]
    pub protected: Vec<ProtectedRoute>,
}

fn default_login_route() -> String {
    "/login".to_string()
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            login_route: default_login_route(),
            protected: Vec::new(),
        }
    }
}

/// Load `config/femimed.*` (optional) with `FEMIMED_*` environment overrides,
/// e.g. `FEMIMED_PREFERENCES__BASE_URL`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/femimed").required(false))
        .add_source(
            config::Environment::with_prefix("FEMIMED")
                .separator("__")
                .try_parsing(true),
        );

    build_config(builder)
}

fn build_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.home.validate()?;

    Ok(app_config)
}
