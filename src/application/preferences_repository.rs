// Repository trait for the per-user preferences backend
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Server-side preference map for the authenticated user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    values: Map<String, Value>,
}

impl Preferences {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// String value stored under `key`; non-string values count as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("preferences request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("preferences backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed preferences response: {0}")]
    Malformed(String),
    #[error("preferences backend reported failure: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Fetch the caller's preference map. `bearer` is the caller's session token.
    async fn fetch_preferences(
        &self,
        bearer: Option<&str>,
    ) -> Result<Preferences, PreferencesError>;

    /// Store a single key/value pair for the caller.
    async fn save_preference(
        &self,
        bearer: Option<&str>,
        key: &str,
        value: &str,
    ) -> Result<(), PreferencesError>;
}
