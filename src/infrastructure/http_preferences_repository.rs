// HTTP implementation of the preferences backend
use crate::application::preferences_repository::{
    Preferences, PreferencesError, PreferencesRepository,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpPreferencesRepository {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct PreferenceUpdate<'a> {
    key: &'a str,
    value: &'a str,
}

impl HttpPreferencesRepository {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}/preferencias", base_url.trim_end_matches('/')),
        })
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        bearer: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let request = request.header("Accept", "application/json");
        match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, PreferencesError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PreferencesError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}

fn parse_envelope(body: &str) -> Result<ApiEnvelope, PreferencesError> {
    let envelope: ApiEnvelope =
        serde_json::from_str(body).map_err(|e| PreferencesError::Malformed(e.to_string()))?;
    if !envelope.success {
        return Err(PreferencesError::Rejected(
            envelope.message.unwrap_or_else(|| "success=false".to_string()),
        ));
    }
    Ok(envelope)
}

/// `{"success": true, "data": {...}}`. Missing or null `data` means no
/// preferences have been stored yet.
fn parse_fetch_body(body: &str) -> Result<Preferences, PreferencesError> {
    match parse_envelope(body)?.data {
        None | Some(Value::Null) => Ok(Preferences::default()),
        Some(Value::Object(map)) => Ok(Preferences::new(map)),
        Some(other) => Err(PreferencesError::Malformed(format!(
            "expected object for data, got {}",
            other
        ))),
    }
}

fn parse_save_body(body: &str) -> Result<(), PreferencesError> {
    parse_envelope(body).map(|_| ())
}

#[async_trait]
impl PreferencesRepository for HttpPreferencesRepository {
    async fn fetch_preferences(
        &self,
        bearer: Option<&str>,
    ) -> Result<Preferences, PreferencesError> {
        tracing::debug!("Fetching preferences from {}", self.endpoint);
        let request = self.authorized(self.client.get(&self.endpoint), bearer);
        let body = self.execute(request).await?;
        parse_fetch_body(&body)
    }

    async fn save_preference(
        &self,
        bearer: Option<&str>,
        key: &str,
        value: &str,
    ) -> Result<(), PreferencesError> {
        tracing::debug!("Saving preference {}={} to {}", key, value, self.endpoint);
        let request = self
            .authorized(self.client.put(&self.endpoint), bearer)
            .json(&PreferenceUpdate { key, value });
        let body = self.execute(request).await?;
        parse_save_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let repo = HttpPreferencesRepository::new("http://backend/api/v1/", None).unwrap();
        assert_eq!(repo.endpoint, "http://backend/api/v1/preferencias");
    }

    #[test]
    fn test_parse_fetch_body() {
        let prefs = parse_fetch_body(
            r#"{"success": true, "data": {"pagina_principal": "/admin/pacientes", "tema": "claro"}}"#,
        )
        .unwrap();
        assert_eq!(prefs.get_str("pagina_principal"), Some("/admin/pacientes"));

        let empty = parse_fetch_body(r#"{"success": true, "data": null}"#).unwrap();
        assert_eq!(empty.get_str("pagina_principal"), None);
    }

    #[test]
    fn test_parse_fetch_body_failures() {
        assert!(matches!(
            parse_fetch_body(r#"{"success": false, "message": "token expirado"}"#),
            Err(PreferencesError::Rejected(m)) if m == "token expirado"
        ));
        assert!(matches!(
            parse_fetch_body(r#"{"success": true, "data": ["x"]}"#),
            Err(PreferencesError::Malformed(_))
        ));
        assert!(matches!(
            parse_fetch_body("<html>502</html>"),
            Err(PreferencesError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_save_body() {
        assert!(parse_save_body(r#"{"success": true}"#).is_ok());
        assert!(parse_save_body(r#"{"success": false}"#).is_err());
        assert!(parse_save_body("").is_err());
    }

    #[test]
    fn test_update_body_shape() {
        let body = serde_json::to_value(PreferenceUpdate {
            key: "pagina_principal",
            value: "/admin/consultas",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"key": "pagina_principal", "value": "/admin/consultas"})
        );
    }
}
