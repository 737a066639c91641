// Home route service - Use case for choosing a user's landing page
use crate::application::preferences_repository::PreferencesRepository;
use crate::application::route_cache::RouteCache;
use crate::domain::home::{HomeOption, HomeRouteTable};
use crate::domain::role::{Role, User};
use std::sync::Arc;

/// Why a resolution ended on the role default instead of a stored preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    MissingIdentity,
    FetchFailed(String),
    NoPreference,
    NotAllowed(String),
}

pub type FallbackObserver = Arc<dyn Fn(Option<i64>, &FallbackReason) + Send + Sync>;

#[derive(Clone)]
pub struct HomeRouteService {
    repository: Arc<dyn PreferencesRepository>,
    cache: Arc<dyn RouteCache>,
    table: Arc<HomeRouteTable>,
    preference_key: String,
    observer: Option<FallbackObserver>,
}

impl HomeRouteService {
    pub fn new(
        repository: Arc<dyn PreferencesRepository>,
        cache: Arc<dyn RouteCache>,
        table: HomeRouteTable,
        preference_key: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            table: Arc::new(table),
            preference_key: preference_key.into(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: FallbackObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn allowed_homes_for_role(&self, role: Option<Role>) -> &[HomeOption] {
        self.table.allowed_homes_for_role(role)
    }

    pub fn default_home_for_role(&self, role: Option<Role>) -> &str {
        self.table.default_home_for_role(role)
    }

    /// Landing route for `user`. Never fails: any problem reading the stored
    /// preference degrades to the role default, which is cached like a hit.
    pub async fn preferred_home_route(&self, user: Option<&User>, bearer: Option<&str>) -> String {
        let role = user.and_then(|u| u.role);
        let Some(user_id) = user.and_then(|u| u.id) else {
            self.report(None, FallbackReason::MissingIdentity);
            return self.default_home_for_role(role).to_string();
        };

        if let Some(route) = self.cache.get(user_id) {
            tracing::debug!("Home route cache hit for user {}: {}", user_id, route);
            return route;
        }

        let route = match self.repository.fetch_preferences(bearer).await {
            Ok(preferences) => match preferences.get_str(&self.preference_key) {
                Some(stored) if self.table.is_allowed(role, stored) => stored.to_string(),
                Some(stored) => {
                    self.report(Some(user_id), FallbackReason::NotAllowed(stored.to_string()));
                    self.default_home_for_role(role).to_string()
                }
                None => {
                    self.report(Some(user_id), FallbackReason::NoPreference);
                    self.default_home_for_role(role).to_string()
                }
            },
            Err(e) => {
                self.report(Some(user_id), FallbackReason::FetchFailed(e.to_string()));
                self.default_home_for_role(role).to_string()
            }
        };

        self.cache.insert(user_id, route.clone());
        route
    }

    /// Persist `route` as the caller's landing page. Returns `false` on any
    /// failure, including a route outside the caller's allow-list, which is
    /// never sent. A successful save replaces the caller's cached route.
    pub async fn set_preferred_home_route(
        &self,
        user: Option<&User>,
        bearer: Option<&str>,
        route: &str,
    ) -> bool {
        let role = user.and_then(|u| u.role);
        if !self.table.is_allowed(role, route) {
            tracing::warn!("Refusing home route {} for role {:?}", route, role);
            return false;
        }

        match self
            .repository
            .save_preference(bearer, &self.preference_key, route)
            .await
        {
            Ok(()) => {
                if let Some(user_id) = user.and_then(|u| u.id) {
                    self.cache.insert(user_id, route.to_string());
                }
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save home route {}: {}", route, e);
                false
            }
        }
    }

    fn report(&self, user_id: Option<i64>, reason: FallbackReason) {
        match &reason {
            FallbackReason::FetchFailed(error) => {
                tracing::warn!("Falling back to default home for user {:?}: {}", user_id, error)
            }
            FallbackReason::NotAllowed(route) => {
                tracing::debug!("Stored home {} not allowed for user {:?}", route, user_id)
            }
            _ => tracing::debug!("Default home for user {:?}: {:?}", user_id, reason),
        }
        if let Some(observer) = &self.observer {
            observer(user_id, &reason);
        }
    }
}
