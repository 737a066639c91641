// Navigation guards - Root redirect and per-page access checks
use crate::application::home_route_service::HomeRouteService;
use crate::domain::navigation::{match_rule, GuardOutcome, ProtectedRoute, Session};
use crate::infrastructure::config::NavigationSettings;

#[derive(Clone)]
pub struct NavigationGuard {
    home_routes: HomeRouteService,
    login_route: String,
    protected: Vec<ProtectedRoute>,
}

impl NavigationGuard {
    pub fn new(home_routes: HomeRouteService, settings: NavigationSettings) -> Self {
        Self {
            home_routes,
            login_route: settings.login_route,
            protected: settings.protected,
        }
    }

    /// Where `/` should send this session.
    pub async fn root_redirect(&self, session: &Session) -> String {
        if !session.is_authenticated() {
            return self.login_route.clone();
        }
        self.home_routes
            .preferred_home_route(Some(&session.user), session.bearer.as_deref())
            .await
    }

    /// Authentication first, then role membership for the most specific rule.
    pub fn check(&self, session: &Session, path: &str) -> GuardOutcome {
        if !session.is_authenticated() {
            tracing::debug!("Unauthenticated access to {}", path);
            return GuardOutcome::Redirect(self.login_route.clone());
        }

        let Some(rule) = match_rule(&self.protected, path) else {
            return GuardOutcome::Allow;
        };

        match session.user.role {
            Some(role) if rule.roles.contains(&role) => GuardOutcome::Allow,
            role => {
                tracing::debug!("Role {:?} denied for {} (rule {})", role, path, rule.path);
                GuardOutcome::Redirect(self.home_routes.default_home_for_role(None).to_string())
            }
        }
    }
}
