// Application state for HTTP handlers
use crate::application::home_route_service::HomeRouteService;
use crate::application::navigation_guard::NavigationGuard;

#[derive(Clone)]
pub struct AppState {
    pub home_route_service: HomeRouteService,
    pub navigation_guard: NavigationGuard,
}
