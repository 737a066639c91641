// Application layer - Use cases and ports
pub mod chart_renderer;
pub mod home_route_service;
pub mod navigation_guard;
pub mod preferences_repository;
pub mod route_cache;
