// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_preferences_repository;
pub mod http_response;
pub mod memory_route_cache;
pub mod svg_writer;
