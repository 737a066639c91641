// Process-local route cache
use crate::application::route_cache::RouteCache;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryRouteCache {
    routes: RwLock<HashMap<i64, String>>,
}

impl InMemoryRouteCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RouteCache for InMemoryRouteCache {
    fn get(&self, user_id: i64) -> Option<String> {
        self.routes.read().ok()?.get(&user_id).cloned()
    }

    fn insert(&self, user_id: i64, route: String) {
        match self.routes.write() {
            Ok(mut routes) => {
                routes.insert(user_id, route);
            }
            Err(e) => tracing::error!("Route cache lock poisoned: {}", e),
        }
    }

    fn clear(&self) {
        if let Ok(mut routes) = self.routes.write() {
            routes.clear();
        }
    }
}
