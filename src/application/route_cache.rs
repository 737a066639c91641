// Injectable cache of resolved home routes, keyed by user id

/// Session-lifetime store of resolved home routes. Only the home route service
/// writes to it.
pub trait RouteCache: Send + Sync {
    fn get(&self, user_id: i64) -> Option<String>;
    fn insert(&self, user_id: i64, route: String);
    fn clear(&self);
}
