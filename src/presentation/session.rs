// Caller identity from gateway-supplied headers
use crate::domain::navigation::Session;
use crate::domain::role::User;
use axum::http::{header, HeaderMap};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Missing or unparseable values become `None` rather than rejecting the
/// request; guards and the home route service handle anonymous callers.
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    let text = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let id = text(USER_ID_HEADER).and_then(|v| v.trim().parse::<i64>().ok());
    let role = text(USER_ROLE_HEADER).and_then(|v| v.parse().ok());
    let bearer = text(header::AUTHORIZATION.as_str())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Session {
        user: User { id, role },
        bearer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use axum::http::HeaderValue;

    #[test]
    fn test_full_session() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("42"));
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("secretaria"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));

        let session = session_from_headers(&headers);
        assert_eq!(session.user, User::new(42, Role::Secretary));
        assert_eq!(session.bearer.as_deref(), Some("abc.def"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_bad_values_become_none() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("abc"));
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("paciente"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));

        let session = session_from_headers(&headers);
        assert_eq!(session.user, User::default());
        assert_eq!(session.bearer, None);
    }
}
