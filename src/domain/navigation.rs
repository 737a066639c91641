// Navigation guard domain model - per-page access rules
use super::role::{Role, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ProtectedRoute {
    pub path: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "redirect", rename_all = "lowercase")]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
}

/// Caller identity as presented to a guard.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: User,
    pub bearer: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.bearer.as_deref().is_some_and(|t| !t.is_empty()) && self.user.id.is_some()
    }
}

/// Longest-prefix match on path segments, so `/admin/pacientes/12` hits the
/// `/admin/pacientes` rule but `/admin/pacientesx` does not.
pub fn match_rule<'a>(rules: &'a [ProtectedRoute], path: &str) -> Option<&'a ProtectedRoute> {
    rules
        .iter()
        .filter(|rule| {
            let prefix = rule.path.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by_key(|rule| rule.path.trim_end_matches('/').len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<ProtectedRoute> {
        vec![
            ProtectedRoute {
                path: "/admin".to_string(),
                roles: Role::ALL.to_vec(),
            },
            ProtectedRoute {
                path: "/admin/finanzas".to_string(),
                roles: vec![Role::Administrator, Role::Finance],
            },
        ]
    }

    #[test]
    fn test_match_rule_prefers_longest_prefix() {
        let rules = rules();
        let rule = match_rule(&rules, "/admin/finanzas/reporte").unwrap();
        assert_eq!(rule.path, "/admin/finanzas");

        let rule = match_rule(&rules, "/admin/pacientes").unwrap();
        assert_eq!(rule.path, "/admin");
    }

    #[test]
    fn test_match_rule_respects_segment_boundaries() {
        let rules = rules();
        assert!(match_rule(&rules, "/administracion").is_none());
        assert!(match_rule(&rules, "/login").is_none());
    }

    #[test]
    fn test_session_requires_token_and_id() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.user = User::new(7, Role::Doctor);
        assert!(!session.is_authenticated());

        session.bearer = Some("abc".to_string());
        assert!(session.is_authenticated());
    }
}
