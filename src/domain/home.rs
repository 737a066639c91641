// Home route domain model - per-role landing page allow-lists
use super::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DASHBOARD_ROUTE: &str = "/admin/dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeOption {
    pub label: String,
    pub route: String,
}

impl HomeOption {
    pub fn new(label: &str, route: &str) -> Self {
        Self {
            label: label.to_string(),
            route: route.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleHomes {
    /// Landing route used when the user has no valid preference. Falls back to
    /// the table's generic route when unset.
    #[serde(default)]
    pub default_route: Option<String>,
    pub options: Vec<HomeOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HomeTableError {
    #[error("role {0} has an empty home allow-list")]
    EmptyAllowList(Role),
    #[error("default route {route} for role {role} is not in its allow-list")]
    DefaultNotAllowed { role: Role, route: String },
}

/// Static role -> allowed landing pages table. Roles missing from `roles`
/// behave like an unknown role.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomeRouteTable {
    pub fallback: HomeOption,
    pub roles: HashMap<Role, RoleHomes>,
}

impl Default for HomeRouteTable {
    fn default() -> Self {
        let dashboard = HomeOption::new("Dashboard", DASHBOARD_ROUTE);
        let patients = HomeOption::new("Pacientes", "/admin/pacientes");
        let doctors = HomeOption::new("Médicos", "/admin/medicos");
        let consultations = HomeOption::new("Consultas", "/admin/consultas");
        let finance = HomeOption::new("Finanzas", "/admin/finanzas");
        let reports = HomeOption::new("Informes médicos", "/admin/informes-medicos");
        let messages = HomeOption::new("Mensajes", "/admin/mensajes");

        let mut roles = HashMap::new();
        roles.insert(
            Role::Administrator,
            RoleHomes {
                default_route: None,
                options: vec![
                    dashboard.clone(),
                    patients.clone(),
                    doctors,
                    consultations.clone(),
                    finance.clone(),
                    reports.clone(),
                    messages.clone(),
                ],
            },
        );
        roles.insert(
            Role::Doctor,
            RoleHomes {
                default_route: None,
                options: vec![
                    dashboard.clone(),
                    patients.clone(),
                    consultations.clone(),
                    reports,
                ],
            },
        );
        roles.insert(
            Role::Secretary,
            RoleHomes {
                default_route: None,
                options: vec![dashboard.clone(), patients, consultations, messages],
            },
        );
        roles.insert(
            Role::Finance,
            RoleHomes {
                default_route: Some(finance.route.clone()),
                options: vec![finance, dashboard.clone()],
            },
        );

        Self {
            fallback: dashboard,
            roles,
        }
    }
}

impl HomeRouteTable {
    /// Ordered landing pages the role may pick. Unknown or absent roles get the
    /// single generic fallback entry.
    pub fn allowed_homes_for_role(&self, role: Option<Role>) -> &[HomeOption] {
        match role.and_then(|r| self.roles.get(&r)) {
            Some(homes) if !homes.options.is_empty() => &homes.options,
            _ => std::slice::from_ref(&self.fallback),
        }
    }

    pub fn default_home_for_role(&self, role: Option<Role>) -> &str {
        match role.and_then(|r| self.roles.get(&r)) {
            Some(RoleHomes {
                default_route: Some(route),
                ..
            }) => route,
            _ => &self.fallback.route,
        }
    }

    pub fn is_allowed(&self, role: Option<Role>, route: &str) -> bool {
        self.allowed_homes_for_role(role)
            .iter()
            .any(|option| option.route == route)
    }

    /// Every configured role must have a non-empty list containing its default.
    pub fn validate(&self) -> Result<(), HomeTableError> {
        let mut roles: Vec<&Role> = self.roles.keys().collect();
        roles.sort_by_key(|r| r.as_str());

        for role in roles {
            let homes = &self.roles[role];
            if homes.options.is_empty() {
                return Err(HomeTableError::EmptyAllowList(*role));
            }
            let default = self.default_home_for_role(Some(*role));
            if !self.is_allowed(Some(*role), default) {
                return Err(HomeTableError::DefaultNotAllowed {
                    role: *role,
                    route: default.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_home_is_always_allowed() {
        let table = HomeRouteTable::default();
        assert_eq!(table.validate(), Ok(()));

        for role in Role::ALL.into_iter().map(Some).chain([None]) {
            let default = table.default_home_for_role(role);
            assert!(
                table.is_allowed(role, default),
                "default {default} missing from allow-list of {role:?}"
            );
        }
    }

    #[test]
    fn test_finance_has_specialised_default() {
        let table = HomeRouteTable::default();
        assert_eq!(table.default_home_for_role(Some(Role::Finance)), "/admin/finanzas");
        assert_eq!(table.default_home_for_role(Some(Role::Doctor)), DASHBOARD_ROUTE);
        assert_eq!(table.default_home_for_role(None), DASHBOARD_ROUTE);
    }

    #[test]
    fn test_unknown_role_gets_single_dashboard_entry() {
        let mut table = HomeRouteTable::default();
        table.roles.remove(&Role::Secretary);

        let homes = table.allowed_homes_for_role(Some(Role::Secretary));
        assert_eq!(homes, &[HomeOption::new("Dashboard", DASHBOARD_ROUTE)]);
        assert_eq!(table.allowed_homes_for_role(None).len(), 1);
    }

    #[test]
    fn test_allow_list_keeps_configured_order() {
        let table = HomeRouteTable::default();
        let routes: Vec<&str> = table
            .allowed_homes_for_role(Some(Role::Secretary))
            .iter()
            .map(|o| o.route.as_str())
            .collect();
        assert_eq!(
            routes,
            vec![
                DASHBOARD_ROUTE,
                "/admin/pacientes",
                "/admin/consultas",
                "/admin/mensajes"
            ]
        );
    }

    #[test]
    fn test_validate_rejects_default_outside_list() {
        let mut table = HomeRouteTable::default();
        table.roles.insert(
            Role::Doctor,
            RoleHomes {
                default_route: Some("/admin/finanzas".to_string()),
                options: vec![HomeOption::new("Pacientes", "/admin/pacientes")],
            },
        );
        assert_eq!(
            table.validate(),
            Err(HomeTableError::DefaultNotAllowed {
                role: Role::Doctor,
                route: "/admin/finanzas".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_list() {
        let mut table = HomeRouteTable::default();
        table.roles.insert(
            Role::Secretary,
            RoleHomes {
                default_route: None,
                options: Vec::new(),
            },
        );
        assert_eq!(
            table.validate(),
            Err(HomeTableError::EmptyAllowList(Role::Secretary))
        );
    }
}
