//! Static routing table from role type to backend source.

use crate::errors::SearchError;
use crate::models::filters::RoleType;

/// Limit applied when a role has no explicit entry (the generic provider,
/// whose fan-out routes each carry their own defaults).
pub const FALLBACK_DEFAULT_LIMIT: u32 = 50;

/// One backend source: its route plus the paging parameters the route
/// supports. Invariants: `page_step <= per_request_cap` and
/// `default_limit <= per_request_cap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSourceConfig {
    pub role: RoleType,
    /// Path under the API base URL.
    pub route: &'static str,
    pub default_limit: u32,
    pub page_step: u32,
    pub per_request_cap: u32,
}

const ROLE_SOURCES: [RoleSourceConfig; 3] = [
    RoleSourceConfig {
        role: RoleType::FullTime,
        route: "/fetch_jobs",
        default_limit: 50,
        page_step: 100,
        per_request_cap: 100,
    },
    RoleSourceConfig {
        role: RoleType::Yc,
        route: "/fetch_yc_jobs",
        default_limit: 50,
        page_step: 100,
        per_request_cap: 100,
    },
    RoleSourceConfig {
        role: RoleType::Intern,
        route: "/fetch_internships",
        default_limit: 50,
        page_step: 100,
        per_request_cap: 100,
    },
];

/// Fan-out order for the generic provider. Merge order of multi-route
/// results follows this order.
const GENERIC_FAN_OUT: [RoleType; 3] = [RoleType::FullTime, RoleType::Yc, RoleType::Intern];

/// Looks up the single source config for a concrete role type.
/// A missing entry is a defect in this table, not user input.
pub fn config_for(role: RoleType) -> Result<&'static RoleSourceConfig, SearchError> {
    ROLE_SOURCES
        .iter()
        .find(|c| c.role == role)
        .ok_or_else(|| SearchError::Configuration(format!("no source config for role type {role:?}")))
}

/// The set of routes a search for `role` must hit: one for concrete roles,
/// the full fan-out for the generic provider.
pub fn configs_for(role: RoleType) -> Result<Vec<&'static RoleSourceConfig>, SearchError> {
    match role {
        RoleType::GenericProvider => GENERIC_FAN_OUT.iter().map(|r| config_for(*r)).collect(),
        concrete => Ok(vec![config_for(concrete)?]),
    }
}

/// The limit used when the user has not chosen one. Shared by the
/// aggregation client and the reconciler so displayed and submitted limits
/// agree before the user's first explicit choice.
pub fn default_limit_for(role: RoleType) -> u32 {
    config_for(role)
        .map(|c| c.default_limit)
        .unwrap_or(FALLBACK_DEFAULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_concrete_role_has_exactly_one_config() {
        for role in [RoleType::FullTime, RoleType::Yc, RoleType::Intern] {
            let configs = configs_for(role).unwrap();
            assert_eq!(configs.len(), 1);
            assert_eq!(configs[0].role, role);
        }
    }

    #[test]
    fn test_generic_provider_fans_out_to_all_sources() {
        let configs = configs_for(RoleType::GenericProvider).unwrap();
        let routes: Vec<_> = configs.iter().map(|c| c.route).collect();
        assert_eq!(
            routes,
            vec!["/fetch_jobs", "/fetch_yc_jobs", "/fetch_internships"]
        );
    }

    #[test]
    fn test_table_invariants() {
        for config in configs_for(RoleType::GenericProvider).unwrap() {
            assert!(config.page_step <= config.per_request_cap, "{:?}", config.role);
            assert!(config.default_limit <= config.per_request_cap, "{:?}", config.role);
        }
    }

    #[test]
    fn test_default_limit_for_generic_provider_uses_fallback() {
        assert_eq!(
            default_limit_for(RoleType::GenericProvider),
            FALLBACK_DEFAULT_LIMIT
        );
        assert_eq!(default_limit_for(RoleType::Intern), 50);
    }
}
