use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SearchError;

/// The category of job source a search targets. Each role type maps to its
/// own backend route(s) with role-specific default and maximum limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleType {
    #[serde(rename = "FULL_TIME")]
    FullTime,
    #[serde(rename = "YC")]
    Yc,
    #[serde(rename = "INTERN")]
    Intern,
    /// Fans out across every concrete source and merges the results.
    #[serde(rename = "GENERIC_PROVIDER")]
    GenericProvider,
}

impl FromStr for RoleType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL_TIME" => Ok(RoleType::FullTime),
            "YC" => Ok(RoleType::Yc),
            "INTERN" => Ok(RoleType::Intern),
            "GENERIC_PROVIDER" => Ok(RoleType::GenericProvider),
            other => Err(SearchError::Configuration(format!(
                "unknown role type '{other}'"
            ))),
        }
    }
}

/// The mutable, in-progress query the user is editing.
///
/// Empty strings and `None` mean "unset"; unset fields are omitted from the
/// wire request rather than sent as empty tokens. Role-specific extension
/// fields (employment type, salary-disclosed flag, experience band, visa
/// flag, org/source ids, social enrichment filters) ride in `extras` as
/// opaque pass-through pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDraft {
    #[serde(default)]
    pub title: String,
    /// Boolean-expression search syntax over the title, e.g.
    /// `(data & (science | engineer))`.
    #[serde(default)]
    pub advanced_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// `None` = unconstrained.
    #[serde(default)]
    pub remote: Option<bool>,
    pub role_type: RoleType,
    /// `None` = use the role-type default.
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(flatten)]
    pub extras: BTreeMap<String, Value>,
}

impl FilterDraft {
    pub fn new(role_type: RoleType) -> Self {
        FilterDraft {
            title: String::new(),
            advanced_title: String::new(),
            description: String::new(),
            location: String::new(),
            remote: None,
            role_type,
            limit: None,
            extras: BTreeMap::new(),
        }
    }

    /// Switches the role type. Any previously chosen `limit` is invalidated
    /// because default/maximum limits are role-type-specific.
    pub fn with_role_type(mut self, role_type: RoleType) -> Self {
        if self.role_type != role_type {
            self.limit = None;
        }
        self.role_type = role_type;
        self
    }
}
