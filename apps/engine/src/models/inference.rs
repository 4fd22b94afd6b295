use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::filters::RoleType;

/// Suggested filters produced by the resume-parsing inference service,
/// keyed by role category. The shape is owned by the remote service and is
/// not versioned: sub-object keys vary per role and unknown keys are
/// advisory only. Only the reconciler's mapping table is ever consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferencePayload {
    #[serde(default)]
    pub jobs: Option<Map<String, Value>>,
    #[serde(default)]
    pub yc_jobs: Option<Map<String, Value>>,
    #[serde(default)]
    pub internships: Option<Map<String, Value>>,
    /// Role-category keys this engine does not recognize. Kept so callers
    /// can inspect them; never applied.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl InferencePayload {
    /// Selects the sub-object for a role, falling back to `jobs` when the
    /// role-matched one is absent. `None` means reconciliation is a no-op.
    pub fn for_role(&self, role: RoleType) -> Option<&Map<String, Value>> {
        let primary = match role {
            RoleType::Intern => self.internships.as_ref(),
            RoleType::Yc => self.yc_jobs.as_ref(),
            RoleType::FullTime | RoleType::GenericProvider => self.jobs.as_ref(),
        };
        primary.or(self.jobs.as_ref())
    }
}
