//! Merges resume-inference filter suggestions into the user's draft
//! without destroying values the user already entered.

use serde_json::Value;
use tracing::debug;

use crate::models::filters::{FilterDraft, RoleType};
use crate::models::inference::InferencePayload;
use crate::sources;

/// Receives inference-payload keys the mapping table does not cover.
/// Diagnostics only: reports must never change reconciliation behavior.
/// The default sink logs, so mapping-table gaps stay discoverable.
pub trait DiagnosticsSink {
    fn unmapped_field(&self, role: RoleType, key: &str, value: &Value);
}

/// Default sink: structured log per dropped key.
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn unmapped_field(&self, role: RoleType, key: &str, value: &Value) {
        debug!(?role, key, %value, "ignoring unmapped inference filter");
    }
}

/// Applies inference suggestions to `current`, returning a new draft.
///
/// Never touches the network and never mutates its input. The merge is
/// additive/overriding: keys absent from the payload never clear existing
/// draft values. Unexpected payload shapes degrade to a no-op.
pub fn reconcile(current: &FilterDraft, payload: &InferencePayload) -> FilterDraft {
    reconcile_with_sink(current, payload, &TracingDiagnostics)
}

/// Like [`reconcile`], reporting unmapped keys to the given sink.
pub fn reconcile_with_sink(
    current: &FilterDraft,
    payload: &InferencePayload,
    sink: &dyn DiagnosticsSink,
) -> FilterDraft {
    let suggested = match payload.for_role(current.role_type) {
        Some(sub) => sub,
        None => return current.clone(),
    };

    let mut next = current.clone();
    for (key, value) in suggested {
        match key.as_str() {
            "title_filter" => apply_string(&mut next.title, value),
            "advanced_title_filter" => apply_string(&mut next.advanced_title, value),
            "description_filter" => apply_string(&mut next.description, value),
            "location_filter" => apply_string(&mut next.location, value),
            "remote" => {
                // Booleans only; null or anything else is not applied.
                if let Value::Bool(remote) = value {
                    next.remote = Some(*remote);
                }
            }
            "limit" => {
                if let Some(limit) = value.as_u64().filter(|n| *n > 0) {
                    next.limit = Some(limit as u32);
                }
            }
            _ => {
                if !value.is_null() {
                    sink.unmapped_field(current.role_type, key, value);
                }
            }
        }
    }

    // Keep the displayed/submitted limit consistent before the user's
    // first explicit choice.
    if next.limit.is_none() {
        next.limit = Some(sources::default_limit_for(next.role_type));
    }
    next
}

fn apply_string(slot: &mut String, value: &Value) {
    if let Value::String(s) = value {
        if !s.is_empty() {
            *slot = s.clone();
        }
    }
}
