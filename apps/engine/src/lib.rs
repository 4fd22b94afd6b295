//! Aggregation core for a job-search front end.
//!
//! Turns a user-editable [`FilterDraft`] into requests against the backend
//! route(s) for its role type, normalizes the heterogeneous responses into
//! one ordered [`Listing`] collection, guarantees that only the most
//! recently initiated search is ever surfaced, and reconciles
//! resume-inference suggestions back into the draft without clobbering
//! user input. Presentation, auth, and preference persistence live in the
//! UI layer on top of this crate.

pub mod client;
pub mod config;
pub mod errors;
pub mod inference;
pub mod models;
pub mod normalize;
pub mod query;
pub mod reconcile;
pub mod sources;

pub use client::{AggregationClient, SearchOutcome};
pub use config::Config;
pub use errors::SearchError;
pub use inference::InferenceClient;
pub use models::filters::{FilterDraft, RoleType};
pub use models::inference::InferencePayload;
pub use models::listing::Listing;
pub use query::ResumeAttachment;
pub use reconcile::{reconcile, reconcile_with_sink, DiagnosticsSink};
