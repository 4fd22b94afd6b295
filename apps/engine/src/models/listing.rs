use serde::{Deserialize, Serialize};

/// One normalized job listing.
///
/// Listings are read-only and transient: constructed fresh from each
/// response, never mutated, and discarded when a newer search supersedes
/// them. `id` is the de-duplication/render key. Date fields stay as strings
/// because each backend source formats them differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub locations_derived: Option<Vec<String>>,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_listing_deserializes() {
        let listing: Listing = serde_json::from_str(r#"{"id": "abc-123"}"#).unwrap();
        assert_eq!(listing.id, "abc-123");
        assert_eq!(listing.title, None);
        assert_eq!(listing.rating, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "id": "yc-42",
            "title": "Backend Engineer",
            "organization": "Initech",
            "locations_derived": ["New York, NY"],
            "location_type": "TELECOMMUTE",
            "url": "https://example.com/jobs/42",
            "date_posted": "2025-11-02",
            "rating": 8.1,
            "ai_salary_estimate": "$180k",
            "source": "ycombinator"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.organization.as_deref(), Some("Initech"));
        assert_eq!(listing.location_type.as_deref(), Some("TELECOMMUTE"));
        assert_eq!(listing.rating, Some(8.1));
    }

    #[test]
    fn test_listing_without_id_is_rejected() {
        let res = serde_json::from_str::<Listing>(r#"{"title": "No id"}"#);
        assert!(res.is_err());
    }
}
