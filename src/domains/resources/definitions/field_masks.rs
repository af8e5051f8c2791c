//! Field mask reference resource definition.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

pub struct FieldMasksResource;

impl ResourceDefinition for FieldMasksResource {
    const URI: &'static str = "google-maps://docs/field-masks";
    const NAME: &'static str = "Places API Field Masks";
    const DESCRIPTION: &'static str =
        "Field names accepted by places_details and how they map to provider fields";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Json(json!({
            "basic_fields": ["name", "types", "formatted_address", "address_components", "location"],
            "contact_fields": ["phone_number", "international_phone_number", "website"],
            "atmosphere_fields": ["price_level", "rating", "user_ratings_total", "reviews", "editorial_summary"],
            "photo_fields": ["photos"],
            "operational_fields": ["opening_hours", "regular_opening_hours", "business_status"],
            "provider_names": {
                "name": "displayName",
                "formatted_address": "formattedAddress",
                "address_components": "addressComponents",
                "opening_hours": "currentOpeningHours",
                "regular_opening_hours": "regularOpeningHours",
                "price_level": "priceLevel",
                "phone_number": "nationalPhoneNumber",
                "international_phone_number": "internationalPhoneNumber",
                "website": "websiteUri",
                "business_status": "businessStatus",
                "user_ratings_total": "userRatingCount",
                "editorial_summary": "editorialSummary"
            },
            "note": "Request only the fields you need; the place id is always included"
        }))
    }
}
