//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and
//! content. All resources are static reference material.

mod api_overview;
mod common_queries;
mod field_masks;
mod place_types;
mod travel_modes;

pub use api_overview::ApiOverviewResource;
pub use common_queries::CommonQueriesResource;
pub use field_masks::FieldMasksResource;
pub use place_types::PlaceTypesResource;
pub use travel_modes::TravelModesResource;

use super::service::ResourceContent;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    fn content() -> ResourceContent;
}
