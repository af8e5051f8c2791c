//! Tool definitions, grouped by provider surface.
//!
//! Each tool lives in its own file and knows how to describe itself
//! (`to_tool`), run against the maps client (`execute`) and build its rmcp
//! route (`create_route`).

pub mod common;
pub mod discovery;
pub mod geocode;
pub mod places;
pub mod routes;
pub mod utility;

pub use discovery::{IpGeolocateTool, NearbyFindTool};
pub use geocode::{GeocodeReverseTool, GeocodeSearchTool};
pub use places::{
    PlacesAutocompleteTool, PlacesDetailsTool, PlacesNearbyTool, PlacesPhotosTool,
    PlacesSearchTextTool,
};
pub use routes::{RoutesComputeTool, RoutesMatrixTool};
pub use utility::{ElevationGetTool, GeolocationEstimateTool, RoadsNearestTool, TimezoneGetTool};
