pub mod ip_geolocate;
pub mod nearby_find;

pub use ip_geolocate::{IpGeolocateParams, IpGeolocateTool};
pub use nearby_find::{NearbyFindParams, NearbyFindTool};
