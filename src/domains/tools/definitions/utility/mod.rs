pub mod elevation;
pub mod geolocation;
pub mod roads;
pub mod timezone;

pub use elevation::{ElevationGetParams, ElevationGetTool};
pub use geolocation::{GeolocationEstimateParams, GeolocationEstimateTool};
pub use roads::{RoadsNearestParams, RoadsNearestTool};
pub use timezone::{TimezoneGetParams, TimezoneGetTool};
