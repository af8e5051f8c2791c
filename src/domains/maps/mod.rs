//! Maps domain: the request execution core and typed provider operations.
//!
//! A logical call flows through [`MapsClient`] into the [`RequestExecutor`]:
//! cache lookup, rate-limit admission, authenticated dispatch with retry,
//! failure classification, and finally result normalization.

mod classify;

pub mod cache;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod geo;
pub mod normalize;
pub mod rate_limiter;
pub mod types;

pub use cache::ResponseCache;
pub use client::{
    AutocompleteOptions, DetailsOptions, ElevationQuery, GeolocationRequest, IpGeolocateRequest,
    MapsClient, MatrixOptions, NearbyFindRequest, NearbySearchOptions, RouteOptions,
    TextSearchOptions,
};
pub use endpoints::{ApiSurface, EndpointConfig};
pub use error::{FailureClass, MapsError};
pub use executor::{ApiRequest, HttpConfig, RequestExecutor};
pub use geo::{Coordinate, LocationBias, LocationRef};
pub use rate_limiter::{RateLimitConfig, RateLimiter};
pub use types::*;
