pub mod autocomplete;
pub mod details;
pub mod nearby;
pub mod photos;
pub mod search_text;

pub use autocomplete::{PlacesAutocompleteParams, PlacesAutocompleteTool};
pub use details::{PlacesDetailsParams, PlacesDetailsTool};
pub use nearby::{PlacesNearbyParams, PlacesNearbyTool};
pub use photos::{PlacesPhotosParams, PlacesPhotosTool};
pub use search_text::{PlacesSearchTextParams, PlacesSearchTextTool, price_level_names};
