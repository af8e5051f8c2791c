pub mod reverse;
pub mod search;

pub use reverse::{GeocodeReverseParams, GeocodeReverseTool};
pub use search::{GeocodeSearchParams, GeocodeSearchTool};
