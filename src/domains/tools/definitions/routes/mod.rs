pub mod compute;
pub mod matrix;

pub use compute::{RoutesComputeParams, RoutesComputeTool};
pub use matrix::{RoutesMatrixParams, RoutesMatrixTool};
