pub mod composite;
pub mod errors;
pub mod grid;
pub mod naive;

pub use composite::{CompositeDft, balanced_factors, transform, transform_batch, transform_real};
pub use errors::ShapeError;
pub use naive::naive_dft;
