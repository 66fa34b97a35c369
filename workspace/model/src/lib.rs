pub mod dataset;
pub mod entities;
pub mod error;
pub mod filter;
pub mod loader;

pub use dataset::Dataset;
pub use error::{DatasetError, Result};
pub use filter::DashboardFilter;
pub use loader::DatasetLoader;
