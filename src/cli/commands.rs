pub mod report;
pub mod serve;

pub use report::{report, ReportArgs};
pub use serve::serve;
