pub mod chart;
pub mod error;
pub mod format;
pub mod model;
pub mod scenario;
pub mod summary;
pub mod sweep;
