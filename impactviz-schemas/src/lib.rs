pub mod chart;
pub mod file_formats;
pub mod impact;
pub mod parameters;
