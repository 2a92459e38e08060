//! School (tenant) domain entities.

pub mod model;
pub mod settings;
pub mod statistics;

pub use model::{CreateSchool, School, UpdateSchool};
pub use settings::SchoolSettings;
pub use statistics::SchoolStatistics;
