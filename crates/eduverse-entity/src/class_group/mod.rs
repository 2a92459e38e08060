//! Class group and student enrollment entities.

pub mod model;

pub use model::{ClassEnrollment, ClassGroup, CreateClassGroup};
