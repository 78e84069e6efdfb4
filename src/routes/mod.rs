pub mod admin;
pub mod course;
pub mod health_checks;
pub mod lesson;
pub mod stats;

pub use health_checks::*;
pub use stats::*;
