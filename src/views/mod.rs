pub mod admin;
pub mod course;
pub mod lesson;
pub mod stats;
