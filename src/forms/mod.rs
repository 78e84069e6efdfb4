mod category;
mod completion;
pub mod course;
mod lesson;
mod module;
pub mod user;

pub use category::*;
pub use completion::*;
pub use course::{CourseForm, UploadedFile};
pub use lesson::*;
pub use module::*;

use serde::{Deserialize, Deserializer};

/// Surrounding whitespace never counts toward a required text field.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}
