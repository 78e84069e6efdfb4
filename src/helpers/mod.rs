pub(crate) mod json;
pub mod slug;
pub mod upload;

pub use json::*;
pub use slug::slugify;
pub use upload::store_image;
