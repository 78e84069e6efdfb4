mod category;
mod course;
mod lesson;
mod module;
mod stats;
mod video;

pub use category::*;
pub use course::*;
pub use lesson::*;
pub use module::*;
pub use stats::*;
pub use video::*;
