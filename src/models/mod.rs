mod category;
mod course;
mod lesson;
mod module;
mod tier;
pub mod user;
mod video;

pub use category::*;
pub use course::*;
pub use lesson::*;
pub use module::*;
pub use tier::*;
pub use user::*;
pub use video::*;
