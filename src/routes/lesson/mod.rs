mod complete;
mod get;

pub use complete::*;
pub use get::*;
