pub mod access;
pub mod completion;
mod errors;
pub mod progress;
pub mod video;

pub use access::{has_access, resolve_tier, PlanCheck, PlanMembership};
pub use completion::{record_completion, AppendResult, CompletionOutcome, CompletionStore};
pub use errors::ServiceError;
pub use progress::{course_progress, user_progress, CourseProgress, ModuleProgress, UserProgress};
pub use video::{await_video_asset, PollPolicy};
