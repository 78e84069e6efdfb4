use crate::services::ServiceError;
use serde::Serialize;
use uuid::Uuid;

/// Result of a store-level conditional append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendResult {
    Appended,
    AlreadyPresent,
    LessonMissing,
}

/// Persistence side of completion tracking.
///
/// Implementations must make "append unless present" a single atomic step so that
/// concurrent calls for the same pair leave exactly one entry.
#[async_trait::async_trait]
pub trait CompletionStore: Send + Sync {
    async fn append_completion(
        &self,
        lesson_id: Uuid,
        user_id: &str,
    ) -> Result<AppendResult, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    Recorded,
    AlreadyRecorded,
}

#[tracing::instrument(name = "Record lesson completion.", skip(store))]
pub async fn record_completion<S>(
    store: &S,
    caller: Option<&str>,
    lesson_id: Uuid,
) -> Result<CompletionOutcome, ServiceError>
where
    S: CompletionStore + ?Sized,
{
    let user_id = caller
        .filter(|id| !id.trim().is_empty())
        .ok_or(ServiceError::Unauthenticated)?;

    match store
        .append_completion(lesson_id, user_id)
        .await
        .map_err(ServiceError::Upstream)?
    {
        AppendResult::Appended => {
            tracing::info!("Lesson {} completed by {}", lesson_id, user_id);
            Ok(CompletionOutcome::Recorded)
        }
        AppendResult::AlreadyPresent => {
            tracing::debug!("Lesson {} already completed by {}", lesson_id, user_id);
            Ok(CompletionOutcome::AlreadyRecorded)
        }
        AppendResult::LessonMissing => {
            Err(ServiceError::NotFound(format!("Lesson {} not found", lesson_id)))
        }
    }
}
