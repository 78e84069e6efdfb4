use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{self, CompletionOutcome};
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Mark a lesson as completed by the caller. Repeating the call is harmless.
#[tracing::instrument(name = "Complete lesson.", skip(user, pg_pool))]
#[post("/complete")]
pub async fn complete_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::CompletionForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let caller = user.map(|user| user.into_inner());
    let lesson_id = form.lesson_id;

    let outcome = services::record_completion(
        pg_pool.get_ref(),
        caller.as_deref().map(|user| user.id.as_str()),
        lesson_id,
    )
    .await?;

    let message = match outcome {
        CompletionOutcome::Recorded => "Lesson completed",
        CompletionOutcome::AlreadyRecorded => "Lesson already completed",
    };

    Ok(JsonResponse::<CompletionOutcome>::build()
        .set_id(lesson_id)
        .set_item(outcome)
        .ok(message))
}
