use crate::db;
use crate::db::course::CourseFilter;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{self, ServiceError};
use crate::views::course::CourseDetail;
use crate::views::lesson::{LessonDetail, VideoView};
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Lesson page. A lesson that belongs to courses opens when any of them is within the
/// caller's plan; a lesson outside every course is open to all.
#[tracing::instrument(name = "Lesson by slug.", skip(user, pg_pool))]
#[get("/{slug}")]
pub async fn item_handler(
    path: web::Path<(String,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let slug = path.into_inner().0;
    let caller = user.map(|user| user.into_inner());
    let plans = caller.as_deref();
    let caller_id = caller.as_deref().map(|user| user.id.as_str());

    let record = db::lesson::fetch_by_slug(pg_pool.get_ref(), &slug)
        .await
        .map_err(ServiceError::Upstream)?
        .ok_or_else(|| ServiceError::NotFound(format!("Lesson '{}' not found", slug)))?;

    let mut courses = db::course::fetch_outlines(
        pg_pool.get_ref(),
        CourseFilter::ContainingLesson(record.lesson.id),
    )
    .await
    .map_err(ServiceError::Upstream)?;
    // free first; stable, so equal tiers stay newest first
    courses.sort_by_key(|outline| outline.course.tier);

    let accessible: Vec<bool> = courses
        .iter()
        .map(|outline| services::has_access(Some(outline.course.tier), &plans))
        .collect();

    if !courses.is_empty() && !accessible.iter().any(|open| *open) {
        let required = courses[0].course.tier;
        tracing::info!("Lesson {} locked for caller, needs {}", slug, required);
        return Err(ServiceError::Forbidden(format!(
            "This lesson requires the {} plan",
            required
        ))
        .into());
    }

    let courses = courses
        .iter()
        .zip(accessible)
        .map(|(outline, open)| CourseDetail::for_caller(outline, caller_id, !open))
        .collect();

    let video = record.video_playback_id.map(|playback_id| VideoView {
        playback_id,
        status: record.video_status.unwrap_or_default(),
        duration: record.video_duration,
    });
    let detail = LessonDetail::new(record.lesson, video, courses, caller_id);

    Ok(JsonResponse::<LessonDetail>::build()
        .set_id(detail.id)
        .set_item(detail)
        .ok("OK"))
}
