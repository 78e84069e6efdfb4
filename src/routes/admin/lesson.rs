use crate::connectors::VideoServiceConnector;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{self, ServiceError};
use crate::views::admin::{LessonOption, LessonRow};
use actix_web::{get, post, web, Responder, Result};
use chrono::Utc;
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Admin list lessons.", skip(pg_pool))]
#[get("")]
pub async fn list_lessons(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let rows = db::lesson::list_rows(pg_pool.get_ref(), None)
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<LessonRow>::build().set_list(rows).ok("OK"))
}

#[tracing::instrument(name = "Admin lesson options.", skip(pg_pool))]
#[get("/options")]
pub async fn lesson_options(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let options = db::lesson::options(pg_pool.get_ref())
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<LessonOption>::build().set_list(options).ok("OK"))
}

/// Create a lesson. A `videoUploadId` is resolved to a playable asset before anything
/// is written; a `moduleId` appends the lesson to that module.
#[tracing::instrument(name = "Admin add lesson.", skip(pg_pool, connector))]
#[post("")]
pub async fn add_lesson(
    form: web::Json<forms::LessonForm>,
    pg_pool: web::Data<PgPool>,
    connector: web::Data<Arc<dyn VideoServiceConnector>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Lesson>::build().form_error(errors.to_string()));
    }

    let lesson: models::Lesson = (&*form).try_into().map_err(ServiceError::Validation)?;
    let pool = pg_pool.get_ref();

    if db::lesson::slug_taken(pool, &lesson.slug)
        .await
        .map_err(ServiceError::Upstream)?
    {
        return Err(ServiceError::Validation(format!(
            "A lesson with slug '{}' already exists",
            lesson.slug
        ))
        .into());
    }

    if let Some(module_id) = form.module_id {
        if !db::module::exists(pool, module_id)
            .await
            .map_err(ServiceError::Upstream)?
        {
            return Err(ServiceError::NotFound(format!("Module {} not found", module_id)).into());
        }
    }

    let video = match form.video_upload_id() {
        Some(upload_id) => {
            let connector = connector.get_ref().as_ref();
            let asset =
                services::await_video_asset(connector, upload_id, connector.poll_policy()).await?;
            Some(models::VideoAsset {
                id: Uuid::new_v4(),
                playback_id: asset.primary_playback_id(),
                asset_id: asset.id,
                status: asset.status,
                aspect_ratio: asset.aspect_ratio,
                duration: asset.duration,
                created_at: Utc::now(),
            })
        }
        None => None,
    };

    let lesson = db::lesson::insert(pool, lesson, video, form.module_id)
        .await
        .map_err(ServiceError::from)?;

    tracing::info!("Lesson {} created", lesson.slug);
    Ok(JsonResponse::<models::Lesson>::build()
        .set_id(lesson.id)
        .set_item(lesson)
        .ok("Lesson created"))
}
