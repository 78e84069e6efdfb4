use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers::{store_image, JsonResponse};
use crate::models;
use crate::services::ServiceError;
use crate::views::admin::CourseRow;
use actix_multipart::Multipart;
use actix_web::{get, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin list courses.", skip(pg_pool))]
#[get("")]
pub async fn list_courses(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let rows = db::course::list_rows(pg_pool.get_ref(), None)
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<CourseRow>::build().set_list(rows).ok("OK"))
}

/// Multipart course form: text fields plus an optional `thumbnail` image.
#[tracing::instrument(name = "Admin add course.", skip(payload, pg_pool, settings))]
#[post("")]
pub async fn add_course(
    payload: Multipart,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let form = forms::CourseForm::from_multipart(payload)
        .await
        .map_err(|err| JsonResponse::<models::Course>::build().bad_request(err))?;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Course>::build().form_error(errors.to_string()));
    }

    let mut course = form.to_course(None).map_err(ServiceError::Validation)?;
    let pool = pg_pool.get_ref();

    if let Some(category_id) = course.category_id {
        db::category::fetch(pool, category_id)
            .await
            .map_err(ServiceError::Upstream)?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", category_id)))?;
    }

    let module_ids = form.module_ids();
    let missing = db::module::missing(pool, &module_ids)
        .await
        .map_err(ServiceError::Upstream)?;
    if let Some(id) = missing.first() {
        return Err(ServiceError::NotFound(format!("Module {} not found", id)).into());
    }

    if db::course::slug_taken(pool, &course.slug)
        .await
        .map_err(ServiceError::Upstream)?
    {
        return Err(ServiceError::Validation(format!(
            "A course with slug '{}' already exists",
            course.slug
        ))
        .into());
    }

    if let Some(thumbnail) = &form.thumbnail {
        let url = store_image(&settings.uploads, thumbnail)
            .await
            .map_err(ServiceError::Validation)?;
        course.thumbnail_url = Some(url);
    }

    let course = db::course::insert(pool, course, &module_ids)
        .await
        .map_err(ServiceError::from)?;

    tracing::info!("Course {} ({}) created", course.slug, course.tier);
    Ok(JsonResponse::<models::Course>::build()
        .set_id(course.id)
        .set_item(course)
        .ok("Course created"))
}
