use crate::db;
use crate::db::course::CourseFilter;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{self, ServiceError};
use crate::views::course::{CourseCard, CourseDetail, LearnerDashboard};
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

const FEATURED_LIMIT: i64 = 3;

/// Courses the caller may open, with the caller's tier and progress.
#[tracing::instrument(name = "Learner course list.", skip(user, pg_pool))]
#[get("")]
pub async fn list_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let caller = user.map(|user| user.into_inner());
    let plans = caller.as_deref();

    let outlines: Vec<models::CourseOutline> =
        db::course::fetch_outlines(pg_pool.get_ref(), CourseFilter::All)
            .await
            .map_err(ServiceError::Upstream)?
            .into_iter()
            .filter(|outline| services::has_access(Some(outline.course.tier), &plans))
            .collect();

    let dashboard = LearnerDashboard::new(
        services::resolve_tier(&plans),
        &outlines,
        caller.as_deref().map(|user| user.id.as_str()),
    );

    Ok(JsonResponse::<LearnerDashboard>::build()
        .set_item(dashboard)
        .ok("OK"))
}

#[tracing::instrument(name = "Featured courses.", skip(pg_pool))]
#[get("/featured")]
pub async fn featured_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let cards = db::course::fetch_outlines(pg_pool.get_ref(), CourseFilter::Featured(FEATURED_LIMIT))
        .await
        .map_err(ServiceError::Upstream)?
        .iter()
        .map(CourseCard::from)
        .collect();

    Ok(JsonResponse::<CourseCard>::build().set_list(cards).ok("OK"))
}

/// Course page. Courses above the caller's plan are returned locked.
#[tracing::instrument(name = "Course by slug.", skip(user, pg_pool))]
#[get("/{slug}")]
pub async fn item_handler(
    path: web::Path<(String,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let slug = path.into_inner().0;
    let caller = user.map(|user| user.into_inner());
    let plans = caller.as_deref();

    let outline = db::course::fetch_outline_by_slug(pg_pool.get_ref(), &slug)
        .await
        .map_err(ServiceError::Upstream)?
        .ok_or_else(|| ServiceError::NotFound(format!("Course '{}' not found", slug)))?;

    let locked = !services::has_access(Some(outline.course.tier), &plans);
    let detail = CourseDetail::for_caller(
        &outline,
        caller.as_deref().map(|user| user.id.as_str()),
        locked,
    );

    Ok(JsonResponse::<CourseDetail>::build()
        .set_id(outline.course.id)
        .set_item(detail)
        .ok("OK"))
}
