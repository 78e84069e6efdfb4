use crate::db;
use crate::helpers::JsonResponse;
use crate::services::ServiceError;
use crate::views::admin::AdminStats;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

const RECENT_LIMIT: i64 = 5;

#[tracing::instrument(name = "Admin stats.", skip(pg_pool))]
#[get("/stats")]
pub async fn stats_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let pool = pg_pool.get_ref();
    let totals = db::stats::totals(pool).await.map_err(ServiceError::Upstream)?;
    let recent_courses = db::course::list_rows(pool, Some(RECENT_LIMIT))
        .await
        .map_err(ServiceError::Upstream)?;
    let recent_lessons = db::lesson::list_rows(pool, Some(RECENT_LIMIT))
        .await
        .map_err(ServiceError::Upstream)?;

    let stats = AdminStats {
        courses: totals.courses,
        modules: totals.modules,
        lessons: totals.lessons,
        categories: totals.categories,
        recent_courses,
        recent_lessons,
    };

    Ok(JsonResponse::<AdminStats>::build().set_item(stats).ok("OK"))
}
