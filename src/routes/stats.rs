use crate::db;
use crate::helpers::JsonResponse;
use crate::services::ServiceError;
use crate::views::stats::PublicStats;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Public stats.", skip(pg_pool))]
#[get("")]
pub async fn stats_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let stats = db::stats::public(pg_pool.get_ref())
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<PublicStats>::build().set_item(stats).ok("OK"))
}
