use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ServiceError;
use crate::views::admin::CategoryRow;
use actix_web::{get, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin list categories.", skip(pg_pool))]
#[get("")]
pub async fn list_categories(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let rows = db::category::list(pg_pool.get_ref())
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<CategoryRow>::build().set_list(rows).ok("OK"))
}

#[tracing::instrument(name = "Admin add category.", skip(pg_pool))]
#[post("")]
pub async fn add_category(
    form: web::Json<forms::CategoryForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Category>::build().form_error(errors.to_string()));
    }

    let category: models::Category = form.into_inner().into();
    let category = db::category::insert(pg_pool.get_ref(), category)
        .await
        .map_err(ServiceError::Upstream)?;

    tracing::info!("Category {} created", category.id);
    Ok(JsonResponse::<models::Category>::build()
        .set_id(category.id)
        .set_item(category)
        .ok("Category created"))
}
