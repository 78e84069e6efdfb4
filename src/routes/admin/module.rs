use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ServiceError;
use crate::views::admin::ModuleRow;
use actix_web::{get, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin list modules.", skip(pg_pool))]
#[get("")]
pub async fn list_modules(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let rows = db::module::list_rows(pg_pool.get_ref())
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<ModuleRow>::build().set_list(rows).ok("OK"))
}

#[tracing::instrument(name = "Admin module options.", skip(pg_pool))]
#[get("/options")]
pub async fn module_options(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let options = db::module::options(pg_pool.get_ref())
        .await
        .map_err(ServiceError::Upstream)?;

    Ok(JsonResponse::<models::Reference>::build()
        .set_list(options)
        .ok("OK"))
}

#[tracing::instrument(name = "Admin add module.", skip(pg_pool))]
#[post("")]
pub async fn add_module(
    form: web::Json<forms::ModuleForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Module>::build().form_error(errors.to_string()));
    }

    let lesson_ids = form.lesson_ids();
    let missing = db::lesson::missing(pg_pool.get_ref(), &lesson_ids)
        .await
        .map_err(ServiceError::Upstream)?;
    if let Some(id) = missing.first() {
        return Err(ServiceError::NotFound(format!("Lesson {} not found", id)).into());
    }

    let module: models::Module = (&*form).into();
    let module = db::module::insert(pg_pool.get_ref(), module, &lesson_ids)
        .await
        .map_err(ServiceError::Upstream)?;

    tracing::info!("Module {} created with {} lessons", module.id, lesson_ids.len());
    Ok(JsonResponse::<models::Module>::build()
        .set_id(module.id)
        .set_item(module)
        .ok("Module created"))
}
