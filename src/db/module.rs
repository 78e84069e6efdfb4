use crate::models::{self, Reference};
use crate::views::admin::ModuleRow;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

/// Insert a module and attach its lessons, in list order, within one transaction.
pub async fn insert(
    pool: &PgPool,
    module: models::Module,
    lesson_ids: &[Uuid],
) -> Result<models::Module, String> {
    let query_span = tracing::info_span!("Saving new module into the database");
    async move {
        let mut tx = pool.begin().await.map_err(|err| {
            tracing::error!("Failed to begin transaction: {:?}", err);
            "Failed to begin transaction".to_string()
        })?;

        let module = sqlx::query_as::<_, models::Module>(
            r#"
            INSERT INTO module (id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(module.id)
        .bind(&module.title)
        .bind(&module.description)
        .bind(module.created_at)
        .bind(module.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert module: {:?}", e);
            "Failed to insert module".to_string()
        })?;

        if !lesson_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO module_lesson (module_id, lesson_id, position)
                SELECT $1, ids.lesson_id, ids.position - 1
                FROM unnest($2::uuid[]) WITH ORDINALITY AS ids(lesson_id, position)
                ON CONFLICT (module_id, lesson_id) DO NOTHING
                "#,
            )
            .bind(module.id)
            .bind(lesson_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to attach lessons: {:?}", e);
                "Failed to attach lessons".to_string()
            })?;
        }

        tx.commit().await.map_err(|err| {
            tracing::error!("Failed to commit transaction: {:?}", err);
            "Failed to commit transaction".to_string()
        })?;

        Ok(module)
    }
    .instrument(query_span)
    .await
}

pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check module exists.", %id);
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM module WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check module: {:?}", e);
            "Failed to check module".to_string()
        })
}

/// Ids from `ids` that have no module row.
pub async fn missing(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Uuid>, String> {
    let query_span = tracing::info_span!("Find unknown module ids.");
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT ids.id FROM unnest($1::uuid[]) AS ids(id)
        WHERE NOT EXISTS (SELECT 1 FROM module m WHERE m.id = ids.id)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to check modules: {:?}", e);
        "Failed to check modules".to_string()
    })
}

/// Admin listing, newest first, with ordered lesson titles.
pub async fn list_rows(pool: &PgPool) -> Result<Vec<ModuleRow>, String> {
    let query_span = tracing::info_span!("List modules for admin.");
    sqlx::query_as::<_, ModuleRow>(
        r#"
        SELECT m.id, m.title, m.description, m.created_at,
               COUNT(l.id) AS lesson_count,
               COALESCE(
                   array_agg(l.title ORDER BY ml.position) FILTER (WHERE l.id IS NOT NULL),
                   '{}'
               ) AS lesson_titles
        FROM module m
        LEFT JOIN module_lesson ml ON ml.module_id = m.id
        LEFT JOIN lesson l ON l.id = ml.lesson_id
        GROUP BY m.id
        ORDER BY m.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list modules: {:?}", e);
        "Failed to list modules".to_string()
    })
}

pub async fn options(pool: &PgPool) -> Result<Vec<Reference>, String> {
    let query_span = tracing::info_span!("Module options.");
    sqlx::query_as::<_, Reference>("SELECT id, title FROM module ORDER BY title")
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch module options: {:?}", e);
            "Failed to fetch module options".to_string()
        })
}
