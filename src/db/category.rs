use crate::models;
use crate::views::admin::CategoryRow;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn insert(pool: &PgPool, category: models::Category) -> Result<models::Category, String> {
    let query_span = tracing::info_span!("Saving new category into the database");
    sqlx::query_as::<_, models::Category>(
        r#"
        INSERT INTO category (id, title, description, icon, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(category.id)
    .bind(&category.title)
    .bind(&category.description)
    .bind(&category.icon)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert category".to_string()
    })
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch category by id.");
    sqlx::query_as::<_, models::Category>("SELECT * FROM category WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch category: {:?}", e);
            "Failed to fetch category".to_string()
        })
}

/// Categories by title, each with the number of courses filed under it.
pub async fn list(pool: &PgPool) -> Result<Vec<CategoryRow>, String> {
    let query_span = tracing::info_span!("List categories.");
    sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT cat.id, cat.title, cat.description, cat.icon, cat.created_at,
               (SELECT COUNT(*) FROM course c WHERE c.category_id = cat.id) AS course_count
        FROM category cat
        ORDER BY cat.title
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list categories: {:?}", e);
        "Failed to list categories".to_string()
    })
}
