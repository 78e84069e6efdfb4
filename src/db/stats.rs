use crate::views::stats::PublicStats;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn public(pool: &PgPool) -> Result<PublicStats, String> {
    let query_span = tracing::info_span!("Count published content.");
    sqlx::query_as::<_, PublicStats>(
        r#"
        SELECT (SELECT COUNT(*) FROM course) AS courses,
               (SELECT COUNT(*) FROM lesson) AS lessons
        "#,
    )
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to count content: {:?}", e);
        "Failed to count content".to_string()
    })
}

#[derive(Debug, sqlx::FromRow)]
pub struct Totals {
    pub courses: i64,
    pub modules: i64,
    pub lessons: i64,
    pub categories: i64,
}

pub async fn totals(pool: &PgPool) -> Result<Totals, String> {
    let query_span = tracing::info_span!("Count all content for the dashboard.");
    sqlx::query_as::<_, Totals>(
        r#"
        SELECT (SELECT COUNT(*) FROM course) AS courses,
               (SELECT COUNT(*) FROM module) AS modules,
               (SELECT COUNT(*) FROM lesson) AS lessons,
               (SELECT COUNT(*) FROM category) AS categories
        "#,
    )
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to count content: {:?}", e);
        "Failed to count content".to_string()
    })
}
