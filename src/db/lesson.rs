use crate::models;
use crate::services::{AppendResult, CompletionStore};
use crate::views::admin::{LessonOption, LessonRow};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

/// Lesson joined with its video asset, if any.
#[derive(Debug, sqlx::FromRow)]
pub struct LessonWithVideo {
    #[sqlx(flatten)]
    pub lesson: models::Lesson,
    pub video_playback_id: Option<String>,
    pub video_status: Option<String>,
    pub video_duration: Option<f64>,
}

pub async fn slug_taken(pool: &PgPool, slug: &str) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check lesson slug.", slug);
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM lesson WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check lesson slug: {:?}", e);
            "Failed to check lesson slug".to_string()
        })
}

/// Insert a lesson, its video asset and its module membership in one transaction.
///
/// The module append is a no-op when the lesson is already listed there.
pub async fn insert(
    pool: &PgPool,
    mut lesson: models::Lesson,
    video: Option<models::VideoAsset>,
    module_id: Option<Uuid>,
) -> Result<models::Lesson, super::InsertError> {
    let query_span = tracing::info_span!("Saving new lesson into the database", slug = %lesson.slug);
    async move {
        let mut tx = pool.begin().await.map_err(|err| {
            tracing::error!("Failed to begin transaction: {:?}", err);
            "Failed to begin transaction".to_string()
        })?;

        if let Some(video) = video {
            let stored = super::video::upsert(&mut tx, &video).await?;
            lesson.video_asset_id = Some(stored.id);
        }

        let lesson = sqlx::query_as::<_, models::Lesson>(
            r#"
            INSERT INTO lesson (id, title, slug, description, video_asset_id, content,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(lesson.id)
        .bind(&lesson.title)
        .bind(&lesson.slug)
        .bind(&lesson.description)
        .bind(lesson.video_asset_id)
        .bind(&lesson.content)
        .bind(lesson.created_at)
        .bind(lesson.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                tracing::info!("Lesson slug {} taken by a concurrent insert", lesson.slug);
                return super::InsertError::SlugTaken(lesson.slug.clone());
            }
            tracing::error!("Failed to insert lesson: {:?}", e);
            super::InsertError::Failed("Failed to insert lesson".to_string())
        })?;

        if let Some(module_id) = module_id {
            sqlx::query(
                r#"
                INSERT INTO module_lesson (module_id, lesson_id, position)
                SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
                FROM module_lesson WHERE module_id = $1
                ON CONFLICT (module_id, lesson_id) DO NOTHING
                "#,
            )
            .bind(module_id)
            .bind(lesson.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to append lesson to module: {:?}", e);
                "Failed to append lesson to module".to_string()
            })?;

            sqlx::query("UPDATE module SET updated_at = NOW() WHERE id = $1")
                .bind(module_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to touch module: {:?}", e);
                    "Failed to touch module".to_string()
                })?;
        }

        tx.commit().await.map_err(|err| {
            tracing::error!("Failed to commit transaction: {:?}", err);
            "Failed to commit transaction".to_string()
        })?;

        Ok(lesson)
    }
    .instrument(query_span)
    .await
}

pub async fn fetch_by_slug(pool: &PgPool, slug: &str) -> Result<Option<LessonWithVideo>, String> {
    let query_span = tracing::info_span!("Fetch lesson by slug.", slug);
    sqlx::query_as::<_, LessonWithVideo>(
        r#"
        SELECT l.*, v.playback_id AS video_playback_id, v.status AS video_status,
               v.duration AS video_duration
        FROM lesson l
        LEFT JOIN video_asset v ON v.id = l.video_asset_id
        WHERE l.slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch lesson: {:?}", e);
        "Failed to fetch lesson".to_string()
    })
}

/// Ids from `ids` that have no lesson row.
pub async fn missing(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Uuid>, String> {
    let query_span = tracing::info_span!("Find unknown lesson ids.");
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT ids.id FROM unnest($1::uuid[]) AS ids(id)
        WHERE NOT EXISTS (SELECT 1 FROM lesson l WHERE l.id = ids.id)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to check lessons: {:?}", e);
        "Failed to check lessons".to_string()
    })
}

/// Admin listing, newest first. `limit` of `None` returns every lesson.
pub async fn list_rows(pool: &PgPool, limit: Option<i64>) -> Result<Vec<LessonRow>, String> {
    let query_span = tracing::info_span!("List lessons for admin.");
    sqlx::query_as::<_, LessonRow>(
        r#"
        SELECT l.id, l.title, l.slug, l.created_at,
               cardinality(l.completed_by)::BIGINT AS completion_count,
               l.video_asset_id IS NOT NULL AS has_video,
               (SELECT m.title FROM module_lesson ml
                    JOIN module m ON m.id = ml.module_id
                    WHERE ml.lesson_id = l.id
                    ORDER BY m.created_at
                    LIMIT 1) AS module_title
        FROM lesson l
        ORDER BY l.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list lessons: {:?}", e);
        "Failed to list lessons".to_string()
    })
}

pub async fn options(pool: &PgPool) -> Result<Vec<LessonOption>, String> {
    let query_span = tracing::info_span!("Lesson options.");
    sqlx::query_as::<_, LessonOption>(
        r#"
        SELECT l.id, l.title,
               (SELECT ml.module_id FROM module_lesson ml
                    JOIN module m ON m.id = ml.module_id
                    WHERE ml.lesson_id = l.id
                    ORDER BY m.created_at
                    LIMIT 1) AS module_id
        FROM lesson l
        ORDER BY l.title
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch lesson options: {:?}", e);
        "Failed to fetch lesson options".to_string()
    })
}

#[async_trait::async_trait]
impl CompletionStore for PgPool {
    /// Appends in one statement: the row lock taken by `UPDATE` makes a concurrent
    /// second append re-evaluate the `NOT ANY` guard and match nothing.
    async fn append_completion(
        &self,
        lesson_id: Uuid,
        user_id: &str,
    ) -> Result<AppendResult, String> {
        let query_span = tracing::info_span!("Append lesson completion.", %lesson_id);
        let appended = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE lesson
            SET completed_by = array_append(completed_by, $2), updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(completed_by))
            RETURNING id
            "#,
        )
        .bind(lesson_id)
        .bind(user_id)
        .fetch_optional(self)
        .instrument(query_span.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to append completion: {:?}", e);
            "Failed to record completion".to_string()
        })?;

        if appended.is_some() {
            return Ok(AppendResult::Appended);
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM lesson WHERE id = $1)")
            .bind(lesson_id)
            .fetch_one(self)
            .instrument(query_span)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check lesson: {:?}", e);
                "Failed to record completion".to_string()
            })?;

        Ok(if exists {
            AppendResult::AlreadyPresent
        } else {
            AppendResult::LessonMissing
        })
    }
}
