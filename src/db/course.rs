use crate::models::{self, LessonSummary, Module, ModuleWithLessons, Reference, Tier};
use crate::views::admin::CourseRow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::convert::TryFrom;
use tracing::Instrument;
use uuid::Uuid;

/// Which courses an outline query returns.
#[derive(Debug, Clone, Copy)]
pub enum CourseFilter<'a> {
    /// Every course, newest first
    All,
    /// Featured courses, newest first, at most `n`
    Featured(i64),
    Slug(&'a str),
    /// Courses with the lesson somewhere in their module tree
    ContainingLesson(Uuid),
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRecord {
    id: Uuid,
    title: String,
    slug: String,
    description: Option<String>,
    tier: String,
    featured: bool,
    category_id: Option<Uuid>,
    category_title: Option<String>,
    thumbnail_url: Option<String>,
    completed_by: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourseRecord {
    /// Typed course plus its category reference; fails on a tier the enum does not know.
    fn into_course(self) -> Result<(models::Course, Option<Reference>), String> {
        let tier = self.tier.parse::<Tier>().map_err(|err| err.to_string())?;
        let category = match (self.category_id, self.category_title) {
            (Some(id), Some(title)) => Some(Reference { id, title }),
            _ => None,
        };
        let course = models::Course {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            tier,
            featured: self.featured,
            category_id: self.category_id,
            thumbnail_url: self.thumbnail_url,
            completed_by: self.completed_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok((course, category))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseModuleRecord {
    course_id: Uuid,
    #[sqlx(flatten)]
    module: Module,
}

#[derive(Debug, sqlx::FromRow)]
struct ModuleLessonRecord {
    module_id: Uuid,
    #[sqlx(flatten)]
    lesson: LessonSummary,
}

const COURSE_SELECT: &str = r#"
    SELECT c.id, c.title, c.slug, c.description, c.tier, c.featured, c.category_id,
           cat.title AS category_title, c.thumbnail_url, c.completed_by, c.created_at, c.updated_at
    FROM course c
    LEFT JOIN category cat ON cat.id = c.category_id
"#;

async fn fetch_records(pool: &PgPool, filter: CourseFilter<'_>) -> Result<Vec<CourseRecord>, sqlx::Error> {
    match filter {
        CourseFilter::All => {
            let sql = format!("{} ORDER BY c.created_at DESC", COURSE_SELECT);
            sqlx::query_as::<_, CourseRecord>(&sql).fetch_all(pool).await
        }
        CourseFilter::Featured(limit) => {
            let sql = format!(
                "{} WHERE c.featured ORDER BY c.created_at DESC LIMIT $1",
                COURSE_SELECT
            );
            sqlx::query_as::<_, CourseRecord>(&sql)
                .bind(limit)
                .fetch_all(pool)
                .await
        }
        CourseFilter::Slug(slug) => {
            let sql = format!("{} WHERE c.slug = $1", COURSE_SELECT);
            sqlx::query_as::<_, CourseRecord>(&sql)
                .bind(slug)
                .fetch_all(pool)
                .await
        }
        CourseFilter::ContainingLesson(lesson_id) => {
            let sql = format!(
                r#"{} WHERE EXISTS (
                    SELECT 1 FROM course_module cm
                    JOIN module_lesson ml ON ml.module_id = cm.module_id
                    WHERE cm.course_id = c.id AND ml.lesson_id = $1
                ) ORDER BY c.created_at DESC"#,
                COURSE_SELECT
            );
            sqlx::query_as::<_, CourseRecord>(&sql)
                .bind(lesson_id)
                .fetch_all(pool)
                .await
        }
    }
}

/// Courses with category and ordered module/lesson tree, in the filter's order.
pub async fn fetch_outlines(
    pool: &PgPool,
    filter: CourseFilter<'_>,
) -> Result<Vec<models::CourseOutline>, String> {
    let query_span = tracing::info_span!("Fetch course outlines.", filter = ?filter);
    async move {
        let records = fetch_records(pool, filter).await.map_err(|e| {
            tracing::error!("Failed to fetch courses: {:?}", e);
            "Failed to fetch courses".to_string()
        })?;
        if records.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        let modules = sqlx::query_as::<_, CourseModuleRecord>(
            r#"
            SELECT cm.course_id, m.id, m.title, m.description, m.completed_by, m.created_at, m.updated_at
            FROM course_module cm
            JOIN module m ON m.id = cm.module_id
            WHERE cm.course_id = ANY($1)
            ORDER BY cm.course_id, cm.position
            "#,
        )
        .bind(&course_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch course modules: {:?}", e);
            "Failed to fetch course modules".to_string()
        })?;

        let module_ids: Vec<Uuid> = modules.iter().map(|r| r.module.id).collect();
        let lessons = sqlx::query_as::<_, ModuleLessonRecord>(
            r#"
            SELECT ml.module_id, l.id, l.title, l.slug, l.description, l.completed_by,
                   v.playback_id
            FROM module_lesson ml
            JOIN lesson l ON l.id = ml.lesson_id
            LEFT JOIN video_asset v ON v.id = l.video_asset_id
            WHERE ml.module_id = ANY($1)
            ORDER BY ml.module_id, ml.position
            "#,
        )
        .bind(&module_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch module lessons: {:?}", e);
            "Failed to fetch module lessons".to_string()
        })?;

        let mut lessons_by_module: HashMap<Uuid, Vec<LessonSummary>> = HashMap::new();
        for record in lessons {
            lessons_by_module
                .entry(record.module_id)
                .or_default()
                .push(record.lesson);
        }

        let mut modules_by_course: HashMap<Uuid, Vec<ModuleWithLessons>> = HashMap::new();
        for record in modules {
            let lessons = lessons_by_module
                .get(&record.module.id)
                .cloned()
                .unwrap_or_default();
            modules_by_course
                .entry(record.course_id)
                .or_default()
                .push(ModuleWithLessons {
                    module: record.module,
                    lessons,
                });
        }

        records
            .into_iter()
            .map(|record| {
                let modules = modules_by_course.remove(&record.id).unwrap_or_default();
                let (course, category) = record.into_course()?;
                Ok(models::CourseOutline {
                    course,
                    category,
                    modules,
                })
            })
            .collect()
    }
    .instrument(query_span)
    .await
}

pub async fn fetch_outline_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<models::CourseOutline>, String> {
    Ok(fetch_outlines(pool, CourseFilter::Slug(slug))
        .await?
        .into_iter()
        .next())
}

pub async fn slug_taken(pool: &PgPool, slug: &str) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check course slug.", slug);
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM course WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check course slug: {:?}", e);
            "Failed to check course slug".to_string()
        })
}

/// Insert a course and attach its modules, in list order, within one transaction.
pub async fn insert(
    pool: &PgPool,
    course: models::Course,
    module_ids: &[Uuid],
) -> Result<models::Course, super::InsertError> {
    let query_span = tracing::info_span!("Saving new course into the database", slug = %course.slug);
    async move {
        let mut tx = pool.begin().await.map_err(|err| {
            tracing::error!("Failed to begin transaction: {:?}", err);
            "Failed to begin transaction".to_string()
        })?;

        sqlx::query(
            r#"
            INSERT INTO course (id, title, slug, description, tier, featured, category_id,
                                thumbnail_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.slug)
        .bind(&course.description)
        .bind(course.tier.as_str())
        .bind(course.featured)
        .bind(course.category_id)
        .bind(&course.thumbnail_url)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                tracing::info!("Course slug {} taken by a concurrent insert", course.slug);
                return super::InsertError::SlugTaken(course.slug.clone());
            }
            tracing::error!("Failed to insert course: {:?}", e);
            super::InsertError::Failed("Failed to insert course".to_string())
        })?;

        if !module_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO course_module (course_id, module_id, position)
                SELECT $1, ids.module_id, ids.position - 1
                FROM unnest($2::uuid[]) WITH ORDINALITY AS ids(module_id, position)
                ON CONFLICT (course_id, module_id) DO NOTHING
                "#,
            )
            .bind(course.id)
            .bind(module_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to attach modules: {:?}", e);
                "Failed to attach modules".to_string()
            })?;
        }

        tx.commit().await.map_err(|err| {
            tracing::error!("Failed to commit transaction: {:?}", err);
            "Failed to commit transaction".to_string()
        })?;

        Ok(course)
    }
    .instrument(query_span)
    .await
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRowRecord {
    id: Uuid,
    title: String,
    slug: String,
    tier: String,
    featured: bool,
    category_title: Option<String>,
    module_count: i64,
    lesson_count: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<CourseRowRecord> for CourseRow {
    type Error = String;

    fn try_from(record: CourseRowRecord) -> Result<Self, Self::Error> {
        Ok(CourseRow {
            tier: record.tier.parse::<Tier>().map_err(|err| err.to_string())?,
            id: record.id,
            title: record.title,
            slug: record.slug,
            featured: record.featured,
            category_title: record.category_title,
            module_count: record.module_count,
            lesson_count: record.lesson_count,
            created_at: record.created_at,
        })
    }
}

/// Admin listing, newest first. `limit` of `None` returns every course.
pub async fn list_rows(pool: &PgPool, limit: Option<i64>) -> Result<Vec<CourseRow>, String> {
    let query_span = tracing::info_span!("List courses for admin.");
    sqlx::query_as::<_, CourseRowRecord>(
        r#"
        SELECT c.id, c.title, c.slug, c.tier, c.featured, c.created_at,
               cat.title AS category_title,
               (SELECT COUNT(*) FROM course_module cm WHERE cm.course_id = c.id) AS module_count,
               (SELECT COUNT(*) FROM course_module cm
                    JOIN module_lesson ml ON ml.module_id = cm.module_id
                    WHERE cm.course_id = c.id) AS lesson_count
        FROM course c
        LEFT JOIN category cat ON cat.id = c.category_id
        ORDER BY c.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list courses: {:?}", e);
        "Failed to list courses".to_string()
    })?
    .into_iter()
    .map(CourseRow::try_from)
    .collect()
}
