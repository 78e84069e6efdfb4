use crate::models::Tier;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Dashboard counters and recent activity.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub courses: i64,
    pub modules: i64,
    pub lessons: i64,
    pub categories: i64,
    pub recent_courses: Vec<CourseRow>,
    pub recent_lessons: Vec<LessonRow>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub tier: Tier,
    pub featured: bool,
    pub category_title: Option<String>,
    pub module_count: i64,
    pub lesson_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub lesson_count: i64,
    pub lesson_titles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LessonRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub completion_count: i64,
    pub module_title: Option<String>,
    pub has_video: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub course_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Lesson choice in the admin forms, with the module it currently sits in.
#[derive(Debug, Serialize, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LessonOption {
    pub id: Uuid,
    pub title: String,
    pub module_id: Option<Uuid>,
}

/// Direct-upload target for the admin's browser.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoUploadTarget {
    pub url: String,
    pub upload_id: String,
}
